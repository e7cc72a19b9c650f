//! # Dealership
//!
//! A server-rendered vehicle dealership site: homepage, filterable vehicle
//! listing, vehicle detail pages and a small accessory store.
//!
//! ## Features
//!
//! - **Filter/Sort Engine**: AND-combined criteria with inclusive bounds and
//!   five stable sort orders, recomputed from the full catalog per request
//! - **Repository Abstraction**: pages and the JSON API only see
//!   [`VehicleRepository`](core::store::VehicleRepository) and
//!   [`ProductService`](core::store::ProductService)
//! - **Typed Parameters**: closed enums for body type, fuel type,
//!   transmission and sort key; unknown values are rejected with 400
//! - **Configuration-Based**: YAML site config with environment overrides
//!   and optional catalog files
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use dealership::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = SiteConfig::load()?;
//!     let addr = config.bind_addr();
//!
//!     ServerBuilder::new()
//!         .with_config(config)
//!         .serve(&addr)
//!         .await
//! }
//! ```

pub mod config;
pub mod core;
pub mod server;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Domain ===
    pub use crate::core::{
        catalog::{Catalog, FilterOptions, Range},
        listing::{ListingController, ListingState, LoadState, StateChange, ViewMode},
        product::Product,
        query::{
            ListingParams, SortKey, VehicleFilter, apply_filters, apply_sort, filter_and_sort,
        },
        store::{ProductService, VehicleRepository},
        vehicle::{BodyType, FuelType, Transmission, Vehicle},
    };

    // === Errors ===
    pub use crate::core::error::{
        CatalogError, ConfigError, DealershipError, RenderError, ValidationError,
    };

    // === Storage ===
    pub use crate::storage::{InMemoryProductService, InMemoryVehicleRepository};

    // === Config ===
    pub use crate::config::{FeaturedVehicle, SiteConfig};

    // === Server ===
    pub use crate::server::{NavContext, ServerBuilder, SiteHost};

    // === External dependencies ===
    pub use async_trait::async_trait;
    pub use serde::{Deserialize, Serialize};
}
