//! Core domain: vehicle records, the filter/sort engine and the listing
//! controller

pub mod catalog;
pub mod error;
pub mod listing;
pub mod presentation;
pub mod product;
pub mod query;
pub mod store;
pub mod vehicle;

pub use catalog::{Catalog, FilterOptions, Range};
pub use error::{
    CatalogError, ConfigError, DealershipError, ErrorResponse, RenderError, ValidationError,
};
pub use listing::{ListingController, ListingState, LoadState, StateChange, ViewMode};
pub use product::Product;
pub use query::{ListingParams, SortKey, VehicleFilter};
pub use store::{ProductService, VehicleRepository};
pub use vehicle::{BodyType, FuelType, Transmission, Vehicle};
