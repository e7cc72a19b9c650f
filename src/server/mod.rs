//! HTTP surface of the dealership site
//!
//! The `ServerBuilder` assembles a [`SiteHost`] (catalog, product service,
//! templates and configuration) and exposes it through:
//! - server-rendered HTML pages
//! - a JSON API mirroring the listing and detail pages
//! - health check routes

pub mod api;
pub mod builder;
pub mod host;
pub mod pages;
pub mod render;
pub mod router;

pub use builder::ServerBuilder;
pub use host::SiteHost;
pub use pages::NavContext;
pub use render::Templates;
