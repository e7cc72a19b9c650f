//! Shared state handed to every request handler

use crate::config::SiteConfig;
use crate::core::catalog::Catalog;
use crate::core::store::{ProductService, VehicleRepository};
use crate::server::render::Templates;
use std::sync::Arc;

/// Everything a handler needs to answer a request
///
/// All members are read-only after construction, so the host is shared
/// behind an `Arc` without locking.
pub struct SiteHost {
    /// Catalog accessors over the vehicle repository
    pub catalog: Catalog,

    /// Backing service for the accessory store
    pub products: Arc<dyn ProductService>,

    pub templates: Templates,

    pub config: Arc<SiteConfig>,
}

impl SiteHost {
    pub fn new(
        repository: Arc<dyn VehicleRepository>,
        products: Arc<dyn ProductService>,
        templates: Templates,
        config: SiteConfig,
    ) -> Self {
        Self {
            catalog: Catalog::new(repository),
            products,
            templates,
            config: Arc::new(config),
        }
    }

    /// Brand name shown in the navbar and page titles
    pub fn site_name(&self) -> &str {
        &self.config.site.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{InMemoryProductService, InMemoryVehicleRepository};

    #[test]
    fn test_host_wraps_repository_in_catalog() {
        let host = SiteHost::new(
            Arc::new(InMemoryVehicleRepository::seeded()),
            Arc::new(InMemoryProductService::seeded()),
            Templates::new().unwrap(),
            SiteConfig::default_config(),
        );
        assert_eq!(host.catalog.all_vehicles().len(), 8);
        assert_eq!(host.site_name(), "MARKET MOTORS");
    }
}
