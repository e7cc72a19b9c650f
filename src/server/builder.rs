//! ServerBuilder for fluent construction of the site

use super::host::SiteHost;
use super::render::Templates;
use super::router::build_router;
use crate::config::SiteConfig;
use crate::core::store::{ProductService, VehicleRepository};
use crate::storage::{InMemoryProductService, InMemoryVehicleRepository};
use anyhow::Result;
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;

/// Builder for the dealership site
///
/// Anything not supplied falls back to a default: the configuration to
/// [`SiteConfig::default_config`], the vehicle repository to the catalog
/// file named in the configuration (or the built-in seed catalog), and
/// the product service to the in-memory sample store.
///
/// # Example
///
/// ```ignore
/// let app = ServerBuilder::new()
///     .with_config(SiteConfig::load()?)
///     .with_product_service(MyProductBackend::connect().await?)
///     .build()?;
/// ```
pub struct ServerBuilder {
    config: Option<SiteConfig>,
    vehicle_repository: Option<Arc<dyn VehicleRepository>>,
    product_service: Option<Arc<dyn ProductService>>,
    custom_routes: Vec<Router>,
}

impl ServerBuilder {
    /// Create a new ServerBuilder
    pub fn new() -> Self {
        Self {
            config: None,
            vehicle_repository: None,
            product_service: None,
            custom_routes: Vec::new(),
        }
    }

    pub fn with_config(mut self, config: SiteConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Serve vehicles from this repository instead of the configured one
    pub fn with_vehicle_repository(
        mut self,
        repository: impl VehicleRepository + 'static,
    ) -> Self {
        self.vehicle_repository = Some(Arc::new(repository));
        self
    }

    pub fn with_product_service(mut self, service: impl ProductService + 'static) -> Self {
        self.product_service = Some(Arc::new(service));
        self
    }

    /// Add routes outside the dealership surface (e.g. `/about`)
    ///
    /// Custom routes are merged after the built-in ones and must not
    /// overlap them.
    pub fn with_custom_routes(mut self, routes: Router) -> Self {
        self.custom_routes.push(routes);
        self
    }

    /// Build the shared host
    ///
    /// Fails if the configured catalog file cannot be loaded or the
    /// templates do not compile.
    pub fn build_host(&mut self) -> Result<SiteHost> {
        let config = self.config.take().unwrap_or_default();

        let repository = match self.vehicle_repository.take() {
            Some(repository) => repository,
            None => match &config.catalog.path {
                Some(path) => Arc::new(InMemoryVehicleRepository::from_file(path)?),
                None => Arc::new(InMemoryVehicleRepository::seeded()),
            },
        };

        let products = self
            .product_service
            .take()
            .unwrap_or_else(|| Arc::new(InMemoryProductService::seeded()));

        let templates = Templates::new()?;
        tracing::debug!(vehicles = repository.len(), "Site host ready");

        Ok(SiteHost::new(repository, products, templates, config))
    }

    /// Build the final router
    pub fn build(mut self) -> Result<Router> {
        let host = Arc::new(self.build_host()?);
        let custom_routes = std::mem::take(&mut self.custom_routes);
        Ok(build_router(host, custom_routes))
    }

    /// Serve the site with graceful shutdown
    ///
    /// This will:
    /// - Bind to the provided address
    /// - Start serving requests
    /// - Handle SIGTERM and SIGINT (Ctrl+C) for graceful shutdown
    ///
    /// # Example
    ///
    /// ```ignore
    /// ServerBuilder::new()
    ///     .with_config(config)
    ///     .serve("127.0.0.1:3000").await?;
    /// ```
    pub async fn serve(self, addr: &str) -> Result<()> {
        let app = self.build()?;
        let listener = TcpListener::bind(addr).await?;

        tracing::info!("Server listening on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Resolves on Ctrl+C or SIGTERM
///
/// If a handler cannot be installed the failure is logged and that signal
/// is never reported.
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal, initiating graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal, initiating graceful shutdown...");
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::product::Product;
    use crate::storage::seed;
    use std::io::Write;

    #[test]
    fn test_defaults_use_seed_data() {
        let host = ServerBuilder::new().build_host().unwrap();
        assert_eq!(host.catalog.all_vehicles().len(), 8);
        assert_eq!(host.site_name(), "MARKET MOTORS");
    }

    #[test]
    fn test_explicit_repository_wins_over_config() {
        let mut config = SiteConfig::default_config();
        config.catalog.path = Some("/nonexistent/catalog.yaml".into());

        let vehicles = seed::vehicles().into_iter().take(2).collect();
        let host = ServerBuilder::new()
            .with_config(config)
            .with_vehicle_repository(InMemoryVehicleRepository::new(vehicles).unwrap())
            .build_host()
            .unwrap();
        assert_eq!(host.catalog.all_vehicles().len(), 2);
    }

    #[test]
    fn test_catalog_file_from_config() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        let vehicles: Vec<_> = seed::vehicles().into_iter().skip(5).collect();
        write!(file, "{}", serde_json::to_string(&vehicles).unwrap()).unwrap();

        let mut config = SiteConfig::default_config();
        config.catalog.path = Some(file.path().to_path_buf());

        let host = ServerBuilder::new().with_config(config).build_host().unwrap();
        let ids: Vec<u32> = host.catalog.all_vehicles().iter().map(|v| v.id).collect();
        assert_eq!(ids, vec![6, 7, 8]);
    }

    #[test]
    fn test_missing_catalog_file_fails_build() {
        let mut config = SiteConfig::default_config();
        config.catalog.path = Some("/nonexistent/catalog.yaml".into());

        let result = ServerBuilder::new().with_config(config).build();
        assert!(result.is_err());
    }

    #[test]
    fn test_custom_product_service() {
        let service = InMemoryProductService::new(vec![Product {
            id: 10,
            name: "Wiper Blades".to_string(),
            price: 24.0,
            image_url: "/placeholder.svg".to_string(),
            stock: 3,
        }]);
        let host = ServerBuilder::new()
            .with_product_service(service)
            .build_host()
            .unwrap();

        let products = tokio_test::block_on(host.products.active_products()).unwrap();
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].name, "Wiper Blades");
    }
}
