use anyhow::Result;
use dealership::config::SiteConfig;
use dealership::server::ServerBuilder;
use tracing_subscriber::{EnvFilter, fmt};

#[tokio::main]
async fn main() -> Result<()> {
    let config = SiteConfig::load()?;

    // RUST_LOG wins over the configured default
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.logging.filter))?;
    fmt().with_env_filter(filter).with_target(false).init();

    tracing::info!(
        site = %config.site.name,
        catalog = ?config.catalog.path,
        featured = config.featured.len(),
        "Starting dealership site"
    );

    let addr = config.bind_addr();
    ServerBuilder::new().with_config(config).serve(&addr).await
}
