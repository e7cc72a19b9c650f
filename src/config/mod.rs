//! Site configuration loading and management
//!
//! Configuration is read from a YAML file and then adjusted from the
//! environment:
//!
//! | Variable             | Setting            |
//! |----------------------|--------------------|
//! | `DEALERSHIP_CONFIG`  | config file path   |
//! | `DEALERSHIP_HOST`    | `server.host`      |
//! | `DEALERSHIP_PORT`    | `server.port`      |
//! | `DEALERSHIP_CATALOG` | `catalog.path`     |
//!
//! `RUST_LOG`, when set, takes precedence over `logging.filter`.

use crate::core::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable naming the config file
pub const CONFIG_ENV: &str = "DEALERSHIP_CONFIG";
pub const HOST_ENV: &str = "DEALERSHIP_HOST";
pub const PORT_ENV: &str = "DEALERSHIP_PORT";
pub const CATALOG_ENV: &str = "DEALERSHIP_CATALOG";

/// Listening address
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
        }
    }
}

/// Branding shown in the navbar and page titles
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteInfo {
    pub name: String,
    pub tagline: String,
}

impl Default for SiteInfo {
    fn default() -> Self {
        Self {
            name: "MARKET MOTORS".to_string(),
            tagline: "Find Your Perfect Drive".to_string(),
        }
    }
}

/// Default log filter, used when `RUST_LOG` is unset
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info,tower_http=debug".to_string(),
        }
    }
}

/// Where the vehicle catalog comes from
///
/// Without a path the built-in seed catalog is served.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    pub path: Option<PathBuf>,
}

/// A homepage highlight
///
/// Featured entries are editorial content and are not checked against
/// the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeaturedVehicle {
    pub id: u32,
    pub name: String,
    pub price: String,
    #[serde(default = "default_image")]
    pub image: String,
}

fn default_image() -> String {
    "/placeholder.svg".to_string()
}

/// Complete configuration for the site
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteConfig {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub site: SiteInfo,

    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Homepage highlights, in display order
    #[serde(default = "default_featured")]
    pub featured: Vec<FeaturedVehicle>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self::default_config()
    }
}

impl SiteConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let shown = path.display().to_string();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: shown.clone(),
            source,
        })?;

        serde_yaml::from_str(&content).map_err(|e| ConfigError::Parse {
            file: Some(shown),
            message: e.to_string(),
        })
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(yaml).map_err(|e| ConfigError::Parse {
            file: None,
            message: e.to_string(),
        })
    }

    /// Load from `DEALERSHIP_CONFIG` if set, else defaults, then apply
    /// environment overrides
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = match std::env::var_os(CONFIG_ENV) {
            Some(path) => Self::from_yaml_file(PathBuf::from(path))?,
            None => Self::default_config(),
        };
        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Apply overrides from the process environment
    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from any key lookup
    ///
    /// Empty values are ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(host) = lookup(HOST_ENV) {
            self.server.host = host;
        }
        if let Some(port) = lookup(PORT_ENV) {
            self.server.port = port.trim().parse().map_err(|_| ConfigError::InvalidValue {
                key: PORT_ENV.to_string(),
                message: format!("'{port}' is not a valid port"),
            })?;
        }
        if let Some(path) = lookup(CATALOG_ENV) {
            self.catalog.path = Some(PathBuf::from(path));
        }

        Ok(())
    }

    /// `host:port` for binding
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// The built-in configuration
    pub fn default_config() -> Self {
        Self {
            server: ServerConfig::default(),
            site: SiteInfo::default(),
            logging: LoggingConfig::default(),
            catalog: CatalogConfig::default(),
            featured: default_featured(),
        }
    }
}

fn default_featured() -> Vec<FeaturedVehicle> {
    [
        (1, "Tesla Model 3", "$39,990"),
        (2, "Ford Mustang", "$27,205"),
        (3, "Toyota Camry", "$25,945"),
    ]
    .into_iter()
    .map(|(id, name, price)| FeaturedVehicle {
        id,
        name: name.to_string(),
        price: price.to_string(),
        image: default_image(),
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_default_config() {
        let config = SiteConfig::default_config();
        assert_eq!(config.site.name, "MARKET MOTORS");
        assert_eq!(config.bind_addr(), "127.0.0.1:3000");
        assert!(config.catalog.path.is_none());
        assert_eq!(config.featured.len(), 3);
        assert_eq!(config.featured[1].name, "Ford Mustang");
        assert_eq!(config.featured[2].price, "$25,945");
    }

    #[test]
    fn test_partial_yaml_fills_defaults() {
        let yaml = r#"
server:
  port: 8080
site:
  name: "Harbor Autos"
"#;
        let config = SiteConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.site.name, "Harbor Autos");
        assert_eq!(config.site.tagline, "Find Your Perfect Drive");
        assert_eq!(config.featured, SiteConfig::default_config().featured);
    }

    #[test]
    fn test_featured_override() {
        let yaml = r#"
featured:
  - id: 5
    name: "BMW 3 Series"
    price: "$42,000"
"#;
        let config = SiteConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(config.featured.len(), 1);
        assert_eq!(config.featured[0].image, "/placeholder.svg");
    }

    #[test]
    fn test_invalid_yaml() {
        let err = SiteConfig::from_yaml_str("server: [unclosed").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { file: None, .. }));
    }

    #[test]
    fn test_from_yaml_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "catalog:\n  path: /srv/catalog.yaml").unwrap();

        let config = SiteConfig::from_yaml_file(file.path()).unwrap();
        assert_eq!(
            config.catalog.path.as_deref(),
            Some(Path::new("/srv/catalog.yaml"))
        );
    }

    #[test]
    fn test_missing_file() {
        let err = SiteConfig::from_yaml_file("/nonexistent/dealership.yaml").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_overrides() {
        let vars = env(&[
            (HOST_ENV, "0.0.0.0"),
            (PORT_ENV, "9090"),
            (CATALOG_ENV, "catalog.json"),
        ]);
        let mut config = SiteConfig::default_config();
        config.apply_overrides(|k| vars.get(k).cloned()).unwrap();

        assert_eq!(config.bind_addr(), "0.0.0.0:9090");
        assert_eq!(config.catalog.path, Some(PathBuf::from("catalog.json")));
    }

    #[test]
    fn test_empty_override_is_ignored() {
        let vars = env(&[(HOST_ENV, ""), (PORT_ENV, "  ")]);
        let mut config = SiteConfig::default_config();
        config.apply_overrides(|k| vars.get(k).cloned()).unwrap();
        assert_eq!(config.bind_addr(), "127.0.0.1:3000");
    }

    #[test]
    fn test_bad_port_override() {
        let vars = env(&[(PORT_ENV, "eighty")]);
        let mut config = SiteConfig::default_config();
        let err = config.apply_overrides(|k| vars.get(k).cloned()).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }
}
