//! In-memory implementations of the catalog repository and product service

use crate::core::error::{CatalogError, ConfigError, DealershipError};
use crate::core::product::Product;
use crate::core::store::{ProductService, VehicleRepository};
use crate::core::vehicle::Vehicle;
use crate::storage::seed;
use anyhow::Result;
use async_trait::async_trait;
use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;
use validator::Validate;

/// In-memory vehicle catalog
///
/// The vehicle list is fixed at construction and shared read-only between
/// clones, so it can be handed to every request without locking.
#[derive(Clone, Debug)]
pub struct InMemoryVehicleRepository {
    vehicles: Arc<[Vehicle]>,
}

impl InMemoryVehicleRepository {
    /// Build a repository from an explicit vehicle list
    ///
    /// Every record is validated: ids must be positive and unique, make
    /// and model non-empty, and each vehicle needs at least one image.
    pub fn new(vehicles: Vec<Vehicle>) -> Result<Self, CatalogError> {
        validate_catalog(&vehicles)?;
        tracing::debug!(count = vehicles.len(), "Loaded vehicle catalog");
        Ok(Self {
            vehicles: vehicles.into(),
        })
    }

    /// The repository the site ships with
    pub fn seeded() -> Self {
        Self {
            vehicles: seed::vehicles().into(),
        }
    }

    /// Load a catalog file
    ///
    /// `.json` files are parsed as JSON, anything else as YAML. The file
    /// holds a list of vehicle records using the camelCase field names of
    /// the JSON API.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, DealershipError> {
        let path = path.as_ref();
        let shown = path.display().to_string();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: shown.clone(),
            source,
        })?;

        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        let vehicles: Vec<Vehicle> = if is_json {
            serde_json::from_str(&content).map_err(|e| parse_error(&shown, e))?
        } else {
            serde_yaml::from_str(&content).map_err(|e| parse_error(&shown, e))?
        };

        tracing::info!(path = %shown, "Loading vehicle catalog from file");
        Ok(Self::new(vehicles)?)
    }
}

impl Default for InMemoryVehicleRepository {
    fn default() -> Self {
        Self::seeded()
    }
}

impl VehicleRepository for InMemoryVehicleRepository {
    fn list_all(&self) -> Vec<Vehicle> {
        self.vehicles.to_vec()
    }

    fn find_by_id(&self, id: u32) -> Option<Vehicle> {
        self.vehicles.iter().find(|v| v.id == id).cloned()
    }

    fn len(&self) -> usize {
        self.vehicles.len()
    }
}

fn parse_error(file: &str, err: impl std::fmt::Display) -> ConfigError {
    ConfigError::Parse {
        file: Some(file.to_string()),
        message: err.to_string(),
    }
}

fn validate_catalog(vehicles: &[Vehicle]) -> Result<(), CatalogError> {
    let mut seen = HashSet::with_capacity(vehicles.len());

    for vehicle in vehicles {
        vehicle
            .validate()
            .map_err(|errors| CatalogError::InvalidRecord {
                id: vehicle.id,
                message: errors.to_string(),
            })?;

        if !seen.insert(vehicle.id) {
            return Err(CatalogError::DuplicateId { id: vehicle.id });
        }
    }

    Ok(())
}

/// In-memory product service
///
/// Stands in for the store's external backing service during development
/// and in tests.
#[derive(Clone, Debug)]
pub struct InMemoryProductService {
    products: Arc<[Product]>,
}

impl InMemoryProductService {
    /// Create a service over the given products
    ///
    /// Records that fail validation are skipped with a warning.
    pub fn new(products: Vec<Product>) -> Self {
        let products: Vec<Product> = products
            .into_iter()
            .filter(|product| match product.validate() {
                Ok(()) => true,
                Err(errors) => {
                    tracing::warn!(id = product.id, %errors, "Skipping invalid product");
                    false
                }
            })
            .collect();

        Self {
            products: products.into(),
        }
    }

    /// The sample accessory list
    pub fn seeded() -> Self {
        Self::new(seed::products())
    }
}

impl Default for InMemoryProductService {
    fn default() -> Self {
        Self::seeded()
    }
}

#[async_trait]
impl ProductService for InMemoryProductService {
    async fn active_products(&self) -> Result<Vec<Product>> {
        Ok(self
            .products
            .iter()
            .filter(|p| p.is_active())
            .cloned()
            .collect())
    }

    async fn get_product(&self, id: u32) -> Result<Option<Product>> {
        Ok(self.products.iter().find(|p| p.id == id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_catalog_is_valid() {
        let repo = InMemoryVehicleRepository::new(seed::vehicles()).unwrap();
        assert_eq!(repo.len(), 8);
        assert!(!repo.is_empty());
    }

    #[test]
    fn test_find_by_id() {
        let repo = InMemoryVehicleRepository::seeded();
        assert_eq!(repo.find_by_id(8).unwrap().model, "Bolt EV");
        assert!(repo.find_by_id(0).is_none());
        assert!(repo.find_by_id(99).is_none());
    }

    #[test]
    fn test_duplicate_ids_are_rejected() {
        let mut vehicles = seed::vehicles();
        vehicles[3].id = 1;
        let err = InMemoryVehicleRepository::new(vehicles).unwrap_err();
        assert_eq!(err, CatalogError::DuplicateId { id: 1 });
    }

    #[test]
    fn test_record_without_images_is_rejected() {
        let mut vehicles = seed::vehicles();
        vehicles[0].images.clear();
        let err = InMemoryVehicleRepository::new(vehicles).unwrap_err();
        assert!(matches!(err, CatalogError::InvalidRecord { id: 1, .. }));
    }

    #[test]
    fn test_zero_id_is_rejected() {
        let mut vehicles = seed::vehicles();
        vehicles[0].id = 0;
        assert!(InMemoryVehicleRepository::new(vehicles).is_err());
    }

    #[test]
    fn test_empty_catalog_is_allowed() {
        let repo = InMemoryVehicleRepository::new(vec![]).unwrap();
        assert!(repo.is_empty());
    }

    #[tokio::test]
    async fn test_product_service_filters_out_of_stock() {
        let service = InMemoryProductService::seeded();
        let active = service.active_products().await.unwrap();
        assert_eq!(active.len(), 3);
        assert!(active.iter().all(Product::is_active));

        // Out-of-stock products can still be fetched directly
        assert_eq!(service.get_product(4).await.unwrap().unwrap().stock, 0);
        assert!(service.get_product(42).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_invalid_products_are_skipped() {
        let mut products = seed::products();
        products[0].name.clear();
        let service = InMemoryProductService::new(products);

        assert!(service.get_product(1).await.unwrap().is_none());
        assert_eq!(service.active_products().await.unwrap().len(), 2);
    }
}
