//! Data-access traits for the vehicle catalog and the product store
//!
//! The filter/sort engine and the catalog accessors only ever see these
//! traits, so a real backing store can replace the in-memory one without
//! touching query logic.

use crate::core::product::Product;
use crate::core::vehicle::Vehicle;
use anyhow::Result;
use async_trait::async_trait;

/// Read-only access to the vehicle catalog
///
/// Implementations hold a fixed, ordered set of vehicles. Storage order is
/// significant: it is the order of an unsorted listing and the tie-break
/// order for every sort.
pub trait VehicleRepository: Send + Sync {
    /// All vehicles in storage order
    fn list_all(&self) -> Vec<Vehicle>;

    /// The vehicle with this id, if any
    ///
    /// The default is a linear scan over [`list_all`](Self::list_all).
    fn find_by_id(&self, id: u32) -> Option<Vehicle> {
        self.list_all().into_iter().find(|v| v.id == id)
    }

    /// Number of vehicles in the catalog
    fn len(&self) -> usize {
        self.list_all().len()
    }

    /// Whether the catalog holds no vehicles
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Data access for the secondary product store
///
/// The backing store is an external collaborator; only this contract is
/// relied upon.
#[async_trait]
pub trait ProductService: Send + Sync {
    /// Products currently offered in the store
    async fn active_products(&self) -> Result<Vec<Product>>;

    /// A single product by id
    async fn get_product(&self, id: u32) -> Result<Option<Product>>;
}
