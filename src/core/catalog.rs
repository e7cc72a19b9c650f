//! Catalog accessors over a vehicle repository

use indexmap::IndexSet;
use serde::Serialize;
use std::hash::Hash;
use std::sync::Arc;

use crate::core::error::CatalogError;
use crate::core::query::{self, SortKey, VehicleFilter};
use crate::core::store::VehicleRepository;
use crate::core::vehicle::{BodyType, FuelType, Transmission, Vehicle};

/// Inclusive numeric range over a catalog field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Range<T> {
    pub min: T,
    pub max: T,
}

/// Everything the listing sidebar needs to populate its controls
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterOptions {
    pub makes: Vec<String>,
    pub models: Vec<String>,
    pub body_types: Vec<BodyType>,
    pub fuel_types: Vec<FuelType>,
    pub transmissions: Vec<Transmission>,
    /// Absent when the catalog is empty
    pub year_range: Option<Range<u16>>,
    /// Absent when the catalog is empty
    pub price_range: Option<Range<u32>>,
}

/// Read-only queries over the vehicle catalog
///
/// Every query works on a fresh snapshot from the repository; results are
/// newly allocated and the repository is never modified.
#[derive(Clone)]
pub struct Catalog {
    repository: Arc<dyn VehicleRepository>,
}

impl Catalog {
    pub fn new(repository: Arc<dyn VehicleRepository>) -> Self {
        Self { repository }
    }

    /// The full catalog in storage order
    pub fn all_vehicles(&self) -> Vec<Vehicle> {
        self.repository.list_all()
    }

    /// Look up a vehicle; `None` for any id not in the catalog
    pub fn vehicle_by_id(&self, id: u32) -> Option<Vehicle> {
        self.repository.find_by_id(id)
    }

    /// Look up a vehicle, reporting a miss as [`CatalogError::VehicleNotFound`]
    pub fn require_vehicle(&self, id: u32) -> Result<Vehicle, CatalogError> {
        self.vehicle_by_id(id).ok_or(CatalogError::VehicleNotFound { id })
    }

    pub fn unique_makes(&self) -> Vec<String> {
        distinct(&self.all_vehicles(), |v| v.make.clone())
    }

    pub fn unique_models(&self) -> Vec<String> {
        distinct(&self.all_vehicles(), |v| v.model.clone())
    }

    pub fn unique_body_types(&self) -> Vec<BodyType> {
        distinct(&self.all_vehicles(), |v| v.body_type)
    }

    pub fn unique_fuel_types(&self) -> Vec<FuelType> {
        distinct(&self.all_vehicles(), |v| v.fuel_type)
    }

    pub fn unique_transmissions(&self) -> Vec<Transmission> {
        distinct(&self.all_vehicles(), |v| v.transmission)
    }

    /// Oldest and newest model year
    pub fn year_range(&self) -> Result<Range<u16>, CatalogError> {
        min_max(&self.all_vehicles(), |v| v.year)
            .ok_or(CatalogError::Empty { field: "year" })
    }

    /// Lowest and highest price
    pub fn price_range(&self) -> Result<Range<u32>, CatalogError> {
        min_max(&self.all_vehicles(), |v| v.price)
            .ok_or(CatalogError::Empty { field: "price" })
    }

    /// Sidebar options in one pass over a single snapshot
    pub fn filter_options(&self) -> FilterOptions {
        let vehicles = self.all_vehicles();
        FilterOptions {
            makes: distinct(&vehicles, |v| v.make.clone()),
            models: distinct(&vehicles, |v| v.model.clone()),
            body_types: distinct(&vehicles, |v| v.body_type),
            fuel_types: distinct(&vehicles, |v| v.fuel_type),
            transmissions: distinct(&vehicles, |v| v.transmission),
            year_range: min_max(&vehicles, |v| v.year),
            price_range: min_max(&vehicles, |v| v.price),
        }
    }

    /// Vehicles matching every criterion, in storage order
    pub fn filtered(&self, filter: &VehicleFilter) -> Vec<Vehicle> {
        query::apply_filters(&self.all_vehicles(), filter)
    }

    /// Vehicles matching every criterion, ordered by `sort`
    pub fn query(&self, filter: &VehicleFilter, sort: SortKey) -> Vec<Vehicle> {
        let vehicles = self.all_vehicles();
        let result = query::filter_and_sort(&vehicles, filter, sort);
        tracing::debug!(
            catalog = vehicles.len(),
            matched = result.len(),
            sort = %sort,
            "Recomputed vehicle listing"
        );
        result
    }

    /// Other vehicles sharing the body type or the make, in storage order
    pub fn similar_to(&self, vehicle: &Vehicle, limit: usize) -> Vec<Vehicle> {
        self.all_vehicles()
            .into_iter()
            .filter(|v| v.id != vehicle.id)
            .filter(|v| {
                v.body_type == vehicle.body_type || query::eq_ignore_case(&v.make, &vehicle.make)
            })
            .take(limit)
            .collect()
    }
}

/// Parse a record id taken from a URL path
pub fn parse_id(entity_type: &'static str, raw: &str) -> Result<u32, CatalogError> {
    raw.parse().map_err(|_| CatalogError::MalformedId {
        entity_type,
        value: raw.to_string(),
    })
}

/// Distinct values in first-occurrence order
fn distinct<T, F>(vehicles: &[Vehicle], field: F) -> Vec<T>
where
    T: Hash + Eq,
    F: Fn(&Vehicle) -> T,
{
    vehicles
        .iter()
        .map(field)
        .collect::<IndexSet<T>>()
        .into_iter()
        .collect()
}

fn min_max<T, F>(vehicles: &[Vehicle], field: F) -> Option<Range<T>>
where
    T: Ord + Copy,
    F: Fn(&Vehicle) -> T,
{
    let min = vehicles.iter().map(&field).min()?;
    let max = vehicles.iter().map(&field).max()?;
    Some(Range { min, max })
}
