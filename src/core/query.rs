//! Filter and sort engine for vehicle listings
//!
//! A listing is derived in two steps: every vehicle is tested against all
//! supplied criteria (logical AND), then the survivors are ordered by a
//! single [`SortKey`]. The input slice is never mutated.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::core::error::ValidationError;
use crate::core::vehicle::{BodyType, FuelType, Transmission, Vehicle};

/// Optional criteria for a listing
///
/// `None` imposes no constraint. Numeric bounds are inclusive, and
/// `Some(0)` is a real bound rather than "absent".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VehicleFilter {
    /// Case-insensitive exact make
    pub make: Option<String>,
    /// Case-insensitive exact model
    pub model: Option<String>,
    pub min_year: Option<u16>,
    pub max_year: Option<u16>,
    pub min_price: Option<u32>,
    pub max_price: Option<u32>,
    pub body_type: Option<BodyType>,
    pub fuel_type: Option<FuelType>,
    pub transmission: Option<Transmission>,
}

impl VehicleFilter {
    /// A filter with no constraints
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether no criterion is set
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Whether the vehicle satisfies every supplied criterion
    pub fn matches(&self, vehicle: &Vehicle) -> bool {
        if self
            .make
            .as_deref()
            .is_some_and(|make| !eq_ignore_case(&vehicle.make, make))
        {
            return false;
        }
        if self
            .model
            .as_deref()
            .is_some_and(|model| !eq_ignore_case(&vehicle.model, model))
        {
            return false;
        }
        if self.min_year.is_some_and(|min| vehicle.year < min) {
            return false;
        }
        if self.max_year.is_some_and(|max| vehicle.year > max) {
            return false;
        }
        if self.min_price.is_some_and(|min| vehicle.price < min) {
            return false;
        }
        if self.max_price.is_some_and(|max| vehicle.price > max) {
            return false;
        }

        self.body_type.is_none_or(|b| vehicle.body_type == b)
            && self.fuel_type.is_none_or(|f| vehicle.fuel_type == f)
            && self.transmission.is_none_or(|t| vehicle.transmission == t)
    }
}

/// Case-insensitive name comparison shared by filtering and similarity
pub(crate) fn eq_ignore_case(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

/// Listing order
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    /// Price ascending
    #[default]
    PriceLow,
    /// Price descending
    PriceHigh,
    /// Newest model year first
    YearNew,
    /// Oldest model year first
    YearOld,
    /// Mileage ascending
    MileageLow,
}

impl SortKey {
    /// Every sort key, in the order the sort control lists them
    pub const ALL: &'static [SortKey] = &[
        SortKey::PriceLow,
        SortKey::PriceHigh,
        SortKey::YearNew,
        SortKey::YearOld,
        SortKey::MileageLow,
    ];

    /// Wire value (`price-low`, ...)
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::PriceLow => "price-low",
            SortKey::PriceHigh => "price-high",
            SortKey::YearNew => "year-new",
            SortKey::YearOld => "year-old",
            SortKey::MileageLow => "mileage-low",
        }
    }

    /// Label for the sort control
    pub fn label(&self) -> &'static str {
        match self {
            SortKey::PriceLow => "Price: Low to High",
            SortKey::PriceHigh => "Price: High to Low",
            SortKey::YearNew => "Year: Newest First",
            SortKey::YearOld => "Year: Oldest First",
            SortKey::MileageLow => "Mileage: Low to High",
        }
    }

    /// Order two vehicles by this key
    pub fn compare(&self, a: &Vehicle, b: &Vehicle) -> std::cmp::Ordering {
        match self {
            SortKey::PriceLow => a.price.cmp(&b.price),
            SortKey::PriceHigh => b.price.cmp(&a.price),
            SortKey::YearNew => b.year.cmp(&a.year),
            SortKey::YearOld => a.year.cmp(&b.year),
            SortKey::MileageLow => a.mileage.cmp(&b.mileage),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortKey::ALL
            .iter()
            .copied()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| ValidationError::UnknownSortKey {
                value: s.to_string(),
            })
    }
}

/// Keep the vehicles that satisfy every criterion, in input order
pub fn apply_filters(vehicles: &[Vehicle], filter: &VehicleFilter) -> Vec<Vehicle> {
    vehicles
        .iter()
        .filter(|v| filter.matches(v))
        .cloned()
        .collect()
}

/// Order vehicles by `sort`; equal keys keep their input order
pub fn apply_sort(mut vehicles: Vec<Vehicle>, sort: SortKey) -> Vec<Vehicle> {
    vehicles.sort_by(|a, b| sort.compare(a, b));
    vehicles
}

/// Filter, then sort
pub fn filter_and_sort(
    vehicles: &[Vehicle],
    filter: &VehicleFilter,
    sort: SortKey,
) -> Vec<Vehicle> {
    apply_sort(apply_filters(vehicles, filter), sort)
}

/// Raw listing parameters as they arrive in a query string
///
/// Every field is optional and an empty string means "no constraint",
/// which is what an "All ..." select option or a cleared number input
/// submits.
///
/// # Example
/// ```text
/// GET /vehicles?body_type=SUV&max_price=30000&sort=price-high&view=list
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ListingParams {
    pub make: Option<String>,
    pub model: Option<String>,
    pub min_year: Option<String>,
    pub max_year: Option<String>,
    pub min_price: Option<String>,
    pub max_price: Option<String>,
    pub body_type: Option<String>,
    pub fuel_type: Option<String>,
    pub transmission: Option<String>,
    pub sort: Option<String>,
    pub view: Option<String>,
}

impl ListingParams {
    /// Parse the filter criteria
    ///
    /// Values outside a closed set and numbers that do not parse are
    /// rejected rather than ignored.
    pub fn filter(&self) -> Result<VehicleFilter, ValidationError> {
        Ok(VehicleFilter {
            make: present(&self.make).map(str::to_string),
            model: present(&self.model).map(str::to_string),
            min_year: parse_number("min_year", &self.min_year)?,
            max_year: parse_number("max_year", &self.max_year)?,
            min_price: parse_number("min_price", &self.min_price)?,
            max_price: parse_number("max_price", &self.max_price)?,
            body_type: present(&self.body_type)
                .map(str::parse::<BodyType>)
                .transpose()?,
            fuel_type: present(&self.fuel_type)
                .map(str::parse::<FuelType>)
                .transpose()?,
            transmission: present(&self.transmission)
                .map(str::parse::<Transmission>)
                .transpose()?,
        })
    }

    /// Parse the sort key, defaulting to price ascending
    pub fn sort_key(&self) -> Result<SortKey, ValidationError> {
        present(&self.sort)
            .map(str::parse::<SortKey>)
            .transpose()
            .map(Option::unwrap_or_default)
    }

    /// The raw view mode, if one was supplied
    pub fn view(&self) -> Option<&str> {
        present(&self.view)
    }
}

/// A trimmed, non-empty parameter value
fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

fn parse_number<T: FromStr>(
    field: &'static str,
    value: &Option<String>,
) -> Result<Option<T>, ValidationError> {
    present(value)
        .map(|raw| {
            raw.parse::<T>().map_err(|_| ValidationError::InvalidNumber {
                field,
                value: raw.to_string(),
            })
        })
        .transpose()
}

/// Pagination metadata
///
/// Listings are never split; this always describes a single page so the
/// page bar renders with both directions disabled.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct PaginationMeta {
    /// Current page number (starts at 1)
    pub page: usize,

    /// Total number of items (after filters)
    pub total: usize,

    /// Total number of pages
    pub total_pages: usize,

    /// Whether there is a next page
    pub has_next: bool,

    /// Whether there is a previous page
    pub has_prev: bool,
}

impl PaginationMeta {
    /// Metadata for a listing shown on one page
    pub fn single_page(total: usize) -> Self {
        Self {
            page: 1,
            total,
            total_pages: if total == 0 { 0 } else { 1 },
            has_next: false,
            has_prev: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::seed;

    fn ids(vehicles: &[Vehicle]) -> Vec<u32> {
        vehicles.iter().map(|v| v.id).collect()
    }

    #[test]
    fn test_empty_filter_keeps_catalog_order() {
        let all = seed::vehicles();
        let result = apply_filters(&all, &VehicleFilter::new());
        assert_eq!(ids(&result), vec![1, 2, 3, 4, 5, 6, 7, 8]);
    }

    #[test]
    fn test_suv_sorted_by_price_low() {
        let filter = VehicleFilter {
            body_type: Some(BodyType::Suv),
            ..Default::default()
        };
        let result = filter_and_sort(&seed::vehicles(), &filter, SortKey::PriceLow);
        assert_eq!(ids(&result), vec![7, 2, 6]);
    }

    #[test]
    fn test_electric_under_35k() {
        let filter = VehicleFilter {
            fuel_type: Some(FuelType::Electric),
            max_price: Some(35_000),
            ..Default::default()
        };
        let result = apply_filters(&seed::vehicles(), &filter);
        assert_eq!(ids(&result), vec![8]);
    }

    #[test]
    fn test_make_is_case_insensitive() {
        let filter = VehicleFilter {
            make: Some("toyota".to_string()),
            ..Default::default()
        };
        assert_eq!(ids(&apply_filters(&seed::vehicles(), &filter)), vec![1, 6]);
    }

    #[test]
    fn test_model_is_exact_not_substring() {
        let filter = VehicleFilter {
            model: Some("RAV4".to_string()),
            ..Default::default()
        };
        assert!(apply_filters(&seed::vehicles(), &filter).is_empty());
    }

    #[test]
    fn test_zero_bounds_are_real_bounds() {
        let zero_max = VehicleFilter {
            max_price: Some(0),
            ..Default::default()
        };
        assert!(apply_filters(&seed::vehicles(), &zero_max).is_empty());

        let zero_min = VehicleFilter {
            min_year: Some(0),
            ..Default::default()
        };
        assert_eq!(apply_filters(&seed::vehicles(), &zero_min).len(), 8);
    }

    #[test]
    fn test_bounds_are_inclusive() {
        let filter = VehicleFilter {
            min_price: Some(27_999),
            max_price: Some(28_500),
            ..Default::default()
        };
        assert_eq!(ids(&apply_filters(&seed::vehicles(), &filter)), vec![2, 7]);
    }

    #[test]
    fn test_year_sorts_keep_ties_in_filtered_order() {
        let result = apply_sort(seed::vehicles(), SortKey::YearNew);
        assert_eq!(ids(&result), vec![3, 1, 6, 8, 2, 5, 7, 4]);

        let result = apply_sort(seed::vehicles(), SortKey::YearOld);
        assert_eq!(ids(&result), vec![4, 2, 5, 7, 1, 6, 8, 3]);
    }

    #[test]
    fn test_price_high_is_reverse_of_price_low() {
        let mut low = apply_sort(seed::vehicles(), SortKey::PriceLow);
        low.reverse();
        let high = apply_sort(seed::vehicles(), SortKey::PriceHigh);
        assert_eq!(ids(&low), ids(&high));
    }

    #[test]
    fn test_mileage_low() {
        let result = apply_sort(seed::vehicles(), SortKey::MileageLow);
        assert_eq!(ids(&result), vec![3, 8, 6, 1, 5, 2, 7, 4]);
    }

    #[test]
    fn test_sort_key_wire_names() {
        for key in SortKey::ALL {
            assert_eq!(key.as_str().parse::<SortKey>().unwrap(), *key);
        }
        assert_eq!(
            "cheapest".parse::<SortKey>().unwrap_err(),
            ValidationError::UnknownSortKey {
                value: "cheapest".to_string()
            }
        );
    }

    #[test]
    fn test_params_blank_values_mean_no_constraint() {
        let params = ListingParams {
            make: Some(String::new()),
            min_price: Some("  ".to_string()),
            body_type: Some(String::new()),
            sort: Some(String::new()),
            ..Default::default()
        };
        assert!(params.filter().unwrap().is_empty());
        assert_eq!(params.sort_key().unwrap(), SortKey::PriceLow);
    }

    #[test]
    fn test_params_parse_typed_filter() {
        let params = ListingParams {
            make: Some("Honda".to_string()),
            min_year: Some("2021".to_string()),
            max_price: Some("30000".to_string()),
            body_type: Some("SUV".to_string()),
            transmission: Some("Automatic".to_string()),
            sort: Some("year-old".to_string()),
            ..Default::default()
        };
        let filter = params.filter().unwrap();
        assert_eq!(filter.make.as_deref(), Some("Honda"));
        assert_eq!(filter.min_year, Some(2021));
        assert_eq!(filter.max_price, Some(30_000));
        assert_eq!(filter.body_type, Some(BodyType::Suv));
        assert_eq!(filter.transmission, Some(Transmission::Automatic));
        assert_eq!(params.sort_key().unwrap(), SortKey::YearOld);
    }

    #[test]
    fn test_params_reject_bad_values() {
        let params = ListingParams {
            min_price: Some("cheap".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            params.filter(),
            Err(ValidationError::InvalidNumber { field: "min_price", .. })
        ));

        let params = ListingParams {
            min_price: Some("-5".to_string()),
            ..Default::default()
        };
        assert!(params.filter().is_err());

        let params = ListingParams {
            fuel_type: Some("Steam".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            params.filter(),
            Err(ValidationError::UnknownVariant { field: "fuel_type", .. })
        ));
    }

    #[test]
    fn test_pagination_single_page() {
        let meta = PaginationMeta::single_page(3);
        assert_eq!(meta.total_pages, 1);
        assert!(!meta.has_next);
        assert!(!meta.has_prev);
        assert_eq!(PaginationMeta::single_page(0).total_pages, 0);
    }
}
