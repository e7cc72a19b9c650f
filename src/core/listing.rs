//! View-state controller for the vehicle listing
//!
//! The controller owns the current selections (filter, sort, view mode)
//! and the derived vehicle list. Every filter or sort change recomputes
//! the list from the full catalog; there is no incremental diffing.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::core::catalog::Catalog;
use crate::core::error::ValidationError;
use crate::core::query::{ListingParams, SortKey, VehicleFilter};
use crate::core::vehicle::{BodyType, FuelType, Transmission, Vehicle};

/// How results are laid out; never affects which vehicles are shown
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Grid,
    List,
}

impl ViewMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ViewMode::Grid => "grid",
            ViewMode::List => "list",
        }
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ViewMode {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "grid" => Ok(ViewMode::Grid),
            "list" => Ok(ViewMode::List),
            other => Err(ValidationError::UnknownViewMode {
                value: other.to_string(),
            }),
        }
    }
}

/// Load status of the derived list
///
/// Repositories answer synchronously, so a controller is `Ready` as soon
/// as its first computation finishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadState {
    Loading,
    Ready,
}

/// Current listing selections
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ListingState {
    pub filter: VehicleFilter,
    pub sort: SortKey,
    pub view: ViewMode,
}

impl ListingState {
    /// Parse selections from query parameters
    pub fn from_params(params: &ListingParams) -> Result<Self, ValidationError> {
        Ok(Self {
            filter: params.filter()?,
            sort: params.sort_key()?,
            view: params
                .view()
                .map(str::parse::<ViewMode>)
                .transpose()?
                .unwrap_or_default(),
        })
    }
}

/// A single edit to the listing selections
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StateChange {
    Make(Option<String>),
    Model(Option<String>),
    MinYear(Option<u16>),
    MaxYear(Option<u16>),
    MinPrice(Option<u32>),
    MaxPrice(Option<u32>),
    BodyType(Option<BodyType>),
    FuelType(Option<FuelType>),
    Transmission(Option<Transmission>),
    Sort(SortKey),
    View(ViewMode),
    /// Clear every filter and restore the default sort
    Reset,
}

/// Owns listing selections and the vehicles they select
pub struct ListingController {
    catalog: Catalog,
    state: ListingState,
    vehicles: Vec<Vehicle>,
    load: LoadState,
}

impl ListingController {
    /// Create a controller and compute its first result set
    pub fn new(catalog: Catalog, state: ListingState) -> Self {
        let mut controller = Self {
            catalog,
            state,
            vehicles: Vec::new(),
            load: LoadState::Loading,
        };
        controller.recompute();
        controller
    }

    /// Apply one change
    ///
    /// Filter, sort and reset changes recompute the result set from the
    /// full catalog. A view change only switches the layout.
    pub fn apply(&mut self, change: StateChange) -> &[Vehicle] {
        let filter = &mut self.state.filter;
        match change {
            StateChange::Make(v) => filter.make = v,
            StateChange::Model(v) => filter.model = v,
            StateChange::MinYear(v) => filter.min_year = v,
            StateChange::MaxYear(v) => filter.max_year = v,
            StateChange::MinPrice(v) => filter.min_price = v,
            StateChange::MaxPrice(v) => filter.max_price = v,
            StateChange::BodyType(v) => filter.body_type = v,
            StateChange::FuelType(v) => filter.fuel_type = v,
            StateChange::Transmission(v) => filter.transmission = v,
            StateChange::Sort(sort) => self.state.sort = sort,
            StateChange::View(view) => {
                self.state.view = view;
                return &self.vehicles;
            }
            StateChange::Reset => {
                self.state.filter = VehicleFilter::default();
                self.state.sort = SortKey::default();
            }
        }

        self.recompute();
        &self.vehicles
    }

    /// Clear every filter and restore price-ascending order
    pub fn reset(&mut self) -> &[Vehicle] {
        self.apply(StateChange::Reset)
    }

    fn recompute(&mut self) {
        self.vehicles = self.catalog.query(&self.state.filter, self.state.sort);
        self.load = LoadState::Ready;
    }

    pub fn state(&self) -> &ListingState {
        &self.state
    }

    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    pub fn load_state(&self) -> &LoadState {
        &self.load
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Consume the controller, keeping the selections and results
    pub fn into_parts(self) -> (ListingState, Vec<Vehicle>) {
        (self.state, self.vehicles)
    }
}
