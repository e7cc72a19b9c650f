//! JSON mirror of the listing and detail pages
//!
//! The API accepts the same query parameters as `/vehicles` and runs the
//! same filter/sort engine, so a page and its API call always agree.

use crate::core::catalog::{self, FilterOptions};
use crate::core::error::Result;
use crate::core::listing::{ListingController, ListingState};
use crate::core::presentation::{self, SpecSheet};
use crate::core::query::{ListingParams, PaginationMeta, SortKey};
use crate::core::vehicle::Vehicle;
use crate::server::host::SiteHost;
use crate::server::pages::SIMILAR_LIMIT;
use axum::Json;
use axum::extract::{Path, Query, State};
use serde::Serialize;
use std::sync::Arc;

/// Response for `GET /api/vehicles`
#[derive(Debug, Serialize)]
pub struct VehicleListResponse {
    pub data: Vec<Vehicle>,
    pub meta: PaginationMeta,
    pub sort: SortKey,
}

/// Response for `GET /api/vehicles/{id}`
#[derive(Debug, Serialize)]
pub struct VehicleDetailResponse {
    pub data: Vehicle,
    pub specs: SpecSheet,
    pub monthly_payment: u32,
    pub condition: &'static str,
    pub stock_number: String,
    pub vin: String,
    pub similar: Vec<u32>,
}

#[derive(Debug, Serialize)]
pub struct SortKeyOption {
    pub value: SortKey,
    pub label: &'static str,
}

/// Response for `GET /api/vehicles/options`
#[derive(Debug, Serialize)]
pub struct OptionsResponse {
    #[serde(flatten)]
    pub options: FilterOptions,
    pub sort_keys: Vec<SortKeyOption>,
}

pub async fn list_vehicles(
    State(host): State<Arc<SiteHost>>,
    Query(params): Query<ListingParams>,
) -> Result<Json<VehicleListResponse>> {
    let state = ListingState::from_params(&params)?;
    let sort = state.sort;
    let (_, data) = ListingController::new(host.catalog.clone(), state).into_parts();

    Ok(Json(VehicleListResponse {
        meta: PaginationMeta::single_page(data.len()),
        data,
        sort,
    }))
}

pub async fn get_vehicle(
    State(host): State<Arc<SiteHost>>,
    Path(raw_id): Path<String>,
) -> Result<Json<VehicleDetailResponse>> {
    let id = catalog::parse_id("vehicle", &raw_id)?;
    let vehicle = host.catalog.require_vehicle(id)?;

    Ok(Json(VehicleDetailResponse {
        specs: SpecSheet::for_vehicle(&vehicle),
        monthly_payment: presentation::monthly_payment(vehicle.price),
        condition: presentation::condition_label(vehicle.mileage),
        stock_number: presentation::stock_number(&vehicle),
        vin: presentation::display_vin(&vehicle),
        similar: host
            .catalog
            .similar_to(&vehicle, SIMILAR_LIMIT)
            .iter()
            .map(|v| v.id)
            .collect(),
        data: vehicle,
    }))
}

pub async fn filter_options(State(host): State<Arc<SiteHost>>) -> Json<OptionsResponse> {
    Json(OptionsResponse {
        options: host.catalog.filter_options(),
        sort_keys: SortKey::ALL
            .iter()
            .map(|key| SortKeyOption {
                value: *key,
                label: key.label(),
            })
            .collect(),
    })
}
