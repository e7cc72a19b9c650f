//! Route table for the site
//!
//! - `GET /` - homepage
//! - `GET /vehicles` - filterable listing
//! - `GET /vehicles/{id}` - vehicle detail
//! - `GET /public` - accessory store
//! - `GET /public/products/{id}` - product detail
//! - `GET /api/vehicles`, `/api/vehicles/options`, `/api/vehicles/{id}` - JSON
//! - `GET /health`, `/healthz` - liveness
//!
//! Anything else renders the 404 page.

use crate::server::host::SiteHost;
use crate::server::{api, pages};
use axum::{Json, Router, routing::get};
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

/// Build the complete router with state and request tracing attached
pub fn build_router(host: Arc<SiteHost>, custom_routes: Vec<Router>) -> Router {
    let mut app = page_routes()
        .merge(api_routes())
        .fallback(pages::not_found)
        .with_state(host)
        .merge(health_routes());

    for custom_router in custom_routes {
        app = app.merge(custom_router);
    }

    app.layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
}

fn page_routes() -> Router<Arc<SiteHost>> {
    Router::new()
        .route("/", get(pages::home))
        .route("/vehicles", get(pages::vehicles))
        .route("/vehicles/{id}", get(pages::vehicle_detail))
        .route("/public", get(pages::store))
        .route("/public/products/{id}", get(pages::product_detail))
}

fn api_routes() -> Router<Arc<SiteHost>> {
    Router::new()
        .route("/api/vehicles", get(api::list_vehicles))
        .route("/api/vehicles/options", get(api::filter_options))
        .route("/api/vehicles/{id}", get(api::get_vehicle))
}

/// Build health check routes
fn health_routes() -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/healthz", get(health_check))
}

/// Health check endpoint handler
async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "dealership"
    }))
}
