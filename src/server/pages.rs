//! Server-rendered HTML pages
//!
//! Every page carries its complete view state in the request: the listing
//! page reads filters, sort and view mode from the query string and
//! recomputes its result set against the full catalog on each request.

use crate::config::FeaturedVehicle;
use crate::core::catalog::{self, Range};
use crate::core::error::{CatalogError, DealershipError, Result};
use crate::core::listing::{ListingController, ListingState, LoadState};
use crate::core::presentation::{self, SpecSheet, VehicleCard};
use crate::core::product::Product;
use crate::core::query::{ListingParams, PaginationMeta, SortKey, VehicleFilter};
use crate::core::vehicle::Vehicle;
use crate::server::host::SiteHost;
use axum::extract::{Path, Query, State};
use axum::http::{StatusCode, Uri};
use axum::response::{Html, IntoResponse, Response};
use serde::Serialize;
use std::sync::Arc;

/// Number of cards in the "similar vehicles" strip
pub const SIMILAR_LIMIT: usize = 4;

/// Which navigation bar a page shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NavContext {
    /// Main dealership pages
    Site,
    /// The accessory store under `/public`
    Store,
}

#[derive(Debug, Serialize)]
pub struct NavItem {
    pub name: &'static str,
    pub href: &'static str,
}

const SITE_NAV: &[NavItem] = &[
    NavItem {
        name: "Home",
        href: "/",
    },
    NavItem {
        name: "Vehicles",
        href: "/vehicles",
    },
    NavItem {
        name: "About",
        href: "/about",
    },
    NavItem {
        name: "Contact",
        href: "/contact",
    },
];

const STORE_NAV: &[NavItem] = &[
    NavItem {
        name: "Store",
        href: "/public",
    },
    NavItem {
        name: "Vehicles",
        href: "/vehicles",
    },
];

impl NavContext {
    pub fn items(&self) -> &'static [NavItem] {
        match self {
            NavContext::Site => SITE_NAV,
            NavContext::Store => STORE_NAV,
        }
    }
}

/// Layout fields shared by every page, plus the page body
#[derive(Serialize)]
struct Page<'a, T> {
    site_name: &'a str,
    title: String,
    nav: NavContext,
    nav_items: &'static [NavItem],
    current_path: &'a str,
    #[serde(flatten)]
    body: T,
}

impl<'a, T: Serialize> Page<'a, T> {
    fn new(
        host: &'a SiteHost,
        nav: NavContext,
        path: &'a str,
        title: String,
        body: T,
    ) -> Self {
        Self {
            site_name: host.site_name(),
            title,
            nav,
            nav_items: nav.items(),
            current_path: path,
            body,
        }
    }
}

fn render<T: Serialize>(
    host: &SiteHost,
    template: &str,
    nav: NavContext,
    path: &str,
    title: String,
    body: T,
) -> Result<Html<String>> {
    let page = Page::new(host, nav, path, title, body);
    Ok(host.templates.render(template, &page)?)
}

/// Turn a handler result into a response, rendering failures as pages
fn respond(
    host: &SiteHost,
    nav: NavContext,
    path: &str,
    result: Result<Html<String>>,
) -> Response {
    match result {
        Ok(html) => html.into_response(),
        Err(err) => error_page(host, nav, path, err),
    }
}

// =============================================================================
// Home
// =============================================================================

#[derive(Serialize)]
struct HomeView<'a> {
    tagline: &'a str,
    featured: &'a [FeaturedVehicle],
}

pub async fn home(State(host): State<Arc<SiteHost>>) -> Response {
    let body = HomeView {
        tagline: &host.config.site.tagline,
        featured: &host.config.featured,
    };
    let title = format!("{} | Vehicle Dealership", host.site_name());
    let result = render(&host, "home.html", NavContext::Site, "/", title, body);
    respond(&host, NavContext::Site, "/", result)
}

// =============================================================================
// Vehicle listing
// =============================================================================

/// Current control values, as the form should redisplay them
#[derive(Debug, Default, Serialize)]
struct FormValues {
    make: String,
    model: String,
    min_year: String,
    max_year: String,
    min_price: String,
    max_price: String,
    body_type: &'static str,
    fuel_type: &'static str,
    transmission: &'static str,
}

impl From<&VehicleFilter> for FormValues {
    fn from(filter: &VehicleFilter) -> Self {
        fn text<T: ToString>(value: Option<T>) -> String {
            value.map(|v| v.to_string()).unwrap_or_default()
        }

        Self {
            make: filter.make.clone().unwrap_or_default(),
            model: filter.model.clone().unwrap_or_default(),
            min_year: text(filter.min_year),
            max_year: text(filter.max_year),
            min_price: text(filter.min_price),
            max_price: text(filter.max_price),
            body_type: filter.body_type.map(|b| b.label()).unwrap_or_default(),
            fuel_type: filter.fuel_type.map(|f| f.label()).unwrap_or_default(),
            transmission: filter.transmission.map(|t| t.label()).unwrap_or_default(),
        }
    }
}

#[derive(Serialize)]
struct SortOption {
    value: &'static str,
    label: &'static str,
}

#[derive(Serialize)]
struct ListingView {
    form: FormValues,
    sort: &'static str,
    view: &'static str,
    makes: Vec<String>,
    models: Vec<String>,
    body_types: Vec<&'static str>,
    fuel_types: Vec<&'static str>,
    transmissions: Vec<&'static str>,
    year_range: Option<Range<u16>>,
    price_range: Option<Range<u32>>,
    sort_options: Vec<SortOption>,
    loading: bool,
    vehicles: Vec<VehicleCard>,
    count: usize,
    pagination: PaginationMeta,
}

fn listing_view(host: &SiteHost, params: &ListingParams) -> Result<ListingView> {
    let state = ListingState::from_params(params)?;
    let controller = ListingController::new(host.catalog.clone(), state);
    let loading = controller.load_state() != &LoadState::Ready;
    let (state, vehicles) = controller.into_parts();
    let options = host.catalog.filter_options();

    Ok(ListingView {
        form: FormValues::from(&state.filter),
        sort: state.sort.as_str(),
        view: state.view.as_str(),
        makes: options.makes,
        models: options.models,
        body_types: options.body_types.iter().map(|b| b.label()).collect(),
        fuel_types: options.fuel_types.iter().map(|f| f.label()).collect(),
        transmissions: options.transmissions.iter().map(|t| t.label()).collect(),
        year_range: options.year_range,
        price_range: options.price_range,
        sort_options: SortKey::ALL
            .iter()
            .map(|key| SortOption {
                value: key.as_str(),
                label: key.label(),
            })
            .collect(),
        loading,
        count: vehicles.len(),
        pagination: PaginationMeta::single_page(vehicles.len()),
        vehicles: vehicles.iter().map(VehicleCard::from).collect(),
    })
}

pub async fn vehicles(
    State(host): State<Arc<SiteHost>>,
    Query(params): Query<ListingParams>,
) -> Response {
    let result = listing_view(&host, &params).and_then(|body| {
        let title = "Browse All Cars | Car Dealership".to_string();
        render(&host, "vehicles.html", NavContext::Site, "/vehicles", title, body)
    });
    respond(&host, NavContext::Site, "/vehicles", result)
}

// =============================================================================
// Vehicle detail
// =============================================================================

#[derive(Serialize)]
struct DetailView<'a> {
    vehicle: &'a Vehicle,
    heading: String,
    price: String,
    mileage: String,
    monthly_payment: String,
    financing_months: u32,
    condition: &'static str,
    stock_number: String,
    vin: String,
    specs: SpecSheet,
    similar: Vec<VehicleCard>,
}

fn vehicle_detail_page(host: &SiteHost, raw_id: &str, path: &str) -> Result<Html<String>> {
    let id = catalog::parse_id("vehicle", raw_id)?;
    let vehicle = host.catalog.require_vehicle(id)?;
    let similar = host.catalog.similar_to(&vehicle, SIMILAR_LIMIT);

    let body = DetailView {
        vehicle: &vehicle,
        heading: vehicle.title(),
        price: presentation::format_price(vehicle.price),
        mileage: presentation::format_mileage(vehicle.mileage),
        monthly_payment: presentation::format_price(presentation::monthly_payment(
            vehicle.price,
        )),
        financing_months: presentation::FINANCING_MONTHS,
        condition: presentation::condition_label(vehicle.mileage),
        stock_number: presentation::stock_number(&vehicle),
        vin: presentation::display_vin(&vehicle),
        specs: SpecSheet::for_vehicle(&vehicle),
        similar: similar.iter().map(VehicleCard::from).collect(),
    };
    let title = format!("{} | Vehicle Dealership", vehicle.title());
    render(host, "vehicle_detail.html", NavContext::Site, path, title, body)
}

pub async fn vehicle_detail(
    State(host): State<Arc<SiteHost>>,
    Path(raw_id): Path<String>,
    uri: Uri,
) -> Response {
    let result = vehicle_detail_page(&host, &raw_id, uri.path());
    respond(&host, NavContext::Site, uri.path(), result)
}

// =============================================================================
// Accessory store
// =============================================================================

#[derive(Serialize)]
struct ProductView {
    id: u32,
    name: String,
    price: String,
    image_url: String,
    stock: u32,
}

impl From<Product> for ProductView {
    fn from(product: Product) -> Self {
        Self {
            price: product.price_label(),
            id: product.id,
            name: product.name,
            image_url: product.image_url,
            stock: product.stock,
        }
    }
}

#[derive(Serialize)]
struct StoreView {
    products: Vec<ProductView>,
}

#[derive(Serialize)]
struct ProductDetailView {
    product: ProductView,
}

pub async fn store(State(host): State<Arc<SiteHost>>) -> Response {
    let result = match host.products.active_products().await {
        Ok(products) => {
            let body = StoreView {
                products: products.into_iter().map(ProductView::from).collect(),
            };
            let title = format!("Store | {}", host.site_name());
            render(&host, "store.html", NavContext::Store, "/public", title, body)
        }
        Err(e) => Err(DealershipError::Internal(format!("{e:#}"))),
    };
    respond(&host, NavContext::Store, "/public", result)
}

async fn product_detail_page(
    host: &SiteHost,
    raw_id: &str,
    path: &str,
) -> Result<Html<String>> {
    let id = catalog::parse_id("product", raw_id)?;
    let product = host
        .products
        .get_product(id)
        .await
        .map_err(|e| DealershipError::Internal(format!("{e:#}")))?
        .ok_or(CatalogError::ProductNotFound { id })?;

    let title = format!("{} | Store", product.name);
    let body = ProductDetailView {
        product: product.into(),
    };
    render(host, "product_detail.html", NavContext::Store, path, title, body)
}

pub async fn product_detail(
    State(host): State<Arc<SiteHost>>,
    Path(raw_id): Path<String>,
    uri: Uri,
) -> Response {
    let result = product_detail_page(&host, &raw_id, uri.path()).await;
    respond(&host, NavContext::Store, uri.path(), result)
}

// =============================================================================
// Errors
// =============================================================================

#[derive(Serialize)]
struct ErrorView {
    status: u16,
    heading: String,
    message: String,
}

/// Render an error as an HTML page with the matching status code
///
/// Missing vehicles and products get their dedicated pages. If the error
/// page itself cannot be rendered, the error text is sent as plain text.
pub fn error_page(
    host: &SiteHost,
    nav: NavContext,
    path: &str,
    err: DealershipError,
) -> Response {
    let status = err.status_code();
    if status.is_server_error() {
        tracing::error!(error = %err, code = err.error_code(), path, "Request failed");
    } else {
        tracing::warn!(error = %err, code = err.error_code(), path, "Request rejected");
    }

    let (template, heading) = if err.is_not_found() {
        match &err {
            DealershipError::Catalog(
                CatalogError::VehicleNotFound { .. }
                | CatalogError::MalformedId {
                    entity_type: "vehicle",
                    ..
                },
            ) => ("vehicle_not_found.html", "Vehicle Not Found"),
            _ => ("product_not_found.html", "Product Not Found"),
        }
    } else {
        ("error.html", status.canonical_reason().unwrap_or("Error"))
    };
    let heading = heading.to_string();

    let body = ErrorView {
        status: status.as_u16(),
        heading: heading.clone(),
        message: err.to_string(),
    };
    let page = Page::new(host, nav, path, heading, body);
    match host.templates.render(template, &page) {
        Ok(html) => (status, html).into_response(),
        Err(render_err) => {
            tracing::error!(error = %render_err, "Failed to render error page");
            (status, err.to_string()).into_response()
        }
    }
}

/// Fallback for paths no route matches
pub async fn not_found(State(host): State<Arc<SiteHost>>, uri: Uri) -> Response {
    let path = uri.path();
    tracing::warn!(path, "No route for path");

    let body = ErrorView {
        status: StatusCode::NOT_FOUND.as_u16(),
        heading: "Page Not Found".to_string(),
        message: format!("Nothing lives at {path}."),
    };
    let title = "Page Not Found".to_string();
    let page = Page::new(&host, NavContext::Site, path, title, body);
    match host.templates.render("error.html", &page) {
        Ok(html) => (StatusCode::NOT_FOUND, html).into_response(),
        Err(err) => DealershipError::from(err).into_response(),
    }
}
