//! Typed error handling for the dealership site
//!
//! Errors are grouped by category so that handlers can decide how to
//! surface them: not-found lookups become a dedicated page (or a 404 JSON
//! body on the API), rejected query parameters become 400 responses, and
//! everything else is an internal fault.
//!
//! # Error Categories
//!
//! - [`CatalogError`]: lookups and catalog integrity
//! - [`ValidationError`]: rejected filter, sort or view parameters
//! - [`ConfigError`]: configuration and catalog file loading
//! - [`RenderError`]: template rendering

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

/// Crate-wide result alias
pub type Result<T, E = DealershipError> = std::result::Result<T, E>;

/// The main error type for the dealership site
#[derive(Debug, Error)]
pub enum DealershipError {
    /// Catalog lookups and integrity
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// Rejected request parameters
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Configuration errors
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Template rendering errors
    #[error(transparent)]
    Render(#[from] RenderError),

    /// Anything else (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response body for JSON endpoints
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl DealershipError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            DealershipError::Catalog(e) => e.status_code(),
            DealershipError::Validation(_) => StatusCode::BAD_REQUEST,
            DealershipError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            DealershipError::Render(_) => StatusCode::INTERNAL_SERVER_ERROR,
            DealershipError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            DealershipError::Catalog(e) => e.error_code(),
            DealershipError::Validation(e) => e.error_code(),
            DealershipError::Config(_) => "CONFIG_ERROR",
            DealershipError::Render(_) => "RENDER_ERROR",
            DealershipError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Whether this error is a missing vehicle or product
    pub fn is_not_found(&self) -> bool {
        self.status_code() == StatusCode::NOT_FOUND
    }

    /// Convert to an error response
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            code: self.error_code().to_string(),
            message: self.to_string(),
            details: self.details(),
        }
    }

    fn details(&self) -> Option<serde_json::Value> {
        match self {
            DealershipError::Catalog(CatalogError::VehicleNotFound { id }) => {
                Some(serde_json::json!({ "entity_type": "vehicle", "id": id }))
            }
            DealershipError::Catalog(CatalogError::ProductNotFound { id }) => {
                Some(serde_json::json!({ "entity_type": "product", "id": id }))
            }
            DealershipError::Catalog(CatalogError::MalformedId { entity_type, value }) => {
                Some(serde_json::json!({ "entity_type": entity_type, "id": value }))
            }
            DealershipError::Validation(ValidationError::UnknownVariant { field, value })
            | DealershipError::Validation(ValidationError::InvalidNumber { field, value }) => {
                Some(serde_json::json!({ "field": field, "value": value }))
            }
            _ => None,
        }
    }
}

impl IntoResponse for DealershipError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, code = self.error_code(), "Request failed");
        } else {
            tracing::warn!(error = %self, code = self.error_code(), "Request rejected");
        }
        let body = Json(self.to_response());
        (status, body).into_response()
    }
}

// =============================================================================
// Catalog Errors
// =============================================================================

/// Errors raised by catalog lookups and catalog loading
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// No vehicle carries this id
    #[error("Vehicle not found: {id}")]
    VehicleNotFound { id: u32 },

    /// No product carries this id
    #[error("Product not found: {id}")]
    ProductNotFound { id: u32 },

    /// A path id that is not a positive integer
    #[error("Invalid {entity_type} id '{value}'")]
    MalformedId {
        entity_type: &'static str,
        value: String,
    },

    /// A min/max reduction was requested over an empty catalog
    #[error("Catalog is empty: no {field} range available")]
    Empty { field: &'static str },

    /// Two records share an id
    #[error("Duplicate vehicle id {id} in catalog")]
    DuplicateId { id: u32 },

    /// A record breaks a catalog invariant
    #[error("Invalid catalog record {id}: {message}")]
    InvalidRecord { id: u32, message: String },
}

impl CatalogError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            CatalogError::VehicleNotFound { .. }
            | CatalogError::ProductNotFound { .. }
            | CatalogError::MalformedId { .. } => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            CatalogError::VehicleNotFound { .. } => "VEHICLE_NOT_FOUND",
            CatalogError::ProductNotFound { .. } => "PRODUCT_NOT_FOUND",
            CatalogError::MalformedId { .. } => "INVALID_ID",
            CatalogError::Empty { .. } => "CATALOG_EMPTY",
            CatalogError::DuplicateId { .. } => "CATALOG_DUPLICATE_ID",
            CatalogError::InvalidRecord { .. } => "CATALOG_INVALID_RECORD",
        }
    }
}

// =============================================================================
// Validation Errors
// =============================================================================

/// Rejected listing parameters
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A value outside a closed set (body type, fuel type, transmission)
    #[error("Unknown {field} '{value}'")]
    UnknownVariant { field: &'static str, value: String },

    /// A numeric bound that does not parse
    #[error("Invalid number for {field}: '{value}'")]
    InvalidNumber { field: &'static str, value: String },

    /// A sort key outside the supported set
    #[error("Unknown sort key '{value}'")]
    UnknownSortKey { value: String },

    /// A view mode other than grid or list
    #[error("Unknown view mode '{value}'")]
    UnknownViewMode { value: String },
}

impl ValidationError {
    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            ValidationError::UnknownVariant { .. } => "UNKNOWN_VARIANT",
            ValidationError::InvalidNumber { .. } => "INVALID_NUMBER",
            ValidationError::UnknownSortKey { .. } => "UNKNOWN_SORT_KEY",
            ValidationError::UnknownViewMode { .. } => "UNKNOWN_VIEW_MODE",
        }
    }
}

// =============================================================================
// Config Errors
// =============================================================================

/// Errors related to configuration and catalog file loading
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The file could not be parsed
    #[error("Failed to parse {}: {message}", file.as_deref().unwrap_or("<inline>"))]
    Parse {
        file: Option<String>,
        message: String,
    },

    /// A setting holds an unusable value
    #[error("Invalid value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

// =============================================================================
// Render Errors
// =============================================================================

/// Template rendering failures
#[derive(Debug, Error)]
pub enum RenderError {
    /// Tera failed to load or render a template
    #[error("Template error in {template}: {message}")]
    Template { template: String, message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vehicle_not_found_is_404() {
        let err = DealershipError::from(CatalogError::VehicleNotFound { id: 99 });
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(err.error_code(), "VEHICLE_NOT_FOUND");
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "Vehicle not found: 99");
    }

    #[test]
    fn test_validation_is_400_with_details() {
        let err = DealershipError::from(ValidationError::UnknownVariant {
            field: "fuel_type",
            value: "Steam".to_string(),
        });
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);

        let response = err.to_response();
        assert_eq!(response.code, "UNKNOWN_VARIANT");
        let details = response.details.unwrap();
        assert_eq!(details["field"], "fuel_type");
        assert_eq!(details["value"], "Steam");
    }

    #[test]
    fn test_malformed_id_is_404() {
        let err = DealershipError::from(CatalogError::MalformedId {
            entity_type: "vehicle",
            value: "abc".to_string(),
        });
        assert!(err.is_not_found());
        assert_eq!(err.error_code(), "INVALID_ID");
        assert_eq!(err.to_response().details.unwrap()["id"], "abc");
    }

    #[test]
    fn test_empty_catalog_is_internal() {
        let err = DealershipError::from(CatalogError::Empty { field: "price" });
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_parse_error_without_file() {
        let err = ConfigError::Parse {
            file: None,
            message: "bad indent".to_string(),
        };
        assert_eq!(err.to_string(), "Failed to parse <inline>: bad indent");
    }
}
