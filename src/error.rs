//! Catalog error types with HTTP status code mapping.
//!
//! [`CatalogError`] is the central error type of the service. Each variant
//! maps to a specific HTTP status code and, except for server faults, a
//! JSON body of the form `{"detail": ...}`.

use std::fmt;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::FieldError;

/// Message reported when a store's `(name, address)` pair is taken.
pub const STORE_CONFLICT: &str = "Store with this name and address already exists.";

/// Message reported when the database rejects a new product.
pub const PRODUCT_CONFLICT: &str = "Product creation error.";

/// JSON body for 404 and 400 responses.
///
/// ```json
/// { "detail": "Store not found." }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Human-readable error message.
    pub detail: String,
}

/// JSON body for 422 responses: one entry per invalid input.
///
/// ```json
/// { "detail": [{ "loc": ["body", "price"], "msg": "Input should be greater than 0", "type": "greater_than" }] }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ValidationErrorResponse {
    /// Failing inputs.
    pub detail: Vec<FieldError>,
}

/// Entity kinds that can be reported as missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    /// A store.
    Store,
    /// A product.
    Product,
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Store => f.write_str("Store"),
            Self::Product => f.write_str("Product"),
        }
    }
}

/// Server-side error enum with HTTP status code mapping.
///
/// | Variant       | HTTP Status                 |
/// |---------------|-----------------------------|
/// | `Validation`  | 422 Unprocessable Entity    |
/// | `NotFound`    | 404 Not Found               |
/// | `Conflict`    | 400 Bad Request             |
/// | `Persistence` | 500 Internal Server Error   |
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// Request input failed structural validation.
    #[error("invalid request: {} field(s) rejected", .0.len())]
    Validation(Vec<FieldError>),

    /// A referenced entity does not exist.
    #[error("{0} not found.")]
    NotFound(Entity),

    /// The database rejected a write on a uniqueness or referential
    /// constraint.
    #[error("{0}")]
    Conflict(String),

    /// Database unavailable or failed unexpectedly.
    #[error("persistence error: {0}")]
    Persistence(String),
}

impl CatalogError {
    /// Returns the HTTP status code for this variant.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::BAD_REQUEST,
            Self::Persistence(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<FieldError> for CatalogError {
    fn from(error: FieldError) -> Self {
        Self::Validation(vec![error])
    }
}

impl IntoResponse for CatalogError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match self {
            Self::Validation(detail) => {
                (status, axum::Json(ValidationErrorResponse { detail })).into_response()
            }
            Self::NotFound(_) | Self::Conflict(_) => {
                let body = ErrorResponse {
                    detail: self.to_string(),
                };
                (status, axum::Json(body)).into_response()
            }
            Self::Persistence(_) => {
                tracing::error!(error = %self, "request failed");
                (status, "Internal Server Error").into_response()
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::Location;
    use axum::body::to_bytes;

    async fn body_json(response: Response) -> serde_json::Value {
        let Ok(bytes) = to_bytes(response.into_body(), usize::MAX).await else {
            panic!("failed to read body");
        };
        let Ok(value) = serde_json::from_slice(&bytes) else {
            panic!("body is not JSON");
        };
        value
    }

    #[tokio::test]
    async fn not_found_is_404_with_entity_detail() {
        let response = CatalogError::NotFound(Entity::Store).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = body_json(response).await;
        assert_eq!(body, serde_json::json!({ "detail": "Store not found." }));
    }

    #[tokio::test]
    async fn conflict_is_400() {
        let response = CatalogError::Conflict(STORE_CONFLICT.to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["detail"], STORE_CONFLICT);
    }

    #[tokio::test]
    async fn validation_is_422_with_field_list() {
        let err = CatalogError::Validation(vec![
            FieldError::missing(Location::Body, "name"),
            FieldError::missing(Location::Body, "address"),
        ]);
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let body = body_json(response).await;
        let Some(detail) = body["detail"].as_array() else {
            panic!("detail should be a list");
        };
        assert_eq!(detail.len(), 2);
        assert_eq!(body["detail"][1]["loc"], serde_json::json!(["body", "address"]));
    }

    #[tokio::test]
    async fn persistence_is_500_without_detail() {
        let response = CatalogError::Persistence("connection refused".into()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let Ok(bytes) = to_bytes(response.into_body(), usize::MAX).await else {
            panic!("failed to read body");
        };
        assert_eq!(bytes.as_ref(), b"Internal Server Error".as_slice());
    }

    #[test]
    fn entity_display() {
        assert_eq!(CatalogError::NotFound(Entity::Product).to_string(), "Product not found.");
    }
}
