//! Product handlers: list, create, delete.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{delete, get};
use axum::{Json, Router};

use crate::api::dto::ProductFilterParams;
use crate::api::extract::{IdPath, StoreFilter, ValidJson};
use crate::app_state::AppState;
use crate::domain::{NewProduct, Product, ProductId};
use crate::error::{CatalogError, ErrorResponse, ValidationErrorResponse};

/// `GET /products` — List products, optionally for one store.
///
/// An unknown `store_id` yields an empty list rather than a 404.
///
/// # Errors
///
/// Returns [`CatalogError`] on internal failures.
#[utoipa::path(
    get,
    path = "/products",
    tag = "Products",
    summary = "List products",
    description = "Returns all products, or only those whose store_id equals the filter.",
    params(ProductFilterParams),
    responses(
        (status = 200, description = "Matching products", body = Vec<Product>),
        (status = 422, description = "Invalid store_id", body = ValidationErrorResponse),
    )
)]
pub async fn list_products(
    State(state): State<AppState>,
    StoreFilter(store_id): StoreFilter,
) -> Result<Json<Vec<Product>>, CatalogError> {
    Ok(Json(state.catalog.list_products(store_id).await?))
}

/// `POST /products` — Create a product in an existing store.
///
/// # Errors
///
/// Returns [`CatalogError::NotFound`] if the store does not exist.
#[utoipa::path(
    post,
    path = "/products",
    tag = "Products",
    summary = "Create a product",
    description = "Creates a product. The price must be positive and the store must exist.",
    request_body = NewProduct,
    responses(
        (status = 201, description = "Product created", body = Product),
        (status = 400, description = "Rejected by the database", body = ErrorResponse),
        (status = 404, description = "Store not found", body = ErrorResponse),
        (status = 422, description = "Invalid body", body = ValidationErrorResponse),
    )
)]
pub async fn create_product(
    State(state): State<AppState>,
    ValidJson(draft): ValidJson<NewProduct>,
) -> Result<impl IntoResponse, CatalogError> {
    let product = state.catalog.create_product(&draft).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// `DELETE /products/{product_id}` — Remove a product.
///
/// # Errors
///
/// Returns [`CatalogError::NotFound`] if the product does not exist.
#[utoipa::path(
    delete,
    path = "/products/{product_id}",
    tag = "Products",
    summary = "Delete a product",
    description = "Permanently removes a product.",
    params(
        ("product_id" = i64, Path, description = "Product id"),
    ),
    responses(
        (status = 204, description = "Product deleted"),
        (status = 404, description = "Product not found", body = ErrorResponse),
        (status = 422, description = "Invalid id", body = ValidationErrorResponse),
    )
)]
pub async fn delete_product(
    State(state): State<AppState>,
    IdPath(product_id): IdPath<ProductId>,
) -> Result<StatusCode, CatalogError> {
    state.catalog.delete_product(product_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Product routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/products", get(list_products).post(create_product))
        .route("/products/{product_id}", delete(delete_product))
}
