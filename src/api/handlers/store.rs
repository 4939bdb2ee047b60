//! Store handlers: list, create, update, and list a store's products.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, put};
use axum::{Json, Router};

use crate::api::extract::{IdPath, ValidJson};
use crate::app_state::AppState;
use crate::domain::{NewStore, Product, Store, StoreId};
use crate::error::{CatalogError, ErrorResponse, ValidationErrorResponse};

/// `GET /stores` — List all stores.
///
/// # Errors
///
/// Returns [`CatalogError`] on internal failures.
#[utoipa::path(
    get,
    path = "/stores",
    tag = "Stores",
    summary = "List stores",
    description = "Returns every store in insertion order.",
    responses(
        (status = 200, description = "All stores", body = Vec<Store>),
    )
)]
pub async fn list_stores(State(state): State<AppState>) -> Result<Json<Vec<Store>>, CatalogError> {
    Ok(Json(state.catalog.list_stores().await?))
}

/// `POST /stores` — Create a store.
///
/// # Errors
///
/// Returns [`CatalogError::Conflict`] if the `(name, address)` pair is
/// already taken.
#[utoipa::path(
    post,
    path = "/stores",
    tag = "Stores",
    summary = "Create a store",
    description = "Creates a store. Name and address are trimmed; the pair must be unique.",
    request_body = NewStore,
    responses(
        (status = 201, description = "Store created", body = Store),
        (status = 400, description = "Name and address already used", body = ErrorResponse),
        (status = 422, description = "Invalid body", body = ValidationErrorResponse),
    )
)]
pub async fn create_store(
    State(state): State<AppState>,
    ValidJson(draft): ValidJson<NewStore>,
) -> Result<impl IntoResponse, CatalogError> {
    let store = state.catalog.create_store(&draft).await?;
    Ok((StatusCode::CREATED, Json(store)))
}

/// `PUT /stores/{store_id}` — Replace a store's name and address.
///
/// # Errors
///
/// Returns [`CatalogError::NotFound`] if the store does not exist and
/// [`CatalogError::Conflict`] if another store uses the new pair.
#[utoipa::path(
    put,
    path = "/stores/{store_id}",
    tag = "Stores",
    summary = "Update a store",
    description = "Replaces the name and address of an existing store. The id never changes.",
    params(
        ("store_id" = i64, Path, description = "Store id"),
    ),
    request_body = NewStore,
    responses(
        (status = 200, description = "Store updated", body = Store),
        (status = 400, description = "Name and address used by another store", body = ErrorResponse),
        (status = 404, description = "Store not found", body = ErrorResponse),
        (status = 422, description = "Invalid id or body", body = ValidationErrorResponse),
    )
)]
pub async fn update_store(
    State(state): State<AppState>,
    IdPath(store_id): IdPath<StoreId>,
    ValidJson(draft): ValidJson<NewStore>,
) -> Result<Json<Store>, CatalogError> {
    Ok(Json(state.catalog.update_store(store_id, &draft).await?))
}

/// `GET /stores/{store_id}/products` — List the products of one store.
///
/// # Errors
///
/// Returns [`CatalogError::NotFound`] if the store does not exist.
#[utoipa::path(
    get,
    path = "/stores/{store_id}/products",
    tag = "Stores",
    summary = "List a store's products",
    description = "Returns the products owned by an existing store.",
    params(
        ("store_id" = i64, Path, description = "Store id"),
    ),
    responses(
        (status = 200, description = "Products of the store", body = Vec<Product>),
        (status = 404, description = "Store not found", body = ErrorResponse),
        (status = 422, description = "Invalid id", body = ValidationErrorResponse),
    )
)]
pub async fn store_products(
    State(state): State<AppState>,
    IdPath(store_id): IdPath<StoreId>,
) -> Result<Json<Vec<Product>>, CatalogError> {
    Ok(Json(state.catalog.store_products(store_id).await?))
}

/// Store routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/stores", get(list_stores).post(create_store))
        .route("/stores/{store_id}", put(update_store))
        .route("/stores/{store_id}/products", get(store_products))
}
