//! OpenAPI document for the REST surface.

use utoipa::OpenApi;

use super::handlers::{product, store, system};
use crate::domain::{FieldError, NewProduct, NewStore, Product, Store};
use crate::error::{ErrorResponse, ValidationErrorResponse};

/// Aggregated OpenAPI description of every endpoint.
#[derive(Debug, OpenApi)]
#[openapi(
    info(
        title = "store-catalog",
        description = "Stores and the products they sell."
    ),
    paths(
        store::list_stores,
        store::create_store,
        store::update_store,
        store::store_products,
        product::list_products,
        product::create_product,
        product::delete_product,
        system::health_handler,
    ),
    components(schemas(
        Store,
        NewStore,
        Product,
        NewProduct,
        FieldError,
        ErrorResponse,
        ValidationErrorResponse,
        system::HealthResponse,
    )),
    tags(
        (name = "Stores", description = "Store management"),
        (name = "Products", description = "Product management"),
        (name = "System", description = "Service health"),
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_every_route() {
        let doc = ApiDoc::openapi();
        let paths: Vec<_> = doc.paths.paths.keys().map(String::as_str).collect();
        for expected in [
            "/stores",
            "/stores/{store_id}",
            "/stores/{store_id}/products",
            "/products",
            "/products/{product_id}",
            "/health",
        ] {
            assert!(paths.contains(&expected), "missing {expected}");
        }
    }
}
