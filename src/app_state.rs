//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use crate::service::CatalogService;

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Catalog service for all store and product operations.
    pub catalog: Arc<CatalogService>,
}

impl AppState {
    /// Wraps `catalog` for sharing across handlers.
    #[must_use]
    pub fn new(catalog: CatalogService) -> Self {
        Self {
            catalog: Arc::new(catalog),
        }
    }
}
