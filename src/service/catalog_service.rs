//! Catalog service: orchestrates store and product operations.

use std::sync::Arc;

use crate::domain::{NewProduct, NewStore, Product, ProductId, Store, StoreId};
use crate::error::CatalogError;
use crate::persistence::CatalogRepository;

/// Orchestration layer for all catalog operations.
///
/// Stateless coordinator: inputs arrive already validated, every call is
/// forwarded to the repository, and successful writes are logged with the
/// ids they touched.
#[derive(Debug, Clone)]
pub struct CatalogService {
    repository: Arc<dyn CatalogRepository>,
}

impl CatalogService {
    /// Creates a new `CatalogService` over `repository`.
    #[must_use]
    pub fn new(repository: Arc<dyn CatalogRepository>) -> Self {
        Self { repository }
    }

    /// Returns `true` if the backend answers a round-trip.
    pub async fn is_healthy(&self) -> bool {
        match self.repository.ping().await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(error = %e, "health check failed");
                false
            }
        }
    }

    /// Lists all stores in insertion order.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] on backend failure.
    pub async fn list_stores(&self) -> Result<Vec<Store>, CatalogError> {
        self.repository.list_stores().await
    }

    /// Creates a store.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Conflict`] if `(name, address)` is taken.
    pub async fn create_store(&self, draft: &NewStore) -> Result<Store, CatalogError> {
        let store = self
            .repository
            .create_store(draft)
            .await
            .inspect_err(|e| log_rejection(e, "create_store"))?;
        tracing::info!(store_id = %store.id, name = %store.name, "store created");
        Ok(store)
    }

    /// Renames or relocates a store.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`] if the store does not exist and
    /// [`CatalogError::Conflict`] if another store uses the new pair.
    pub async fn update_store(&self, id: StoreId, draft: &NewStore) -> Result<Store, CatalogError> {
        let store = self
            .repository
            .update_store(id, draft)
            .await
            .inspect_err(|e| log_rejection(e, "update_store"))?;
        tracing::info!(store_id = %store.id, "store updated");
        Ok(store)
    }

    /// Lists the products of an existing store.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`] if the store does not exist.
    pub async fn store_products(&self, store_id: StoreId) -> Result<Vec<Product>, CatalogError> {
        self.repository.list_products_by_store(store_id).await
    }

    /// Lists products, optionally restricted to one store id.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] on backend failure.
    pub async fn list_products(
        &self,
        store_id: Option<StoreId>,
    ) -> Result<Vec<Product>, CatalogError> {
        self.repository.list_products(store_id).await
    }

    /// Creates a product in an existing store.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`] if the store does not exist and
    /// [`CatalogError::Conflict`] if the backend rejects the row.
    pub async fn create_product(&self, draft: &NewProduct) -> Result<Product, CatalogError> {
        let product = self
            .repository
            .create_product(draft)
            .await
            .inspect_err(|e| log_rejection(e, "create_product"))?;
        tracing::info!(
            product_id = %product.id,
            store_id = %product.store_id,
            "product created"
        );
        Ok(product)
    }

    /// Deletes a product.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`] if the product does not exist.
    pub async fn delete_product(&self, id: ProductId) -> Result<(), CatalogError> {
        self.repository.delete_product(id).await?;
        tracing::info!(product_id = %id, "product deleted");
        Ok(())
    }
}

fn log_rejection(error: &CatalogError, operation: &'static str) {
    if let CatalogError::Conflict(reason) = error {
        tracing::warn!(operation, reason = %reason, "write rejected");
    }
}
