//! Persistence layer: the [`CatalogRepository`] trait and its backends.
//!
//! [`PostgresCatalog`] is the production backend built on `sqlx::PgPool`.
//! [`InMemoryCatalog`] enforces the same invariants against in-process
//! tables and backs development runs with persistence disabled.
//!
//! Every operation is atomic: it either applies completely or leaves the
//! stored data untouched.

pub mod memory;
pub mod postgres;
pub mod schema;

use std::fmt;

use async_trait::async_trait;

pub use memory::InMemoryCatalog;
pub use postgres::PostgresCatalog;

use crate::domain::{NewProduct, NewStore, Product, ProductId, Store, StoreId};
use crate::error::CatalogError;

/// Storage operations over stores and their products.
#[async_trait]
pub trait CatalogRepository: Send + Sync + fmt::Debug {
    /// Creates the schema if it does not exist yet. Safe to call repeatedly.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Persistence`] if the backend is unreachable.
    async fn init_schema(&self) -> Result<(), CatalogError>;

    /// Performs a cheap round-trip to the backend.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Persistence`] if the backend is unreachable.
    async fn ping(&self) -> Result<(), CatalogError>;

    /// Returns all stores in insertion order.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Persistence`] on backend failure.
    async fn list_stores(&self) -> Result<Vec<Store>, CatalogError>;

    /// Inserts a store.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Conflict`] if `(name, address)` is taken.
    async fn create_store(&self, store: &NewStore) -> Result<Store, CatalogError>;

    /// Replaces the name and address of an existing store.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`] if `id` does not exist and
    /// [`CatalogError::Conflict`] if another store already uses the pair.
    async fn update_store(&self, id: StoreId, store: &NewStore) -> Result<Store, CatalogError>;

    /// Deletes a store together with all of its products.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`] if `id` does not exist.
    async fn delete_store(&self, id: StoreId) -> Result<(), CatalogError>;

    /// Returns the products of one store, which must exist.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`] if `store_id` does not exist.
    async fn list_products_by_store(&self, store_id: StoreId)
    -> Result<Vec<Product>, CatalogError>;

    /// Returns all products, or only those of `store_id` when given. An
    /// unknown `store_id` yields an empty list.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Persistence`] on backend failure.
    async fn list_products(&self, store_id: Option<StoreId>)
    -> Result<Vec<Product>, CatalogError>;

    /// Inserts a product into an existing store.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`] if the store does not exist and
    /// [`CatalogError::Conflict`] if the backend rejects the row.
    async fn create_product(&self, product: &NewProduct) -> Result<Product, CatalogError>;

    /// Deletes a product.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`] if `id` does not exist.
    async fn delete_product(&self, id: ProductId) -> Result<(), CatalogError>;
}
