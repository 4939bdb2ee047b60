//! In-process catalog storage.
//!
//! [`InMemoryCatalog`] keeps both tables in `BTreeMap`s behind a single
//! [`tokio::sync::RwLock`]. Every write holds the write guard for its whole
//! duration and checks all constraints before touching the maps, so a
//! rejected write leaves nothing behind.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::CatalogRepository;
use crate::domain::{NewProduct, NewStore, Product, ProductId, Store, StoreId};
use crate::error::{CatalogError, Entity, STORE_CONFLICT};

#[derive(Debug, Default)]
struct Tables {
    stores: BTreeMap<StoreId, Store>,
    products: BTreeMap<ProductId, Product>,
    last_store_id: i64,
    last_product_id: i64,
}

impl Tables {
    /// Returns `true` if a store other than `except` uses the pair.
    fn identity_taken(&self, draft: &NewStore, except: Option<StoreId>) -> bool {
        self.stores
            .values()
            .any(|s| Some(s.id) != except && draft.same_identity(s))
    }
}

/// Catalog backend holding all data in memory.
///
/// # Concurrency
///
/// - Reads run concurrently.
/// - Writes are serialized and atomic.
#[derive(Debug, Default)]
pub struct InMemoryCatalog {
    tables: RwLock<Tables>,
}

impl InMemoryCatalog {
    /// Creates an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CatalogRepository for InMemoryCatalog {
    async fn init_schema(&self) -> Result<(), CatalogError> {
        Ok(())
    }

    async fn ping(&self) -> Result<(), CatalogError> {
        Ok(())
    }

    async fn list_stores(&self) -> Result<Vec<Store>, CatalogError> {
        let tables = self.tables.read().await;
        Ok(tables.stores.values().cloned().collect())
    }

    async fn create_store(&self, store: &NewStore) -> Result<Store, CatalogError> {
        let mut tables = self.tables.write().await;
        if tables.identity_taken(store, None) {
            return Err(CatalogError::Conflict(STORE_CONFLICT.to_string()));
        }

        tables.last_store_id = tables.last_store_id.saturating_add(1);
        let created = store.clone().into_store(StoreId::new(tables.last_store_id));
        tables.stores.insert(created.id, created.clone());
        Ok(created)
    }

    async fn update_store(&self, id: StoreId, store: &NewStore) -> Result<Store, CatalogError> {
        let mut tables = self.tables.write().await;
        if !tables.stores.contains_key(&id) {
            return Err(CatalogError::NotFound(Entity::Store));
        }
        if tables.identity_taken(store, Some(id)) {
            return Err(CatalogError::Conflict(STORE_CONFLICT.to_string()));
        }

        let updated = store.clone().into_store(id);
        tables.stores.insert(id, updated.clone());
        Ok(updated)
    }

    async fn delete_store(&self, id: StoreId) -> Result<(), CatalogError> {
        let mut tables = self.tables.write().await;
        tables
            .stores
            .remove(&id)
            .ok_or(CatalogError::NotFound(Entity::Store))?;
        tables.products.retain(|_, p| p.store_id != id);
        Ok(())
    }

    async fn list_products_by_store(
        &self,
        store_id: StoreId,
    ) -> Result<Vec<Product>, CatalogError> {
        let tables = self.tables.read().await;
        if !tables.stores.contains_key(&store_id) {
            return Err(CatalogError::NotFound(Entity::Store));
        }
        Ok(tables
            .products
            .values()
            .filter(|p| p.store_id == store_id)
            .cloned()
            .collect())
    }

    async fn list_products(
        &self,
        store_id: Option<StoreId>,
    ) -> Result<Vec<Product>, CatalogError> {
        let tables = self.tables.read().await;
        Ok(tables
            .products
            .values()
            .filter(|p| store_id.is_none_or(|sid| p.store_id == sid))
            .cloned()
            .collect())
    }

    async fn create_product(&self, product: &NewProduct) -> Result<Product, CatalogError> {
        let mut tables = self.tables.write().await;
        if !tables.stores.contains_key(&product.store_id()) {
            return Err(CatalogError::NotFound(Entity::Store));
        }

        tables.last_product_id = tables.last_product_id.saturating_add(1);
        let created = product
            .clone()
            .into_product(ProductId::new(tables.last_product_id));
        tables.products.insert(created.id, created.clone());
        Ok(created)
    }

    async fn delete_product(&self, id: ProductId) -> Result<(), CatalogError> {
        let mut tables = self.tables.write().await;
        tables
            .products
            .remove(&id)
            .map(|_| ())
            .ok_or(CatalogError::NotFound(Entity::Product))
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn store(name: &str, address: &str) -> NewStore {
        let Ok(draft) = NewStore::new(name, address) else {
            panic!("valid store");
        };
        draft
    }

    fn product(name: &str, price: f64, store_id: StoreId) -> NewProduct {
        let Ok(draft) = NewProduct::new(name, price, store_id) else {
            panic!("valid product");
        };
        draft
    }

    async fn seeded() -> (InMemoryCatalog, Store) {
        let catalog = InMemoryCatalog::new();
        let Ok(acme) = catalog.create_store(&store("Acme", "1 Main St")).await else {
            panic!("seed store failed");
        };
        (catalog, acme)
    }

    #[tokio::test]
    async fn ids_are_assigned_in_insertion_order() {
        let (catalog, acme) = seeded().await;
        let Ok(other) = catalog.create_store(&store("Acme", "2 Main St")).await else {
            panic!("second store failed");
        };
        assert_eq!(acme.id, StoreId::new(1));
        assert_eq!(other.id, StoreId::new(2));

        let Ok(stores) = catalog.list_stores().await else {
            panic!("list failed");
        };
        let ids: Vec<_> = stores.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![acme.id, other.id]);
    }

    #[tokio::test]
    async fn duplicate_pair_is_conflict() {
        let (catalog, _) = seeded().await;
        let result = catalog.create_store(&store("Acme", "1 Main St")).await;
        assert!(matches!(result, Err(CatalogError::Conflict(_))));

        let Ok(stores) = catalog.list_stores().await else {
            panic!("list failed");
        };
        assert_eq!(stores.len(), 1);
    }

    #[tokio::test]
    async fn update_to_other_stores_pair_is_conflict() {
        let (catalog, acme) = seeded().await;
        let Ok(other) = catalog.create_store(&store("Other", "2 Side St")).await else {
            panic!("second store failed");
        };

        let result = catalog
            .update_store(other.id, &store(&acme.name, &acme.address))
            .await;
        assert!(matches!(result, Err(CatalogError::Conflict(_))));

        let Ok(stores) = catalog.list_stores().await else {
            panic!("list failed");
        };
        assert!(stores.contains(&other));
    }

    #[tokio::test]
    async fn update_to_own_pair_succeeds() {
        let (catalog, acme) = seeded().await;
        let result = catalog
            .update_store(acme.id, &store(&acme.name, &acme.address))
            .await;
        assert_eq!(result.ok(), Some(acme));
    }

    #[tokio::test]
    async fn update_missing_store_is_not_found() {
        let (catalog, _) = seeded().await;
        let result = catalog
            .update_store(StoreId::new(99), &store("New", "Place"))
            .await;
        assert!(matches!(result, Err(CatalogError::NotFound(Entity::Store))));
    }

    #[tokio::test]
    async fn product_requires_existing_store() {
        let (catalog, _) = seeded().await;
        let result = catalog
            .create_product(&product("Widget", 9.99, StoreId::new(42)))
            .await;
        assert!(matches!(result, Err(CatalogError::NotFound(Entity::Store))));
    }

    #[tokio::test]
    async fn unknown_store_filter_is_empty_but_by_store_is_not_found() {
        let (catalog, acme) = seeded().await;
        let Ok(_) = catalog
            .create_product(&product("Widget", 9.99, acme.id))
            .await
        else {
            panic!("product insert failed");
        };

        let unknown = StoreId::new(77);
        let filtered = catalog.list_products(Some(unknown)).await;
        assert_eq!(filtered.ok(), Some(vec![]));

        let by_store = catalog.list_products_by_store(unknown).await;
        assert!(matches!(by_store, Err(CatalogError::NotFound(Entity::Store))));
    }

    #[tokio::test]
    async fn list_products_filters_by_store() {
        let (catalog, acme) = seeded().await;
        let Ok(other) = catalog.create_store(&store("Other", "2 Side St")).await else {
            panic!("second store failed");
        };
        let _ = catalog.create_product(&product("A", 1.0, acme.id)).await;
        let _ = catalog.create_product(&product("B", 2.0, other.id)).await;
        let _ = catalog.create_product(&product("C", 3.0, acme.id)).await;

        let Ok(all) = catalog.list_products(None).await else {
            panic!("list failed");
        };
        assert_eq!(all.len(), 3);

        let Ok(mine) = catalog.list_products_by_store(acme.id).await else {
            panic!("list by store failed");
        };
        let names: Vec<_> = mine.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["A", "C"]);
    }

    #[tokio::test]
    async fn delete_store_cascades() {
        let (catalog, acme) = seeded().await;
        let _ = catalog.create_product(&product("A", 1.0, acme.id)).await;
        let _ = catalog.create_product(&product("B", 2.0, acme.id)).await;

        assert!(catalog.delete_store(acme.id).await.is_ok());
        assert_eq!(catalog.list_products(None).await.ok(), Some(vec![]));
        assert!(matches!(
            catalog.delete_store(acme.id).await,
            Err(CatalogError::NotFound(Entity::Store))
        ));
    }

    #[tokio::test]
    async fn delete_product_twice_is_not_found() {
        let (catalog, acme) = seeded().await;
        let Ok(widget) = catalog
            .create_product(&product("Widget", 9.99, acme.id))
            .await
        else {
            panic!("product insert failed");
        };

        assert!(catalog.delete_product(widget.id).await.is_ok());
        assert!(matches!(
            catalog.delete_product(widget.id).await,
            Err(CatalogError::NotFound(Entity::Product))
        ));
    }
}
