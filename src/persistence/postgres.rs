//! PostgreSQL implementation of the persistence layer.
//!
//! Writes run inside a `sqlx` transaction that is committed only on the
//! success path. Any early return drops the transaction, which rolls it
//! back, so a constraint violation never leaves a partial write behind.

use std::time::Duration;

use async_trait::async_trait;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use super::CatalogRepository;
use super::schema;
use crate::config::CatalogConfig;
use crate::domain::{NewProduct, NewStore, Product, ProductId, Store, StoreId};
use crate::error::{CatalogError, Entity, PRODUCT_CONFLICT, STORE_CONFLICT};

type StoreRow = (i64, String, String);
type ProductRow = (i64, String, f64, i64);

/// PostgreSQL-backed persistence layer using `sqlx::PgPool`.
#[derive(Debug, Clone)]
pub struct PostgresCatalog {
    pool: PgPool,
}

impl PostgresCatalog {
    /// Creates a new persistence layer with the given connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Opens a connection pool sized by `config`.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError::Persistence`] if the database cannot be
    /// reached within the configured timeout.
    pub async fn connect(config: &CatalogConfig) -> Result<Self, CatalogError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.database_max_connections)
            .min_connections(config.database_min_connections)
            .acquire_timeout(Duration::from_secs(config.database_connect_timeout_secs))
            .connect(&config.database_url)
            .await
            .map_err(persistence)?;
        Ok(Self::new(pool))
    }
}

#[async_trait]
impl CatalogRepository for PostgresCatalog {
    async fn init_schema(&self) -> Result<(), CatalogError> {
        let mut tx = self.pool.begin().await.map_err(persistence)?;
        for stmt in schema::STATEMENTS {
            sqlx::query(stmt)
                .execute(&mut *tx)
                .await
                .map_err(persistence)?;
        }
        tx.commit().await.map_err(persistence)?;
        tracing::info!("database schema ready");
        Ok(())
    }

    async fn ping(&self) -> Result<(), CatalogError> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map_err(persistence)?;
        Ok(())
    }

    async fn list_stores(&self) -> Result<Vec<Store>, CatalogError> {
        let rows = sqlx::query_as::<_, StoreRow>("SELECT id, name, address FROM stores ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(persistence)?;

        Ok(rows.into_iter().map(store_from_row).collect())
    }

    async fn create_store(&self, store: &NewStore) -> Result<Store, CatalogError> {
        let mut tx = self.pool.begin().await.map_err(persistence)?;

        let row = sqlx::query_as::<_, StoreRow>(
            "INSERT INTO stores (name, address) VALUES ($1, $2) RETURNING id, name, address",
        )
        .bind(store.name())
        .bind(store.address())
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| classify(e, STORE_CONFLICT))?;

        tx.commit().await.map_err(|e| classify(e, STORE_CONFLICT))?;
        Ok(store_from_row(row))
    }

    async fn update_store(&self, id: StoreId, store: &NewStore) -> Result<Store, CatalogError> {
        let mut tx = self.pool.begin().await.map_err(persistence)?;

        let row = sqlx::query_as::<_, StoreRow>(
            "UPDATE stores SET name = $1, address = $2 WHERE id = $3 \
             RETURNING id, name, address",
        )
        .bind(store.name())
        .bind(store.address())
        .bind(id.get())
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| classify(e, STORE_CONFLICT))?
        .ok_or(CatalogError::NotFound(Entity::Store))?;

        tx.commit().await.map_err(|e| classify(e, STORE_CONFLICT))?;
        Ok(store_from_row(row))
    }

    async fn delete_store(&self, id: StoreId) -> Result<(), CatalogError> {
        let mut tx = self.pool.begin().await.map_err(persistence)?;

        let result = sqlx::query("DELETE FROM stores WHERE id = $1")
            .bind(id.get())
            .execute(&mut *tx)
            .await
            .map_err(persistence)?;
        if result.rows_affected() == 0 {
            return Err(CatalogError::NotFound(Entity::Store));
        }

        tx.commit().await.map_err(persistence)?;
        Ok(())
    }

    async fn list_products_by_store(
        &self,
        store_id: StoreId,
    ) -> Result<Vec<Product>, CatalogError> {
        let mut conn = self.pool.acquire().await.map_err(persistence)?;

        if !store_exists(&mut *conn, store_id).await? {
            return Err(CatalogError::NotFound(Entity::Store));
        }

        let rows = sqlx::query_as::<_, ProductRow>(
            "SELECT id, name, price, store_id FROM products WHERE store_id = $1 ORDER BY id",
        )
        .bind(store_id.get())
        .fetch_all(&mut *conn)
        .await
        .map_err(persistence)?;

        Ok(rows.into_iter().map(product_from_row).collect())
    }

    async fn list_products(&self, store_id: Option<StoreId>) -> Result<Vec<Product>, CatalogError> {
        let rows = if let Some(sid) = store_id {
            sqlx::query_as::<_, ProductRow>(
                "SELECT id, name, price, store_id FROM products \
                 WHERE store_id = $1 ORDER BY id",
            )
            .bind(sid.get())
            .fetch_all(&self.pool)
            .await
        } else {
            sqlx::query_as::<_, ProductRow>(
                "SELECT id, name, price, store_id FROM products ORDER BY id",
            )
            .fetch_all(&self.pool)
            .await
        }
        .map_err(persistence)?;

        Ok(rows.into_iter().map(product_from_row).collect())
    }

    async fn create_product(&self, product: &NewProduct) -> Result<Product, CatalogError> {
        let mut tx = self.pool.begin().await.map_err(persistence)?;

        if !store_exists(&mut *tx, product.store_id()).await? {
            return Err(CatalogError::NotFound(Entity::Store));
        }

        let row = sqlx::query_as::<_, ProductRow>(
            "INSERT INTO products (name, price, store_id) VALUES ($1, $2, $3) \
             RETURNING id, name, price, store_id",
        )
        .bind(product.name())
        .bind(product.price())
        .bind(product.store_id().get())
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| classify(e, PRODUCT_CONFLICT))?;

        tx.commit().await.map_err(|e| classify(e, PRODUCT_CONFLICT))?;
        Ok(product_from_row(row))
    }

    async fn delete_product(&self, id: ProductId) -> Result<(), CatalogError> {
        let mut tx = self.pool.begin().await.map_err(persistence)?;

        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id.get())
            .execute(&mut *tx)
            .await
            .map_err(persistence)?;
        if result.rows_affected() == 0 {
            return Err(CatalogError::NotFound(Entity::Product));
        }

        tx.commit().await.map_err(persistence)?;
        Ok(())
    }
}

async fn store_exists(
    conn: &mut sqlx::PgConnection,
    store_id: StoreId,
) -> Result<bool, CatalogError> {
    sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM stores WHERE id = $1)")
        .bind(store_id.get())
        .fetch_one(conn)
        .await
        .map_err(persistence)
}

fn store_from_row((id, name, address): StoreRow) -> Store {
    Store {
        id: StoreId::new(id),
        name,
        address,
    }
}

fn product_from_row((id, name, price, store_id): ProductRow) -> Product {
    Product {
        id: ProductId::new(id),
        name,
        price,
        store_id: StoreId::new(store_id),
    }
}

fn persistence(e: sqlx::Error) -> CatalogError {
    CatalogError::Persistence(e.to_string())
}

/// Maps constraint violations raised by PostgreSQL to
/// [`CatalogError::Conflict`] with `message`; everything else is a
/// persistence failure.
fn classify(e: sqlx::Error, message: &str) -> CatalogError {
    if let sqlx::Error::Database(ref db_err) = e
        && (db_err.is_unique_violation()
            || db_err.is_foreign_key_violation()
            || db_err.is_check_violation())
    {
        tracing::warn!(constraint = db_err.constraint(), "write rejected by constraint");
        return CatalogError::Conflict(message.to_string());
    }
    persistence(e)
}
