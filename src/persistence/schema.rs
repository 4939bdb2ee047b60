//! Relational schema for stores and products.
//!
//! Each statement is idempotent, so the whole list can run on every
//! startup.

/// DDL statements, executed in order inside one transaction.
pub const STATEMENTS: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS stores (\
         id BIGSERIAL PRIMARY KEY, \
         name TEXT NOT NULL, \
         address TEXT NOT NULL, \
         CONSTRAINT uix_name_address UNIQUE (name, address))",
    "CREATE TABLE IF NOT EXISTS products (\
         id BIGSERIAL PRIMARY KEY, \
         name TEXT NOT NULL, \
         price DOUBLE PRECISION NOT NULL CHECK (price > 0), \
         store_id BIGINT NOT NULL REFERENCES stores (id) ON DELETE CASCADE)",
    "CREATE INDEX IF NOT EXISTS ix_products_store_id ON products (store_id)",
];
