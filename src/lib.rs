//! # store-catalog
//!
//! REST API for managing retail stores and the products they sell.
//!
//! Stores are unique by `(name, address)`; every product belongs to exactly
//! one store, has a positive price, and disappears with its store.
//!
//! ## Architecture
//!
//! ```text
//! Clients (HTTP)
//!     │
//!     ├── REST Handlers + Extractors (api/)
//!     │
//!     ├── CatalogService (service/)
//!     │
//!     ├── CatalogRepository (persistence/)
//!     │     ├── PostgresCatalog
//!     │     └── InMemoryCatalog
//!     │
//!     └── PostgreSQL
//! ```

pub mod api;
pub mod app_state;
pub mod config;
pub mod domain;
pub mod error;
pub mod persistence;
pub mod service;
