//! Service layer: business logic orchestration.
//!
//! [`CatalogService`] sits between the HTTP handlers and the
//! [`crate::persistence::CatalogRepository`] backend and records every
//! state change in the log.

pub mod catalog_service;

pub use catalog_service::CatalogService;
