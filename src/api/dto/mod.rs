//! Request parsing for REST bodies and query strings.
//!
//! Response bodies are the domain entities themselves
//! ([`crate::domain::Store`], [`crate::domain::Product`]); this module only
//! covers the inbound direction.

pub mod product_dto;
pub mod store_dto;

pub use product_dto::*;
