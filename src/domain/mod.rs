//! Domain layer: entities, identifiers, and input validation rules.
//!
//! Entities ([`Store`], [`Product`]) are what the persistence layer returns
//! and what the API serializes. Drafts ([`NewStore`], [`NewProduct`]) are
//! validated inputs that can only be built through their checking
//! constructors.

pub mod ids;
pub mod product;
pub mod store;
pub mod validation;

pub use ids::{ProductId, StoreId};
pub use product::{NewProduct, Product};
pub use store::{NewStore, Store};
pub use validation::{FieldError, Location};
