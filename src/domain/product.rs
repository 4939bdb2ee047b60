//! Product entity and its validated creation payload.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::validation::{FieldError, Location, non_empty_trimmed, positive};
use super::{ProductId, StoreId};

/// An item sold by exactly one store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Product {
    /// System-assigned identifier.
    pub id: ProductId,
    /// Trimmed, non-empty product name.
    pub name: String,
    /// Unit price, strictly greater than zero.
    pub price: f64,
    /// Owning store.
    pub store_id: StoreId,
}

/// Validated `{name, price, store_id}` triple used to create a product.
///
/// Whether `store_id` refers to an existing store is checked by the
/// persistence layer, not here.
#[derive(Debug, Clone, PartialEq, ToSchema)]
pub struct NewProduct {
    name: String,
    price: f64,
    store_id: StoreId,
}

impl NewProduct {
    /// Trims the name and checks the price, reporting every failure.
    ///
    /// # Errors
    ///
    /// Returns one [`FieldError`] per invalid field.
    pub fn new(name: &str, price: f64, store_id: StoreId) -> Result<Self, Vec<FieldError>> {
        let name = non_empty_trimmed(Location::Body, "name", name);
        let price = positive(Location::Body, "price", price);
        match (name, price) {
            (Ok(name), Ok(price)) => Ok(Self {
                name,
                price,
                store_id,
            }),
            (name, price) => Err(name.err().into_iter().chain(price.err()).collect()),
        }
    }

    /// Product name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Unit price.
    #[must_use]
    pub const fn price(&self) -> f64 {
        self.price
    }

    /// Owning store.
    #[must_use]
    pub const fn store_id(&self) -> StoreId {
        self.store_id
    }

    /// Attaches an id, producing the persisted representation.
    #[must_use]
    pub fn into_product(self, id: ProductId) -> Product {
        Product {
            id,
            name: self.name,
            price: self.price,
            store_id: self.store_id,
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn new_accepts_positive_price() {
        let Ok(draft) = NewProduct::new(" Widget ", 9.99, StoreId::new(1)) else {
            panic!("expected valid product");
        };
        assert_eq!(draft.name(), "Widget");
        assert!((draft.price() - 9.99).abs() < f64::EPSILON);
        assert_eq!(draft.store_id(), StoreId::new(1));
    }

    #[test]
    fn new_rejects_non_positive_price() {
        for price in [0.0, -1.0] {
            let Err(errors) = NewProduct::new("Widget", price, StoreId::new(1)) else {
                panic!("expected rejection for {price}");
            };
            assert_eq!(errors.len(), 1);
            assert_eq!(errors.first().map(|e| e.kind.as_str()), Some("greater_than"));
        }
    }

    #[test]
    fn new_reports_name_and_price_together() {
        let Err(errors) = NewProduct::new(" ", -2.0, StoreId::new(1)) else {
            panic!("expected rejection");
        };
        let kinds: Vec<_> = errors.iter().map(|e| e.kind.as_str()).collect();
        assert_eq!(kinds, vec!["string_too_short", "greater_than"]);
    }
}
