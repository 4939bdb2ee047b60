//! Product request body for `POST /products` and the `GET /products`
//! query string.

use serde::Deserialize;
use serde_json::Value;

use crate::api::extract::{BodyFields, FromJsonBody};
use crate::domain::{FieldError, NewProduct, StoreId};

impl FromJsonBody for NewProduct {
    fn from_json_body(body: &Value) -> Result<Self, Vec<FieldError>> {
        let mut fields = BodyFields::new(body);
        let name = fields.text("name");
        let price = fields.positive_number("price");
        let store_id = fields.integer("store_id");

        match (name, price, store_id) {
            (Some(name), Some(price), Some(store_id)) if fields.is_clean() => {
                Self::new(&name, price, StoreId::new(store_id))
            }
            _ => Err(fields.into_errors()),
        }
    }
}

/// Query parameters accepted by `GET /products`.
///
/// `store_id` is kept as raw text so that a malformed value can be
/// reported as a field error instead of a generic rejection.
#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ProductFilterParams {
    /// Only return products of this store.
    #[param(value_type = Option<i64>)]
    pub store_id: Option<String>,
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_valid_product() {
        let body = json!({ "name": "Widget", "price": 9.99, "store_id": 3 });
        let Ok(product) = NewProduct::from_json_body(&body) else {
            panic!("expected valid body");
        };
        assert_eq!(product.name(), "Widget");
        assert_eq!(product.store_id(), StoreId::new(3));
    }

    #[test]
    fn whole_float_store_id_is_accepted_fractional_is_not() {
        let body = json!({ "name": "Widget", "price": 1, "store_id": 1.0 });
        let Ok(product) = NewProduct::from_json_body(&body) else {
            panic!("expected valid body");
        };
        assert_eq!(product.store_id(), StoreId::new(1));

        let body = json!({ "name": "Widget", "price": 1, "store_id": 1.5 });
        let Err(errors) = NewProduct::from_json_body(&body) else {
            panic!("expected rejection");
        };
        assert_eq!(errors.len(), 1);
        let Some(err) = errors.first() else {
            panic!("expected one error");
        };
        assert_eq!(err.loc, vec!["body", "store_id"]);
        assert_eq!(err.kind, "int_from_float");
        assert_eq!(
            err.msg,
            "Input should be a valid integer, got a number with a fractional part"
        );
    }

    #[test]
    fn zero_price_is_rejected() {
        let body = json!({ "name": "Widget", "price": 0, "store_id": 3 });
        let Err(errors) = NewProduct::from_json_body(&body) else {
            panic!("expected rejection");
        };
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors.first().map(|e| e.loc.clone()),
            Some(vec!["body".to_string(), "price".to_string()])
        );
    }

    #[test]
    fn every_bad_field_is_reported() {
        let body = json!({ "name": "", "price": -1, "store_id": "x" });
        let Err(errors) = NewProduct::from_json_body(&body) else {
            panic!("expected rejection");
        };
        assert_eq!(errors.len(), 3);
    }
}
