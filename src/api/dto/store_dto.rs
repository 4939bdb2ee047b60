//! Store request bodies for `POST /stores` and `PUT /stores/{store_id}`.

use serde_json::Value;

use crate::api::extract::{BodyFields, FromJsonBody};
use crate::domain::{FieldError, NewStore};

impl FromJsonBody for NewStore {
    fn from_json_body(body: &Value) -> Result<Self, Vec<FieldError>> {
        let mut fields = BodyFields::new(body);
        let name = fields.text("name");
        let address = fields.text("address");

        match (name, address) {
            (Some(name), Some(address)) if fields.is_clean() => Self::new(&name, &address),
            _ => Err(fields.into_errors()),
        }
    }
}
