//! Store entity and its validated creation/update payload.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::StoreId;
use super::validation::{FieldError, Location, non_empty_trimmed};

/// A retail location, unique by `(name, address)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Store {
    /// System-assigned identifier.
    pub id: StoreId,
    /// Trimmed, non-empty store name.
    pub name: String,
    /// Trimmed, non-empty street address.
    pub address: String,
}

/// Validated `{name, address}` pair used to create or update a store.
///
/// Can only be obtained through [`NewStore::new`], so both fields are
/// always trimmed and non-empty.
#[derive(Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct NewStore {
    name: String,
    address: String,
}

impl NewStore {
    /// Trims and validates both fields, reporting every failure.
    ///
    /// # Errors
    ///
    /// Returns one [`FieldError`] per empty field.
    pub fn new(name: &str, address: &str) -> Result<Self, Vec<FieldError>> {
        let name = non_empty_trimmed(Location::Body, "name", name);
        let address = non_empty_trimmed(Location::Body, "address", address);
        match (name, address) {
            (Ok(name), Ok(address)) => Ok(Self { name, address }),
            (name, address) => Err(name.err().into_iter().chain(address.err()).collect()),
        }
    }

    /// Store name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Store address.
    #[must_use]
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Attaches an id, producing the persisted representation.
    #[must_use]
    pub fn into_store(self, id: StoreId) -> Store {
        Store {
            id,
            name: self.name,
            address: self.address,
        }
    }

    /// Returns `true` if `store` carries the same `(name, address)` pair.
    #[must_use]
    pub fn same_identity(&self, store: &Store) -> bool {
        self.name == store.name && self.address == store.address
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn new_trims_fields() {
        let Ok(draft) = NewStore::new(" Acme ", "\t1 Main St\n") else {
            panic!("expected valid store");
        };
        assert_eq!(draft.name(), "Acme");
        assert_eq!(draft.address(), "1 Main St");
    }

    #[test]
    fn new_reports_both_empty_fields() {
        let Err(errors) = NewStore::new("", "  ") else {
            panic!("expected rejection");
        };
        let locs: Vec<_> = errors.into_iter().map(|e| e.loc).collect();
        assert_eq!(locs, vec![vec!["body", "name"], vec!["body", "address"]]);
    }

    #[test]
    fn same_identity_compares_trimmed_values() {
        let Ok(draft) = NewStore::new("Acme ", " 1 Main St") else {
            panic!("expected valid store");
        };
        let store = Store {
            id: StoreId::new(1),
            name: "Acme".into(),
            address: "1 Main St".into(),
        };
        assert!(draft.same_identity(&store));
        assert_eq!(draft.into_store(StoreId::new(1)), store);
    }
}
