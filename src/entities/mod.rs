//! Entity module - Contains all SeaORM entity definitions for the ERP schema.
//! Each table module exposes the three shapes of a relation: `Model` (a fetched
//! row), `Insert` (fields needed to create a row) and `Update` (a partial change).
//! View modules expose `Model` only.

pub mod domains;

pub mod account;
pub mod account_category;
pub mod contact;
pub mod currency;
pub mod customer;
pub mod employee;
pub mod employee_type;
pub mod journal;
pub mod journal_line;
pub mod location;
pub mod part;
pub mod purchase_order;
pub mod purchase_order_line;
pub mod purchase_order_summary;
pub mod quote;
pub mod quote_line;
pub mod quote_summary;
pub mod receipt;
pub mod receipt_line;
pub mod sequence;
pub mod supplier;
pub mod supplier_contact;
pub mod unit_of_measure;

// Re-export specific types to avoid conflicts
pub use account::{Entity as Account, Model as AccountModel};
pub use journal::{Entity as Journal, Model as JournalModel};
pub use journal_line::{Entity as JournalLine, Model as JournalLineModel};
pub use purchase_order::{Entity as PurchaseOrder, Model as PurchaseOrderModel};
pub use quote::{Entity as Quote, Model as QuoteModel};
pub use quote_line::{Entity as QuoteLine, Model as QuoteLineModel};
pub use sequence::{Entity as Sequence, Model as SequenceModel};

use sea_orm::{ActiveValue, Value};
use serde::{Deserialize, Deserializer};

/// Generates the identifier of a new row.
pub(crate) fn new_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}

/// Marks `slot` as changed when an update carries a value for it.
pub(crate) fn patch<V>(slot: &mut ActiveValue<V>, value: Option<V>)
where
    V: Into<Value>,
{
    if let Some(value) = value {
        *slot = ActiveValue::Set(value);
    }
}

/// Deserializes a nullable update field so that an explicit `null` becomes
/// `Some(None)` while an absent field stays `None`.
pub(crate) fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Deserializes a non-nullable update field, rejecting an explicit `null`.
/// An absent field still falls back to `None` through `#[serde(default)]`.
pub(crate) fn non_null<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_new_id_is_unique_and_compact() {
        let first = new_id();
        let second = new_id();
        assert_ne!(first, second);
        assert_eq!(first.len(), 32);
        assert!(first.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_patch_only_touches_present_values() {
        let mut slot: ActiveValue<String> = ActiveValue::NotSet;
        patch(&mut slot, None);
        assert!(matches!(slot, ActiveValue::NotSet));

        patch(&mut slot, Some("Acme".to_string()));
        assert!(matches!(slot, ActiveValue::Set(ref name) if name == "Acme"));
    }

    #[test]
    fn test_update_null_handling_follows_column_nullability() {
        use serde_json::json;

        let cleared: account::Update =
            serde_json::from_value(json!({ "account_category_id": null })).unwrap();
        assert_eq!(cleared.account_category_id, Some(None));
        assert_eq!(cleared.name, None);

        assert!(serde_json::from_value::<account::Update>(json!({ "name": null })).is_err());
        assert!(serde_json::from_value::<part::Update>(json!({ "blocked": null })).is_err());
        assert!(
            serde_json::from_value::<purchase_order::Update>(json!({ "status": null })).is_err()
        );
    }
}
