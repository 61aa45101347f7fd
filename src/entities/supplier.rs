//! Supplier entity - vendors the business purchases from.
//!
//! Suppliers own their contacts through `supplier_contact` and are referenced by
//! purchase orders and receipts.

use super::{new_id, patch};
use crate::core::descriptor::Reflect;
use sea_orm::{ActiveValue::Unchanged, Set, entity::prelude::*};
use serde::{Deserialize, Serialize};

/// Supplier row
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "supplier")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    #[sea_orm(unique)]
    pub name: String,
    /// Currency the supplier invoices in; the base currency when unset
    pub currency_code: Option<String>,
    pub tax_id: Option<String>,
    pub active: bool,
    pub created_at: DateTimeUtc,
    pub created_by: String,
    pub updated_at: Option<DateTimeUtc>,
    pub updated_by: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::currency::Entity",
        from = "Column::CurrencyCode",
        to = "super::currency::Column::Code"
    )]
    Currency,
    #[sea_orm(has_many = "super::supplier_contact::Entity")]
    Contacts,
    #[sea_orm(has_many = "super::purchase_order::Entity")]
    PurchaseOrders,
}

impl Related<super::currency::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Currency.def()
    }
}

impl Related<super::supplier_contact::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Contacts.def()
    }
}

impl Related<super::purchase_order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PurchaseOrders.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Reflect for Entity {
    const DEFAULTED: &'static [&'static str] = &["id", "active", "created_at"];
}

/// Fields accepted when creating a supplier
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Insert {
    pub id: Option<String>,
    pub name: String,
    pub currency_code: Option<String>,
    pub tax_id: Option<String>,
    pub active: Option<bool>,
    pub created_at: Option<DateTimeUtc>,
    pub created_by: String,
    pub updated_at: Option<DateTimeUtc>,
    pub updated_by: Option<String>,
}

impl From<Insert> for ActiveModel {
    fn from(insert: Insert) -> Self {
        Self {
            id: Set(insert.id.unwrap_or_else(new_id)),
            name: Set(insert.name),
            currency_code: Set(insert.currency_code),
            tax_id: Set(insert.tax_id),
            active: Set(insert.active.unwrap_or(true)),
            created_at: Set(insert.created_at.unwrap_or_else(chrono::Utc::now)),
            created_by: Set(insert.created_by),
            updated_at: Set(insert.updated_at),
            updated_by: Set(insert.updated_by),
        }
    }
}

/// Partial change to a supplier
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Update {
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "super::non_null"
    )]
    pub name: Option<String>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "super::nullable"
    )]
    pub currency_code: Option<Option<String>>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "super::nullable"
    )]
    pub tax_id: Option<Option<String>>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "super::non_null"
    )]
    pub active: Option<bool>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "super::nullable"
    )]
    pub updated_by: Option<Option<String>>,
}

impl Update {
    /// Turns the change into an active model keyed by `id`.
    #[must_use]
    pub fn into_active_model(self, id: String) -> ActiveModel {
        let mut active = ActiveModel {
            id: Unchanged(id),
            updated_at: Set(Some(chrono::Utc::now())),
            ..Default::default()
        };
        patch(&mut active.name, self.name);
        patch(&mut active.currency_code, self.currency_code);
        patch(&mut active.tax_id, self.tax_id);
        patch(&mut active.active, self.active);
        patch(&mut active.updated_by, self.updated_by);
        active
    }
}
