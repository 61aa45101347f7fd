//! Currency entity - ISO currencies the business trades in.
//!
//! Keyed by the natural currency code (e.g. `"USD"`). Exactly one currency is
//! expected to carry `is_base_currency`; the database does not enforce that here.

use super::patch;
use crate::core::descriptor::Reflect;
use sea_orm::{ActiveValue::Unchanged, Set, entity::prelude::*};
use serde::{Deserialize, Serialize};

/// Currency row
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "currency")]
pub struct Model {
    /// ISO 4217 code
    #[sea_orm(primary_key, auto_increment = false)]
    pub code: String,
    pub name: String,
    /// Display symbol such as `"$"`
    pub symbol: Option<String>,
    /// Units of this currency per unit of the base currency
    pub exchange_rate: f64,
    pub is_base_currency: bool,
    pub active: bool,
    pub created_at: DateTimeUtc,
    pub created_by: String,
    pub updated_at: Option<DateTimeUtc>,
    pub updated_by: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::customer::Entity")]
    Customers,
    #[sea_orm(has_many = "super::supplier::Entity")]
    Suppliers,
}

impl Related<super::customer::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Customers.def()
    }
}

impl Related<super::supplier::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Suppliers.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Reflect for Entity {
    const DEFAULTED: &'static [&'static str] =
        &["exchange_rate", "is_base_currency", "active", "created_at"];
}

/// Fields accepted when creating a currency
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Insert {
    pub code: String,
    pub name: String,
    pub symbol: Option<String>,
    pub exchange_rate: Option<f64>,
    pub is_base_currency: Option<bool>,
    pub active: Option<bool>,
    pub created_at: Option<DateTimeUtc>,
    pub created_by: String,
    pub updated_at: Option<DateTimeUtc>,
    pub updated_by: Option<String>,
}

impl From<Insert> for ActiveModel {
    fn from(insert: Insert) -> Self {
        Self {
            code: Set(insert.code),
            name: Set(insert.name),
            symbol: Set(insert.symbol),
            exchange_rate: Set(insert.exchange_rate.unwrap_or(1.0)),
            is_base_currency: Set(insert.is_base_currency.unwrap_or(false)),
            active: Set(insert.active.unwrap_or(true)),
            created_at: Set(insert.created_at.unwrap_or_else(chrono::Utc::now)),
            created_by: Set(insert.created_by),
            updated_at: Set(insert.updated_at),
            updated_by: Set(insert.updated_by),
        }
    }
}

/// Partial change to a currency
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
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
    pub symbol: Option<Option<String>>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "super::non_null"
    )]
    pub exchange_rate: Option<f64>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "super::non_null"
    )]
    pub is_base_currency: Option<bool>,
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
    /// Turns the change into an active model keyed by `code`.
    #[must_use]
    pub fn into_active_model(self, code: String) -> ActiveModel {
        let mut active = ActiveModel {
            code: Unchanged(code),
            updated_at: Set(Some(chrono::Utc::now())),
            ..Default::default()
        };
        patch(&mut active.name, self.name);
        patch(&mut active.symbol, self.symbol);
        patch(&mut active.exchange_rate, self.exchange_rate);
        patch(&mut active.is_base_currency, self.is_base_currency);
        patch(&mut active.active, self.active);
        patch(&mut active.updated_by, self.updated_by);
        active
    }
}
