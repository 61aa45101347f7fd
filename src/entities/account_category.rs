//! Account category entity - groups general ledger accounts for reporting.

use super::{
    domains::{AccountClass, AccountIncomeBalance},
    new_id, patch,
};
use crate::core::descriptor::Reflect;
use sea_orm::{ActiveValue::Unchanged, Set, entity::prelude::*};
use serde::{Deserialize, Serialize};

/// Account category row
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "account_category")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// Category label (e.g. "Current Assets")
    #[sea_orm(unique)]
    pub category: String,
    pub class: AccountClass,
    pub income_balance: AccountIncomeBalance,
    pub created_at: DateTimeUtc,
    pub created_by: String,
    pub updated_at: Option<DateTimeUtc>,
    pub updated_by: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::account::Entity")]
    Accounts,
}

impl Related<super::account::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Accounts.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Reflect for Entity {
    const DEFAULTED: &'static [&'static str] = &["id", "created_at"];
    const DOMAINS: &'static [(&'static str, &'static str)] = &[
        ("class", "account_class"),
        ("income_balance", "account_income_balance"),
    ];
}

/// Fields accepted when creating an account category
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Insert {
    pub id: Option<String>,
    pub category: String,
    pub class: AccountClass,
    pub income_balance: AccountIncomeBalance,
    pub created_at: Option<DateTimeUtc>,
    pub created_by: String,
    pub updated_at: Option<DateTimeUtc>,
    pub updated_by: Option<String>,
}

impl From<Insert> for ActiveModel {
    fn from(insert: Insert) -> Self {
        Self {
            id: Set(insert.id.unwrap_or_else(new_id)),
            category: Set(insert.category),
            class: Set(insert.class),
            income_balance: Set(insert.income_balance),
            created_at: Set(insert.created_at.unwrap_or_else(chrono::Utc::now)),
            created_by: Set(insert.created_by),
            updated_at: Set(insert.updated_at),
            updated_by: Set(insert.updated_by),
        }
    }
}

/// Partial change to an account category
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Update {
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "super::non_null"
    )]
    pub category: Option<String>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "super::non_null"
    )]
    pub class: Option<AccountClass>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "super::non_null"
    )]
    pub income_balance: Option<AccountIncomeBalance>,
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
        patch(&mut active.category, self.category);
        patch(&mut active.class, self.class);
        patch(&mut active.income_balance, self.income_balance);
        patch(&mut active.updated_by, self.updated_by);
        active
    }
}
