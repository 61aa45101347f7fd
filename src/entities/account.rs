//! Account entity - the chart of accounts.
//!
//! Accounts are keyed by their natural account number, which journal lines and
//! purchase order lines reference directly.

use super::{
    domains::{AccountClass, AccountConsolidatedRate, AccountIncomeBalance},
    patch,
};
use crate::core::descriptor::Reflect;
use sea_orm::{ActiveValue::Unchanged, Set, entity::prelude::*};
use serde::{Deserialize, Serialize};

/// General ledger account row
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "account")]
pub struct Model {
    /// Account number (e.g. `"1010"`)
    #[sea_orm(primary_key, auto_increment = false)]
    pub number: String,
    pub name: String,
    pub class: AccountClass,
    pub income_balance: AccountIncomeBalance,
    pub consolidated_rate: Option<AccountConsolidatedRate>,
    pub account_category_id: Option<String>,
    /// Whether journal lines may post to the account directly
    pub direct_posting: bool,
    pub active: bool,
    pub created_at: DateTimeUtc,
    pub created_by: String,
    pub updated_at: Option<DateTimeUtc>,
    pub updated_by: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::account_category::Entity",
        from = "Column::AccountCategoryId",
        to = "super::account_category::Column::Id"
    )]
    AccountCategory,
    #[sea_orm(has_many = "super::journal_line::Entity")]
    JournalLines,
}

impl Related<super::account_category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AccountCategory.def()
    }
}

impl Related<super::journal_line::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::JournalLines.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Reflect for Entity {
    const DEFAULTED: &'static [&'static str] = &["direct_posting", "active", "created_at"];
    const DOMAINS: &'static [(&'static str, &'static str)] = &[
        ("class", "account_class"),
        ("income_balance", "account_income_balance"),
        ("consolidated_rate", "account_consolidated_rate"),
    ];
}

/// Fields accepted when creating an account
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Insert {
    pub number: String,
    pub name: String,
    pub class: AccountClass,
    pub income_balance: AccountIncomeBalance,
    pub consolidated_rate: Option<AccountConsolidatedRate>,
    pub account_category_id: Option<String>,
    pub direct_posting: Option<bool>,
    pub active: Option<bool>,
    pub created_at: Option<DateTimeUtc>,
    pub created_by: String,
    pub updated_at: Option<DateTimeUtc>,
    pub updated_by: Option<String>,
}

impl From<Insert> for ActiveModel {
    fn from(insert: Insert) -> Self {
        Self {
            number: Set(insert.number),
            name: Set(insert.name),
            class: Set(insert.class),
            income_balance: Set(insert.income_balance),
            consolidated_rate: Set(insert.consolidated_rate),
            account_category_id: Set(insert.account_category_id),
            direct_posting: Set(insert.direct_posting.unwrap_or(false)),
            active: Set(insert.active.unwrap_or(true)),
            created_at: Set(insert.created_at.unwrap_or_else(chrono::Utc::now)),
            created_by: Set(insert.created_by),
            updated_at: Set(insert.updated_at),
            updated_by: Set(insert.updated_by),
        }
    }
}

/// Partial change to an account
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
    pub consolidated_rate: Option<Option<AccountConsolidatedRate>>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "super::nullable"
    )]
    pub account_category_id: Option<Option<String>>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "super::non_null"
    )]
    pub direct_posting: Option<bool>,
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
    /// Turns the change into an active model keyed by account `number`.
    #[must_use]
    pub fn into_active_model(self, number: String) -> ActiveModel {
        let mut active = ActiveModel {
            number: Unchanged(number),
            updated_at: Set(Some(chrono::Utc::now())),
            ..Default::default()
        };
        patch(&mut active.name, self.name);
        patch(&mut active.class, self.class);
        patch(&mut active.income_balance, self.income_balance);
        patch(&mut active.consolidated_rate, self.consolidated_rate);
        patch(&mut active.account_category_id, self.account_category_id);
        patch(&mut active.direct_posting, self.direct_posting);
        patch(&mut active.active, self.active);
        patch(&mut active.updated_by, self.updated_by);
        active
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::{errors::Result, test_utils::*};
    use serde_json::json;

    #[tokio::test]
    async fn test_insert_fills_defaults() -> Result<()> {
        let db = setup_test_db().await?;

        let insert: Insert = serde_json::from_value(json!({
            "number": "1010",
            "name": "Cash",
            "class": "Asset",
            "income_balance": "Balance Sheet",
            "created_by": "system"
        }))?;
        let account = ActiveModel::from(insert).insert(&db).await?;

        assert_eq!(account.number, "1010");
        assert!(account.active);
        assert!(!account.direct_posting);
        assert!(account.consolidated_rate.is_none());
        assert!(account.updated_at.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn test_update_clears_nullable_field() -> Result<()> {
        let db = setup_test_db().await?;
        let category = create_test_account_category(&db, "Current Assets").await?;
        let account = create_test_account(&db, "1010", Some(category.id.clone())).await?;
        assert_eq!(account.account_category_id, Some(category.id));

        let update: Update = serde_json::from_value(json!({
            "account_category_id": null,
            "updated_by": "auditor"
        }))?;
        let updated = update.into_active_model(account.number).update(&db).await?;

        assert!(updated.account_category_id.is_none());
        assert_eq!(updated.updated_by.as_deref(), Some("auditor"));
        assert!(updated.updated_at.is_some());
        assert_eq!(updated.name, "Cash");

        Ok(())
    }

    #[test]
    fn test_absent_field_is_not_patched() {
        let update: Update = serde_json::from_value(json!({ "name": "Petty Cash" })).unwrap();
        assert_eq!(update.name.as_deref(), Some("Petty Cash"));
        assert!(update.account_category_id.is_none());
        assert!(update.consolidated_rate.is_none());
    }
}
