//! Journal line entity - a single debit (positive) or credit (negative)
//! amount posted to an account.

use super::{domains::JournalLineDocumentType, new_id, patch};
use crate::core::descriptor::Reflect;
use sea_orm::{ActiveValue::Unchanged, Set, entity::prelude::*};
use serde::{Deserialize, Serialize};

/// Journal line row
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "journal_line")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub journal_id: i32,
    pub account_number: String,
    pub description: Option<String>,
    pub amount: f64,
    pub quantity: f64,
    pub document_type: Option<JournalLineDocumentType>,
    pub document_id: Option<String>,
    pub external_document_id: Option<String>,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::journal::Entity",
        from = "Column::JournalId",
        to = "super::journal::Column::Id"
    )]
    Journal,
    #[sea_orm(
        belongs_to = "super::account::Entity",
        from = "Column::AccountNumber",
        to = "super::account::Column::Number"
    )]
    Account,
}

impl Related<super::journal::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Journal.def()
    }
}

impl Related<super::account::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Account.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Reflect for Entity {
    const DEFAULTED: &'static [&'static str] = &["id", "quantity", "created_at"];
    const DOMAINS: &'static [(&'static str, &'static str)] =
        &[("document_type", "journal_line_document_type")];
}

/// Fields accepted when creating a journal line
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Insert {
    pub id: Option<String>,
    pub journal_id: i32,
    pub account_number: String,
    pub description: Option<String>,
    pub amount: f64,
    pub quantity: Option<f64>,
    pub document_type: Option<JournalLineDocumentType>,
    pub document_id: Option<String>,
    pub external_document_id: Option<String>,
    pub created_at: Option<DateTimeUtc>,
}

impl From<Insert> for ActiveModel {
    fn from(insert: Insert) -> Self {
        Self {
            id: Set(insert.id.unwrap_or_else(new_id)),
            journal_id: Set(insert.journal_id),
            account_number: Set(insert.account_number),
            description: Set(insert.description),
            amount: Set(insert.amount),
            quantity: Set(insert.quantity.unwrap_or(1.0)),
            document_type: Set(insert.document_type),
            document_id: Set(insert.document_id),
            external_document_id: Set(insert.external_document_id),
            created_at: Set(insert.created_at.unwrap_or_else(chrono::Utc::now)),
        }
    }
}

/// Partial change to a journal line
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Update {
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "super::non_null"
    )]
    pub journal_id: Option<i32>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "super::non_null"
    )]
    pub account_number: Option<String>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "super::nullable"
    )]
    pub description: Option<Option<String>>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "super::non_null"
    )]
    pub amount: Option<f64>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "super::non_null"
    )]
    pub quantity: Option<f64>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "super::nullable"
    )]
    pub document_type: Option<Option<JournalLineDocumentType>>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "super::nullable"
    )]
    pub document_id: Option<Option<String>>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "super::nullable"
    )]
    pub external_document_id: Option<Option<String>>,
}

impl Update {
    /// Turns the change into an active model keyed by `id`.
    #[must_use]
    pub fn into_active_model(self, id: String) -> ActiveModel {
        let mut active = ActiveModel {
            id: Unchanged(id),
            ..Default::default()
        };
        patch(&mut active.journal_id, self.journal_id);
        patch(&mut active.account_number, self.account_number);
        patch(&mut active.description, self.description);
        patch(&mut active.amount, self.amount);
        patch(&mut active.quantity, self.quantity);
        patch(&mut active.document_type, self.document_type);
        patch(&mut active.document_id, self.document_id);
        patch(&mut active.external_document_id, self.external_document_id);
        active
    }
}
