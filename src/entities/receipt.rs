//! Receipt entity - goods received into a location against a source document.
//!
//! The source document is referenced loosely (`source_document` names its kind,
//! `source_document_id` its key) because it may live in several relations.

use super::{
    domains::{ReceiptSourceDocument, ReceiptStatus},
    new_id, patch,
};
use crate::core::descriptor::Reflect;
use sea_orm::{ActiveValue::Unchanged, Set, entity::prelude::*};
use serde::{Deserialize, Serialize};

/// Receipt row
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "receipt")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// Readable document number
    #[sea_orm(unique)]
    pub receipt_id: String,
    pub source_document: Option<ReceiptSourceDocument>,
    pub source_document_id: Option<String>,
    pub source_document_readable_id: Option<String>,
    pub supplier_id: Option<String>,
    pub location_id: Option<String>,
    pub status: ReceiptStatus,
    pub posting_date: Option<Date>,
    pub created_at: DateTimeUtc,
    pub created_by: String,
    pub updated_at: Option<DateTimeUtc>,
    pub updated_by: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::supplier::Entity",
        from = "Column::SupplierId",
        to = "super::supplier::Column::Id"
    )]
    Supplier,
    #[sea_orm(
        belongs_to = "super::location::Entity",
        from = "Column::LocationId",
        to = "super::location::Column::Id"
    )]
    Location,
    #[sea_orm(has_many = "super::receipt_line::Entity")]
    Lines,
}

impl Related<super::receipt_line::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Lines.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Reflect for Entity {
    const DEFAULTED: &'static [&'static str] = &["id", "status", "created_at"];
    const DOMAINS: &'static [(&'static str, &'static str)] = &[
        ("source_document", "receipt_source_document"),
        ("status", "receipt_status"),
    ];
}

/// Fields accepted when creating a receipt
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Insert {
    pub id: Option<String>,
    pub receipt_id: String,
    pub source_document: Option<ReceiptSourceDocument>,
    pub source_document_id: Option<String>,
    pub source_document_readable_id: Option<String>,
    pub supplier_id: Option<String>,
    pub location_id: Option<String>,
    pub status: Option<ReceiptStatus>,
    pub posting_date: Option<Date>,
    pub created_at: Option<DateTimeUtc>,
    pub created_by: String,
    pub updated_at: Option<DateTimeUtc>,
    pub updated_by: Option<String>,
}

impl From<Insert> for ActiveModel {
    fn from(insert: Insert) -> Self {
        Self {
            id: Set(insert.id.unwrap_or_else(new_id)),
            receipt_id: Set(insert.receipt_id),
            source_document: Set(insert.source_document),
            source_document_id: Set(insert.source_document_id),
            source_document_readable_id: Set(insert.source_document_readable_id),
            supplier_id: Set(insert.supplier_id),
            location_id: Set(insert.location_id),
            status: Set(insert.status.unwrap_or(ReceiptStatus::Draft)),
            posting_date: Set(insert.posting_date),
            created_at: Set(insert.created_at.unwrap_or_else(chrono::Utc::now)),
            created_by: Set(insert.created_by),
            updated_at: Set(insert.updated_at),
            updated_by: Set(insert.updated_by),
        }
    }
}

/// Partial change to a receipt
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Update {
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "super::non_null"
    )]
    pub receipt_id: Option<String>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "super::nullable"
    )]
    pub source_document: Option<Option<ReceiptSourceDocument>>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "super::nullable"
    )]
    pub source_document_id: Option<Option<String>>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "super::nullable"
    )]
    pub source_document_readable_id: Option<Option<String>>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "super::nullable"
    )]
    pub supplier_id: Option<Option<String>>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "super::nullable"
    )]
    pub location_id: Option<Option<String>>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "super::non_null"
    )]
    pub status: Option<ReceiptStatus>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "super::nullable"
    )]
    pub posting_date: Option<Option<Date>>,
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
        patch(&mut active.receipt_id, self.receipt_id);
        patch(&mut active.source_document, self.source_document);
        patch(&mut active.source_document_id, self.source_document_id);
        patch(
            &mut active.source_document_readable_id,
            self.source_document_readable_id,
        );
        patch(&mut active.supplier_id, self.supplier_id);
        patch(&mut active.location_id, self.location_id);
        patch(&mut active.status, self.status);
        patch(&mut active.posting_date, self.posting_date);
        patch(&mut active.updated_by, self.updated_by);
        active
    }
}
