//! Quote entity - sales quotations offered to a customer.

use super::{domains::QuoteStatus, new_id, patch};
use crate::core::descriptor::Reflect;
use sea_orm::{ActiveValue::Unchanged, Set, entity::prelude::*};
use serde::{Deserialize, Serialize};

/// Quote row
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "quote")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// Readable document number
    #[sea_orm(unique)]
    pub quote_id: String,
    pub name: String,
    pub status: QuoteStatus,
    pub customer_id: String,
    pub location_id: Option<String>,
    /// Employee responsible for the quote
    pub owner_id: Option<String>,
    pub expiration_date: Option<Date>,
    pub notes: Option<String>,
    pub created_at: DateTimeUtc,
    pub created_by: String,
    pub updated_at: Option<DateTimeUtc>,
    pub updated_by: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::customer::Entity",
        from = "Column::CustomerId",
        to = "super::customer::Column::Id"
    )]
    Customer,
    #[sea_orm(
        belongs_to = "super::location::Entity",
        from = "Column::LocationId",
        to = "super::location::Column::Id"
    )]
    Location,
    #[sea_orm(
        belongs_to = "super::employee::Entity",
        from = "Column::OwnerId",
        to = "super::employee::Column::Id"
    )]
    Owner,
    #[sea_orm(has_many = "super::quote_line::Entity")]
    Lines,
}

impl Related<super::customer::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Customer.def()
    }
}

impl Related<super::employee::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Owner.def()
    }
}

impl Related<super::quote_line::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Lines.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Reflect for Entity {
    const DEFAULTED: &'static [&'static str] = &["id", "status", "created_at"];
    const DOMAINS: &'static [(&'static str, &'static str)] = &[("status", "quote_status")];
}

/// Fields accepted when creating a quote
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Insert {
    pub id: Option<String>,
    pub quote_id: String,
    pub name: String,
    pub status: Option<QuoteStatus>,
    pub customer_id: String,
    pub location_id: Option<String>,
    pub owner_id: Option<String>,
    pub expiration_date: Option<Date>,
    pub notes: Option<String>,
    pub created_at: Option<DateTimeUtc>,
    pub created_by: String,
    pub updated_at: Option<DateTimeUtc>,
    pub updated_by: Option<String>,
}

impl From<Insert> for ActiveModel {
    fn from(insert: Insert) -> Self {
        Self {
            id: Set(insert.id.unwrap_or_else(new_id)),
            quote_id: Set(insert.quote_id),
            name: Set(insert.name),
            status: Set(insert.status.unwrap_or(QuoteStatus::Draft)),
            customer_id: Set(insert.customer_id),
            location_id: Set(insert.location_id),
            owner_id: Set(insert.owner_id),
            expiration_date: Set(insert.expiration_date),
            notes: Set(insert.notes),
            created_at: Set(insert.created_at.unwrap_or_else(chrono::Utc::now)),
            created_by: Set(insert.created_by),
            updated_at: Set(insert.updated_at),
            updated_by: Set(insert.updated_by),
        }
    }
}

/// Partial change to a quote
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Update {
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "super::non_null"
    )]
    pub quote_id: Option<String>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "super::non_null"
    )]
    pub name: Option<String>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "super::non_null"
    )]
    pub status: Option<QuoteStatus>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "super::non_null"
    )]
    pub customer_id: Option<String>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "super::nullable"
    )]
    pub location_id: Option<Option<String>>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "super::nullable"
    )]
    pub owner_id: Option<Option<String>>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "super::nullable"
    )]
    pub expiration_date: Option<Option<Date>>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "super::nullable"
    )]
    pub notes: Option<Option<String>>,
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
        patch(&mut active.quote_id, self.quote_id);
        patch(&mut active.name, self.name);
        patch(&mut active.status, self.status);
        patch(&mut active.customer_id, self.customer_id);
        patch(&mut active.location_id, self.location_id);
        patch(&mut active.owner_id, self.owner_id);
        patch(&mut active.expiration_date, self.expiration_date);
        patch(&mut active.notes, self.notes);
        patch(&mut active.updated_by, self.updated_by);
        active
    }
}
