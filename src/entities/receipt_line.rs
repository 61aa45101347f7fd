//! Receipt line entity - quantity of one part received on a receipt.
//!
//! `line_id` points back at the source document line (e.g. a purchase order
//! line) and is deliberately not a foreign key, since the source may be one of
//! several line relations.

use super::{new_id, patch};
use crate::core::descriptor::Reflect;
use sea_orm::{ActiveValue::Unchanged, Set, entity::prelude::*};
use serde::{Deserialize, Serialize};

/// Receipt line row
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "receipt_line")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub receipt_id: String,
    pub line_id: Option<String>,
    pub part_id: String,
    pub order_quantity: f64,
    pub received_quantity: f64,
    pub unit_price: f64,
    pub unit_of_measure_code: String,
    pub location_id: Option<String>,
    pub created_at: DateTimeUtc,
    pub created_by: String,
    pub updated_at: Option<DateTimeUtc>,
    pub updated_by: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::receipt::Entity",
        from = "Column::ReceiptId",
        to = "super::receipt::Column::Id"
    )]
    Receipt,
    #[sea_orm(
        belongs_to = "super::part::Entity",
        from = "Column::PartId",
        to = "super::part::Column::Id"
    )]
    Part,
    #[sea_orm(
        belongs_to = "super::unit_of_measure::Entity",
        from = "Column::UnitOfMeasureCode",
        to = "super::unit_of_measure::Column::Code"
    )]
    UnitOfMeasure,
    #[sea_orm(
        belongs_to = "super::location::Entity",
        from = "Column::LocationId",
        to = "super::location::Column::Id"
    )]
    Location,
}

impl Related<super::receipt::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Receipt.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Reflect for Entity {
    const DEFAULTED: &'static [&'static str] =
        &["id", "received_quantity", "unit_price", "created_at"];
}

/// Fields accepted when creating a receipt line
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Insert {
    pub id: Option<String>,
    pub receipt_id: String,
    pub line_id: Option<String>,
    pub part_id: String,
    pub order_quantity: f64,
    pub received_quantity: Option<f64>,
    pub unit_price: Option<f64>,
    pub unit_of_measure_code: String,
    pub location_id: Option<String>,
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
            line_id: Set(insert.line_id),
            part_id: Set(insert.part_id),
            order_quantity: Set(insert.order_quantity),
            received_quantity: Set(insert.received_quantity.unwrap_or(0.0)),
            unit_price: Set(insert.unit_price.unwrap_or(0.0)),
            unit_of_measure_code: Set(insert.unit_of_measure_code),
            location_id: Set(insert.location_id),
            created_at: Set(insert.created_at.unwrap_or_else(chrono::Utc::now)),
            created_by: Set(insert.created_by),
            updated_at: Set(insert.updated_at),
            updated_by: Set(insert.updated_by),
        }
    }
}

/// Partial change to a receipt line
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
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
    pub line_id: Option<Option<String>>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "super::non_null"
    )]
    pub part_id: Option<String>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "super::non_null"
    )]
    pub order_quantity: Option<f64>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "super::non_null"
    )]
    pub received_quantity: Option<f64>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "super::non_null"
    )]
    pub unit_price: Option<f64>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "super::non_null"
    )]
    pub unit_of_measure_code: Option<String>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "super::nullable"
    )]
    pub location_id: Option<Option<String>>,
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
        patch(&mut active.line_id, self.line_id);
        patch(&mut active.part_id, self.part_id);
        patch(&mut active.order_quantity, self.order_quantity);
        patch(&mut active.received_quantity, self.received_quantity);
        patch(&mut active.unit_price, self.unit_price);
        patch(&mut active.unit_of_measure_code, self.unit_of_measure_code);
        patch(&mut active.location_id, self.location_id);
        patch(&mut active.updated_by, self.updated_by);
        active
    }
}
