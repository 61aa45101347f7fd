//! Purchase order line entity - one ordered item, account charge or comment.
//!
//! Which of `part_id` / `account_number` is filled depends on `line_type`; the
//! database leaves that pairing to the application.

use super::{domains::PurchaseOrderLineType, new_id, patch};
use crate::core::descriptor::Reflect;
use sea_orm::{ActiveValue::Unchanged, Set, entity::prelude::*};
use serde::{Deserialize, Serialize};

/// Purchase order line row
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "purchase_order_line")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub purchase_order_id: String,
    pub line_type: PurchaseOrderLineType,
    pub part_id: Option<String>,
    pub account_number: Option<String>,
    pub description: Option<String>,
    pub purchase_quantity: f64,
    pub unit_price: f64,
    pub quantity_received: f64,
    pub quantity_invoiced: f64,
    pub location_id: Option<String>,
    pub created_at: DateTimeUtc,
    pub created_by: String,
    pub updated_at: Option<DateTimeUtc>,
    pub updated_by: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::purchase_order::Entity",
        from = "Column::PurchaseOrderId",
        to = "super::purchase_order::Column::Id"
    )]
    PurchaseOrder,
    #[sea_orm(
        belongs_to = "super::part::Entity",
        from = "Column::PartId",
        to = "super::part::Column::Id"
    )]
    Part,
    #[sea_orm(
        belongs_to = "super::account::Entity",
        from = "Column::AccountNumber",
        to = "super::account::Column::Number"
    )]
    Account,
    #[sea_orm(
        belongs_to = "super::location::Entity",
        from = "Column::LocationId",
        to = "super::location::Column::Id"
    )]
    Location,
}

impl Related<super::purchase_order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PurchaseOrder.def()
    }
}

impl Related<super::part::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Part.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Reflect for Entity {
    const DEFAULTED: &'static [&'static str] = &[
        "id",
        "purchase_quantity",
        "unit_price",
        "quantity_received",
        "quantity_invoiced",
        "created_at",
    ];
    const DOMAINS: &'static [(&'static str, &'static str)] =
        &[("line_type", "purchase_order_line_type")];
}

/// Fields accepted when creating a purchase order line
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Insert {
    pub id: Option<String>,
    pub purchase_order_id: String,
    pub line_type: PurchaseOrderLineType,
    pub part_id: Option<String>,
    pub account_number: Option<String>,
    pub description: Option<String>,
    pub purchase_quantity: Option<f64>,
    pub unit_price: Option<f64>,
    pub quantity_received: Option<f64>,
    pub quantity_invoiced: Option<f64>,
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
            purchase_order_id: Set(insert.purchase_order_id),
            line_type: Set(insert.line_type),
            part_id: Set(insert.part_id),
            account_number: Set(insert.account_number),
            description: Set(insert.description),
            purchase_quantity: Set(insert.purchase_quantity.unwrap_or(0.0)),
            unit_price: Set(insert.unit_price.unwrap_or(0.0)),
            quantity_received: Set(insert.quantity_received.unwrap_or(0.0)),
            quantity_invoiced: Set(insert.quantity_invoiced.unwrap_or(0.0)),
            location_id: Set(insert.location_id),
            created_at: Set(insert.created_at.unwrap_or_else(chrono::Utc::now)),
            created_by: Set(insert.created_by),
            updated_at: Set(insert.updated_at),
            updated_by: Set(insert.updated_by),
        }
    }
}

/// Partial change to a purchase order line
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Update {
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "super::non_null"
    )]
    pub purchase_order_id: Option<String>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "super::non_null"
    )]
    pub line_type: Option<PurchaseOrderLineType>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "super::nullable"
    )]
    pub part_id: Option<Option<String>>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "super::nullable"
    )]
    pub account_number: Option<Option<String>>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "super::nullable"
    )]
    pub description: Option<Option<String>>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "super::non_null"
    )]
    pub purchase_quantity: Option<f64>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "super::non_null"
    )]
    pub unit_price: Option<f64>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "super::non_null"
    )]
    pub quantity_received: Option<f64>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "super::non_null"
    )]
    pub quantity_invoiced: Option<f64>,
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
        patch(&mut active.purchase_order_id, self.purchase_order_id);
        patch(&mut active.line_type, self.line_type);
        patch(&mut active.part_id, self.part_id);
        patch(&mut active.account_number, self.account_number);
        patch(&mut active.description, self.description);
        patch(&mut active.purchase_quantity, self.purchase_quantity);
        patch(&mut active.unit_price, self.unit_price);
        patch(&mut active.quantity_received, self.quantity_received);
        patch(&mut active.quantity_invoiced, self.quantity_invoiced);
        patch(&mut active.location_id, self.location_id);
        patch(&mut active.updated_by, self.updated_by);
        active
    }
}
