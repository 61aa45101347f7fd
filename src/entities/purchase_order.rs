//! Purchase order entity - orders placed with a supplier.
//!
//! `purchase_order_id` is the readable document number (e.g. `"PO000042"`),
//! usually drawn from the `purchase_order` sequence; `id` is the generated key
//! other relations point at.

use super::{
    domains::{PurchaseOrderStatus, PurchaseOrderType},
    new_id, patch,
};
use crate::core::descriptor::Reflect;
use sea_orm::{ActiveValue::Unchanged, Set, entity::prelude::*};
use serde::{Deserialize, Serialize};

/// Purchase order row
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "purchase_order")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// Readable document number
    #[sea_orm(unique)]
    pub purchase_order_id: String,
    pub purchase_order_type: PurchaseOrderType,
    pub status: PurchaseOrderStatus,
    pub order_date: Date,
    pub supplier_id: String,
    pub supplier_contact_id: Option<String>,
    /// Delivery location
    pub location_id: Option<String>,
    pub currency_code: Option<String>,
    pub notes: Option<String>,
    pub closed_at: Option<DateTimeUtc>,
    pub closed_by: Option<String>,
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
        belongs_to = "super::supplier_contact::Entity",
        from = "Column::SupplierContactId",
        to = "super::supplier_contact::Column::Id"
    )]
    SupplierContact,
    #[sea_orm(
        belongs_to = "super::location::Entity",
        from = "Column::LocationId",
        to = "super::location::Column::Id"
    )]
    Location,
    #[sea_orm(
        belongs_to = "super::currency::Entity",
        from = "Column::CurrencyCode",
        to = "super::currency::Column::Code"
    )]
    Currency,
    #[sea_orm(has_many = "super::purchase_order_line::Entity")]
    Lines,
}

impl Related<super::supplier::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Supplier.def()
    }
}

impl Related<super::purchase_order_line::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Lines.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Reflect for Entity {
    const DEFAULTED: &'static [&'static str] = &[
        "id",
        "purchase_order_type",
        "status",
        "order_date",
        "created_at",
    ];
    const DOMAINS: &'static [(&'static str, &'static str)] = &[
        ("purchase_order_type", "purchase_order_type"),
        ("status", "purchase_order_status"),
    ];
}

/// Fields accepted when creating a purchase order
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Insert {
    pub id: Option<String>,
    pub purchase_order_id: String,
    pub purchase_order_type: Option<PurchaseOrderType>,
    pub status: Option<PurchaseOrderStatus>,
    pub order_date: Option<Date>,
    pub supplier_id: String,
    pub supplier_contact_id: Option<String>,
    pub location_id: Option<String>,
    pub currency_code: Option<String>,
    pub notes: Option<String>,
    pub closed_at: Option<DateTimeUtc>,
    pub closed_by: Option<String>,
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
            purchase_order_type: Set(insert
                .purchase_order_type
                .unwrap_or(PurchaseOrderType::Purchase)),
            status: Set(insert.status.unwrap_or(PurchaseOrderStatus::Draft)),
            order_date: Set(insert
                .order_date
                .unwrap_or_else(|| chrono::Utc::now().date_naive())),
            supplier_id: Set(insert.supplier_id),
            supplier_contact_id: Set(insert.supplier_contact_id),
            location_id: Set(insert.location_id),
            currency_code: Set(insert.currency_code),
            notes: Set(insert.notes),
            closed_at: Set(insert.closed_at),
            closed_by: Set(insert.closed_by),
            created_at: Set(insert.created_at.unwrap_or_else(chrono::Utc::now)),
            created_by: Set(insert.created_by),
            updated_at: Set(insert.updated_at),
            updated_by: Set(insert.updated_by),
        }
    }
}

/// Partial change to a purchase order
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
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
    pub purchase_order_type: Option<PurchaseOrderType>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "super::non_null"
    )]
    pub status: Option<PurchaseOrderStatus>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "super::non_null"
    )]
    pub order_date: Option<Date>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "super::non_null"
    )]
    pub supplier_id: Option<String>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "super::nullable"
    )]
    pub supplier_contact_id: Option<Option<String>>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "super::nullable"
    )]
    pub location_id: Option<Option<String>>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "super::nullable"
    )]
    pub currency_code: Option<Option<String>>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "super::nullable"
    )]
    pub notes: Option<Option<String>>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "super::nullable"
    )]
    pub closed_at: Option<Option<DateTimeUtc>>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "super::nullable"
    )]
    pub closed_by: Option<Option<String>>,
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
        patch(&mut active.purchase_order_type, self.purchase_order_type);
        patch(&mut active.status, self.status);
        patch(&mut active.order_date, self.order_date);
        patch(&mut active.supplier_id, self.supplier_id);
        patch(&mut active.supplier_contact_id, self.supplier_contact_id);
        patch(&mut active.location_id, self.location_id);
        patch(&mut active.currency_code, self.currency_code);
        patch(&mut active.notes, self.notes);
        patch(&mut active.closed_at, self.closed_at);
        patch(&mut active.closed_by, self.closed_by);
        patch(&mut active.updated_by, self.updated_by);
        active
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{errors::Result, test_utils::*};
    use serde_json::json;

    #[tokio::test]
    async fn test_new_order_starts_as_draft_purchase() -> Result<()> {
        let db = setup_test_db().await?;
        let supplier = create_test_supplier(&db, "Acme Metals").await?;
        let order = create_test_purchase_order(&db, "PO000001", &supplier.id).await?;

        assert_eq!(order.status, PurchaseOrderStatus::Draft);
        assert_eq!(order.purchase_order_type, PurchaseOrderType::Purchase);
        assert_eq!(order.order_date, chrono::Utc::now().date_naive());
        assert_eq!(order.id.len(), 32);

        Ok(())
    }

    #[tokio::test]
    async fn test_close_order_with_json_update() -> Result<()> {
        let db = setup_test_db().await?;
        let supplier = create_test_supplier(&db, "Acme Metals").await?;
        let order = create_test_purchase_order(&db, "PO000001", &supplier.id).await?;

        let update: Update = serde_json::from_value(json!({
            "status": "Closed",
            "closed_at": "2026-03-01T12:00:00Z",
            "closed_by": "buyer"
        }))?;
        let closed = update.into_active_model(order.id.clone()).update(&db).await?;

        assert_eq!(closed.status, PurchaseOrderStatus::Closed);
        assert_eq!(closed.closed_by.as_deref(), Some("buyer"));
        assert!(closed.closed_at.is_some());
        assert_eq!(closed.purchase_order_id, order.purchase_order_id);

        Ok(())
    }

    #[test]
    fn test_update_rejects_primary_key() {
        let result = serde_json::from_value::<Update>(json!({ "id": "other" }));
        assert!(result.is_err());
    }
}
