//! Purchase order summary view - order header joined with its supplier name and
//! aggregated line totals.
//!
//! The view is defined in `config::database::create_views`; this module only
//! reads it.

use super::domains::{PurchaseOrderStatus, PurchaseOrderType};
use crate::core::descriptor::{Reflect, RelationKind};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Purchase order summary row
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "purchase_order_summary")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub purchase_order_id: Option<String>,
    pub status: Option<PurchaseOrderStatus>,
    pub purchase_order_type: Option<PurchaseOrderType>,
    pub order_date: Option<Date>,
    pub supplier_id: Option<String>,
    pub supplier_name: Option<String>,
    pub line_count: Option<i64>,
    /// Sum of `purchase_quantity * unit_price` over the order's lines
    pub order_total: Option<f64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Reflect for Entity {
    const KIND: RelationKind = RelationKind::View;
    const DOMAINS: &'static [(&'static str, &'static str)] = &[
        ("status", "purchase_order_status"),
        ("purchase_order_type", "purchase_order_type"),
    ];
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        entities::{domains::PurchaseOrderLineType, purchase_order_line, supplier},
        errors::Result,
        test_utils::{
            create_test_part, create_test_purchase_order, create_test_supplier, setup_test_db,
        },
    };
    use sea_orm::ActiveModelTrait;

    #[tokio::test]
    async fn test_summary_aggregates_lines() -> Result<()> {
        let db = setup_test_db().await?;
        let supplier: supplier::Model = create_test_supplier(&db, "Acme Fasteners").await?;
        let order = create_test_purchase_order(&db, "PO000001", &supplier.id).await?;
        let part = create_test_part(&db, "F-0001").await?;

        for (quantity, price) in [(10.0, 1.5), (4.0, 2.5)] {
            purchase_order_line::ActiveModel::from(purchase_order_line::Insert {
                id: None,
                purchase_order_id: order.id.clone(),
                line_type: PurchaseOrderLineType::Part,
                part_id: Some(part.id.clone()),
                account_number: None,
                description: None,
                purchase_quantity: Some(quantity),
                unit_price: Some(price),
                quantity_received: None,
                quantity_invoiced: None,
                location_id: None,
                created_at: None,
                created_by: "tester".to_string(),
                updated_at: None,
                updated_by: None,
            })
            .insert(&db)
            .await?;
        }

        let summary = Entity::find_by_id(order.id.clone()).one(&db).await?;
        let summary = summary.ok_or_else(|| sea_orm::DbErr::RecordNotFound(order.id.clone()))?;

        assert_eq!(summary.purchase_order_id.as_deref(), Some("PO000001"));
        assert_eq!(summary.supplier_name.as_deref(), Some("Acme Fasteners"));
        assert_eq!(summary.status, Some(PurchaseOrderStatus::Draft));
        assert_eq!(summary.line_count, Some(2));
        assert_eq!(summary.order_total, Some(25.0));

        Ok(())
    }

    #[tokio::test]
    async fn test_summary_of_empty_order() -> Result<()> {
        let db = setup_test_db().await?;
        let supplier = create_test_supplier(&db, "Acme Fasteners").await?;
        let order = create_test_purchase_order(&db, "PO000002", &supplier.id).await?;

        let summary = Entity::find_by_id(order.id.clone())
            .one(&db)
            .await?
            .ok_or_else(|| sea_orm::DbErr::RecordNotFound(order.id.clone()))?;

        assert_eq!(summary.line_count, Some(0));
        assert_eq!(summary.order_total, Some(0.0));

        Ok(())
    }
}
