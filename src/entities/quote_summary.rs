//! Quote summary view - quote header with its customer name and line totals.

use super::domains::QuoteStatus;
use crate::core::descriptor::{Reflect, RelationKind};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "quote_summary")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub quote_id: Option<String>,
    pub name: Option<String>,
    pub status: Option<QuoteStatus>,
    pub customer_id: Option<String>,
    pub customer_name: Option<String>,
    pub expiration_date: Option<Date>,
    pub line_count: Option<i64>,
    pub quote_total: Option<f64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Reflect for Entity {
    const KIND: RelationKind = RelationKind::View;
    const DOMAINS: &'static [(&'static str, &'static str)] = &[("status", "quote_status")];
}
