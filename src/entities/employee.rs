//! Employee entity - members of the workforce.
//!
//! Employees own quotes (`quote.owner_id`) and are grouped by employee type.

use super::{new_id, patch};
use crate::core::descriptor::Reflect;
use sea_orm::{ActiveValue::Unchanged, Set, entity::prelude::*};
use serde::{Deserialize, Serialize};

/// Employee row
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "employee")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    #[sea_orm(unique)]
    pub email: String,
    pub employee_type_id: String,
    pub active: bool,
    pub created_at: DateTimeUtc,
    pub created_by: String,
    pub updated_at: Option<DateTimeUtc>,
    pub updated_by: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::employee_type::Entity",
        from = "Column::EmployeeTypeId",
        to = "super::employee_type::Column::Id"
    )]
    EmployeeType,
    #[sea_orm(has_many = "super::quote::Entity")]
    Quotes,
}

impl Related<super::employee_type::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::EmployeeType.def()
    }
}

impl Related<super::quote::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Quotes.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Reflect for Entity {
    const DEFAULTED: &'static [&'static str] = &["id", "active", "created_at"];
}

/// Fields accepted when creating an employee
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Insert {
    pub id: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub employee_type_id: String,
    pub active: Option<bool>,
    pub created_at: Option<DateTimeUtc>,
    pub created_by: String,
    pub updated_at: Option<DateTimeUtc>,
    pub updated_by: Option<String>,
}

impl From<Insert> for ActiveModel {
    fn from(insert: Insert) -> Self {
        Self {
            id: Set(insert.id.unwrap_or_else(new_id)),
            first_name: Set(insert.first_name),
            last_name: Set(insert.last_name),
            email: Set(insert.email),
            employee_type_id: Set(insert.employee_type_id),
            active: Set(insert.active.unwrap_or(true)),
            created_at: Set(insert.created_at.unwrap_or_else(chrono::Utc::now)),
            created_by: Set(insert.created_by),
            updated_at: Set(insert.updated_at),
            updated_by: Set(insert.updated_by),
        }
    }
}

/// Partial change to an employee
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Update {
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "super::non_null"
    )]
    pub first_name: Option<String>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "super::non_null"
    )]
    pub last_name: Option<String>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "super::non_null"
    )]
    pub email: Option<String>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "super::non_null"
    )]
    pub employee_type_id: Option<String>,
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
    /// Turns the change into an active model keyed by `id`.
    #[must_use]
    pub fn into_active_model(self, id: String) -> ActiveModel {
        let mut active = ActiveModel {
            id: Unchanged(id),
            updated_at: Set(Some(chrono::Utc::now())),
            ..Default::default()
        };
        patch(&mut active.first_name, self.first_name);
        patch(&mut active.last_name, self.last_name);
        patch(&mut active.email, self.email);
        patch(&mut active.employee_type_id, self.employee_type_id);
        patch(&mut active.active, self.active);
        patch(&mut active.updated_by, self.updated_by);
        active
    }
}
