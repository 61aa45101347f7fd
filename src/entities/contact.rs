//! Contact entity - a person at a business partner.
//!
//! Contacts carry no audit columns; ownership lives on the link tables such as
//! `supplier_contact`.

use super::{new_id, patch};
use crate::core::descriptor::Reflect;
use sea_orm::{ActiveValue::Unchanged, Set, entity::prelude::*};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "contact")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub mobile_phone: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_one = "super::supplier_contact::Entity")]
    SupplierContact,
}

impl Related<super::supplier_contact::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SupplierContact.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Reflect for Entity {
    const DEFAULTED: &'static [&'static str] = &["id"];
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Insert {
    pub id: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub mobile_phone: Option<String>,
}

impl From<Insert> for ActiveModel {
    fn from(insert: Insert) -> Self {
        Self {
            id: Set(insert.id.unwrap_or_else(new_id)),
            first_name: Set(insert.first_name),
            last_name: Set(insert.last_name),
            email: Set(insert.email),
            mobile_phone: Set(insert.mobile_phone),
        }
    }
}

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
        deserialize_with = "super::nullable"
    )]
    pub mobile_phone: Option<Option<String>>,
}

impl Update {
    /// Turns the change into an active model keyed by `id`. Contacts have no
    /// `updated_at`, so an empty change leaves the row untouched.
    #[must_use]
    pub fn into_active_model(self, id: String) -> ActiveModel {
        let mut active = ActiveModel {
            id: Unchanged(id),
            ..Default::default()
        };
        patch(&mut active.first_name, self.first_name);
        patch(&mut active.last_name, self.last_name);
        patch(&mut active.email, self.email);
        patch(&mut active.mobile_phone, self.mobile_phone);
        active
    }
}
