//! Supplier contact entity - links a contact to the supplier it works for.
//!
//! A contact belongs to at most one supplier, so `contact_id` is unique and the
//! link is one-to-one from the contact's side.

use super::{new_id, patch};
use crate::core::descriptor::Reflect;
use sea_orm::{ActiveValue::Unchanged, Set, entity::prelude::*};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "supplier_contact")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub supplier_id: String,
    #[sea_orm(unique)]
    pub contact_id: String,
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
        belongs_to = "super::contact::Entity",
        from = "Column::ContactId",
        to = "super::contact::Column::Id"
    )]
    Contact,
}

impl Related<super::supplier::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Supplier.def()
    }
}

impl Related<super::contact::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Contact.def()
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
    pub supplier_id: String,
    pub contact_id: String,
}

impl From<Insert> for ActiveModel {
    fn from(insert: Insert) -> Self {
        Self {
            id: Set(insert.id.unwrap_or_else(new_id)),
            supplier_id: Set(insert.supplier_id),
            contact_id: Set(insert.contact_id),
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
    pub supplier_id: Option<String>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "super::non_null"
    )]
    pub contact_id: Option<String>,
}

impl Update {
    #[must_use]
    pub fn into_active_model(self, id: String) -> ActiveModel {
        let mut active = ActiveModel {
            id: Unchanged(id),
            ..Default::default()
        };
        patch(&mut active.supplier_id, self.supplier_id);
        patch(&mut active.contact_id, self.contact_id);
        active
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{errors::Result, test_utils::*};

    #[tokio::test]
    async fn test_contact_links_to_one_supplier_only() -> Result<()> {
        let db = setup_test_db().await?;
        let first = create_test_supplier(&db, "Acme Metals").await?;
        let second = create_test_supplier(&db, "Globex").await?;
        let link = create_test_supplier_contact(&db, &first.id, "ana@acme.test").await?;

        let duplicate = ActiveModel::from(Insert {
            id: None,
            supplier_id: second.id,
            contact_id: link.contact_id,
        })
        .insert(&db)
        .await;
        assert!(duplicate.is_err());

        Ok(())
    }
}
