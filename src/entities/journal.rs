//! Journal entity - a balanced batch of ledger postings.
//!
//! Journals use an auto-increment integer key; the lines that make up the
//! posting live in `journal_line`.

use super::patch;
use crate::core::descriptor::Reflect;
use sea_orm::{
    ActiveValue::{NotSet, Unchanged},
    Set,
    entity::prelude::*,
};
use serde::{Deserialize, Serialize};

/// Journal row
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "journal")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub description: Option<String>,
    pub posting_date: Date,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::journal_line::Entity")]
    Lines,
}

impl Related<super::journal_line::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Lines.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Reflect for Entity {
    const DEFAULTED: &'static [&'static str] = &["id", "posting_date", "created_at"];
}

/// Fields accepted when creating a journal
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Insert {
    pub id: Option<i32>,
    pub description: Option<String>,
    pub posting_date: Option<Date>,
    pub created_at: Option<DateTimeUtc>,
}

impl From<Insert> for ActiveModel {
    fn from(insert: Insert) -> Self {
        Self {
            id: insert.id.map_or(NotSet, Set),
            description: Set(insert.description),
            posting_date: Set(insert
                .posting_date
                .unwrap_or_else(|| chrono::Utc::now().date_naive())),
            created_at: Set(insert.created_at.unwrap_or_else(chrono::Utc::now)),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Update {
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "super::nullable"
    )]
    pub description: Option<Option<String>>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "super::non_null"
    )]
    pub posting_date: Option<Date>,
}

impl Update {
    #[must_use]
    pub fn into_active_model(self, id: i32) -> ActiveModel {
        let mut active = ActiveModel {
            id: Unchanged(id),
            ..Default::default()
        };
        patch(&mut active.description, self.description);
        patch(&mut active.posting_date, self.posting_date);
        active
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{errors::Result, test_utils::setup_test_db};

    #[tokio::test]
    async fn test_journal_ids_are_assigned_by_database() -> Result<()> {
        let db = setup_test_db().await?;

        let first = ActiveModel::from(Insert::default()).insert(&db).await?;
        let second = ActiveModel::from(Insert {
            description: Some("Month end".to_string()),
            ..Default::default()
        })
        .insert(&db)
        .await?;

        assert!(second.id > first.id);
        assert_eq!(second.description.as_deref(), Some("Month end"));

        Ok(())
    }
}
