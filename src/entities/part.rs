//! Part entity - items the business buys, makes, stocks or sells.
//!
//! Part identifiers are readable part numbers chosen by the user (e.g.
//! `"F-0001"`), so unlike most relations the key is never generated.

use super::{
    domains::{PartReplenishmentSystem, PartType},
    patch,
};
use crate::core::descriptor::Reflect;
use sea_orm::{ActiveValue::Unchanged, Set, entity::prelude::*};
use serde::{Deserialize, Serialize};

/// Part row
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "part")]
pub struct Model {
    /// Part number
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub part_type: PartType,
    pub replenishment_system: PartReplenishmentSystem,
    pub unit_of_measure_code: String,
    /// Blocked parts cannot appear on new documents
    pub blocked: bool,
    pub active: bool,
    pub created_at: DateTimeUtc,
    pub created_by: String,
    pub updated_at: Option<DateTimeUtc>,
    pub updated_by: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::unit_of_measure::Entity",
        from = "Column::UnitOfMeasureCode",
        to = "super::unit_of_measure::Column::Code"
    )]
    UnitOfMeasure,
    #[sea_orm(has_many = "super::quote_line::Entity")]
    QuoteLines,
}

impl Related<super::unit_of_measure::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UnitOfMeasure.def()
    }
}

impl Related<super::quote_line::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::QuoteLines.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Reflect for Entity {
    const DEFAULTED: &'static [&'static str] =
        &["replenishment_system", "blocked", "active", "created_at"];
    const DOMAINS: &'static [(&'static str, &'static str)] = &[
        ("part_type", "part_type"),
        ("replenishment_system", "part_replenishment_system"),
    ];
}

/// Fields accepted when creating a part
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Insert {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub part_type: PartType,
    pub replenishment_system: Option<PartReplenishmentSystem>,
    pub unit_of_measure_code: String,
    pub blocked: Option<bool>,
    pub active: Option<bool>,
    pub created_at: Option<DateTimeUtc>,
    pub created_by: String,
    pub updated_at: Option<DateTimeUtc>,
    pub updated_by: Option<String>,
}

impl From<Insert> for ActiveModel {
    fn from(insert: Insert) -> Self {
        Self {
            id: Set(insert.id),
            name: Set(insert.name),
            description: Set(insert.description),
            part_type: Set(insert.part_type),
            replenishment_system: Set(insert
                .replenishment_system
                .unwrap_or(PartReplenishmentSystem::Buy)),
            unit_of_measure_code: Set(insert.unit_of_measure_code),
            blocked: Set(insert.blocked.unwrap_or(false)),
            active: Set(insert.active.unwrap_or(true)),
            created_at: Set(insert.created_at.unwrap_or_else(chrono::Utc::now)),
            created_by: Set(insert.created_by),
            updated_at: Set(insert.updated_at),
            updated_by: Set(insert.updated_by),
        }
    }
}

/// Partial change to a part
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Update {
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "super::non_null"
    )]
    pub name: Option<String>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "super::nullable"
    )]
    pub description: Option<Option<String>>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "super::non_null"
    )]
    pub part_type: Option<PartType>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "super::non_null"
    )]
    pub replenishment_system: Option<PartReplenishmentSystem>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "super::non_null"
    )]
    pub unit_of_measure_code: Option<String>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "super::non_null"
    )]
    pub blocked: Option<bool>,
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
    /// Turns the change into an active model keyed by part number.
    #[must_use]
    pub fn into_active_model(self, id: String) -> ActiveModel {
        let mut active = ActiveModel {
            id: Unchanged(id),
            updated_at: Set(Some(chrono::Utc::now())),
            ..Default::default()
        };
        patch(&mut active.name, self.name);
        patch(&mut active.description, self.description);
        patch(&mut active.part_type, self.part_type);
        patch(&mut active.replenishment_system, self.replenishment_system);
        patch(&mut active.unit_of_measure_code, self.unit_of_measure_code);
        patch(&mut active.blocked, self.blocked);
        patch(&mut active.active, self.active);
        patch(&mut active.updated_by, self.updated_by);
        active
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{errors::Result, test_utils::*};

    #[tokio::test]
    async fn test_part_keeps_user_supplied_number() -> Result<()> {
        let db = setup_test_db().await?;
        let part = create_test_part(&db, "F-0001").await?;

        assert_eq!(part.id, "F-0001");
        assert_eq!(part.replenishment_system, PartReplenishmentSystem::Buy);
        assert!(!part.blocked);

        let found = Entity::find_by_id("F-0001").one(&db).await?;
        assert_eq!(found.map(|row| row.name), Some(part.name));

        Ok(())
    }

    #[tokio::test]
    async fn test_block_part() -> Result<()> {
        let db = setup_test_db().await?;
        let part = create_test_part(&db, "F-0002").await?;

        let update = Update {
            blocked: Some(true),
            ..Default::default()
        };
        let updated = update.into_active_model(part.id).update(&db).await?;
        assert!(updated.blocked);
        assert!(updated.active);

        Ok(())
    }
}
