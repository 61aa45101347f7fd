//! Sequence entity - document numbering state, one row per numbered relation.
//!
//! `get_next_sequence` reads and advances these rows; see `core::functions`.

use super::patch;
use crate::core::descriptor::Reflect;
use sea_orm::{ActiveValue::Unchanged, Set, entity::prelude::*};
use serde::{Deserialize, Serialize};

/// Sequence row
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "sequence")]
pub struct Model {
    /// Name of the relation whose documents this sequence numbers
    #[sea_orm(primary_key, auto_increment = false)]
    pub table_name: String,
    pub name: String,
    pub prefix: Option<String>,
    pub suffix: Option<String>,
    /// Value handed out by the next call
    pub next: i64,
    /// Zero-padded width of the numeric part
    pub size: i32,
    pub step: i32,
    pub updated_at: Option<DateTimeUtc>,
    pub updated_by: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Reflect for Entity {
    const DEFAULTED: &'static [&'static str] = &["next", "size", "step"];
}

impl Model {
    /// Renders the document number for `value` using this sequence's layout.
    #[must_use]
    pub fn format(&self, value: i64) -> String {
        format_number(self.prefix.as_deref(), self.suffix.as_deref(), self.size, value)
    }
}

/// `prefix + value (zero-padded to size) + suffix`; a value wider than `size` is kept whole.
#[must_use]
pub fn format_number(prefix: Option<&str>, suffix: Option<&str>, size: i32, value: i64) -> String {
    let width = usize::try_from(size).unwrap_or(0);
    format!(
        "{}{value:0width$}{}",
        prefix.unwrap_or_default(),
        suffix.unwrap_or_default(),
    )
}

/// Fields accepted when creating a sequence
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Insert {
    pub table_name: String,
    pub name: String,
    pub prefix: Option<String>,
    pub suffix: Option<String>,
    pub next: Option<i64>,
    pub size: Option<i32>,
    pub step: Option<i32>,
    pub updated_at: Option<DateTimeUtc>,
    pub updated_by: Option<String>,
}

impl From<Insert> for ActiveModel {
    fn from(insert: Insert) -> Self {
        Self {
            table_name: Set(insert.table_name),
            name: Set(insert.name),
            prefix: Set(insert.prefix),
            suffix: Set(insert.suffix),
            next: Set(insert.next.unwrap_or(0)),
            size: Set(insert.size.unwrap_or(5)),
            step: Set(insert.step.unwrap_or(1)),
            updated_at: Set(insert.updated_at),
            updated_by: Set(insert.updated_by),
        }
    }
}

/// Partial change to a sequence
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
    pub prefix: Option<Option<String>>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "super::nullable"
    )]
    pub suffix: Option<Option<String>>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "super::non_null"
    )]
    pub next: Option<i64>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "super::non_null"
    )]
    pub size: Option<i32>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "super::non_null"
    )]
    pub step: Option<i32>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "super::nullable"
    )]
    pub updated_by: Option<Option<String>>,
}

impl Update {
    /// Turns the change into an active model keyed by `table_name`.
    #[must_use]
    pub fn into_active_model(self, table_name: String) -> ActiveModel {
        let mut active = ActiveModel {
            table_name: Unchanged(table_name),
            updated_at: Set(Some(chrono::Utc::now())),
            ..Default::default()
        };
        patch(&mut active.name, self.name);
        patch(&mut active.prefix, self.prefix);
        patch(&mut active.suffix, self.suffix);
        patch(&mut active.next, self.next);
        patch(&mut active.size, self.size);
        patch(&mut active.step, self.step);
        patch(&mut active.updated_by, self.updated_by);
        active
    }
}
