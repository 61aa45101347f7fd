//! Schema verification - compares the catalog with a live `SQLite` schema.
//!
//! The database is introspected through `sqlite_master` and the `table_info`,
//! `index_list` and `foreign_key_list` pragmas. Column types are not compared: `SQLite` only keeps
//! type affinities, which say little about the declared type.

use crate::{
    core::{
        catalog::Catalog,
        descriptor::{RelationDescriptor, RelationKind},
    },
    errors::{Error, Result},
};
use sea_orm::{ConnectionTrait, DatabaseConnection, DbBackend, Statement};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// One difference between the catalog and the live schema
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "drift", rename_all = "snake_case")]
pub enum Drift {
    /// A catalogued relation does not exist
    MissingRelation {
        relation: String,
    },
    /// The database holds a relation the catalog does not know
    UncataloguedRelation {
        relation: String,
    },
    /// A table where a view is expected, or the other way round
    KindMismatch {
        relation: String,
        expected: RelationKind,
        actual: RelationKind,
    },
    /// A catalogued column does not exist
    MissingColumn {
        relation: String,
        column: String,
    },
    /// The relation has a column the catalog does not know
    UnexpectedColumn {
        relation: String,
        column: String,
    },
    /// The column's NOT NULL constraint differs
    NullabilityMismatch {
        relation: String,
        column: String,
        expected_nullable: bool,
    },
    /// The column's single-column UNIQUE constraint differs
    UniquenessMismatch {
        relation: String,
        column: String,
        expected_unique: bool,
    },
    /// A catalogued foreign key does not exist
    MissingForeignKey {
        relation: String,
        key: LiveForeignKey,
    },
    /// The relation has a foreign key the catalog does not know
    UnexpectedForeignKey {
        relation: String,
        key: LiveForeignKey,
    },
}

/// A foreign key as `SQLite` reports it; constraint names are not kept
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct LiveForeignKey {
    /// Owning columns, in key order
    pub columns: Vec<String>,
    /// Relation the key points at
    pub referenced_relation: String,
    /// Referenced columns, matching `columns` position by position
    pub referenced_columns: Vec<String>,
}

/// A column as `SQLite` reports it
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LiveColumn {
    /// Column name
    pub name: String,
    /// `false` when the column is declared NOT NULL
    pub nullable: bool,
    /// Whether a unique index covers exactly this column
    pub unique: bool,
}

/// A table or view as `SQLite` reports it
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LiveRelation {
    /// Table or view
    pub kind: RelationKind,
    /// Columns in declaration order
    pub columns: Vec<LiveColumn>,
    /// Foreign keys owned by the relation
    pub foreign_keys: BTreeSet<LiveForeignKey>,
}

/// Reports every difference between `catalog` and the schema behind `db`.
///
/// An empty result means every catalogued relation exists with the same kind,
/// columns, nullability, uniqueness and foreign keys, and nothing else does.
///
/// # Errors
/// [`Error::UnsupportedBackend`] for anything but `SQLite`, or a database error
/// from introspection.
pub async fn verify_schema(db: &DatabaseConnection, catalog: &Catalog) -> Result<Vec<Drift>> {
    let backend = db.get_database_backend();
    if backend != DbBackend::Sqlite {
        return Err(Error::UnsupportedBackend {
            backend: format!("{backend:?}"),
        });
    }

    let live = introspect(db).await?;
    let drift = compare(catalog, &live);

    tracing::info!(
        relations = live.len(),
        drift = drift.len(),
        "Verified schema against catalog"
    );
    Ok(drift)
}

/// Reads every user table and view of a `SQLite` database.
pub async fn introspect(db: &DatabaseConnection) -> Result<BTreeMap<String, LiveRelation>> {
    let objects = db
        .query_all(Statement::from_string(
            DbBackend::Sqlite,
            "SELECT name, type FROM sqlite_master \
             WHERE type IN ('table', 'view') AND name NOT LIKE 'sqlite_%' \
             ORDER BY name",
        ))
        .await?;

    let mut relations = BTreeMap::new();
    for object in objects {
        let name: String = object.try_get("", "name")?;
        let kind: String = object.try_get("", "type")?;
        let kind = if kind == "view" {
            RelationKind::View
        } else {
            RelationKind::Table
        };

        let unique = read_unique_columns(db, &name).await?;
        let columns = db
            .query_all(Statement::from_sql_and_values(
                DbBackend::Sqlite,
                "SELECT name, \"notnull\" AS not_null FROM pragma_table_info(?) ORDER BY cid",
                [name.clone().into()],
            ))
            .await?
            .into_iter()
            .map(|row| {
                let name: String = row.try_get("", "name")?;
                Ok(LiveColumn {
                    nullable: row.try_get::<i32>("", "not_null")? == 0,
                    unique: unique.contains(&name),
                    name,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let foreign_keys = read_foreign_keys(db, &name).await?;

        relations.insert(
            name,
            LiveRelation {
                kind,
                columns,
                foreign_keys,
            },
        );
    }

    Ok(relations)
}

/// Columns covered on their own by a UNIQUE constraint or unique index.
///
/// Primary-key indexes are left out; the key is compared separately.
async fn read_unique_columns(db: &DatabaseConnection, relation: &str) -> Result<BTreeSet<String>> {
    let rows = db
        .query_all(Statement::from_sql_and_values(
            DbBackend::Sqlite,
            "SELECT il.name AS index_name, ii.name AS column_name \
             FROM pragma_index_list(?) AS il, pragma_index_info(il.name) AS ii \
             WHERE il.\"unique\" = 1 AND il.origin <> 'pk'",
            [relation.into()],
        ))
        .await?;

    let mut indexes: BTreeMap<String, Vec<Option<String>>> = BTreeMap::new();
    for row in rows {
        let index: String = row.try_get("", "index_name")?;
        let column: Option<String> = row.try_get("", "column_name")?;
        indexes.entry(index).or_default().push(column);
    }

    Ok(indexes
        .into_values()
        .filter_map(|columns| match columns.as_slice() {
            [Some(column)] => Some(column.clone()),
            _ => None,
        })
        .collect())
}

async fn read_foreign_keys(
    db: &DatabaseConnection,
    relation: &str,
) -> Result<BTreeSet<LiveForeignKey>> {
    let rows = db
        .query_all(Statement::from_sql_and_values(
            DbBackend::Sqlite,
            "SELECT id, \"table\" AS target, \"from\" AS source, \"to\" AS target_column \
             FROM pragma_foreign_key_list(?) ORDER BY id, seq",
            [relation.into()],
        ))
        .await?;

    // Multi-column keys come back as one row per column sharing an id
    let mut keys: BTreeMap<i32, LiveForeignKey> = BTreeMap::new();
    for row in rows {
        let id: i32 = row.try_get("", "id")?;
        let target: String = row.try_get("", "target")?;
        let source: String = row.try_get("", "source")?;
        let target_column: Option<String> = row.try_get("", "target_column")?;

        let key = keys.entry(id).or_insert_with(|| LiveForeignKey {
            columns: Vec::new(),
            referenced_relation: target,
            referenced_columns: Vec::new(),
        });
        key.columns.push(source);
        key.referenced_columns
            .push(target_column.unwrap_or_else(|| "id".to_string()));
    }

    Ok(keys.into_values().collect())
}

/// Compares catalogued relations with introspected ones.
#[must_use]
pub fn compare(catalog: &Catalog, live: &BTreeMap<String, LiveRelation>) -> Vec<Drift> {
    let mut drift = Vec::new();

    for expected in catalog.relations() {
        match live.get(&expected.name) {
            Some(actual) => compare_relation(expected, actual, &mut drift),
            None => drift.push(Drift::MissingRelation {
                relation: expected.name.clone(),
            }),
        }
    }

    for name in live.keys() {
        if catalog.relation(name).is_err() {
            drift.push(Drift::UncataloguedRelation {
                relation: name.clone(),
            });
        }
    }

    drift
}

fn compare_relation(expected: &RelationDescriptor, actual: &LiveRelation, drift: &mut Vec<Drift>) {
    let relation = &expected.name;

    if expected.kind != actual.kind {
        drift.push(Drift::KindMismatch {
            relation: relation.clone(),
            expected: expected.kind,
            actual: actual.kind,
        });
    }

    for column in &expected.columns {
        match actual.columns.iter().find(|live| live.name == column.name) {
            None => drift.push(Drift::MissingColumn {
                relation: relation.clone(),
                column: column.name.clone(),
            }),
            // Views report no NOT NULL even on their key; keys are compared as keys
            Some(_) if column.primary_key => {}
            Some(live) => {
                if live.nullable != column.nullable {
                    drift.push(Drift::NullabilityMismatch {
                        relation: relation.clone(),
                        column: column.name.clone(),
                        expected_nullable: column.nullable,
                    });
                }
                if live.unique != column.unique {
                    drift.push(Drift::UniquenessMismatch {
                        relation: relation.clone(),
                        column: column.name.clone(),
                        expected_unique: column.unique,
                    });
                }
            }
        }
    }

    for live in &actual.columns {
        if expected.column(&live.name).is_none() {
            drift.push(Drift::UnexpectedColumn {
                relation: relation.clone(),
                column: live.name.clone(),
            });
        }
    }

    let declared: BTreeSet<LiveForeignKey> = expected
        .foreign_keys
        .iter()
        .map(|key| LiveForeignKey {
            columns: key.columns.clone(),
            referenced_relation: key.referenced_relation.clone(),
            referenced_columns: key.referenced_columns.clone(),
        })
        .collect();

    for key in declared.difference(&actual.foreign_keys) {
        drift.push(Drift::MissingForeignKey {
            relation: relation.clone(),
            key: key.clone(),
        });
    }
    for key in actual.foreign_keys.difference(&declared) {
        drift.push(Drift::UnexpectedForeignKey {
            relation: relation.clone(),
            key: key.clone(),
        });
    }
}
