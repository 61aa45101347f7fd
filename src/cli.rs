//! CLI argument definitions and command dispatch.
//!
//! Every command prints a single JSON document on stdout.

use clap::{Parser, Subcommand, ValueEnum};
use erp_schema::{
    config::{database, settings},
    core::{
        catalog::{Catalog, catalog, render_joins},
        shape::{Shape, ShapeKind},
        verify::verify_schema,
    },
    errors::Result,
};
use serde_json::{Value, json};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum ShapeArg {
    Row,
    Insert,
    Update,
}

impl From<ShapeArg> for ShapeKind {
    fn from(shape: ShapeArg) -> Self {
        match shape {
            ShapeArg::Row => Self::Row,
            ShapeArg::Insert => Self::Insert,
            ShapeArg::Update => Self::Update,
        }
    }
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// List every relation with its kind and primary key
    List,
    /// Show a relation's descriptor, or one of its shapes
    Describe {
        relation: String,
        #[arg(long, value_enum)]
        shape: Option<ShapeArg>,
    },
    /// List the enumerated domains and their labels
    Enums,
    /// List the callable database functions
    Functions,
    /// Plan the joins linking two relations
    Joins { from: String, to: String },
    /// Check a JSON payload file against a relation's shape
    Check {
        relation: String,
        file: PathBuf,
        #[arg(long, value_enum, default_value = "insert")]
        shape: ShapeArg,
    },
    /// Create all tables and views in the configured database
    Init,
    /// Compare the configured database with the catalog
    Verify,
}

fn shape(catalog: &Catalog, relation: &str, kind: ShapeKind) -> Result<Shape> {
    match kind {
        ShapeKind::Row => catalog.row_shape(relation),
        ShapeKind::Insert => catalog.insert_shape(relation),
        ShapeKind::Update => catalog.update_shape(relation),
    }
}

impl Command {
    /// Runs the command and returns the document to print.
    pub async fn run(self) -> Result<Value> {
        let catalog = catalog();

        match self {
            Self::List => Ok(Value::Array(
                catalog
                    .relations()
                    .map(|relation| {
                        json!({
                            "name": relation.name,
                            "kind": relation.kind,
                            "primary_key": relation.primary_key,
                        })
                    })
                    .collect(),
            )),
            Self::Describe {
                relation,
                shape: Some(kind),
            } => Ok(serde_json::to_value(shape(catalog, &relation, kind.into())?)?),
            Self::Describe {
                relation,
                shape: None,
            } => Ok(json!({
                "relation": catalog.relation(&relation)?,
                "incoming": catalog.incoming(&relation)?,
            })),
            Self::Enums => Ok(serde_json::to_value(catalog.domains().collect::<Vec<_>>())?),
            Self::Functions => Ok(serde_json::to_value(
                catalog.functions().collect::<Vec<_>>(),
            )?),
            Self::Joins { from, to } => Ok(match catalog.join_path(&from, &to)? {
                Some(path) => json!({
                    "sql": render_joins(&path),
                    "path": path,
                }),
                None => json!({ "path": null }),
            }),
            Self::Check {
                relation,
                file,
                shape: kind,
            } => {
                let shape = shape(catalog, &relation, kind.into())?;
                let payload: Value = serde_json::from_str(&std::fs::read_to_string(&file)?)?;
                let violations = shape.violations(&payload);
                if !violations.is_empty() {
                    tracing::warn!(%relation, count = violations.len(), "Payload rejected");
                }
                Ok(json!({
                    "relation": relation,
                    "shape": shape.kind,
                    "valid": violations.is_empty(),
                    "violations": violations,
                }))
            }
            Self::Init => {
                let db = database::create_connection(&settings::load_default_settings()?).await?;
                database::create_schema(&db).await?;
                Ok(json!({ "created": catalog.relations().count() }))
            }
            Self::Verify => {
                let db = database::create_connection(&settings::load_default_settings()?).await?;
                let drift = verify_schema(&db, catalog).await?;
                Ok(json!({
                    "consistent": drift.is_empty(),
                    "drift": drift,
                }))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_parse_describe_with_shape() {
        let args = Args::try_parse_from(["erp-schema", "describe", "quote", "--shape", "update"])
            .unwrap();
        assert_eq!(
            args.command,
            Command::Describe {
                relation: "quote".to_string(),
                shape: Some(ShapeArg::Update),
            }
        );
    }

    #[test]
    fn test_check_defaults_to_insert_shape() {
        let args = Args::try_parse_from(["erp-schema", "check", "part", "part.json"]).unwrap();
        assert!(matches!(
            args.command,
            Command::Check { shape: ShapeArg::Insert, .. }
        ));
    }

    #[test]
    fn test_joins_requires_both_relations() {
        assert!(Args::try_parse_from(["erp-schema", "joins", "quote"]).is_err());
    }

    #[tokio::test]
    async fn test_joins_output() {
        let output = Command::Joins {
            from: "quote_line".to_string(),
            to: "quote".to_string(),
        }
        .run()
        .await
        .unwrap();

        assert_eq!(
            output["sql"],
            "JOIN quote ON quote.id = quote_line.quote_id"
        );
        assert_eq!(output["path"].as_array().map(Vec::len), Some(1));
    }

    #[tokio::test]
    async fn test_describe_unknown_relation_fails() {
        let result = Command::Describe {
            relation: "invoice".to_string(),
            shape: None,
        }
        .run()
        .await;
        assert!(result.is_err());
    }
}
