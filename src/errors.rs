//! Unified error type for the schema reflection layer.

use crate::core::shape::Violation;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unknown relation: {name}")]
    UnknownRelation { name: String },

    #[error("Unknown enumerated domain: {name}")]
    UnknownDomain { name: String },

    #[error("Unknown database function: {name}")]
    UnknownFunction { name: String },

    #[error("Relation {name} is a view and cannot be written")]
    ReadOnlyRelation { name: String },

    #[error("Payload does not match {relation}: {}", render_violations(violations))]
    ShapeViolation {
        relation: String,
        violations: Vec<Violation>,
    },

    #[error("No {relation} row with key {key}")]
    RowNotFound { relation: String, key: String },

    #[error("Unsupported database backend: {backend}")]
    UnsupportedBackend { backend: String },
}

fn render_violations(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
