//! Row, Insert and Update shapes of a relation, and payload checking against them.
//!
//! A shape is the client-facing view of a relation's columns for one kind of
//! access. Shapes are computed from a [`RelationDescriptor`] so they always agree
//! with the typed `Model` / `Insert` / `Update` records of the entity modules.

use crate::{
    core::descriptor::{ColumnDescriptor, DataType, EnumDescriptor, RelationDescriptor},
    errors::{Error, Result},
};
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// Columns the writing application stamps itself; they never appear in an update.
pub const MANAGED_COLUMNS: &[&str] = &["created_at", "created_by", "updated_at"];

/// Which access a shape describes
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeKind {
    /// A fetched row
    Row,
    /// Data for creating a row
    Insert,
    /// A partial change to a row
    Update,
}

/// One field of a shape
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Field {
    /// Column name
    pub name: String,
    /// Client-facing type of the value
    pub data_type: DataType,
    /// Whether `null` is an acceptable value
    pub nullable: bool,
    /// Whether the field may be left out
    pub optional: bool,
    /// Permitted labels when the field draws from an enumerated domain
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<Vec<String>>,
}

/// The fields of one relation for one kind of access
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Shape {
    /// Relation the shape belongs to
    pub relation: String,
    /// Access the shape describes
    pub kind: ShapeKind,
    /// Fields in column order
    pub fields: Vec<Field>,
}

/// A single way a payload fails to match a shape
#[derive(Clone, Debug, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(tag = "violation", rename_all = "snake_case")]
pub enum Violation {
    #[error("payload is not a JSON object")]
    NotAnObject,

    #[error("unknown field {field}")]
    UnknownField { field: String },

    #[error("missing required field {field}")]
    MissingField { field: String },

    #[error("field {field} cannot be null")]
    NullNotAllowed { field: String },

    #[error("field {field} must be {expected}")]
    WrongType {
        field: String,
        expected: &'static str,
    },

    #[error("field {field}: {label:?} is not a {domain} label")]
    InvalidLabel {
        field: String,
        label: String,
        domain: &'static str,
    },
}

impl Shape {
    /// Every column, required, nullable per column.
    #[must_use]
    pub fn row(
        relation: &RelationDescriptor,
        domains: &BTreeMap<&'static str, EnumDescriptor>,
    ) -> Self {
        Self::build(relation, domains, ShapeKind::Row, |_| true, |_| false)
    }

    /// Every column; a field may be omitted when the column is nullable or defaulted.
    #[must_use]
    pub fn insert(
        relation: &RelationDescriptor,
        domains: &BTreeMap<&'static str, EnumDescriptor>,
    ) -> Self {
        Self::build(
            relation,
            domains,
            ShapeKind::Insert,
            |_| true,
            |column| column.nullable || column.has_default,
        )
    }

    /// Every column but the key and the managed audit columns, all optional.
    #[must_use]
    pub fn update(
        relation: &RelationDescriptor,
        domains: &BTreeMap<&'static str, EnumDescriptor>,
    ) -> Self {
        Self::build(
            relation,
            domains,
            ShapeKind::Update,
            |column| !column.primary_key && !MANAGED_COLUMNS.contains(&column.name.as_str()),
            |_| true,
        )
    }

    fn build(
        relation: &RelationDescriptor,
        domains: &BTreeMap<&'static str, EnumDescriptor>,
        kind: ShapeKind,
        include: impl Fn(&ColumnDescriptor) -> bool,
        optional: impl Fn(&ColumnDescriptor) -> bool,
    ) -> Self {
        let fields = relation
            .columns
            .iter()
            .filter(|column| include(column))
            .map(|column| Field {
                name: column.name.clone(),
                data_type: column.data_type,
                nullable: column.nullable,
                optional: optional(column),
                labels: match column.data_type {
                    DataType::Enum(domain) => domains.get(domain).map(|d| d.labels.clone()),
                    _ => None,
                },
            })
            .collect();

        Self {
            relation: relation.name.clone(),
            kind,
            fields,
        }
    }

    /// Looks up a field by name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// Lists every way `payload` fails to match the shape.
    #[must_use]
    pub fn violations(&self, payload: &Value) -> Vec<Violation> {
        let Some(object) = payload.as_object() else {
            return vec![Violation::NotAnObject];
        };

        let mut violations: Vec<Violation> = object
            .keys()
            .filter(|key| self.field(key).is_none())
            .map(|key| Violation::UnknownField { field: key.clone() })
            .collect();

        for field in &self.fields {
            match object.get(&field.name) {
                None if !field.optional => violations.push(Violation::MissingField {
                    field: field.name.clone(),
                }),
                None => {}
                Some(Value::Null) if !field.nullable => {
                    violations.push(Violation::NullNotAllowed {
                        field: field.name.clone(),
                    });
                }
                Some(Value::Null) => {}
                Some(value) => violations.extend(check_value(field, value)),
            }
        }

        violations
    }

    /// Validates `payload`, reporting every violation at once.
    ///
    /// # Errors
    /// Returns [`Error::ShapeViolation`] when the payload does not match.
    pub fn check(&self, payload: &Value) -> Result<()> {
        let violations = self.violations(payload);
        if violations.is_empty() {
            Ok(())
        } else {
            Err(Error::ShapeViolation {
                relation: self.relation.clone(),
                violations,
            })
        }
    }
}

fn check_value(field: &Field, value: &Value) -> Option<Violation> {
    let wrong_type = |expected| {
        Some(Violation::WrongType {
            field: field.name.clone(),
            expected,
        })
    };

    match field.data_type {
        DataType::Text if !value.is_string() => wrong_type("a string"),
        DataType::Integer if !(value.is_i64() || value.is_u64()) => wrong_type("an integer"),
        DataType::Float if !value.is_number() => wrong_type("a number"),
        DataType::Boolean if !value.is_boolean() => wrong_type("a boolean"),
        DataType::Date => match value.as_str() {
            Some(text) if chrono::NaiveDate::parse_from_str(text, "%Y-%m-%d").is_ok() => None,
            _ => wrong_type("a date (YYYY-MM-DD)"),
        },
        DataType::Timestamp => match value.as_str() {
            Some(text) if chrono::DateTime::parse_from_rfc3339(text).is_ok() => None,
            _ => wrong_type("an RFC 3339 timestamp"),
        },
        DataType::Enum(domain) => match value.as_str() {
            None => wrong_type("a string"),
            Some(label) => match &field.labels {
                Some(labels) if !labels.iter().any(|candidate| candidate == label) => {
                    Some(Violation::InvalidLabel {
                        field: field.name.clone(),
                        label: label.to_owned(),
                        domain,
                    })
                }
                _ => None,
            },
        },
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::core::catalog::catalog;
    use serde_json::json;

    #[test]
    fn test_insert_shape_optionality() {
        let shape = catalog().insert_shape("purchase_order").unwrap();

        assert!(!shape.field("purchase_order_id").unwrap().optional);
        assert!(!shape.field("supplier_id").unwrap().optional);
        assert!(!shape.field("created_by").unwrap().optional);
        assert!(shape.field("id").unwrap().optional);
        assert!(shape.field("status").unwrap().optional);
        assert!(shape.field("notes").unwrap().optional);
    }

    #[test]
    fn test_update_shape_excludes_key_and_managed_columns() {
        let shape = catalog().update_shape("purchase_order").unwrap();

        assert!(shape.field("id").is_none());
        assert!(shape.field("created_at").is_none());
        assert!(shape.field("created_by").is_none());
        assert!(shape.field("updated_at").is_none());
        assert!(shape.fields.iter().all(|field| field.optional));
        assert!(shape.field("updated_by").is_some());
    }

    #[test]
    fn test_row_shape_requires_everything() {
        let shape = catalog().row_shape("currency").unwrap();

        assert!(shape.fields.iter().all(|field| !field.optional));
        assert!(shape.field("symbol").unwrap().nullable);
        assert!(!shape.field("name").unwrap().nullable);
    }

    #[test]
    fn test_enum_field_carries_labels() {
        let shape = catalog().insert_shape("quote").unwrap();
        let labels = shape.field("status").unwrap().labels.clone().unwrap();

        assert_eq!(labels.len(), 7);
        assert!(labels.contains(&"Partially Ordered".to_string()));
    }

    #[test]
    fn test_check_accepts_minimal_insert() {
        let shape = catalog().insert_shape("purchase_order").unwrap();
        let payload = json!({
            "purchase_order_id": "PO000001",
            "supplier_id": "abc",
            "created_by": "system",
            "order_date": "2024-03-01",
            "notes": null,
        });

        assert!(shape.check(&payload).is_ok());
    }

    #[test]
    fn test_check_reports_every_violation() {
        let shape = catalog().insert_shape("purchase_order").unwrap();
        let payload = json!({
            "purchase_order_id": 7,
            "status": "Pending",
            "supplier_id": null,
            "order_date": "03/01/2024",
            "colour": "red",
        });

        let violations = shape.violations(&payload);

        assert!(violations.contains(&Violation::UnknownField {
            field: "colour".to_string()
        }));
        assert!(violations.contains(&Violation::MissingField {
            field: "created_by".to_string()
        }));
        assert!(violations.contains(&Violation::NullNotAllowed {
            field: "supplier_id".to_string()
        }));
        assert!(violations.contains(&Violation::WrongType {
            field: "purchase_order_id".to_string(),
            expected: "a string",
        }));
        assert!(violations.contains(&Violation::WrongType {
            field: "order_date".to_string(),
            expected: "a date (YYYY-MM-DD)",
        }));
        assert!(violations.contains(&Violation::InvalidLabel {
            field: "status".to_string(),
            label: "Pending".to_string(),
            domain: "purchase_order_status",
        }));
        assert_eq!(violations.len(), 6);

        let error = shape.check(&payload).unwrap_err();
        assert!(matches!(
            error,
            Error::ShapeViolation { ref relation, ref violations }
                if relation == "purchase_order" && violations.len() == 6
        ));
    }

    #[test]
    fn test_check_rejects_non_object() {
        let shape = catalog().update_shape("part").unwrap();
        assert_eq!(shape.violations(&json!([1, 2])), vec![Violation::NotAnObject]);
    }

    #[test]
    fn test_update_accepts_empty_object_and_null_for_nullable() {
        let shape = catalog().update_shape("purchase_order").unwrap();

        assert!(shape.check(&json!({})).is_ok());
        assert!(shape.check(&json!({ "closed_at": null })).is_ok());
        assert!(shape.check(&json!({ "status": null })).is_err());
        assert!(shape.check(&json!({ "id": "abc" })).is_err());
    }

    #[test]
    fn test_update_shape_matches_update_records() {
        let shape = catalog().update_shape("account").unwrap();
        let fields: Vec<&str> = shape.fields.iter().map(|field| field.name.as_str()).collect();

        assert_eq!(
            fields,
            vec![
                "name",
                "class",
                "income_balance",
                "consolidated_rate",
                "account_category_id",
                "direct_posting",
                "active",
                "updated_by",
            ]
        );

        // The typed Update record accepts exactly the shape's fields
        let payload = json!({ "name": "Petty cash", "consolidated_rate": null });
        assert!(shape.check(&payload).is_ok());
        assert!(serde_json::from_value::<crate::entities::account::Update>(payload).is_ok());

        let null_name = json!({ "name": null });
        assert!(shape.check(&null_name).is_err());
        assert!(serde_json::from_value::<crate::entities::account::Update>(null_name).is_err());
    }
}
