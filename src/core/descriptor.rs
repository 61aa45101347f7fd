//! Relation descriptors - the reflected structure of every table and view.
//!
//! Descriptors are derived from the SeaORM entity definitions themselves, so the
//! column set, nullability and primary key can never disagree with the typed
//! `Model`. Foreign keys are read from the entity's `belongs_to` relations, and a
//! key is one-to-one exactly when its owning columns are unique. What SeaORM does
//! not record (application defaults, enumerated domains) comes from each entity's
//! [`Reflect`] implementation.

use crate::entities::domains::Domain;
use sea_orm::{
    ActiveEnum, ColumnTrait, ColumnType, EntityName, EntityTrait, Iden, IdenStatic, Iterable,
    PrimaryKeyToColumn, RelationDef, RelationTrait, sea_query::TableRef,
};
use serde::Serialize;

/// Whether a relation is a base table or a read-only view
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationKind {
    /// Writable base table
    Table,
    /// Read-only view
    View,
}

/// Column type as seen by a client of the catalog
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DataType {
    /// Free text
    Text,
    /// Whole number
    Integer,
    /// Floating point or decimal number
    Float,
    /// True / false
    Boolean,
    /// Calendar date without time
    Date,
    /// Point in time
    Timestamp,
    /// Arbitrary JSON document
    Json,
    /// Label drawn from the named enumerated domain
    Enum(&'static str),
    /// Any column type the catalog does not classify
    Other,
}

impl DataType {
    /// Classifies a SeaORM column type.
    #[must_use]
    pub fn from_column_type(column_type: &ColumnType) -> Self {
        match column_type {
            ColumnType::Char(_) | ColumnType::String(_) | ColumnType::Text | ColumnType::Uuid => {
                Self::Text
            }
            ColumnType::TinyInteger
            | ColumnType::SmallInteger
            | ColumnType::Integer
            | ColumnType::BigInteger
            | ColumnType::TinyUnsigned
            | ColumnType::SmallUnsigned
            | ColumnType::Unsigned
            | ColumnType::BigUnsigned => Self::Integer,
            ColumnType::Float | ColumnType::Double | ColumnType::Decimal(_) | ColumnType::Money(_) => {
                Self::Float
            }
            ColumnType::Boolean => Self::Boolean,
            ColumnType::Date => Self::Date,
            ColumnType::DateTime | ColumnType::Timestamp | ColumnType::TimestampWithTimeZone => {
                Self::Timestamp
            }
            ColumnType::Json | ColumnType::JsonBinary => Self::Json,
            _ => Self::Other,
        }
    }
}

/// One column of a relation
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ColumnDescriptor {
    /// Column name as stored in the database
    pub name: String,
    /// Client-facing type of the column
    pub data_type: DataType,
    /// Whether the column accepts NULL
    pub nullable: bool,
    /// Whether an insert may omit the column
    pub has_default: bool,
    /// Whether the column is part of the primary key
    pub primary_key: bool,
    /// Whether the column carries its own UNIQUE constraint
    pub unique: bool,
}

/// A declared foreign-key link from one relation to another
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ForeignKey {
    /// Constraint name, `<relation>_<columns>_fkey` unless the relation names one
    pub constraint: String,
    /// Owning columns, in key order
    pub columns: Vec<String>,
    /// Relation the key points at
    pub referenced_relation: String,
    /// Referenced columns, matching `columns` position by position
    pub referenced_columns: Vec<String>,
    /// `true` when at most one owning row may reference a target row
    pub one_to_one: bool,
}

/// Reflected structure of a table or view
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RelationDescriptor {
    /// Relation name
    pub name: String,
    /// Table or view
    pub kind: RelationKind,
    /// Columns in declaration order
    pub columns: Vec<ColumnDescriptor>,
    /// Primary key columns, in key order
    pub primary_key: Vec<String>,
    /// Foreign keys owned by this relation
    pub foreign_keys: Vec<ForeignKey>,
}

impl RelationDescriptor {
    /// Looks up a column by name.
    #[must_use]
    pub fn column(&self, name: &str) -> Option<&ColumnDescriptor> {
        self.columns.iter().find(|column| column.name == name)
    }

    /// Whether rows of this relation can be inserted or updated.
    #[must_use]
    pub const fn is_writable(&self) -> bool {
        matches!(self.kind, RelationKind::Table)
    }
}

/// A closed set of labels
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct EnumDescriptor {
    /// Domain name
    pub name: &'static str,
    /// Permitted labels in declaration order
    pub labels: Vec<String>,
}

impl EnumDescriptor {
    /// Whether `label` belongs to the domain.
    #[must_use]
    pub fn contains(&self, label: &str) -> bool {
        self.labels.iter().any(|candidate| candidate == label)
    }
}

/// Schema metadata SeaORM does not carry on its own.
///
/// Column names used here must be names of the entity's columns; the catalog
/// tests hold every implementation to that.
pub trait Reflect: EntityTrait {
    /// Table or view
    const KIND: RelationKind = RelationKind::Table;
    /// Columns the writer fills in when an insert leaves them out
    const DEFAULTED: &'static [&'static str] = &[];
    /// `(column, domain)` pairs for enumerated columns
    const DOMAINS: &'static [(&'static str, &'static str)] = &[];
}

/// Builds the descriptor of entity `E`.
#[must_use]
pub fn describe<E: Reflect>() -> RelationDescriptor {
    let name = E::default().table_name().to_owned();
    let primary_key: Vec<String> = E::PrimaryKey::iter()
        .map(|key| key.into_column().as_str().to_owned())
        .collect();

    let columns: Vec<ColumnDescriptor> = E::Column::iter()
        .map(|column| {
            let name = column.as_str();
            let definition = column.def();
            let data_type = E::DOMAINS
                .iter()
                .find(|(owner, _)| *owner == name)
                .map_or_else(
                    || DataType::from_column_type(definition.get_column_type()),
                    |(_, domain)| DataType::Enum(*domain),
                );

            ColumnDescriptor {
                name: name.to_owned(),
                data_type,
                nullable: definition.is_null(),
                has_default: E::DEFAULTED.contains(&name),
                primary_key: primary_key.iter().any(|key| key == name),
                unique: definition.is_unique(),
            }
        })
        .collect();

    // `belongs_to` relations are the ones SeaORM builds with `is_owner` unset
    let foreign_keys = E::Relation::iter()
        .map(|relation| relation.def())
        .filter(|definition| !definition.is_owner)
        .filter_map(|definition| foreign_key(&name, definition, &columns))
        .collect();

    RelationDescriptor {
        name,
        kind: E::KIND,
        columns,
        primary_key,
        foreign_keys,
    }
}

fn foreign_key(
    relation: &str,
    definition: RelationDef,
    columns: &[ColumnDescriptor],
) -> Option<ForeignKey> {
    let RelationDef {
        to_tbl,
        from_col,
        to_col,
        fk_name,
        ..
    } = definition;

    let TableRef::Table(target) = to_tbl else {
        return None;
    };
    let owning: Vec<String> = from_col.into_iter().map(|column| column.to_string()).collect();
    let referenced: Vec<String> = to_col.into_iter().map(|column| column.to_string()).collect();

    let one_to_one = matches!(
        owning.as_slice(),
        [column] if columns.iter().any(|c| &c.name == column && c.unique)
    );

    Some(ForeignKey {
        constraint: fk_name.unwrap_or_else(|| format!("{relation}_{}_fkey", owning.join("_"))),
        columns: owning,
        referenced_relation: target.to_string(),
        referenced_columns: referenced,
        one_to_one,
    })
}

/// Builds the descriptor of enumerated domain `E`.
#[must_use]
pub fn domain<E>() -> EnumDescriptor
where
    E: ActiveEnum<Value = String> + Domain + Iterable,
{
    EnumDescriptor {
        name: E::NAME,
        labels: E::iter().map(|label| label.to_value()).collect(),
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::entities::{domains::PurchaseOrderStatus, purchase_order, purchase_order_summary};

    #[test]
    fn test_describe_table() {
        let relation = describe::<purchase_order::Entity>();
        assert_eq!(relation.name, "purchase_order");
        assert_eq!(relation.kind, RelationKind::Table);
        assert_eq!(relation.primary_key, vec!["id".to_string()]);

        let id = relation.column("id").unwrap();
        assert!(id.primary_key);
        assert!(id.has_default);
        assert!(!id.nullable);

        let status = relation.column("status").unwrap();
        assert_eq!(status.data_type, DataType::Enum("purchase_order_status"));
        assert!(status.has_default);

        let notes = relation.column("notes").unwrap();
        assert!(notes.nullable);
        assert_eq!(notes.data_type, DataType::Text);

        let order_date = relation.column("order_date").unwrap();
        assert_eq!(order_date.data_type, DataType::Date);

        let created_at = relation.column("created_at").unwrap();
        assert_eq!(created_at.data_type, DataType::Timestamp);

        let supplier = relation.column("supplier_id").unwrap();
        assert!(!supplier.nullable);
        assert!(!supplier.has_default);
        assert!(!supplier.unique);
        assert!(relation.column("purchase_order_id").unwrap().unique);

        let constraints: Vec<&str> = relation
            .foreign_keys
            .iter()
            .map(|key| key.constraint.as_str())
            .collect();
        assert_eq!(
            constraints,
            vec![
                "purchase_order_supplier_id_fkey",
                "purchase_order_supplier_contact_id_fkey",
                "purchase_order_location_id_fkey",
                "purchase_order_currency_code_fkey",
            ]
        );
    }

    #[test]
    fn test_describe_view() {
        let relation = describe::<purchase_order_summary::Entity>();
        assert_eq!(relation.kind, RelationKind::View);
        assert!(!relation.is_writable());
        assert!(relation.foreign_keys.is_empty());
        assert!(relation
            .columns
            .iter()
            .filter(|column| !column.primary_key)
            .all(|column| column.nullable));
    }

    #[test]
    fn test_domain_labels_in_declaration_order() {
        let status = domain::<PurchaseOrderStatus>();
        assert_eq!(status.name, "purchase_order_status");
        assert_eq!(status.labels.first().map(String::as_str), Some("Draft"));
        assert_eq!(status.labels.len(), 8);
        assert!(status.contains("To Receive and Invoice"));
        assert!(!status.contains("draft"));
    }
}
