//! Catalog - the process-wide data dictionary.
//!
//! Holds every relation descriptor, enumerated domain and function signature
//! keyed by name, answers relationship queries over the declared foreign keys,
//! and plans joins between relations. The catalog is built once from the entity
//! definitions and never changes afterwards.

use crate::{
    core::{
        descriptor::{EnumDescriptor, ForeignKey, RelationDescriptor, describe, domain},
        functions::{FUNCTIONS, FunctionDescriptor},
        shape::Shape,
    },
    entities::{self, domains},
    errors::{Error, Result},
};
use serde::Serialize;
use std::{
    collections::{BTreeMap, HashMap, VecDeque},
    sync::OnceLock,
};

/// A foreign key seen from the relation it points at
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Reference {
    /// Relation owning the key
    pub relation: String,
    /// The key itself
    pub foreign_key: ForeignKey,
}

/// One hop of a join path
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct JoinStep {
    /// Relation already in the query
    pub from: String,
    /// Relation joined in by this hop
    pub to: String,
    /// Key the hop follows
    pub foreign_key: ForeignKey,
    /// `true` when `from` owns the key, `false` when `to` does
    pub forward: bool,
}

impl JoinStep {
    /// `(column on from, column on to)` pairs the hop joins on.
    pub fn column_pairs(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        let owning = self.foreign_key.columns.iter().map(String::as_str);
        let referenced = self.foreign_key.referenced_columns.iter().map(String::as_str);
        owning.zip(referenced).map(move |(own, target)| {
            if self.forward {
                (own, target)
            } else {
                (target, own)
            }
        })
    }
}

/// Relations, domains and functions of the schema
#[derive(Debug)]
pub struct Catalog {
    relations: BTreeMap<String, RelationDescriptor>,
    domains: BTreeMap<&'static str, EnumDescriptor>,
    functions: BTreeMap<&'static str, FunctionDescriptor>,
}

/// Returns the shared catalog, building it on first use.
pub fn catalog() -> &'static Catalog {
    static CATALOG: OnceLock<Catalog> = OnceLock::new();
    CATALOG.get_or_init(Catalog::new)
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}

impl Catalog {
    /// Builds the catalog from the entity definitions.
    #[must_use]
    pub fn new() -> Self {
        let relations = [
            describe::<entities::account::Entity>(),
            describe::<entities::account_category::Entity>(),
            describe::<entities::contact::Entity>(),
            describe::<entities::currency::Entity>(),
            describe::<entities::customer::Entity>(),
            describe::<entities::employee::Entity>(),
            describe::<entities::employee_type::Entity>(),
            describe::<entities::journal::Entity>(),
            describe::<entities::journal_line::Entity>(),
            describe::<entities::location::Entity>(),
            describe::<entities::part::Entity>(),
            describe::<entities::purchase_order::Entity>(),
            describe::<entities::purchase_order_line::Entity>(),
            describe::<entities::purchase_order_summary::Entity>(),
            describe::<entities::quote::Entity>(),
            describe::<entities::quote_line::Entity>(),
            describe::<entities::quote_summary::Entity>(),
            describe::<entities::receipt::Entity>(),
            describe::<entities::receipt_line::Entity>(),
            describe::<entities::sequence::Entity>(),
            describe::<entities::supplier::Entity>(),
            describe::<entities::supplier_contact::Entity>(),
            describe::<entities::unit_of_measure::Entity>(),
        ]
        .into_iter()
        .map(|relation| (relation.name.clone(), relation))
        .collect();

        let domains = [
            domain::<domains::AccountClass>(),
            domain::<domains::AccountIncomeBalance>(),
            domain::<domains::AccountConsolidatedRate>(),
            domain::<domains::PartType>(),
            domain::<domains::PartReplenishmentSystem>(),
            domain::<domains::PurchaseOrderType>(),
            domain::<domains::PurchaseOrderStatus>(),
            domain::<domains::PurchaseOrderLineType>(),
            domain::<domains::QuoteStatus>(),
            domain::<domains::ReceiptStatus>(),
            domain::<domains::ReceiptSourceDocument>(),
            domain::<domains::JournalLineDocumentType>(),
        ]
        .into_iter()
        .map(|domain| (domain.name, domain))
        .collect();

        let functions = FUNCTIONS
            .iter()
            .map(|function| (function.name, *function))
            .collect();

        Self {
            relations,
            domains,
            functions,
        }
    }

    /// Looks up a relation descriptor.
    ///
    /// # Errors
    /// [`Error::UnknownRelation`] when no relation has that name.
    pub fn relation(&self, name: &str) -> Result<&RelationDescriptor> {
        self.relations
            .get(name)
            .ok_or_else(|| Error::UnknownRelation {
                name: name.to_string(),
            })
    }

    /// All relations, ordered by name.
    pub fn relations(&self) -> impl Iterator<Item = &RelationDescriptor> {
        self.relations.values()
    }

    /// Row shape of a table or view.
    ///
    /// # Errors
    /// [`Error::UnknownRelation`] when no relation has that name.
    pub fn row_shape(&self, name: &str) -> Result<Shape> {
        Ok(Shape::row(self.relation(name)?, &self.domains))
    }

    /// Insert shape of a table.
    ///
    /// # Errors
    /// [`Error::ReadOnlyRelation`] for views.
    pub fn insert_shape(&self, name: &str) -> Result<Shape> {
        Ok(Shape::insert(self.writable(name)?, &self.domains))
    }

    /// Update shape of a table.
    ///
    /// # Errors
    /// [`Error::ReadOnlyRelation`] for views.
    pub fn update_shape(&self, name: &str) -> Result<Shape> {
        Ok(Shape::update(self.writable(name)?, &self.domains))
    }

    fn writable(&self, name: &str) -> Result<&RelationDescriptor> {
        let relation = self.relation(name)?;
        if relation.is_writable() {
            Ok(relation)
        } else {
            Err(Error::ReadOnlyRelation {
                name: name.to_string(),
            })
        }
    }

    /// Foreign keys owned by relation `name`.
    pub fn outgoing(&self, name: &str) -> Result<&[ForeignKey]> {
        Ok(&self.relation(name)?.foreign_keys)
    }

    /// Foreign keys of other relations that point at relation `name`.
    pub fn incoming(&self, name: &str) -> Result<Vec<Reference>> {
        let target = self.relation(name)?;
        Ok(self
            .relations
            .values()
            .flat_map(|owner| {
                owner
                    .foreign_keys
                    .iter()
                    .filter(|key| key.referenced_relation == target.name)
                    .map(|key| Reference {
                        relation: owner.name.clone(),
                        foreign_key: key.clone(),
                    })
            })
            .collect())
    }

    /// Looks up an enumerated domain.
    ///
    /// # Errors
    /// [`Error::UnknownDomain`] when no domain has that name.
    pub fn domain(&self, name: &str) -> Result<&EnumDescriptor> {
        self.domains.get(name).ok_or_else(|| Error::UnknownDomain {
            name: name.to_string(),
        })
    }

    /// All enumerated domains, ordered by name.
    pub fn domains(&self) -> impl Iterator<Item = &EnumDescriptor> {
        self.domains.values()
    }

    /// Looks up a function signature.
    ///
    /// # Errors
    /// [`Error::UnknownFunction`] when no function has that name.
    pub fn function(&self, name: &str) -> Result<&FunctionDescriptor> {
        self.functions
            .get(name)
            .ok_or_else(|| Error::UnknownFunction {
                name: name.to_string(),
            })
    }

    /// All function signatures, ordered by name.
    pub fn functions(&self) -> impl Iterator<Item = &FunctionDescriptor> {
        self.functions.values()
    }

    /// Finds the shortest chain of foreign-key hops from `from` to `to`.
    ///
    /// Links are followed in either direction. Among equally short paths the one
    /// found first by walking relations in name order wins, so the answer is
    /// stable. `Ok(None)` means the relations are not connected; a relation
    /// reaches itself through an empty path.
    ///
    /// # Errors
    /// [`Error::UnknownRelation`] when either name is not catalogued.
    pub fn join_path(&self, from: &str, to: &str) -> Result<Option<Vec<JoinStep>>> {
        let start = self.relation(from)?.name.as_str();
        let goal = self.relation(to)?.name.as_str();

        let mut came_from: HashMap<&str, JoinStep> = HashMap::new();
        let mut queue = VecDeque::from([start]);

        while let Some(current) = queue.pop_front() {
            if current == goal {
                break;
            }
            for step in self.neighbours(current) {
                let next = self.relation(&step.to)?.name.as_str();
                if next == start || came_from.contains_key(next) {
                    continue;
                }
                came_from.insert(next, step);
                queue.push_back(next);
            }
        }

        if start != goal && !came_from.contains_key(goal) {
            return Ok(None);
        }

        let mut path = Vec::new();
        let mut cursor = goal;
        while cursor != start {
            let Some(step) = came_from.remove(cursor) else {
                return Ok(None);
            };
            cursor = self.relation(&step.from)?.name.as_str();
            path.push(step);
        }
        path.reverse();

        Ok(Some(path))
    }

    /// Every single-hop join out of `relation`: its own keys, then keys pointing at it.
    fn neighbours(&self, relation: &str) -> Vec<JoinStep> {
        let Some(descriptor) = self.relations.get(relation) else {
            return Vec::new();
        };

        let forward = descriptor.foreign_keys.iter().map(|key| JoinStep {
            from: relation.to_string(),
            to: key.referenced_relation.clone(),
            foreign_key: key.clone(),
            forward: true,
        });

        let backward = self.relations.values().flat_map(|owner| {
            owner
                .foreign_keys
                .iter()
                .filter(|key| key.referenced_relation == relation)
                .map(|key| JoinStep {
                    from: relation.to_string(),
                    to: owner.name.clone(),
                    foreign_key: key.clone(),
                    forward: false,
                })
        });

        forward.chain(backward).collect()
    }
}

/// Renders a join path as SQL `JOIN` clauses, one per line.
#[must_use]
pub fn render_joins(steps: &[JoinStep]) -> String {
    steps
        .iter()
        .map(|step| {
            let conditions = step
                .column_pairs()
                .map(|(from_column, to_column)| {
                    format!("{}.{to_column} = {}.{from_column}", step.to, step.from)
                })
                .collect::<Vec<_>>()
                .join(" AND ");
            format!("JOIN {} ON {conditions}", step.to)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::core::descriptor::{DataType, RelationKind};

    #[test]
    fn test_catalog_contents() {
        let catalog = catalog();

        assert_eq!(catalog.relations().count(), 23);
        assert_eq!(
            catalog
                .relations()
                .filter(|relation| relation.kind == RelationKind::View)
                .count(),
            2
        );
        assert_eq!(catalog.domains().count(), 12);
        assert_eq!(catalog.functions().count(), 3);
    }

    #[test]
    fn test_unknown_names() {
        let catalog = catalog();

        assert!(matches!(
            catalog.relation("invoice"),
            Err(Error::UnknownRelation { ref name }) if name == "invoice"
        ));
        assert!(matches!(
            catalog.domain("invoice_status"),
            Err(Error::UnknownDomain { .. })
        ));
        assert!(matches!(
            catalog.function("get_invoice_total"),
            Err(Error::UnknownFunction { .. })
        ));
        assert!(matches!(catalog.incoming("invoice"), Err(Error::UnknownRelation { .. })));
    }

    #[test]
    fn test_views_are_read_only() {
        let catalog = catalog();

        assert!(catalog.row_shape("quote_summary").is_ok());
        assert!(matches!(
            catalog.insert_shape("quote_summary"),
            Err(Error::ReadOnlyRelation { ref name }) if name == "quote_summary"
        ));
        assert!(matches!(
            catalog.update_shape("purchase_order_summary"),
            Err(Error::ReadOnlyRelation { .. })
        ));
    }

    #[test]
    fn test_outgoing_and_incoming() {
        let catalog = catalog();

        let outgoing = catalog.outgoing("purchase_order").unwrap();
        let targets: Vec<&str> = outgoing
            .iter()
            .map(|key| key.referenced_relation.as_str())
            .collect();
        assert_eq!(
            targets,
            vec!["supplier", "supplier_contact", "location", "currency"]
        );

        let incoming = catalog.incoming("supplier").unwrap();
        let owners: Vec<&str> = incoming.iter().map(|link| link.relation.as_str()).collect();
        assert_eq!(owners, vec!["purchase_order", "receipt", "supplier_contact"]);

        let contact = catalog.incoming("contact").unwrap();
        assert_eq!(contact.len(), 1);
        assert!(contact[0].foreign_key.one_to_one);
    }

    #[test]
    fn test_foreign_keys_reference_catalogued_columns() {
        let catalog = catalog();

        for relation in catalog.relations() {
            for key in &relation.foreign_keys {
                assert_eq!(key.columns.len(), key.referenced_columns.len(), "{}", key.constraint);
                let target = catalog.relation(&key.referenced_relation).unwrap();
                for column in &key.columns {
                    assert!(relation.column(column).is_some(), "{}.{column}", relation.name);
                }
                for column in &key.referenced_columns {
                    assert!(target.column(column).is_some(), "{}.{column}", target.name);
                }
            }
        }
    }

    #[test]
    fn test_one_to_one_follows_owning_column_uniqueness() {
        let catalog = catalog();

        for relation in catalog.relations() {
            for key in &relation.foreign_keys {
                let unique = match key.columns.as_slice() {
                    [column] => relation.column(column).unwrap().unique,
                    _ => false,
                };
                assert_eq!(key.one_to_one, unique, "{}", key.constraint);
            }
        }

        let links = catalog.outgoing("supplier_contact").unwrap();
        let by_target = |target: &str| {
            links
                .iter()
                .find(|key| key.referenced_relation == target)
                .unwrap()
        };
        assert!(by_target("contact").one_to_one);
        assert_eq!(by_target("contact").constraint, "supplier_contact_contact_id_fkey");
        assert!(!by_target("supplier").one_to_one);
    }

    #[test]
    fn test_foreign_keys_match_created_schema() {
        let catalog = catalog();
        let total: usize = catalog
            .relations()
            .map(|relation| relation.foreign_keys.len())
            .sum();
        assert_eq!(total, 28);

        let journal_line = catalog.outgoing("journal_line").unwrap();
        assert_eq!(journal_line[1].columns, vec!["account_number".to_string()]);
        assert_eq!(journal_line[1].referenced_columns, vec!["number".to_string()]);
    }

    #[test]
    fn test_domain_columns_name_catalogued_domains() {
        let catalog = catalog();

        for relation in catalog.relations() {
            for column in &relation.columns {
                if let DataType::Enum(domain) = column.data_type {
                    assert!(catalog.domain(domain).is_ok(), "{}.{}", relation.name, column.name);
                }
            }
        }
    }

    #[test]
    fn test_defaulted_columns_exist() {
        use crate::core::descriptor::Reflect;

        fn check<E: Reflect>() {
            let relation = describe::<E>();
            for column in E::DEFAULTED {
                assert!(relation.column(column).is_some(), "{}.{column}", relation.name);
            }
            for (column, _) in E::DOMAINS {
                assert!(relation.column(column).is_some(), "{}.{column}", relation.name);
            }
        }

        check::<entities::account::Entity>();
        check::<entities::account_category::Entity>();
        check::<entities::contact::Entity>();
        check::<entities::currency::Entity>();
        check::<entities::customer::Entity>();
        check::<entities::employee::Entity>();
        check::<entities::employee_type::Entity>();
        check::<entities::journal::Entity>();
        check::<entities::journal_line::Entity>();
        check::<entities::location::Entity>();
        check::<entities::part::Entity>();
        check::<entities::purchase_order::Entity>();
        check::<entities::purchase_order_line::Entity>();
        check::<entities::purchase_order_summary::Entity>();
        check::<entities::quote::Entity>();
        check::<entities::quote_line::Entity>();
        check::<entities::quote_summary::Entity>();
        check::<entities::receipt::Entity>();
        check::<entities::receipt_line::Entity>();
        check::<entities::sequence::Entity>();
        check::<entities::supplier::Entity>();
        check::<entities::supplier_contact::Entity>();
        check::<entities::unit_of_measure::Entity>();
    }

    #[test]
    fn test_join_path_direct_link() {
        let path = catalog().join_path("quote_line", "quote").unwrap().unwrap();

        assert_eq!(path.len(), 1);
        assert!(path[0].forward);
        assert_eq!(render_joins(&path), "JOIN quote ON quote.id = quote_line.quote_id");
    }

    #[test]
    fn test_join_path_through_intermediate() {
        let path = catalog()
            .join_path("purchase_order_line", "supplier")
            .unwrap()
            .unwrap();

        let hops: Vec<(&str, &str)> = path
            .iter()
            .map(|step| (step.from.as_str(), step.to.as_str()))
            .collect();
        assert_eq!(
            hops,
            vec![("purchase_order_line", "purchase_order"), ("purchase_order", "supplier")]
        );
        assert_eq!(
            render_joins(&path),
            "JOIN purchase_order ON purchase_order.id = purchase_order_line.purchase_order_id\n\
             JOIN supplier ON supplier.id = purchase_order.supplier_id"
        );
    }

    #[test]
    fn test_join_path_reverse_direction() {
        let path = catalog().join_path("journal", "account").unwrap().unwrap();

        assert_eq!(path.len(), 2);
        assert!(!path[0].forward);
        assert_eq!(
            render_joins(&path),
            "JOIN journal_line ON journal_line.journal_id = journal.id\n\
             JOIN account ON account.number = journal_line.account_number"
        );
    }

    #[test]
    fn test_join_path_edge_cases() {
        let catalog = catalog();

        assert_eq!(catalog.join_path("quote", "quote").unwrap(), Some(Vec::new()));
        assert_eq!(catalog.join_path("sequence", "quote").unwrap(), None);
        assert_eq!(catalog.join_path("quote_summary", "quote").unwrap(), None);
        assert!(catalog.join_path("quote", "invoice").is_err());
    }

    #[test]
    fn test_join_path_is_stable() {
        let catalog = catalog();
        let first = catalog.join_path("receipt_line", "supplier").unwrap();
        let second = catalog.join_path("receipt_line", "supplier").unwrap();
        assert_eq!(first, second);
        assert_eq!(first.map(|path| path.len()), Some(2));
    }
}
