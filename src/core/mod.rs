/// Relation descriptors derived from the entity definitions
pub mod descriptor;

/// Row, Insert and Update shapes and payload checking
pub mod shape;

/// Process-wide catalog of relations, domains and functions, plus join planning
pub mod catalog;

/// Callable database functions
pub mod functions;

/// Live schema verification against the catalog
pub mod verify;
