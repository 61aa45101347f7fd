/// Database connection, table and view creation
pub mod database;

/// Settings loading from erp-schema.toml
pub mod settings;
