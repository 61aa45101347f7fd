//! Database configuration module.
//!
//! This module handles the database connection and schema creation using `SeaORM`.
//! Tables are generated from the entity definitions with
//! `Schema::create_table_from_entity`, so the created schema always matches the
//! Rust structs, foreign keys included. The two summary views have no entity-level
//! definition in `SeaORM` and are created from SQL.

use crate::config::settings::Settings;
use crate::entities::{
    account, account_category, contact, currency, customer, employee, employee_type, journal,
    journal_line, location, part, purchase_order, purchase_order_line, quote, quote_line,
    receipt, receipt_line, sequence, supplier, supplier_contact, unit_of_measure,
};
use crate::errors::Result;
use sea_orm::{
    ConnectOptions, ConnectionTrait, Database, DatabaseConnection, EntityTrait, Schema, Statement,
};

const PURCHASE_ORDER_SUMMARY: &str = "
CREATE VIEW IF NOT EXISTS purchase_order_summary AS
SELECT
    po.id AS id,
    po.purchase_order_id AS purchase_order_id,
    po.status AS status,
    po.purchase_order_type AS purchase_order_type,
    po.order_date AS order_date,
    po.supplier_id AS supplier_id,
    s.name AS supplier_name,
    COUNT(l.id) AS line_count,
    COALESCE(SUM(l.purchase_quantity * l.unit_price), 0.0) AS order_total
FROM purchase_order po
LEFT JOIN supplier s ON s.id = po.supplier_id
LEFT JOIN purchase_order_line l ON l.purchase_order_id = po.id
GROUP BY po.id";

const QUOTE_SUMMARY: &str = "
CREATE VIEW IF NOT EXISTS quote_summary AS
SELECT
    q.id AS id,
    q.quote_id AS quote_id,
    q.name AS name,
    q.status AS status,
    q.customer_id AS customer_id,
    c.name AS customer_name,
    q.expiration_date AS expiration_date,
    COUNT(l.id) AS line_count,
    COALESCE(SUM(l.quantity * l.unit_price), 0.0) AS quote_total
FROM quote q
LEFT JOIN customer c ON c.id = q.customer_id
LEFT JOIN quote_line l ON l.quote_id = q.id
GROUP BY q.id";

/// Gets the database URL, preferring `DATABASE_URL` over the settings file.
#[must_use]
pub fn get_database_url(settings: &Settings) -> String {
    settings
        .clone()
        .with_database_url(std::env::var("DATABASE_URL").ok())
        .database_url
}

/// Establishes a connection pool using the given settings.
pub async fn create_connection(settings: &Settings) -> Result<DatabaseConnection> {
    let database_url = get_database_url(settings);
    tracing::info!(max_connections = settings.max_connections, "Connecting to {database_url}");

    let mut options = ConnectOptions::new(database_url);
    options
        .max_connections(settings.max_connections)
        .sqlx_logging(settings.sqlx_logging);

    Database::connect(options).await.map_err(Into::into)
}

async fn create_table<E: EntityTrait>(
    db: &DatabaseConnection,
    schema: &Schema,
    entity: E,
) -> Result<()> {
    let builder = db.get_database_backend();
    let mut table = schema.create_table_from_entity(entity);
    table.if_not_exists();
    db.execute(builder.build(&table)).await?;
    Ok(())
}

/// Creates every table from its entity definition, referenced tables first.
///
/// Existing tables are left alone, so this is safe to run against a database
/// that is already initialised.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let schema = Schema::new(db.get_database_backend());

    create_table(db, &schema, currency::Entity).await?;
    create_table(db, &schema, account_category::Entity).await?;
    create_table(db, &schema, account::Entity).await?;
    create_table(db, &schema, unit_of_measure::Entity).await?;
    create_table(db, &schema, location::Entity).await?;
    create_table(db, &schema, customer::Entity).await?;
    create_table(db, &schema, supplier::Entity).await?;
    create_table(db, &schema, contact::Entity).await?;
    create_table(db, &schema, supplier_contact::Entity).await?;
    create_table(db, &schema, employee_type::Entity).await?;
    create_table(db, &schema, employee::Entity).await?;
    create_table(db, &schema, part::Entity).await?;
    create_table(db, &schema, purchase_order::Entity).await?;
    create_table(db, &schema, purchase_order_line::Entity).await?;
    create_table(db, &schema, quote::Entity).await?;
    create_table(db, &schema, quote_line::Entity).await?;
    create_table(db, &schema, receipt::Entity).await?;
    create_table(db, &schema, receipt_line::Entity).await?;
    create_table(db, &schema, journal::Entity).await?;
    create_table(db, &schema, journal_line::Entity).await?;
    create_table(db, &schema, sequence::Entity).await?;

    Ok(())
}

/// Creates the summary views. The tables they read must already exist.
pub async fn create_views(db: &DatabaseConnection) -> Result<()> {
    let backend = db.get_database_backend();
    for sql in [PURCHASE_ORDER_SUMMARY, QUOTE_SUMMARY] {
        db.execute(Statement::from_string(backend, sql)).await?;
    }
    Ok(())
}

/// Creates all tables, then all views.
pub async fn create_schema(db: &DatabaseConnection) -> Result<()> {
    create_tables(db).await?;
    create_views(db).await?;
    tracing::info!("Schema created");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{
        PurchaseOrder, Quote, purchase_order_summary::Entity as PurchaseOrderSummary,
        quote_summary::Entity as QuoteSummary,
    };
    use sea_orm::QuerySelect;

    #[tokio::test]
    async fn test_create_schema() -> Result<()> {
        let db = Database::connect("sqlite::memory:").await?;
        create_schema(&db).await?;

        // Test that tables and views exist by querying them
        let _ = PurchaseOrder::find().limit(1).all(&db).await?;
        let _ = Quote::find().limit(1).all(&db).await?;
        let _ = PurchaseOrderSummary::find().limit(1).all(&db).await?;
        let _ = QuoteSummary::find().limit(1).all(&db).await?;

        Ok(())
    }

    #[tokio::test]
    async fn test_create_schema_is_idempotent() -> Result<()> {
        let db = Database::connect("sqlite::memory:").await?;
        create_schema(&db).await?;
        create_schema(&db).await?;
        Ok(())
    }

    #[tokio::test]
    async fn test_create_connection_from_settings() -> Result<()> {
        let settings = Settings {
            database_url: "sqlite::memory:".to_string(),
            max_connections: 1,
            sqlx_logging: false,
        };
        // An externally set DATABASE_URL would redirect the connection; only
        // exercise the settings path when it is absent.
        if std::env::var("DATABASE_URL").is_ok() {
            return Ok(());
        }

        let db = create_connection(&settings).await?;
        create_tables(&db).await?;
        let _ = crate::entities::Account::find().limit(1).all(&db).await?;

        Ok(())
    }
}
