//! Shared test utilities for the schema reflection layer.
//!
//! This module provides common helper functions for setting up test databases
//! and creating rows with sensible defaults. Every fixture goes through the
//! entity's `Insert` record, so defaults are filled exactly as in production.

use crate::{
    entities::{
        account, account_category, contact, customer,
        domains::{AccountClass, AccountIncomeBalance, PartType},
        journal, journal_line, part, purchase_order, quote, quote_line, sequence, supplier,
        supplier_contact, unit_of_measure,
    },
    errors::Result,
};
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, prelude::Date};

const TEST_USER: &str = "test-user";

/// Creates an in-memory `SQLite` database with all tables and views initialized.
/// This is the standard setup for all database tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_schema(&db).await?;
    Ok(db)
}

/// Creates an asset account category.
pub async fn create_test_account_category(
    db: &DatabaseConnection,
    category: &str,
) -> Result<account_category::Model> {
    let insert = account_category::Insert {
        id: None,
        category: category.to_string(),
        class: AccountClass::Asset,
        income_balance: AccountIncomeBalance::BalanceSheet,
        created_at: None,
        created_by: TEST_USER.to_string(),
        updated_at: None,
        updated_by: None,
    };
    Ok(account_category::ActiveModel::from(insert).insert(db).await?)
}

/// Creates a balance sheet asset account named "Cash".
///
/// # Defaults
/// * `consolidated_rate`: None
/// * `direct_posting`: false
/// * `active`: true
pub async fn create_test_account(
    db: &DatabaseConnection,
    number: &str,
    account_category_id: Option<String>,
) -> Result<account::Model> {
    let insert = account::Insert {
        number: number.to_string(),
        name: "Cash".to_string(),
        class: AccountClass::Asset,
        income_balance: AccountIncomeBalance::BalanceSheet,
        consolidated_rate: None,
        account_category_id,
        direct_posting: None,
        active: None,
        created_at: None,
        created_by: TEST_USER.to_string(),
        updated_at: None,
        updated_by: None,
    };
    Ok(account::ActiveModel::from(insert).insert(db).await?)
}

/// Creates an active supplier in the base currency.
pub async fn create_test_supplier(db: &DatabaseConnection, name: &str) -> Result<supplier::Model> {
    let insert = supplier::Insert {
        id: None,
        name: name.to_string(),
        currency_code: None,
        tax_id: None,
        active: None,
        created_at: None,
        created_by: TEST_USER.to_string(),
        updated_at: None,
        updated_by: None,
    };
    Ok(supplier::ActiveModel::from(insert).insert(db).await?)
}

/// Creates a contact with the given email and links it to a supplier.
pub async fn create_test_supplier_contact(
    db: &DatabaseConnection,
    supplier_id: &str,
    email: &str,
) -> Result<supplier_contact::Model> {
    let contact = contact::ActiveModel::from(contact::Insert {
        id: None,
        first_name: "Test".to_string(),
        last_name: "Contact".to_string(),
        email: email.to_string(),
        mobile_phone: None,
    })
    .insert(db)
    .await?;

    let link = supplier_contact::Insert {
        id: None,
        supplier_id: supplier_id.to_string(),
        contact_id: contact.id,
    };
    Ok(supplier_contact::ActiveModel::from(link).insert(db).await?)
}

/// Creates the "EA" (each) unit of measure unless it already exists.
pub async fn ensure_each_unit(db: &DatabaseConnection) -> Result<unit_of_measure::Model> {
    if let Some(existing) = unit_of_measure::Entity::find_by_id("EA").one(db).await? {
        return Ok(existing);
    }

    let insert = unit_of_measure::Insert {
        code: "EA".to_string(),
        name: "Each".to_string(),
        created_at: None,
        created_by: TEST_USER.to_string(),
        updated_at: None,
        updated_by: None,
    };
    Ok(unit_of_measure::ActiveModel::from(insert).insert(db).await?)
}

/// Creates an inventory part counted in "EA".
pub async fn create_test_part(db: &DatabaseConnection, id: &str) -> Result<part::Model> {
    let unit = ensure_each_unit(db).await?;

    let insert = part::Insert {
        id: id.to_string(),
        name: format!("Part {id}"),
        description: None,
        part_type: PartType::Inventory,
        replenishment_system: None,
        unit_of_measure_code: unit.code,
        blocked: None,
        active: None,
        created_at: None,
        created_by: TEST_USER.to_string(),
        updated_at: None,
        updated_by: None,
    };
    Ok(part::ActiveModel::from(insert).insert(db).await?)
}

/// Creates a draft purchase order dated today.
pub async fn create_test_purchase_order(
    db: &DatabaseConnection,
    purchase_order_id: &str,
    supplier_id: &str,
) -> Result<purchase_order::Model> {
    let insert = purchase_order::Insert {
        id: None,
        purchase_order_id: purchase_order_id.to_string(),
        purchase_order_type: None,
        status: None,
        order_date: None,
        supplier_id: supplier_id.to_string(),
        supplier_contact_id: None,
        location_id: None,
        currency_code: None,
        notes: None,
        closed_at: None,
        closed_by: None,
        created_at: None,
        created_by: TEST_USER.to_string(),
        updated_at: None,
        updated_by: None,
    };
    Ok(purchase_order::ActiveModel::from(insert).insert(db).await?)
}

pub async fn create_test_customer(db: &DatabaseConnection, name: &str) -> Result<customer::Model> {
    let insert = customer::Insert {
        id: None,
        name: name.to_string(),
        currency_code: None,
        tax_id: None,
        active: None,
        created_at: None,
        created_by: TEST_USER.to_string(),
        updated_at: None,
        updated_by: None,
    };
    Ok(customer::ActiveModel::from(insert).insert(db).await?)
}

/// Creates a draft quote without expiry.
pub async fn create_test_quote(
    db: &DatabaseConnection,
    quote_id: &str,
    customer_id: &str,
) -> Result<quote::Model> {
    let insert = quote::Insert {
        id: None,
        quote_id: quote_id.to_string(),
        name: format!("Quote {quote_id}"),
        status: None,
        customer_id: customer_id.to_string(),
        location_id: None,
        owner_id: None,
        expiration_date: None,
        notes: None,
        created_at: None,
        created_by: TEST_USER.to_string(),
        updated_at: None,
        updated_by: None,
    };
    Ok(quote::ActiveModel::from(insert).insert(db).await?)
}

pub async fn create_test_quote_line(
    db: &DatabaseConnection,
    quote_id: &str,
    part_id: &str,
    quantity: f64,
    unit_price: f64,
) -> Result<quote_line::Model> {
    let insert = quote_line::Insert {
        id: None,
        quote_id: quote_id.to_string(),
        part_id: part_id.to_string(),
        description: format!("Quoted {part_id}"),
        quantity: Some(quantity),
        unit_price: Some(unit_price),
        created_at: None,
        created_by: TEST_USER.to_string(),
        updated_at: None,
        updated_by: None,
    };
    Ok(quote_line::ActiveModel::from(insert).insert(db).await?)
}

/// Creates a journal posted on `posting_date`.
pub async fn create_test_journal(
    db: &DatabaseConnection,
    posting_date: Date,
) -> Result<journal::Model> {
    let insert = journal::Insert {
        posting_date: Some(posting_date),
        ..Default::default()
    };
    Ok(journal::ActiveModel::from(insert).insert(db).await?)
}

/// Posts `amount` to `account_number`; positive amounts are debits.
pub async fn create_test_journal_line(
    db: &DatabaseConnection,
    journal_id: i32,
    account_number: &str,
    amount: f64,
) -> Result<journal_line::Model> {
    let insert = journal_line::Insert {
        id: None,
        journal_id,
        account_number: account_number.to_string(),
        description: None,
        amount,
        quantity: None,
        document_type: None,
        document_id: None,
        external_document_id: None,
        created_at: None,
    };
    Ok(journal_line::ActiveModel::from(insert).insert(db).await?)
}

/// Creates a sequence starting at 1 with step 1 and no suffix.
pub async fn create_test_sequence(
    db: &DatabaseConnection,
    table_name: &str,
    prefix: &str,
    size: i32,
) -> Result<sequence::Model> {
    let insert = sequence::Insert {
        table_name: table_name.to_string(),
        name: table_name.replace('_', " "),
        prefix: Some(prefix.to_string()),
        suffix: None,
        next: Some(1),
        size: Some(size),
        step: None,
        updated_at: None,
        updated_by: None,
    };
    Ok(sequence::ActiveModel::from(insert).insert(db).await?)
}
