//! Enumerated domains - closed label sets used by constrained columns.
//!
//! Every domain is stored as text and serializes to JSON as its label, so the
//! value a client sends is the value the database holds.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Names an enumerated domain in the catalog.
pub trait Domain {
    /// Catalog name of the domain
    const NAME: &'static str;
}

/// Top-level classification of a general ledger account
#[derive(Copy, Clone, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Text")]
pub enum AccountClass {
    #[sea_orm(string_value = "Asset")]
    #[serde(rename = "Asset")]
    Asset,
    #[sea_orm(string_value = "Liability")]
    #[serde(rename = "Liability")]
    Liability,
    #[sea_orm(string_value = "Equity")]
    #[serde(rename = "Equity")]
    Equity,
    #[sea_orm(string_value = "Revenue")]
    #[serde(rename = "Revenue")]
    Revenue,
    #[sea_orm(string_value = "Expense")]
    #[serde(rename = "Expense")]
    Expense,
}

impl Domain for AccountClass {
    const NAME: &'static str = "account_class";
}

/// Financial statement an account reports on
#[derive(Copy, Clone, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Text")]
pub enum AccountIncomeBalance {
    #[sea_orm(string_value = "Balance Sheet")]
    #[serde(rename = "Balance Sheet")]
    BalanceSheet,
    #[sea_orm(string_value = "Income Statement")]
    #[serde(rename = "Income Statement")]
    IncomeStatement,
}

impl Domain for AccountIncomeBalance {
    const NAME: &'static str = "account_income_balance";
}

/// Exchange rate used when consolidating an account across currencies
#[derive(Copy, Clone, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Text")]
pub enum AccountConsolidatedRate {
    #[sea_orm(string_value = "Average")]
    #[serde(rename = "Average")]
    Average,
    #[sea_orm(string_value = "Current")]
    #[serde(rename = "Current")]
    Current,
    #[sea_orm(string_value = "Historical")]
    #[serde(rename = "Historical")]
    Historical,
}

impl Domain for AccountConsolidatedRate {
    const NAME: &'static str = "account_consolidated_rate";
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Text")]
pub enum PartType {
    #[sea_orm(string_value = "Inventory")]
    #[serde(rename = "Inventory")]
    Inventory,
    #[sea_orm(string_value = "Non-Inventory")]
    #[serde(rename = "Non-Inventory")]
    NonInventory,
    #[sea_orm(string_value = "Service")]
    #[serde(rename = "Service")]
    Service,
}

impl Domain for PartType {
    const NAME: &'static str = "part_type";
}

/// How a part is sourced when stock runs short
#[derive(Copy, Clone, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Text")]
pub enum PartReplenishmentSystem {
    #[sea_orm(string_value = "Buy")]
    #[serde(rename = "Buy")]
    Buy,
    #[sea_orm(string_value = "Make")]
    #[serde(rename = "Make")]
    Make,
    #[sea_orm(string_value = "Buy and Make")]
    #[serde(rename = "Buy and Make")]
    BuyAndMake,
}

impl Domain for PartReplenishmentSystem {
    const NAME: &'static str = "part_replenishment_system";
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Text")]
pub enum PurchaseOrderType {
    #[sea_orm(string_value = "Purchase")]
    #[serde(rename = "Purchase")]
    Purchase,
    #[sea_orm(string_value = "Return")]
    #[serde(rename = "Return")]
    Return,
}

impl Domain for PurchaseOrderType {
    const NAME: &'static str = "purchase_order_type";
}

/// Lifecycle state of a purchase order
#[derive(Copy, Clone, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Text")]
pub enum PurchaseOrderStatus {
    #[sea_orm(string_value = "Draft")]
    #[serde(rename = "Draft")]
    Draft,
    #[sea_orm(string_value = "To Review")]
    #[serde(rename = "To Review")]
    ToReview,
    #[sea_orm(string_value = "To Receive")]
    #[serde(rename = "To Receive")]
    ToReceive,
    #[sea_orm(string_value = "To Receive and Invoice")]
    #[serde(rename = "To Receive and Invoice")]
    ToReceiveAndInvoice,
    #[sea_orm(string_value = "To Invoice")]
    #[serde(rename = "To Invoice")]
    ToInvoice,
    #[sea_orm(string_value = "Completed")]
    #[serde(rename = "Completed")]
    Completed,
    #[sea_orm(string_value = "Closed")]
    #[serde(rename = "Closed")]
    Closed,
    #[sea_orm(string_value = "Rejected")]
    #[serde(rename = "Rejected")]
    Rejected,
}

impl Domain for PurchaseOrderStatus {
    const NAME: &'static str = "purchase_order_status";
}

/// What a purchase order line is charged against
#[derive(Copy, Clone, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Text")]
pub enum PurchaseOrderLineType {
    #[sea_orm(string_value = "Comment")]
    #[serde(rename = "Comment")]
    Comment,
    #[sea_orm(string_value = "G/L Account")]
    #[serde(rename = "G/L Account")]
    GlAccount,
    #[sea_orm(string_value = "Part")]
    #[serde(rename = "Part")]
    Part,
    #[sea_orm(string_value = "Fixed Asset")]
    #[serde(rename = "Fixed Asset")]
    FixedAsset,
}

impl Domain for PurchaseOrderLineType {
    const NAME: &'static str = "purchase_order_line_type";
}

/// Lifecycle state of a sales quote
#[derive(Copy, Clone, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Text")]
pub enum QuoteStatus {
    #[sea_orm(string_value = "Draft")]
    #[serde(rename = "Draft")]
    Draft,
    #[sea_orm(string_value = "Sent")]
    #[serde(rename = "Sent")]
    Sent,
    #[sea_orm(string_value = "Ordered")]
    #[serde(rename = "Ordered")]
    Ordered,
    #[sea_orm(string_value = "Partially Ordered")]
    #[serde(rename = "Partially Ordered")]
    PartiallyOrdered,
    #[sea_orm(string_value = "Lost")]
    #[serde(rename = "Lost")]
    Lost,
    #[sea_orm(string_value = "Cancelled")]
    #[serde(rename = "Cancelled")]
    Cancelled,
    #[sea_orm(string_value = "Expired")]
    #[serde(rename = "Expired")]
    Expired,
}

impl Domain for QuoteStatus {
    const NAME: &'static str = "quote_status";
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Text")]
pub enum ReceiptStatus {
    #[sea_orm(string_value = "Draft")]
    #[serde(rename = "Draft")]
    Draft,
    #[sea_orm(string_value = "Pending")]
    #[serde(rename = "Pending")]
    Pending,
    #[sea_orm(string_value = "Posted")]
    #[serde(rename = "Posted")]
    Posted,
}

impl Domain for ReceiptStatus {
    const NAME: &'static str = "receipt_status";
}

/// Kind of document a receipt was raised against
#[derive(Copy, Clone, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Text")]
pub enum ReceiptSourceDocument {
    #[sea_orm(string_value = "Purchase Order")]
    #[serde(rename = "Purchase Order")]
    PurchaseOrder,
    #[sea_orm(string_value = "Purchase Invoice")]
    #[serde(rename = "Purchase Invoice")]
    PurchaseInvoice,
    #[sea_orm(string_value = "Purchase Return Order")]
    #[serde(rename = "Purchase Return Order")]
    PurchaseReturnOrder,
    #[sea_orm(string_value = "Inbound Transfer")]
    #[serde(rename = "Inbound Transfer")]
    InboundTransfer,
}

impl Domain for ReceiptSourceDocument {
    const NAME: &'static str = "receipt_source_document";
}

/// Business document a journal line was posted from
#[derive(Copy, Clone, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Text")]
pub enum JournalLineDocumentType {
    #[sea_orm(string_value = "Receipt")]
    #[serde(rename = "Receipt")]
    Receipt,
    #[sea_orm(string_value = "Invoice")]
    #[serde(rename = "Invoice")]
    Invoice,
    #[sea_orm(string_value = "Credit Memo")]
    #[serde(rename = "Credit Memo")]
    CreditMemo,
    #[sea_orm(string_value = "Blanket Order")]
    #[serde(rename = "Blanket Order")]
    BlanketOrder,
    #[sea_orm(string_value = "Order")]
    #[serde(rename = "Order")]
    Order,
    #[sea_orm(string_value = "Return Order")]
    #[serde(rename = "Return Order")]
    ReturnOrder,
    #[sea_orm(string_value = "Shipment")]
    #[serde(rename = "Shipment")]
    Shipment,
}

impl Domain for JournalLineDocumentType {
    const NAME: &'static str = "journal_line_document_type";
}
