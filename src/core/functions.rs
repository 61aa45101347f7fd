//! Database functions - fixed-signature routines callable by the query layer.
//!
//! Each function has a [`FunctionDescriptor`] recording its argument and return
//! shapes, and an async implementation that runs against the connected database
//! through SeaORM.

use crate::{
    core::descriptor::DataType,
    entities::{Account, Journal, JournalLine, Quote, QuoteLine, account, journal, sequence},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Statement, prelude::*};
use serde::Serialize;
use std::collections::BTreeMap;

/// One named, typed argument or result column
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Argument {
    /// Argument or column name
    pub name: &'static str,
    /// Type of the value passed or returned
    pub data_type: DataType,
}

/// What a function hands back
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "shape", rename_all = "snake_case")]
pub enum Returns {
    /// A single value
    Scalar(DataType),
    /// A set of rows with the given columns
    SetOf(&'static [Argument]),
}

/// Signature of a callable database function
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FunctionDescriptor {
    /// Function name
    pub name: &'static str,
    /// Arguments in call order
    pub arguments: &'static [Argument],
    /// Result of a call
    pub returns: Returns,
}

/// Every function the database exposes.
pub const FUNCTIONS: &[FunctionDescriptor] = &[
    FunctionDescriptor {
        name: "get_next_sequence",
        arguments: &[Argument {
            name: "sequence_table",
            data_type: DataType::Text,
        }],
        returns: Returns::Scalar(DataType::Text),
    },
    FunctionDescriptor {
        name: "journal_lines_by_account_number",
        arguments: &[
            Argument {
                name: "from_date",
                data_type: DataType::Date,
            },
            Argument {
                name: "to_date",
                data_type: DataType::Date,
            },
        ],
        returns: Returns::SetOf(&[
            Argument {
                name: "number",
                data_type: DataType::Text,
            },
            Argument {
                name: "balance",
                data_type: DataType::Float,
            },
            Argument {
                name: "net_change",
                data_type: DataType::Float,
            },
        ]),
    },
    FunctionDescriptor {
        name: "get_quote_total",
        arguments: &[Argument {
            name: "quote_id",
            data_type: DataType::Text,
        }],
        returns: Returns::Scalar(DataType::Float),
    },
];

/// Advances a sequence and hands back the value it held, in one statement.
const ADVANCE_SEQUENCE: &str = "UPDATE sequence SET next = next + step, updated_at = ? \
     WHERE table_name = ? \
     RETURNING prefix, suffix, size, next - step AS issued";

/// Returns the next document number of `sequence_table` and advances the sequence.
///
/// The number is `prefix + next (zero-padded to size) + suffix`; `next` then grows
/// by `step`. Reading and advancing happen in a single `UPDATE .. RETURNING`, so
/// callers on separate connections queue on the write lock and never receive the
/// same number.
///
/// # Errors
/// [`Error::RowNotFound`] when no sequence exists for `sequence_table`.
pub async fn get_next_sequence(db: &DatabaseConnection, sequence_table: &str) -> Result<String> {
    let row = db
        .query_all(Statement::from_sql_and_values(
            db.get_database_backend(),
            ADVANCE_SEQUENCE,
            [chrono::Utc::now().into(), sequence_table.into()],
        ))
        .await?
        .into_iter()
        .next()
        .ok_or_else(|| Error::RowNotFound {
            relation: "sequence".to_string(),
            key: sequence_table.to_string(),
        })?;

    let prefix: Option<String> = row.try_get("", "prefix")?;
    let suffix: Option<String> = row.try_get("", "suffix")?;
    let size: i32 = row.try_get("", "size")?;
    let issued: i64 = row.try_get("", "issued")?;
    let document_number = sequence::format_number(prefix.as_deref(), suffix.as_deref(), size, issued);

    tracing::debug!(sequence_table, document_number, "Issued document number");
    Ok(document_number)
}

/// One row of `journal_lines_by_account_number`
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AccountBalance {
    /// Account number
    pub number: String,
    /// Sum of amounts posted on or before `to_date`
    pub balance: f64,
    /// Sum of amounts posted within `[from_date, to_date]`
    pub net_change: f64,
}

/// Totals journal line amounts per account, ordered by account number.
///
/// Every account appears, including those without postings.
pub async fn journal_lines_by_account_number(
    db: &DatabaseConnection,
    from_date: Date,
    to_date: Date,
) -> Result<Vec<AccountBalance>> {
    let mut balances: BTreeMap<String, AccountBalance> = Account::find()
        .order_by_asc(account::Column::Number)
        .all(db)
        .await?
        .into_iter()
        .map(|account| {
            (
                account.number.clone(),
                AccountBalance {
                    number: account.number,
                    balance: 0.0,
                    net_change: 0.0,
                },
            )
        })
        .collect();

    let lines = JournalLine::find()
        .find_also_related(Journal)
        .filter(journal::Column::PostingDate.lte(to_date))
        .all(db)
        .await?;

    for (line, journal) in lines {
        let Some(journal) = journal else { continue };
        if let Some(totals) = balances.get_mut(&line.account_number) {
            totals.balance += line.amount;
            if journal.posting_date >= from_date {
                totals.net_change += line.amount;
            }
        }
    }

    Ok(balances.into_values().collect())
}

/// Sums `quantity * unit_price` over the lines of quote `quote_id`.
///
/// # Errors
/// [`Error::RowNotFound`] when the quote does not exist.
pub async fn get_quote_total(db: &DatabaseConnection, quote_id: &str) -> Result<f64> {
    let quote = Quote::find_by_id(quote_id.to_owned())
        .one(db)
        .await?
        .ok_or_else(|| Error::RowNotFound {
            relation: "quote".to_string(),
            key: quote_id.to_string(),
        })?;

    let lines = quote.find_related(QuoteLine).all(db).await?;
    Ok(lines.iter().map(|line| line.quantity * line.unit_price).sum())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::database::create_schema, entities::Sequence, test_utils::*};
    use chrono::NaiveDate;
    use sea_orm::{ConnectOptions, Database};

    fn date(year: i32, month: u32, day: u32) -> Result<Date> {
        NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| Error::Config {
            message: format!("invalid test date {year}-{month}-{day}"),
        })
    }

    #[tokio::test]
    async fn test_get_next_sequence_formats_and_advances() -> Result<()> {
        let db = setup_test_db().await?;
        create_test_sequence(&db, "purchase_order", "PO", 6).await?;

        assert_eq!(get_next_sequence(&db, "purchase_order").await?, "PO000001");
        assert_eq!(get_next_sequence(&db, "purchase_order").await?, "PO000002");

        let stored = Sequence::find_by_id("purchase_order").one(&db).await?;
        assert_eq!(stored.map(|row| row.next), Some(3));

        Ok(())
    }

    #[tokio::test]
    async fn test_get_next_sequence_respects_step_and_suffix() -> Result<()> {
        let db = setup_test_db().await?;
        let created = create_test_sequence(&db, "receipt", "RE", 4).await?;

        let update = sequence::Update {
            suffix: Some(Some("-X".to_string())),
            step: Some(10),
            ..Default::default()
        };
        update.into_active_model(created.table_name).update(&db).await?;

        assert_eq!(get_next_sequence(&db, "receipt").await?, "RE0001-X");
        assert_eq!(get_next_sequence(&db, "receipt").await?, "RE0011-X");

        Ok(())
    }

    #[tokio::test]
    async fn test_get_next_sequence_concurrent_callers_get_distinct_numbers() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let url = format!("sqlite://{}?mode=rwc", dir.path().join("erp.sqlite").display());
        let mut options = ConnectOptions::new(url);
        options.max_connections(5).sqlx_logging(false);
        let db = Database::connect(options).await?;
        create_schema(&db).await?;
        create_test_sequence(&db, "purchase_order", "PO", 6).await?;

        let (first, second, third, fourth) = tokio::join!(
            get_next_sequence(&db, "purchase_order"),
            get_next_sequence(&db, "purchase_order"),
            get_next_sequence(&db, "purchase_order"),
            get_next_sequence(&db, "purchase_order"),
        );

        let mut issued = vec![first?, second?, third?, fourth?];
        issued.sort();
        assert_eq!(issued, vec!["PO000001", "PO000002", "PO000003", "PO000004"]);

        let stored = Sequence::find_by_id("purchase_order").one(&db).await?;
        assert_eq!(stored.map(|row| row.next), Some(5));

        Ok(())
    }

    #[tokio::test]
    async fn test_get_next_sequence_unknown_table() -> Result<()> {
        let db = setup_test_db().await?;

        let result = get_next_sequence(&db, "invoice").await;
        assert!(matches!(result, Err(Error::RowNotFound { ref key, .. }) if key == "invoice"));

        Ok(())
    }

    #[tokio::test]
    async fn test_journal_lines_by_account_number() -> Result<()> {
        let db = setup_test_db().await?;
        let category = create_test_account_category(&db, "Current Assets").await?;
        create_test_account(&db, "1010", Some(category.id.clone())).await?;
        create_test_account(&db, "2000", None).await?;
        create_test_account(&db, "3000", None).await?;

        for (posted, amount) in [
            (date(2024, 1, 15)?, 100.0),
            (date(2024, 2, 10)?, 50.0),
            (date(2024, 3, 5)?, 25.0),
        ] {
            let journal = create_test_journal(&db, posted).await?;
            create_test_journal_line(&db, journal.id, "1010", amount).await?;
            create_test_journal_line(&db, journal.id, "2000", -amount).await?;
        }

        let rows = journal_lines_by_account_number(&db, date(2024, 2, 1)?, date(2024, 2, 29)?).await?;

        assert_eq!(
            rows,
            vec![
                AccountBalance {
                    number: "1010".to_string(),
                    balance: 150.0,
                    net_change: 50.0,
                },
                AccountBalance {
                    number: "2000".to_string(),
                    balance: -150.0,
                    net_change: -50.0,
                },
                AccountBalance {
                    number: "3000".to_string(),
                    balance: 0.0,
                    net_change: 0.0,
                },
            ]
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_get_quote_total() -> Result<()> {
        let db = setup_test_db().await?;
        let customer = create_test_customer(&db, "Initech").await?;
        let quote = create_test_quote(&db, "Q000001", &customer.id).await?;
        let bolt = create_test_part(&db, "F-0001").await?;
        let nut = create_test_part(&db, "F-0002").await?;

        create_test_quote_line(&db, &quote.id, &bolt.id, 2.0, 3.5).await?;
        create_test_quote_line(&db, &quote.id, &nut.id, 4.0, 1.25).await?;

        let total = get_quote_total(&db, &quote.id).await?;
        assert!((total - 12.0).abs() < f64::EPSILON);

        let empty = create_test_quote(&db, "Q000002", &customer.id).await?;
        assert!(get_quote_total(&db, &empty.id).await?.abs() < f64::EPSILON);

        Ok(())
    }

    #[tokio::test]
    async fn test_get_quote_total_unknown_quote() -> Result<()> {
        let db = setup_test_db().await?;

        let result = get_quote_total(&db, "missing").await;
        assert!(matches!(result, Err(Error::RowNotFound { ref relation, .. }) if relation == "quote"));

        Ok(())
    }
}
