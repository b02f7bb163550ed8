//! Defines the core data models and database queries for transactions.

use std::{fmt::Display, ops::RangeInclusive};

use rusqlite::{
    Connection, Row, ToSql,
    types::{FromSql, FromSqlError, FromSqlResult, ToSqlOutput, ValueRef},
};
use serde::{Deserialize, Serialize};
use time::Date;

use crate::{
    Error,
    database_id::{CategoryId, TransactionId},
    user::UserId,
};

// ============================================================================
// MODELS
// ============================================================================

/// Whether money was earned or spent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// Money that was earned, e.g. wages.
    Income,
    /// Money that was spent, e.g. groceries.
    Expense,
}

impl TransactionType {
    fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Income => "income",
            TransactionType::Expense => "expense",
        }
    }
}

impl Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ToSql for TransactionType {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for TransactionType {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        match value.as_str()? {
            "income" => Ok(TransactionType::Income),
            "expense" => Ok(TransactionType::Expense),
            other => Err(FromSqlError::Other(
                format!("invalid transaction type \"{other}\"").into(),
            )),
        }
    }
}

/// An expense or income, i.e. an event where money was either spent or earned.
///
/// Transactions are never modified once created.
/// To create a new `Transaction`, use [Transaction::build].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// The ID of the transaction.
    pub id: TransactionId,
    /// A short description of what the transaction was for.
    pub title: String,
    /// The amount of money spent or earned, never negative.
    pub amount: f64,
    /// Whether the money was earned or spent.
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    /// When the transaction happened.
    pub date: Date,
    /// The ID of the category the transaction belongs to.
    ///
    /// `None` if the category was deleted after the transaction was created.
    pub category_id: Option<CategoryId>,
    /// Free text notes.
    pub notes: Option<String>,
}

impl Transaction {
    /// Create a new transaction.
    ///
    /// Shortcut for [TransactionBuilder] for discoverability.
    pub fn build(
        title: &str,
        amount: f64,
        transaction_type: TransactionType,
        date: Date,
    ) -> TransactionBuilder {
        TransactionBuilder {
            title: title.to_owned(),
            amount,
            transaction_type,
            date,
            category_id: None,
            notes: None,
        }
    }

    /// Whether the transaction is money earned.
    pub fn is_income(&self) -> bool {
        self.transaction_type == TransactionType::Income
    }

    /// Whether the transaction is money spent.
    pub fn is_expense(&self) -> bool {
        self.transaction_type == TransactionType::Expense
    }
}

/// A builder for creating [Transaction] instances.
///
/// # Examples
///
/// ```ignore
/// use time::macros::date;
///
/// let builder = Transaction::build("Groceries", 45.99, TransactionType::Expense, date!(2025 - 01 - 15))
///     .category_id(Some(food.id))
///     .notes(Some("Weekly shop"));
/// ```
#[derive(Debug, PartialEq, Clone)]
pub struct TransactionBuilder {
    /// A short description of the transaction, must not be empty.
    pub title: String,

    /// The monetary amount of the transaction.
    ///
    /// Always zero or positive, the direction of the money is given by
    /// `transaction_type`.
    pub amount: f64,

    /// Whether the money was earned or spent.
    pub transaction_type: TransactionType,

    /// The date when the transaction occurred.
    pub date: Date,

    /// The category of the transaction, e.g. "Groceries", "Transport", "Rent".
    pub category_id: Option<CategoryId>,

    /// Free text notes.
    pub notes: Option<String>,
}

impl TransactionBuilder {
    /// Set the category id for the transaction.
    pub fn category_id(mut self, category_id: Option<CategoryId>) -> Self {
        self.category_id = category_id;
        self
    }

    /// Set the notes for the transaction.
    pub fn notes(mut self, notes: Option<&str>) -> Self {
        self.notes = notes.map(str::to_owned);
        self
    }
}

// ============================================================================
// DATABASE FUNCTIONS
// ============================================================================

/// Create a new transaction for `user_id` in the database from a builder.
///
/// # Errors
/// This function will return a:
/// - [Error::EmptyTitle] if the title is empty or just whitespace,
/// - [Error::NegativeAmount] if the amount is negative or not a finite number,
/// - [Error::InvalidCategory] if the category ID does not refer to one of the user's categories,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn create_transaction(
    builder: TransactionBuilder,
    user_id: UserId,
    connection: &Connection,
) -> Result<Transaction, Error> {
    let title = builder.title.trim();

    if title.is_empty() {
        return Err(Error::EmptyTitle);
    }

    if !builder.amount.is_finite() || builder.amount < 0.0 {
        return Err(Error::NegativeAmount(builder.amount));
    }

    let transaction = connection
        .prepare(
            "INSERT INTO \"transaction\" (title, amount, type, date, category_id, notes, user_id)
             SELECT ?1, ?2, ?3, ?4, ?5, ?6, ?7
             WHERE ?5 IS NULL OR EXISTS (SELECT 1 FROM category WHERE id = ?5 AND user_id = ?7)
             RETURNING id, title, amount, type, date, category_id, notes",
        )?
        .query_row(
            (
                title,
                builder.amount,
                builder.transaction_type,
                builder.date,
                builder.category_id,
                &builder.notes,
                user_id.as_i64(),
            ),
            map_transaction_row,
        )
        .map_err(|error| match error {
            rusqlite::Error::QueryReturnedNoRows => Error::InvalidCategory(builder.category_id),
            rusqlite::Error::SqliteFailure(
                rusqlite::ffi::Error {
                    code: _,
                    extended_code: rusqlite::ffi::SQLITE_CONSTRAINT_FOREIGNKEY,
                },
                _,
            ) => Error::InvalidCategory(builder.category_id),
            error => error.into(),
        })?;

    tracing::debug!(
        "Created {} transaction {} for user {user_id}",
        transaction.transaction_type,
        transaction.id
    );

    Ok(transaction)
}

/// Get the transactions of `user_id`, optionally restricted to those inside `date_range`
/// (inclusive).
///
/// Transactions are returned in ascending order of date, then creation order.
///
/// # Errors
/// This function will return a [Error::SqlError] if there is some SQL error.
pub fn get_transactions_in_date_range(
    user_id: UserId,
    date_range: Option<RangeInclusive<Date>>,
    connection: &Connection,
) -> Result<Vec<Transaction>, Error> {
    let base_query = "SELECT id, title, amount, type, date, category_id, notes
        FROM \"transaction\"
        WHERE user_id = ?1";

    let transactions = match date_range {
        Some(range) => connection
            .prepare(&format!(
                "{base_query} AND date BETWEEN ?2 AND ?3 ORDER BY date ASC, id ASC"
            ))?
            .query_map(
                (user_id.as_i64(), *range.start(), *range.end()),
                map_transaction_row,
            )?
            .collect::<Result<Vec<Transaction>, rusqlite::Error>>()?,
        None => connection
            .prepare(&format!("{base_query} ORDER BY date ASC, id ASC"))?
            .query_map((user_id.as_i64(),), map_transaction_row)?
            .collect::<Result<Vec<Transaction>, rusqlite::Error>>()?,
    };

    Ok(transactions)
}

/// Get the total number of transactions for `user_id`.
///
/// # Errors
/// This function will return a [Error::SqlError] there is some SQL error.
#[cfg(test)]
pub fn count_transactions(user_id: UserId, connection: &Connection) -> Result<u32, Error> {
    connection
        .query_row(
            "SELECT COUNT(id) FROM \"transaction\" WHERE user_id = ?1;",
            (user_id.as_i64(),),
            |row| row.get(0),
        )
        .map_err(|error| error.into())
}

/// Create the transaction table in the database.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_transaction_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS \"transaction\" (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title TEXT NOT NULL,
                amount REAL NOT NULL CHECK (amount >= 0),
                type TEXT NOT NULL CHECK (type IN ('income', 'expense')),
                date TEXT NOT NULL,
                category_id INTEGER,
                notes TEXT,
                user_id INTEGER NOT NULL,
                FOREIGN KEY(category_id) REFERENCES category(id) ON UPDATE CASCADE ON DELETE SET NULL,
                FOREIGN KEY(user_id) REFERENCES user(id) ON UPDATE CASCADE ON DELETE CASCADE
                )",
        (),
    )?;

    // Composite index used by the ledger reader.
    connection.execute(
        "CREATE INDEX IF NOT EXISTS idx_transaction_user_date ON \"transaction\"(user_id, date);",
        (),
    )?;

    Ok(())
}

fn map_transaction_row(row: &Row) -> Result<Transaction, rusqlite::Error> {
    let id = row.get(0)?;
    let title = row.get(1)?;
    let amount = row.get(2)?;
    let transaction_type = row.get(3)?;
    let date = row.get(4)?;
    let category_id = row.get(5)?;
    let notes = row.get(6)?;

    Ok(Transaction {
        id,
        title,
        amount,
        transaction_type,
        date,
        category_id,
        notes,
    })
}

// ============================================================================
// TESTS
// ============================================================================
