//! Database operations for budgets.

use rusqlite::{Connection, Row};

use crate::{
    Error,
    budget::{Budget, BudgetMonth},
    database_id::CategoryId,
    user::UserId,
};

/// Set the budget of `category_id` for the month `period` to `amount`.
///
/// If the user already has a budget for that category and month, its amount is replaced. The
/// insert-or-update is a single SQL statement backed by a `UNIQUE` constraint, so two concurrent
/// calls for the same category and month can never leave two rows behind.
///
/// # Errors
/// This function will return a:
/// - [Error::NegativeAmount] if `amount` is negative or not a finite number,
/// - [Error::InvalidCategory] if `category_id` is not one of the user's categories,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn set_budget(
    user_id: UserId,
    category_id: CategoryId,
    period: BudgetMonth,
    amount: f64,
    connection: &Connection,
) -> Result<Budget, Error> {
    if !amount.is_finite() || amount < 0.0 {
        return Err(Error::NegativeAmount(amount));
    }

    let budget = connection
        .prepare(
            "INSERT INTO budget (category_id, amount, month, year, user_id)
             SELECT ?1, ?2, ?3, ?4, ?5
             WHERE EXISTS (SELECT 1 FROM category WHERE id = ?1 AND user_id = ?5)
             ON CONFLICT(user_id, category_id, month, year) DO UPDATE SET amount = excluded.amount
             RETURNING id, category_id, amount, month, year, user_id",
        )?
        .query_row(
            (
                category_id,
                amount,
                period.month_number(),
                period.year(),
                user_id.as_i64(),
            ),
            map_row,
        )
        .map_err(|error| match error {
            rusqlite::Error::QueryReturnedNoRows => Error::InvalidCategory(Some(category_id)),
            error => error.into(),
        })?;

    tracing::info!(
        "Set budget for category {category_id} in {period} to {amount} for user {user_id}"
    );

    Ok(budget)
}

/// Get the budgets `user_id` has set for the month `period`, ordered by category ID.
///
/// # Errors
/// This function will return a [Error::SqlError] if there is some SQL error.
pub fn get_budgets_for_month(
    user_id: UserId,
    period: BudgetMonth,
    connection: &Connection,
) -> Result<Vec<Budget>, Error> {
    connection
        .prepare(
            "SELECT id, category_id, amount, month, year, user_id FROM budget
             WHERE user_id = ?1 AND month = ?2 AND year = ?3
             ORDER BY category_id ASC",
        )?
        .query_map(
            (user_id.as_i64(), period.month_number(), period.year()),
            map_row,
        )?
        .map(|maybe_budget| maybe_budget.map_err(|error| error.into()))
        .collect()
}

/// Create the budget table in the database.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_budget_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS budget (
                id INTEGER PRIMARY KEY,
                category_id INTEGER NOT NULL,
                amount REAL NOT NULL CHECK (amount >= 0),
                month INTEGER NOT NULL CHECK (month BETWEEN 1 AND 12),
                year INTEGER NOT NULL,
                user_id INTEGER NOT NULL,
                UNIQUE(user_id, category_id, month, year),
                FOREIGN KEY(category_id) REFERENCES category(id) ON UPDATE CASCADE ON DELETE CASCADE,
                FOREIGN KEY(user_id) REFERENCES user(id) ON UPDATE CASCADE ON DELETE CASCADE
                )",
        (),
    )?;

    Ok(())
}

fn map_row(row: &Row) -> Result<Budget, rusqlite::Error> {
    Ok(Budget {
        id: row.get(0)?,
        category_id: row.get(1)?,
        amount: row.get(2)?,
        month: row.get(3)?,
        year: row.get(4)?,
        user_id: UserId::new(row.get(5)?),
    })
}
