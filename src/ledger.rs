//! Read-only access to one user's financial records.

use std::ops::RangeInclusive;

use rusqlite::Connection;
use time::Date;

use crate::{
    Error,
    budget::{Budget, BudgetMonth, get_budgets_for_month},
    category::{Category, get_categories_by_user},
    goal::{Goal, get_goals_by_user},
    transaction::{Transaction, get_transactions_in_date_range},
    user::UserId,
};

/// Fetches the records of a single user.
///
/// Everything returned belongs to [LedgerReader::user_id], implementations must never leak
/// records of other users.
pub trait LedgerReader {
    /// The user whose records are read.
    fn user_id(&self) -> UserId;

    /// The user's transactions, restricted to `date_range` (inclusive) if given, in ascending
    /// date order.
    fn transactions(
        &self,
        date_range: Option<RangeInclusive<Date>>,
    ) -> Result<Vec<Transaction>, Error>;

    /// The user's categories.
    fn categories(&self) -> Result<Vec<Category>, Error>;

    /// The budgets the user set for `period`.
    fn budgets(&self, period: BudgetMonth) -> Result<Vec<Budget>, Error>;

    /// The user's savings goals.
    fn goals(&self) -> Result<Vec<Goal>, Error>;
}

/// A [LedgerReader] backed by a SQLite database.
#[derive(Debug, Clone, Copy)]
pub struct SqliteLedger<'a> {
    user_id: UserId,
    connection: &'a Connection,
}

impl<'a> SqliteLedger<'a> {
    /// Read the records of `user_id` from `connection`.
    pub fn new(user_id: UserId, connection: &'a Connection) -> Self {
        Self {
            user_id,
            connection,
        }
    }
}

impl LedgerReader for SqliteLedger<'_> {
    fn user_id(&self) -> UserId {
        self.user_id
    }

    fn transactions(
        &self,
        date_range: Option<RangeInclusive<Date>>,
    ) -> Result<Vec<Transaction>, Error> {
        get_transactions_in_date_range(self.user_id, date_range, self.connection)
    }

    fn categories(&self) -> Result<Vec<Category>, Error> {
        get_categories_by_user(self.user_id, self.connection)
    }

    fn budgets(&self, period: BudgetMonth) -> Result<Vec<Budget>, Error> {
        get_budgets_for_month(self.user_id, period, self.connection)
    }

    fn goals(&self) -> Result<Vec<Goal>, Error> {
        get_goals_by_user(self.user_id, self.connection)
    }
}
