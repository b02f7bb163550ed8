//! Finance Tracker turns a personal ledger of income and expense transactions
//! into the numbers a dashboard needs.
//!
//! The aggregation functions such as [compute_totals] and [compute_trend] are
//! pure: they take slices of already fetched records and return freshly built
//! results. Reading those records for one user is the job of a [LedgerReader],
//! and [SqliteLedger] is the SQLite backed implementation.

#![warn(missing_docs)]

mod budget;
mod category;
mod dashboard;
mod database_id;
mod db;
mod export;
mod format;
mod goal;
mod ledger;
mod logging;
mod timezone;
mod transaction;
mod user;

pub use budget::{
    Budget, BudgetComparison, BudgetMonth, BudgetStatus, BudgetThresholds, compare_budgets,
    get_budgets_for_month, set_budget,
};
pub use category::{
    Category, CategoryColor, CategoryLookup, CategoryName, NewCategory, ResolvedCategory,
    UNKNOWN_CATEGORY_COLOR, UNKNOWN_CATEGORY_LABEL, create_category, default_categories,
    get_categories_by_user, get_category,
};
pub use dashboard::{
    CategoryBreakdown, DashboardConfig, DashboardReport, GoalSummary, PeriodTotals, TrendSeries,
    build_dashboard, compute_category_breakdown, compute_totals, compute_trend,
    compute_zero_filled_trend, current_month, trailing_days,
};
pub use database_id::{BudgetId, CategoryId, DatabaseId, GoalId, TransactionId};
pub use db::initialize as initialize_db;
pub use export::export_transactions_csv;
pub use format::format_currency;
pub use goal::{
    Goal, GoalProgress, NewGoal, compute_goal_progress, create_goal, get_goals_by_user,
    update_goal_current_amount,
};
pub use ledger::{LedgerReader, SqliteLedger};
pub use logging::setup_logging;
pub use timezone::{get_local_offset, today_in};
pub use transaction::{
    Transaction, TransactionBuilder, TransactionType, create_transaction,
    get_transactions_in_date_range,
};
pub use user::{User, UserId, count_users, get_user_by_id, register_user};

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// A negative amount was given where only non-negative amounts are allowed.
    ///
    /// Transactions record the direction of money with [TransactionType], so
    /// amounts themselves are never negative. The same applies to budgets and
    /// the current amount saved towards a goal.
    #[error("{0} is a negative amount, which is not allowed")]
    NegativeAmount(f64),

    /// A goal was given a target amount that is zero, negative or not a finite number.
    #[error("a goal target must be greater than zero, got {0}")]
    InvalidGoalTarget(f64),

    /// A month number outside of 1-12.
    #[error("{0} is not a valid month, expected a number from 1 to 12")]
    InvalidMonth(u8),

    /// A year outside of the range of supported dates.
    #[error("{0} is not a supported year")]
    InvalidYear(i32),

    /// An empty string was used to create a category name.
    #[error("Category name cannot be empty")]
    EmptyCategoryName,

    /// An empty string was used to register a user.
    #[error("Username cannot be empty")]
    EmptyUsername,

    /// An empty string was used as the title of a transaction or goal.
    #[error("Title cannot be empty")]
    EmptyTitle,

    /// A category color that is not a `#RRGGBB` hex string.
    #[error("\"{0}\" is not a valid color, expected a hex string like #1A2B3C")]
    InvalidColor(String),

    /// The category ID used to create a transaction or budget did not match a
    /// valid category.
    #[error("the category ID does not refer to a valid category")]
    InvalidCategory(Option<CategoryId>),

    /// The username is already taken by another user.
    #[error("the username \"{0}\" already exists in the database")]
    DuplicateUsername(String),

    /// The requested resource was not found.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// Tried to update a goal that does not exist.
    #[error("tried to update a goal that is not in the database")]
    UpdateMissingGoal,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// The CSV writer failed while exporting transactions.
    #[error("could not write CSV: {0}")]
    CsvError(String),

    /// An error occurred while serializing a struct as JSON
    #[error("could not serialize as JSON: {0}")]
    JSONSerializationError(String),

    /// An error occurred while getting the local timezone from a canonical timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezoneError(String),
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl From<csv::Error> for Error {
    fn from(value: csv::Error) -> Self {
        Error::CsvError(value.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(value: serde_json::Error) -> Self {
        Error::JSONSerializationError(value.to_string())
    }
}
