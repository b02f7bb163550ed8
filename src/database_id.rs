//! Database ID type definitions.

/// Alias for the integer type used for mapping to database IDs.
pub type DatabaseId = i64;
/// The ID of a row in the transaction table.
pub type TransactionId = DatabaseId;
/// The ID of a row in the category table.
pub type CategoryId = DatabaseId;
/// The ID of a row in the budget table.
pub type BudgetId = DatabaseId;
/// The ID of a row in the goal table.
pub type GoalId = DatabaseId;
