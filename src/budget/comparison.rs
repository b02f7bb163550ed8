//! Compares what was spent in each category with what was budgeted for it.

use std::{collections::HashMap, fmt::Display};

use serde::{Deserialize, Serialize};

use crate::{
    budget::{Budget, BudgetMonth},
    database_id::CategoryId,
    transaction::Transaction,
};

/// How spending in a category compares with its budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetStatus {
    /// Spending is below the "near" threshold.
    Under,
    /// Spending has reached the "near" threshold but not gone past the budget.
    Near,
    /// Spending is more than the budget.
    Over,
}

impl Display for BudgetStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            BudgetStatus::Under => "under",
            BudgetStatus::Near => "near",
            BudgetStatus::Over => "over",
        })
    }
}

/// The thresholds used to pick a [BudgetStatus].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BudgetThresholds {
    /// The fraction of the budget at which spending counts as [BudgetStatus::Near].
    pub near_fraction: f64,
}

impl Default for BudgetThresholds {
    fn default() -> Self {
        Self { near_fraction: 0.8 }
    }
}

impl BudgetThresholds {
    /// Classify `actual` spending against `budgeted`.
    ///
    /// - [BudgetStatus::Over] when `actual > budgeted`,
    /// - [BudgetStatus::Near] when `actual >= near_fraction * budgeted`,
    /// - [BudgetStatus::Under] otherwise.
    ///
    /// A zero budget with zero spending is [BudgetStatus::Near]: the budget is used up exactly.
    pub fn classify(&self, budgeted: f64, actual: f64) -> BudgetStatus {
        if actual > budgeted {
            BudgetStatus::Over
        } else if actual >= self.near_fraction * budgeted {
            BudgetStatus::Near
        } else {
            BudgetStatus::Under
        }
    }
}

/// Budgeted versus actual spending for one category in one month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetComparison {
    /// The budgeted category.
    pub category_id: CategoryId,
    /// The amount budgeted for the month.
    pub budgeted: f64,
    /// The total of the category's expenses in the month.
    pub actual: f64,
    /// `budgeted - actual`, negative when over budget.
    pub remaining: f64,
    /// How `actual` compares with `budgeted`.
    pub status: BudgetStatus,
}

/// Compare each budget set for `period` with the expenses recorded against its category during
/// that month.
///
/// Budgets for other months are ignored and categories without a budget are left out, the output
/// only covers what the user explicitly budgeted for. Results are ordered by category ID.
pub fn compare_budgets(
    budgets: &[Budget],
    transactions: &[Transaction],
    period: BudgetMonth,
    thresholds: &BudgetThresholds,
) -> Vec<BudgetComparison> {
    let mut spent_by_category: HashMap<CategoryId, f64> = HashMap::new();

    for transaction in transactions
        .iter()
        .filter(|transaction| transaction.is_expense() && period.contains(transaction.date))
    {
        if let Some(category_id) = transaction.category_id {
            *spent_by_category.entry(category_id).or_insert(0.0) += transaction.amount;
        }
    }

    let mut comparisons: Vec<BudgetComparison> = budgets
        .iter()
        .filter(|budget| budget.is_for(&period))
        .map(|budget| {
            let actual = spent_by_category
                .get(&budget.category_id)
                .copied()
                .unwrap_or(0.0);

            BudgetComparison {
                category_id: budget.category_id,
                budgeted: budget.amount,
                actual,
                remaining: budget.amount - actual,
                status: thresholds.classify(budget.amount, actual),
            }
        })
        .collect();

    comparisons.sort_by_key(|comparison| comparison.category_id);

    comparisons
}
