//! Sums income and expenses over a set of transactions.

use serde::{Deserialize, Serialize};

use crate::transaction::Transaction;

/// The income, expenses and balance of a period.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PeriodTotals {
    /// The sum of all income.
    pub income: f64,
    /// The sum of all expenses.
    pub expenses: f64,
    /// `income - expenses`.
    pub balance: f64,
}

/// Sum the income and expenses of `transactions`.
///
/// The caller picks the period by choosing which transactions to pass in.
pub fn compute_totals(transactions: &[Transaction]) -> PeriodTotals {
    let (income, expenses) =
        transactions
            .iter()
            .fold((0.0, 0.0), |(income, expenses), transaction| {
                if transaction.is_income() {
                    (income + transaction.amount, expenses)
                } else {
                    (income, expenses + transaction.amount)
                }
            });

    PeriodTotals {
        income,
        expenses,
        balance: income - expenses,
    }
}
