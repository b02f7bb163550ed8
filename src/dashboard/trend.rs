//! Daily income and expense totals for line charts.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use time::Date;

use crate::{dashboard::trailing_days, transaction::Transaction};

/// Income and expenses per day as three index-aligned arrays.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TrendSeries {
    /// Days in ascending order, formatted as `YYYY-MM-DD`.
    pub dates: Vec<String>,
    /// The income for each day.
    pub income: Vec<f64>,
    /// The expenses for each day.
    pub expenses: Vec<f64>,
}

impl TrendSeries {
    fn push(&mut self, date: Date, (income, expenses): (f64, f64)) {
        self.dates.push(date.to_string());
        self.income.push(income);
        self.expenses.push(expenses);
    }
}

/// Total income and expenses for each day of the last `window_days` days ending on `today`.
///
/// Only days that have at least one transaction are included.
pub fn compute_trend(transactions: &[Transaction], window_days: u32, today: Date) -> TrendSeries {
    let mut series = TrendSeries::default();

    for (date, totals) in bucket_by_day(transactions, window_days, today) {
        series.push(date, totals);
    }

    series
}

/// Like [compute_trend], except every day of the window is included and days without
/// transactions have zero income and expenses.
pub fn compute_zero_filled_trend(
    transactions: &[Transaction],
    window_days: u32,
    today: Date,
) -> TrendSeries {
    let Some(window) = trailing_days(today, window_days) else {
        return TrendSeries::default();
    };

    let totals_by_day = bucket_by_day(transactions, window_days, today);
    let mut series = TrendSeries::default();
    let mut day = Some(*window.start());

    while let Some(date) = day.filter(|date| window.contains(date)) {
        let totals = totals_by_day.get(&date).copied().unwrap_or((0.0, 0.0));
        series.push(date, totals);
        day = date.next_day();
    }

    series
}

/// Sum income and expenses by day for the transactions inside the trailing window.
fn bucket_by_day(
    transactions: &[Transaction],
    window_days: u32,
    today: Date,
) -> BTreeMap<Date, (f64, f64)> {
    let mut totals_by_day = BTreeMap::new();

    let Some(window) = trailing_days(today, window_days) else {
        return totals_by_day;
    };

    for transaction in transactions.iter().filter(|t| window.contains(&t.date)) {
        let (income, expenses) = totals_by_day.entry(transaction.date).or_insert((0.0, 0.0));

        if transaction.is_income() {
            *income += transaction.amount;
        } else {
            *expenses += transaction.amount;
        }
    }

    totals_by_day
}
