//! Monthly spending budgets per category.
//!
//! A user has at most one budget per category for each month of each year. Setting a budget that
//! already exists replaces its amount, see [set_budget].

mod comparison;
mod db;

pub use comparison::{BudgetComparison, BudgetStatus, BudgetThresholds, compare_budgets};
pub use db::{create_budget_table, get_budgets_for_month, set_budget};

use std::fmt::Display;

use serde::{Deserialize, Serialize};
use time::{Date, Month};

use crate::{
    Error,
    database_id::{BudgetId, CategoryId},
    user::UserId,
};

/// The amount a user plans to spend in a category during one calendar month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    /// The ID of the budget.
    pub id: BudgetId,
    /// The category the budget applies to.
    pub category_id: CategoryId,
    /// The planned spending, never negative.
    pub amount: f64,
    /// The month number, 1-12.
    pub month: u8,
    /// The calendar year.
    pub year: i32,
    /// The user that owns the budget.
    pub user_id: UserId,
}

impl Budget {
    /// Whether this budget applies to `period`.
    pub fn is_for(&self, period: &BudgetMonth) -> bool {
        self.year == period.year() && self.month == period.month_number()
    }
}

/// A calendar month of a specific year, e.g. March 2024.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BudgetMonth {
    first_day: Date,
}

impl BudgetMonth {
    /// Create a budget month from a year and a month number from 1 to 12.
    ///
    /// # Errors
    ///
    /// Returns an [Error::InvalidMonth] if `month` is not in 1-12, or an [Error::InvalidYear]
    /// if `year` is outside the range of supported dates.
    pub fn new(year: i32, month: u8) -> Result<Self, Error> {
        let month_value = Month::try_from(month).map_err(|_| Error::InvalidMonth(month))?;
        let first_day =
            Date::from_calendar_date(year, month_value, 1).map_err(|_| Error::InvalidYear(year))?;

        Ok(Self { first_day })
    }

    /// The month that `date` falls in.
    pub fn containing(date: Date) -> Self {
        Self {
            first_day: date.replace_day(1).unwrap_or(date),
        }
    }

    /// The calendar year.
    pub fn year(&self) -> i32 {
        self.first_day.year()
    }

    /// The month.
    pub fn month(&self) -> Month {
        self.first_day.month()
    }

    /// The month number, 1-12.
    pub fn month_number(&self) -> u8 {
        self.first_day.month() as u8
    }

    /// The first day of the month.
    pub fn first_day(&self) -> Date {
        self.first_day
    }

    /// The last day of the month.
    pub fn last_day(&self) -> Date {
        let mut last_day = self.first_day;

        while let Some(next_day) = last_day.next_day() {
            if next_day.month() != self.first_day.month() {
                break;
            }

            last_day = next_day;
        }

        last_day
    }

    /// Whether `date` falls inside this month.
    pub fn contains(&self, date: Date) -> bool {
        date.year() == self.year() && date.month() == self.month()
    }
}

impl Display for BudgetMonth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year(), self.month_number())
    }
}

#[cfg(test)]
mod budget_month_tests {
    use time::{Month, macros::date};

    use crate::{Error, budget::BudgetMonth};

    #[test]
    fn new_rejects_month_zero() {
        assert_eq!(BudgetMonth::new(2024, 0), Err(Error::InvalidMonth(0)));
    }

    #[test]
    fn new_rejects_month_thirteen() {
        assert_eq!(BudgetMonth::new(2024, 13), Err(Error::InvalidMonth(13)));
    }

    #[test]
    fn new_accepts_valid_month() {
        let period = BudgetMonth::new(2024, 3).unwrap();

        assert_eq!(period.year(), 2024);
        assert_eq!(period.month(), Month::March);
        assert_eq!(period.month_number(), 3);
        assert_eq!(period.to_string(), "2024-03");
    }

    #[test]
    fn last_day_handles_leap_years() {
        assert_eq!(
            BudgetMonth::new(2024, 2).unwrap().last_day(),
            date!(2024 - 02 - 29)
        );
        assert_eq!(
            BudgetMonth::new(2023, 2).unwrap().last_day(),
            date!(2023 - 02 - 28)
        );
    }

    #[test]
    fn last_day_of_december() {
        assert_eq!(
            BudgetMonth::new(2024, 12).unwrap().last_day(),
            date!(2024 - 12 - 31)
        );
    }

    #[test]
    fn containing_finds_month_of_date() {
        let period = BudgetMonth::containing(date!(2024 - 07 - 19));

        assert_eq!(period, BudgetMonth::new(2024, 7).unwrap());
        assert!(period.contains(date!(2024 - 07 - 01)));
        assert!(period.contains(date!(2024 - 07 - 31)));
        assert!(!period.contains(date!(2024 - 08 - 01)));
        assert!(!period.contains(date!(2023 - 07 - 19)));
    }
}
