//! Assembles every dashboard metric for one user in one pass over their ledger.

use serde::{Deserialize, Serialize};
use time::Date;

use crate::{
    Error,
    budget::{BudgetComparison, BudgetMonth, BudgetThresholds, compare_budgets},
    category::CategoryLookup,
    dashboard::{
        CategoryBreakdown, PeriodTotals, TrendSeries, compute_category_breakdown, compute_totals,
        compute_trend, compute_zero_filled_trend, current_month, trailing_days,
    },
    goal::{Goal, GoalProgress, compute_goal_progress},
    ledger::LedgerReader,
};

/// Settings for [build_dashboard].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// How many days, ending today, the trend covers.
    pub trend_window_days: u32,
    /// Whether the trend should include days without transactions.
    pub zero_fill_trend: bool,
    /// The thresholds for budget statuses.
    pub budget_thresholds: BudgetThresholds,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            trend_window_days: 30,
            zero_fill_trend: false,
            budget_thresholds: BudgetThresholds::default(),
        }
    }
}

/// A goal together with its progress.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalSummary {
    /// The goal.
    pub goal: Goal,
    /// How far along the goal is.
    pub progress: GoalProgress,
}

/// Everything the dashboard shows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardReport {
    /// The day the report was built for.
    pub as_of: Date,
    /// Income and expenses for the current month up to today.
    pub totals: PeriodTotals,
    /// Expenses by category for the current month up to today.
    pub category_breakdown: CategoryBreakdown,
    /// Daily income and expenses over the trend window.
    pub trend: TrendSeries,
    /// Budgeted versus actual spending for the current month.
    pub budgets: Vec<BudgetComparison>,
    /// Progress towards each savings goal.
    pub goals: Vec<GoalSummary>,
}

/// Build the dashboard for the user of `ledger` as of `today`.
///
/// The ledger is read once, covering both the current calendar month and the trend window.
///
/// # Errors
/// Returns an error if the ledger could not be read or if a stored goal has an invalid target.
pub fn build_dashboard(
    ledger: &impl LedgerReader,
    today: Date,
    config: &DashboardConfig,
) -> Result<DashboardReport, Error> {
    let period = BudgetMonth::containing(today);
    let month_to_date = current_month(today);
    let trend_window = trailing_days(today, config.trend_window_days);

    let fetch_start = trend_window
        .as_ref()
        .map_or(period.first_day(), |window| {
            (*window.start()).min(period.first_day())
        });
    let fetch_end = period.last_day().max(today);

    let transactions = ledger.transactions(Some(fetch_start..=fetch_end))?;
    let categories = CategoryLookup::new(ledger.categories()?);
    let budgets = ledger.budgets(period)?;
    let goals = ledger.goals()?;

    tracing::debug!(
        "Building dashboard for user {} as of {today} from {} transactions",
        ledger.user_id(),
        transactions.len()
    );

    let month_to_date_transactions: Vec<_> = transactions
        .iter()
        .filter(|transaction| month_to_date.contains(&transaction.date))
        .cloned()
        .collect();

    let trend = if config.zero_fill_trend {
        compute_zero_filled_trend(&transactions, config.trend_window_days, today)
    } else {
        compute_trend(&transactions, config.trend_window_days, today)
    };

    let goals = goals
        .into_iter()
        .map(|goal| {
            compute_goal_progress(&goal, today).map(|progress| GoalSummary { goal, progress })
        })
        .collect::<Result<Vec<_>, Error>>()?;

    Ok(DashboardReport {
        as_of: today,
        totals: compute_totals(&month_to_date_transactions),
        category_breakdown: compute_category_breakdown(&month_to_date_transactions, &categories),
        trend,
        budgets: compare_budgets(
            &budgets,
            &transactions,
            period,
            &config.budget_thresholds,
        ),
        goals,
    })
}

#[cfg(test)]
mod tests {
    use std::ops::RangeInclusive;

    use rusqlite::Connection;
    use time::{Date, macros::date};

    use crate::{
        Error,
        budget::{Budget, BudgetMonth, BudgetStatus, set_budget},
        category::{Category, UNKNOWN_CATEGORY_LABEL},
        dashboard::{DashboardConfig, build_dashboard},
        db::initialize,
        goal::{Goal, NewGoal, create_goal},
        ledger::{LedgerReader, SqliteLedger},
        transaction::{Transaction, TransactionType, create_transaction},
        user::{UserId, register_user},
    };

    fn add(
        conn: &Connection,
        user_id: UserId,
        amount: f64,
        transaction_type: TransactionType,
        date: Date,
        category_id: Option<i64>,
    ) {
        create_transaction(
            Transaction::build("Test", amount, transaction_type, date).category_id(category_id),
            user_id,
            conn,
        )
        .unwrap();
    }

    #[test]
    fn builds_report_from_sqlite_ledger() {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();
        let user = register_user("alice", &conn).unwrap();
        let ledger = SqliteLedger::new(user.id, &conn);
        let categories = ledger.categories().unwrap();
        let food = categories
            .iter()
            .find(|c| c.name.as_ref() == "Food")
            .unwrap();
        let salary = categories
            .iter()
            .find(|c| c.name.as_ref() == "Salary")
            .unwrap();
        let today = date!(2024 - 03 - 10);

        add(
            &conn,
            user.id,
            3000.0,
            TransactionType::Income,
            date!(2024 - 03 - 01),
            Some(salary.id),
        );
        add(
            &conn,
            user.id,
            80.0,
            TransactionType::Expense,
            date!(2024 - 03 - 05),
            Some(food.id),
        );
        add(
            &conn,
            user.id,
            20.0,
            TransactionType::Expense,
            date!(2024 - 03 - 06),
            None,
        );
        // Last month, only part of the trend.
        add(
            &conn,
            user.id,
            40.0,
            TransactionType::Expense,
            date!(2024 - 02 - 20),
            Some(food.id),
        );
        // Outside the trend window.
        add(
            &conn,
            user.id,
            99.0,
            TransactionType::Expense,
            date!(2023 - 12 - 01),
            Some(food.id),
        );
        set_budget(
            user.id,
            food.id,
            BudgetMonth::new(2024, 3).unwrap(),
            90.0,
            &conn,
        )
        .unwrap();
        create_goal(
            NewGoal::new("Holiday", 1000.0)
                .current_amount(250.0)
                .target_date(Some(date!(2024 - 03 - 20))),
            user.id,
            &conn,
        )
        .unwrap();

        let report = build_dashboard(&ledger, today, &DashboardConfig::default()).unwrap();

        assert_eq!(report.as_of, today);
        assert_eq!(report.totals.income, 3000.0);
        assert_eq!(report.totals.expenses, 100.0);
        assert_eq!(report.totals.balance, 2900.0);
        assert_eq!(
            report.category_breakdown.labels,
            vec!["Food", UNKNOWN_CATEGORY_LABEL]
        );
        assert_eq!(report.category_breakdown.values, vec![80.0, 20.0]);
        assert_eq!(
            report.trend.dates,
            vec!["2024-02-20", "2024-03-01", "2024-03-05", "2024-03-06"]
        );
        assert_eq!(report.budgets.len(), 1);
        assert_eq!(report.budgets[0].actual, 80.0);
        assert_eq!(report.budgets[0].status, BudgetStatus::Near);
        assert_eq!(report.goals.len(), 1);
        assert_eq!(report.goals[0].progress.percent_complete, 25.0);
        assert_eq!(report.goals[0].progress.days_remaining, Some(10));
    }

    #[test]
    fn empty_ledger_gives_empty_report() {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();
        let user = register_user("alice", &conn).unwrap();
        let ledger = SqliteLedger::new(user.id, &conn);

        let report =
            build_dashboard(&ledger, date!(2024 - 03 - 10), &DashboardConfig::default()).unwrap();

        assert_eq!(report.totals.balance, 0.0);
        assert!(report.category_breakdown.is_empty());
        assert!(report.trend.dates.is_empty());
        assert!(report.budgets.is_empty());
        assert!(report.goals.is_empty());
    }

    #[test]
    fn zero_fill_config_fills_trend() {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();
        let user = register_user("alice", &conn).unwrap();
        let ledger = SqliteLedger::new(user.id, &conn);
        let config = DashboardConfig {
            trend_window_days: 7,
            zero_fill_trend: true,
            ..Default::default()
        };

        let report = build_dashboard(&ledger, date!(2024 - 03 - 10), &config).unwrap();

        assert_eq!(report.trend.dates.len(), 7);
        assert_eq!(report.trend.dates[0], "2024-03-04");
        assert!(report.trend.income.iter().all(|&value| value == 0.0));
    }

    struct BrokenGoalLedger;

    impl LedgerReader for BrokenGoalLedger {
        fn user_id(&self) -> UserId {
            UserId::new(1)
        }

        fn transactions(
            &self,
            _date_range: Option<RangeInclusive<Date>>,
        ) -> Result<Vec<Transaction>, Error> {
            Ok(Vec::new())
        }

        fn categories(&self) -> Result<Vec<Category>, Error> {
            Ok(Vec::new())
        }

        fn budgets(&self, _period: BudgetMonth) -> Result<Vec<Budget>, Error> {
            Ok(Vec::new())
        }

        fn goals(&self) -> Result<Vec<Goal>, Error> {
            Ok(vec![Goal {
                id: 1,
                title: "Broken".to_owned(),
                target_amount: 0.0,
                current_amount: 0.0,
                target_date: None,
                user_id: UserId::new(1),
            }])
        }
    }

    #[test]
    fn invalid_goal_target_is_an_error() {
        let result = build_dashboard(
            &BrokenGoalLedger,
            date!(2024 - 03 - 10),
            &DashboardConfig::default(),
        );

        assert_eq!(result, Err(Error::InvalidGoalTarget(0.0)));
    }

    #[test]
    fn report_serializes_as_json() {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();
        let user = register_user("alice", &conn).unwrap();
        let ledger = SqliteLedger::new(user.id, &conn);

        let report =
            build_dashboard(&ledger, date!(2024 - 03 - 10), &DashboardConfig::default()).unwrap();
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["as_of"], "2024-03-10");
        assert_eq!(json["totals"]["balance"], 0.0);
        assert!(json["category_breakdown"]["labels"].is_array());
        assert!(json["trend"]["dates"].is_array());
        assert!(json["budgets"].is_array());
        assert!(json["goals"].is_array());
    }
}
