//! Dashboard module
//!
//! Turns a user's transactions, categories, budgets and goals into the numbers shown on the
//! dashboard. Everything here except [build_dashboard] is a pure function over slices of records
//! that have already been fetched.

mod breakdown;
mod summary;
mod totals;
mod trend;
mod window;

pub use breakdown::{CategoryBreakdown, compute_category_breakdown};
pub use summary::{DashboardConfig, DashboardReport, GoalSummary, build_dashboard};
pub use totals::{PeriodTotals, compute_totals};
pub use trend::{TrendSeries, compute_trend, compute_zero_filled_trend};
pub use window::{current_month, trailing_days};
