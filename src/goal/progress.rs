//! Works out how close a savings goal is to being reached.

use serde::{Deserialize, Serialize};
use time::Date;

use crate::{Error, goal::Goal};

/// How far along a [Goal] is as of a given day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalProgress {
    /// The amount saved as a percentage of the target.
    ///
    /// Never negative, but may go past 100 once the goal has been exceeded.
    pub percent_complete: f64,
    /// How much is left to save, zero once the goal is reached.
    pub amount_remaining: f64,
    /// Days from the `as_of` date to the target date, negative once the target date has passed.
    ///
    /// `None` when the goal has no target date.
    pub days_remaining: Option<i64>,
    /// Whether the goal is on track to be reached by its target date.
    ///
    /// `None` when this cannot be known without a savings rate, see
    /// [GoalProgress::with_daily_savings_rate].
    pub on_track: Option<bool>,
    /// The amount that needs to be saved each day to reach the target by the target date.
    ///
    /// Only set while there are days left before the target date.
    pub required_daily_savings: Option<f64>,
}

impl GoalProgress {
    /// Decide whether the goal is on track given the amount the user can save per day.
    ///
    /// Has no effect when [GoalProgress::on_track] is already known or when there is no
    /// required daily savings to compare against.
    pub fn with_daily_savings_rate(mut self, daily_savings_rate: f64) -> Self {
        if self.on_track.is_none()
            && let Some(required) = self.required_daily_savings
        {
            self.on_track = Some(daily_savings_rate >= required);
        }

        self
    }
}

/// Compute the progress of `goal` as of the date `as_of`.
///
/// A goal that has been reached is always on track. A goal that has not been reached by its
/// target date is not. Otherwise whether the goal is on track is left unknown.
///
/// # Errors
/// Returns an [Error::InvalidGoalTarget] if the goal's target amount is not greater than zero.
pub fn compute_goal_progress(goal: &Goal, as_of: Date) -> Result<GoalProgress, Error> {
    let target = goal.target_amount;

    if !target.is_finite() || target <= 0.0 {
        return Err(Error::InvalidGoalTarget(target));
    }

    let percent_complete = (goal.current_amount / target * 100.0).max(0.0);
    let amount_remaining = (target - goal.current_amount).max(0.0);
    let days_remaining = goal
        .target_date
        .map(|target_date| (target_date - as_of).whole_days());

    let on_track = if goal.is_complete() {
        Some(true)
    } else {
        match days_remaining {
            Some(days) if days <= 0 => Some(false),
            _ => None,
        }
    };

    let required_daily_savings = match days_remaining {
        Some(days) if days > 0 => Some(amount_remaining / days as f64),
        _ => None,
    };

    Ok(GoalProgress {
        percent_complete,
        amount_remaining,
        days_remaining,
        on_track,
        required_daily_savings,
    })
}
