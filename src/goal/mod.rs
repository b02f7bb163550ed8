//! Savings goals and how far along the user is in reaching them.

mod db;
mod progress;

pub use db::{create_goal, create_goal_table, get_goals_by_user, update_goal_current_amount};
pub use progress::{GoalProgress, compute_goal_progress};

use serde::{Deserialize, Serialize};
use time::Date;

use crate::{database_id::GoalId, user::UserId};

/// An amount of money the user wants to save, optionally by a certain date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    /// The ID of the goal.
    pub id: GoalId,
    /// What the user is saving for.
    pub title: String,
    /// How much the user wants to save, always greater than zero.
    pub target_amount: f64,
    /// How much has been saved so far, never negative.
    pub current_amount: f64,
    /// When the user wants to reach the target by.
    pub target_date: Option<Date>,
    /// The user that owns the goal.
    pub user_id: UserId,
}

impl Goal {
    /// Whether the amount saved has reached the target.
    pub fn is_complete(&self) -> bool {
        self.current_amount >= self.target_amount
    }
}

/// The data needed to create a [Goal].
#[derive(Debug, Clone, PartialEq)]
pub struct NewGoal {
    /// What the user is saving for.
    pub title: String,
    /// How much the user wants to save.
    pub target_amount: f64,
    /// How much has been saved already.
    pub current_amount: f64,
    /// When the user wants to reach the target by.
    pub target_date: Option<Date>,
}

impl NewGoal {
    /// Start a new goal with nothing saved yet and no target date.
    pub fn new(title: &str, target_amount: f64) -> Self {
        Self {
            title: title.to_owned(),
            target_amount,
            current_amount: 0.0,
            target_date: None,
        }
    }

    /// Set the amount already saved.
    pub fn current_amount(mut self, current_amount: f64) -> Self {
        self.current_amount = current_amount;
        self
    }

    /// Set the date the goal should be reached by.
    pub fn target_date(mut self, target_date: Option<Date>) -> Self {
        self.target_date = target_date;
        self
    }
}
