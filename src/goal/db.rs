//! Database operations for savings goals.

use rusqlite::{Connection, Row};

use crate::{
    Error,
    database_id::GoalId,
    goal::{Goal, NewGoal},
    user::UserId,
};

/// Create a new goal for `user_id`.
///
/// # Errors
/// This function will return a:
/// - [Error::EmptyTitle] if the title is empty or just whitespace,
/// - [Error::InvalidGoalTarget] if the target amount is not greater than zero,
/// - [Error::NegativeAmount] if the current amount is negative,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn create_goal(goal: NewGoal, user_id: UserId, connection: &Connection) -> Result<Goal, Error> {
    let title = goal.title.trim();

    if title.is_empty() {
        return Err(Error::EmptyTitle);
    }

    if !goal.target_amount.is_finite() || goal.target_amount <= 0.0 {
        return Err(Error::InvalidGoalTarget(goal.target_amount));
    }

    validate_current_amount(goal.current_amount)?;

    let goal = connection
        .prepare(
            "INSERT INTO goal (title, target_amount, current_amount, target_date, user_id)
             VALUES (?1, ?2, ?3, ?4, ?5)
             RETURNING id, title, target_amount, current_amount, target_date, user_id",
        )?
        .query_row(
            (
                title,
                goal.target_amount,
                goal.current_amount,
                goal.target_date,
                user_id.as_i64(),
            ),
            map_row,
        )?;

    tracing::info!("Created goal {} for user {user_id}", goal.id);

    Ok(goal)
}

/// Get all of the goals of `user_id`, in the order they were created.
///
/// # Errors
/// This function will return a [Error::SqlError] if there is some SQL error.
pub fn get_goals_by_user(user_id: UserId, connection: &Connection) -> Result<Vec<Goal>, Error> {
    connection
        .prepare(
            "SELECT id, title, target_amount, current_amount, target_date, user_id FROM goal
             WHERE user_id = ?1
             ORDER BY id ASC",
        )?
        .query_map((user_id.as_i64(),), map_row)?
        .map(|maybe_goal| maybe_goal.map_err(|error| error.into()))
        .collect()
}

/// Record that `current_amount` has now been saved towards the goal `goal_id`.
///
/// # Errors
/// This function will return a:
/// - [Error::NegativeAmount] if `current_amount` is negative,
/// - [Error::UpdateMissingGoal] if the goal does not exist or belongs to another user,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn update_goal_current_amount(
    goal_id: GoalId,
    user_id: UserId,
    current_amount: f64,
    connection: &Connection,
) -> Result<Goal, Error> {
    validate_current_amount(current_amount)?;

    let goal = connection
        .prepare(
            "UPDATE goal SET current_amount = ?1
             WHERE id = ?2 AND user_id = ?3
             RETURNING id, title, target_amount, current_amount, target_date, user_id",
        )?
        .query_row((current_amount, goal_id, user_id.as_i64()), map_row)
        .map_err(|error| match error {
            rusqlite::Error::QueryReturnedNoRows => Error::UpdateMissingGoal,
            error => error.into(),
        })?;

    tracing::debug!("Updated goal {goal_id} to {current_amount} for user {user_id}");

    Ok(goal)
}

/// Create the goal table in the database.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_goal_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS goal (
                id INTEGER PRIMARY KEY,
                title TEXT NOT NULL,
                target_amount REAL NOT NULL CHECK (target_amount > 0),
                current_amount REAL NOT NULL DEFAULT 0 CHECK (current_amount >= 0),
                target_date TEXT,
                user_id INTEGER NOT NULL,
                FOREIGN KEY(user_id) REFERENCES user(id) ON UPDATE CASCADE ON DELETE CASCADE
                )",
        (),
    )?;

    Ok(())
}

fn validate_current_amount(amount: f64) -> Result<(), Error> {
    if !amount.is_finite() || amount < 0.0 {
        Err(Error::NegativeAmount(amount))
    } else {
        Ok(())
    }
}

fn map_row(row: &Row) -> Result<Goal, rusqlite::Error> {
    Ok(Goal {
        id: row.get(0)?,
        title: row.get(1)?,
        target_amount: row.get(2)?,
        current_amount: row.get(3)?,
        target_date: row.get(4)?,
        user_id: UserId::new(row.get(5)?),
    })
}

#[cfg(test)]
mod goal_query_tests {
    use rusqlite::Connection;
    use time::macros::date;

    use crate::{
        Error,
        db::initialize,
        goal::{NewGoal, create_goal, get_goals_by_user, update_goal_current_amount},
        user::{User, create_user},
    };

    fn get_test_connection() -> (Connection, User) {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();
        let user = create_user("test", &conn).unwrap();
        (conn, user)
    }

    #[test]
    fn create_goal_succeeds() {
        let (conn, user) = get_test_connection();

        let goal = create_goal(
            NewGoal::new("  Holiday ", 2000.0)
                .current_amount(250.0)
                .target_date(Some(date!(2025 - 12 - 01))),
            user.id,
            &conn,
        )
        .unwrap();

        assert!(goal.id > 0);
        assert_eq!(goal.title, "Holiday");
        assert_eq!(goal.target_amount, 2000.0);
        assert_eq!(goal.current_amount, 250.0);
        assert_eq!(goal.target_date, Some(date!(2025 - 12 - 01)));
        assert_eq!(goal.user_id, user.id);
    }

    #[test]
    fn create_goal_rejects_zero_target() {
        let (conn, user) = get_test_connection();

        let result = create_goal(NewGoal::new("Holiday", 0.0), user.id, &conn);

        assert_eq!(result, Err(Error::InvalidGoalTarget(0.0)));
    }

    #[test]
    fn create_goal_rejects_negative_current_amount() {
        let (conn, user) = get_test_connection();

        let result = create_goal(
            NewGoal::new("Holiday", 100.0).current_amount(-5.0),
            user.id,
            &conn,
        );

        assert_eq!(result, Err(Error::NegativeAmount(-5.0)));
    }

    #[test]
    fn create_goal_rejects_empty_title() {
        let (conn, user) = get_test_connection();

        let result = create_goal(NewGoal::new("   ", 100.0), user.id, &conn);

        assert_eq!(result, Err(Error::EmptyTitle));
    }

    #[test]
    fn get_goals_only_returns_users_goals() {
        let (conn, user) = get_test_connection();
        let other_user = create_user("other", &conn).unwrap();
        let want = vec![
            create_goal(NewGoal::new("Car", 5000.0), user.id, &conn).unwrap(),
            create_goal(NewGoal::new("Laptop", 1500.0), user.id, &conn).unwrap(),
        ];
        create_goal(NewGoal::new("Bike", 800.0), other_user.id, &conn).unwrap();

        let got = get_goals_by_user(user.id, &conn).unwrap();

        assert_eq!(got, want);
    }

    #[test]
    fn update_current_amount_succeeds() {
        let (conn, user) = get_test_connection();
        let goal = create_goal(NewGoal::new("Car", 5000.0), user.id, &conn).unwrap();

        let updated = update_goal_current_amount(goal.id, user.id, 1200.0, &conn).unwrap();

        assert_eq!(updated.current_amount, 1200.0);
        assert_eq!(get_goals_by_user(user.id, &conn).unwrap(), vec![updated]);
    }

    #[test]
    fn update_missing_goal_fails() {
        let (conn, user) = get_test_connection();

        let result = update_goal_current_amount(42, user.id, 10.0, &conn);

        assert_eq!(result, Err(Error::UpdateMissingGoal));
    }

    #[test]
    fn update_goal_of_other_user_fails() {
        let (conn, user) = get_test_connection();
        let other_user = create_user("other", &conn).unwrap();
        let goal = create_goal(NewGoal::new("Car", 5000.0), user.id, &conn).unwrap();

        let result = update_goal_current_amount(goal.id, other_user.id, 10.0, &conn);

        assert_eq!(result, Err(Error::UpdateMissingGoal));
    }
}
