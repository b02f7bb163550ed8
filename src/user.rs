//! Code for creating the user table, registering users and fetching users from the database.

use std::fmt::Display;

use rusqlite::{Connection, Transaction as SqlTransaction, TransactionBehavior};
use serde::{Deserialize, Serialize};

use crate::{
    Error,
    category::{create_category, default_categories},
};

/// A newtype wrapper for integer user IDs.
///
/// This helps disambiguate user IDs from other types of IDs, leading to better compile time
/// errors. Every ledger query takes one of these explicitly, there is no ambient "current user".
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub struct UserId(i64);

impl UserId {
    /// Create a new user ID.
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Cast the user ID to a 64 bit integer.
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// A user of the application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// The user's ID in the application database.
    pub id: UserId,
    /// The name the user registered with.
    pub username: String,
}

/// Create the user table.
///
/// # Errors
///
/// This function will return an error if the SQL query failed.
pub fn create_user_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS user (
                id INTEGER PRIMARY KEY,
                username TEXT NOT NULL UNIQUE
                )",
        (),
    )?;

    Ok(())
}

/// Insert a new user into the database without any categories.
///
/// Most callers want [register_user], which also seeds the default categories.
///
/// # Errors
///
/// Returns a:
/// - [Error::DuplicateUsername] if `username` is already taken,
/// - [Error::SqlError] if some other SQL related error occurred.
pub fn create_user(username: &str, connection: &Connection) -> Result<User, Error> {
    connection
        .execute("INSERT INTO user (username) VALUES (?1)", (username,))
        .map_err(|error| match error {
            rusqlite::Error::SqliteFailure(
                rusqlite::ffi::Error {
                    code: _,
                    extended_code: rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE,
                },
                _,
            ) => Error::DuplicateUsername(username.to_owned()),
            error => error.into(),
        })?;

    let id = UserId::new(connection.last_insert_rowid());

    Ok(User {
        id,
        username: username.to_owned(),
    })
}

/// Register a new user and give them the starter set of categories from
/// [default_categories].
///
/// The user and their categories are created in a single exclusive SQL
/// transaction, so a failed registration leaves no partial data behind.
///
/// # Errors
///
/// Returns a:
/// - [Error::EmptyUsername] if `username` is empty or just whitespace,
/// - [Error::DuplicateUsername] if `username` is already taken,
/// - [Error::SqlError] if some other SQL related error occurred.
pub fn register_user(username: &str, connection: &Connection) -> Result<User, Error> {
    let username = username.trim();

    if username.is_empty() {
        return Err(Error::EmptyUsername);
    }

    let transaction = SqlTransaction::new_unchecked(connection, TransactionBehavior::Exclusive)?;

    let user = create_user(username, &transaction)?;

    for category in default_categories() {
        create_category(category, user.id, &transaction)?;
    }

    transaction.commit()?;

    tracing::info!("Registered user {} with the default categories", user.id);

    Ok(user)
}

/// Get the user from the database with an ID equal to `user_id`.
///
/// # Errors
///
/// This function will return an error if:
/// - `user_id` does not belong to a registered user.
/// - there was an error trying to access the store.
pub fn get_user_by_id(user_id: UserId, connection: &Connection) -> Result<User, Error> {
    connection
        .prepare("SELECT id, username FROM user WHERE id = :id")?
        .query_row(&[(":id", &user_id.as_i64())], |row| {
            Ok(User {
                id: UserId::new(row.get(0)?),
                username: row.get(1)?,
            })
        })
        .map_err(|error| error.into())
}

/// Get the number of users in the database.
///
/// # Errors
///
/// Returns a [Error::SqlError] if an SQL related error occurred.
pub fn count_users(connection: &Connection) -> Result<usize, Error> {
    connection
        .query_row("SELECT COUNT(id) FROM user;", [], |row| row.get(0))
        .map_err(|error| error.into())
}

#[cfg(test)]
mod user_tests {
    use rusqlite::Connection;

    use crate::{
        category::{default_categories, get_categories_by_user},
        db::initialize,
        user::{UserId, count_users, create_user, get_user_by_id, register_user},
    };

    use super::Error;

    fn get_db_connection() -> Connection {
        let conn =
            Connection::open_in_memory().expect("Could not create in-memory SQLite database");
        initialize(&conn).expect("Could not initialize database");

        conn
    }

    #[test]
    fn insert_user_succeeds() {
        let db_connection = get_db_connection();

        let inserted_user = create_user("alice", &db_connection).unwrap();

        assert!(inserted_user.id.as_i64() > 0);
        assert_eq!(inserted_user.username, "alice");
    }

    #[test]
    fn insert_user_fails_on_duplicate_username() {
        let db_connection = get_db_connection();
        create_user("alice", &db_connection).unwrap();

        let result = create_user("alice", &db_connection);

        assert_eq!(result, Err(Error::DuplicateUsername("alice".to_owned())));
    }

    #[test]
    fn get_user_fails_with_non_existent_id() {
        let db_connection = get_db_connection();

        let id = UserId::new(42);

        assert_eq!(get_user_by_id(id, &db_connection), Err(Error::NotFound));
    }

    #[test]
    fn get_user_succeeds_with_existing_id() {
        let db_connection = get_db_connection();
        let test_user = create_user("alice", &db_connection).unwrap();

        let retrieved_user = get_user_by_id(test_user.id, &db_connection).unwrap();

        assert_eq!(retrieved_user, test_user);
    }

    #[test]
    fn returns_correct_count() {
        let db_connection = get_db_connection();

        let count = count_users(&db_connection).expect("Could not get user count");
        assert_eq!(0, count, "Want zero users before insertion, got {count}");

        create_user("alice", &db_connection).unwrap();

        let count = count_users(&db_connection).expect("Could not get user count");
        assert_eq!(1, count, "Want one user after inserting a user, got {count}");
    }

    #[test]
    fn register_user_seeds_default_categories() {
        let db_connection = get_db_connection();

        let user = register_user("  bob ", &db_connection).expect("Could not register user");

        assert_eq!(user.username, "bob");
        let categories = get_categories_by_user(user.id, &db_connection).unwrap();
        let mut got_names: Vec<_> = categories
            .iter()
            .map(|category| category.name.as_ref().to_owned())
            .collect();
        let mut want_names: Vec<_> = default_categories()
            .into_iter()
            .map(|category| category.name.as_ref().to_owned())
            .collect();
        got_names.sort();
        want_names.sort();
        assert_eq!(got_names, want_names);
    }

    #[test]
    fn register_user_rejects_blank_username() {
        let db_connection = get_db_connection();

        let result = register_user(" \t", &db_connection);

        assert_eq!(result, Err(Error::EmptyUsername));
        assert_eq!(count_users(&db_connection).unwrap(), 0);
    }

    #[test]
    fn failed_registration_leaves_no_categories_behind() {
        let db_connection = get_db_connection();
        let first = register_user("carol", &db_connection).unwrap();
        let category_count_before: usize = db_connection
            .query_row("SELECT COUNT(id) FROM category", [], |row| row.get(0))
            .unwrap();

        let result = register_user("carol", &db_connection);

        assert_eq!(result, Err(Error::DuplicateUsername("carol".to_owned())));
        let category_count_after: usize = db_connection
            .query_row("SELECT COUNT(id) FROM category", [], |row| row.get(0))
            .unwrap();
        assert_eq!(category_count_before, category_count_after);
        assert_eq!(get_user_by_id(first.id, &db_connection).unwrap(), first);
    }
}
