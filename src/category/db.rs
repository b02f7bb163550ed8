//! Database operations for categories.

use rusqlite::{Connection, Row};

use crate::{
    Error,
    category::{Category, CategoryColor, CategoryName, NewCategory},
    database_id::CategoryId,
    user::UserId,
};

/// Create a category for `user_id` and return it with its generated ID.
///
/// # Errors
/// Returns an [Error::SqlError] if `user_id` does not refer to a valid user or there is some
/// other SQL error.
pub fn create_category(
    category: NewCategory,
    user_id: UserId,
    connection: &Connection,
) -> Result<Category, Error> {
    connection.execute(
        "INSERT INTO category (name, color, icon, user_id) VALUES (?1, ?2, ?3, ?4);",
        (
            category.name.as_ref(),
            category.color.as_ref(),
            &category.icon,
            user_id.as_i64(),
        ),
    )?;

    let id = connection.last_insert_rowid();

    Ok(Category {
        id,
        name: category.name,
        color: category.color,
        icon: category.icon,
        user_id,
    })
}

/// Retrieve a single category by ID, as long as it belongs to `user_id`.
///
/// # Errors
/// Returns an [Error::NotFound] if there is no such category for the user.
pub fn get_category(
    category_id: CategoryId,
    user_id: UserId,
    connection: &Connection,
) -> Result<Category, Error> {
    connection
        .prepare(
            "SELECT id, name, color, icon, user_id FROM category
             WHERE id = :id AND user_id = :user_id;",
        )?
        .query_row(
            &[(":id", &category_id), (":user_id", &user_id.as_i64())],
            map_row,
        )
        .map_err(|error| error.into())
}

/// Retrieve all categories for `user_id` ordered alphabetically by name.
pub fn get_categories_by_user(
    user_id: UserId,
    connection: &Connection,
) -> Result<Vec<Category>, Error> {
    connection
        .prepare(
            "SELECT id, name, color, icon, user_id FROM category
             WHERE user_id = :user_id ORDER BY name ASC;",
        )?
        .query_map(&[(":user_id", &user_id.as_i64())], map_row)?
        .map(|maybe_category| maybe_category.map_err(|error| error.into()))
        .collect()
}

/// Initialize the category table and indexes.
pub fn create_category_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS category (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            color TEXT NOT NULL,
            icon TEXT NOT NULL,
            user_id INTEGER NOT NULL,
            UNIQUE(user_id, name),
            FOREIGN KEY(user_id) REFERENCES user(id) ON UPDATE CASCADE ON DELETE CASCADE
        );

        CREATE INDEX IF NOT EXISTS idx_category_user ON category(user_id);",
    )?;

    Ok(())
}

fn map_row(row: &Row) -> Result<Category, rusqlite::Error> {
    let id = row.get(0)?;
    let raw_name: String = row.get(1)?;
    let raw_color: String = row.get(2)?;
    let icon = row.get(3)?;
    let user_id = UserId::new(row.get(4)?);

    Ok(Category {
        id,
        name: CategoryName::new_unchecked(&raw_name),
        color: CategoryColor::new_unchecked(&raw_color),
        icon,
        user_id,
    })
}

#[cfg(test)]
mod category_query_tests {
    use std::collections::HashSet;

    use rusqlite::Connection;

    use crate::{
        Error,
        category::{
            CategoryColor, CategoryName, NewCategory, create_category, get_categories_by_user,
            get_category,
        },
        db::initialize,
        user::{User, create_user},
    };

    fn get_test_db_connection() -> (Connection, User) {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).expect("Could not initialize database");
        let user = create_user("test", &connection).expect("Could not create test user");
        (connection, user)
    }

    fn new_category(name: &str) -> NewCategory {
        NewCategory::new(
            CategoryName::new_unchecked(name),
            CategoryColor::new_unchecked("#123456"),
            "🧪",
        )
    }

    #[test]
    fn create_category_succeeds() {
        let (connection, user) = get_test_db_connection();

        let category = create_category(new_category("Groceries"), user.id, &connection)
            .expect("Could not create category");

        assert!(category.id > 0);
        assert_eq!(category.name, CategoryName::new_unchecked("Groceries"));
        assert_eq!(category.user_id, user.id);
    }

    #[test]
    fn get_category_succeeds() {
        let (connection, user) = get_test_db_connection();
        let inserted = create_category(new_category("Foo"), user.id, &connection).unwrap();

        let selected = get_category(inserted.id, user.id, &connection);

        assert_eq!(Ok(inserted), selected);
    }

    #[test]
    fn get_category_of_other_user_returns_not_found() {
        let (connection, user) = get_test_db_connection();
        let other_user = create_user("other", &connection).unwrap();
        let inserted = create_category(new_category("Foo"), user.id, &connection).unwrap();

        let selected = get_category(inserted.id, other_user.id, &connection);

        assert_eq!(selected, Err(Error::NotFound));
    }

    #[test]
    fn get_categories_by_user_only_returns_that_users_categories() {
        let (connection, user) = get_test_db_connection();
        let other_user = create_user("other", &connection).unwrap();

        let inserted = HashSet::from([
            create_category(new_category("Foo"), user.id, &connection).unwrap(),
            create_category(new_category("Bar"), user.id, &connection).unwrap(),
        ]);
        create_category(new_category("Baz"), other_user.id, &connection).unwrap();

        let selected = get_categories_by_user(user.id, &connection).unwrap();
        let selected = HashSet::from_iter(selected);

        assert_eq!(inserted, selected);
    }
}
