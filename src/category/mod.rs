//! This module defines the `Category` type, the starter categories given to new users and the
//! lookup used to resolve the category of a transaction for display.
//! A category is used for grouping transactions and budgets.

mod db;
mod lookup;

pub use db::{create_category, create_category_table, get_categories_by_user, get_category};
pub use lookup::{CategoryLookup, ResolvedCategory, UNKNOWN_CATEGORY_COLOR, UNKNOWN_CATEGORY_LABEL};

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{Error, database_id::CategoryId, user::UserId};

/// The name of a category.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub struct CategoryName(String);

impl CategoryName {
    /// Create a category name.
    ///
    /// # Errors
    ///
    /// This function will return an [Error::EmptyCategoryName] if `name` is an empty string.
    pub fn new(name: &str) -> Result<Self, Error> {
        let name = name.trim();

        if name.is_empty() {
            Err(Error::EmptyCategoryName)
        } else {
            Ok(Self(name.to_string()))
        }
    }

    /// Create a category name without validation.
    ///
    /// The caller should ensure that the string is not empty.
    pub fn new_unchecked(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl AsRef<str> for CategoryName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for CategoryName {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CategoryName::new(s)
    }
}

impl Display for CategoryName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A color in the `#RRGGBB` form used by charting frontends.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub struct CategoryColor(String);

impl CategoryColor {
    /// Create a color from a hex string such as `#F59E0B`.
    ///
    /// Hex digits are normalised to upper case.
    ///
    /// # Errors
    ///
    /// This function will return an [Error::InvalidColor] if `color` is not a `#` followed by
    /// exactly six hex digits.
    pub fn new(color: &str) -> Result<Self, Error> {
        let color = color.trim();

        let is_valid = color.len() == 7
            && color.starts_with('#')
            && color[1..].chars().all(|c| c.is_ascii_hexdigit());

        if is_valid {
            Ok(Self(color.to_ascii_uppercase()))
        } else {
            Err(Error::InvalidColor(color.to_owned()))
        }
    }

    /// Create a color without validation.
    ///
    /// The caller should ensure that the string is a valid `#RRGGBB` color.
    pub fn new_unchecked(color: &str) -> Self {
        Self(color.to_string())
    }
}

impl AsRef<str> for CategoryColor {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for CategoryColor {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CategoryColor::new(s)
    }
}

impl Display for CategoryColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A category for grouping expenses and income, e.g., 'Groceries', 'Eating Out', 'Wages'.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub struct Category {
    /// The ID of the category.
    pub id: CategoryId,
    /// The name of the category.
    pub name: CategoryName,
    /// The color used for the category in charts.
    pub color: CategoryColor,
    /// A short glyph or tag shown next to the name, e.g. "🍔".
    pub icon: String,
    /// The user that owns the category.
    pub user_id: UserId,
}

/// The data needed to create a [Category].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCategory {
    /// The name of the category.
    pub name: CategoryName,
    /// The color used for the category in charts.
    pub color: CategoryColor,
    /// A short glyph or tag shown next to the name.
    pub icon: String,
}

impl NewCategory {
    /// Create the data for a new category.
    pub fn new(name: CategoryName, color: CategoryColor, icon: &str) -> Self {
        Self {
            name,
            color,
            icon: icon.to_owned(),
        }
    }
}

/// The starter categories every newly registered user receives.
///
/// Called once at registration time by [crate::register_user].
pub fn default_categories() -> Vec<NewCategory> {
    [
        ("Food", "#F59E0B", "🍔"),
        ("Transport", "#3B82F6", "🚌"),
        ("Housing", "#8B5CF6", "🏠"),
        ("Utilities", "#06B6D4", "💡"),
        ("Entertainment", "#EC4899", "🎬"),
        ("Health", "#EF4444", "💊"),
        ("Salary", "#10B981", "💼"),
        ("Other", "#6B7280", "📦"),
    ]
    .into_iter()
    .map(|(name, color, icon)| {
        NewCategory::new(
            CategoryName::new_unchecked(name),
            CategoryColor::new_unchecked(color),
            icon,
        )
    })
    .collect()
}


#[cfg(test)]
mod category_color_tests {
    use crate::{Error, category::CategoryColor};

    #[test]
    fn accepts_hex_color_and_uppercases_it() {
        let color = CategoryColor::new("#a1b2c3").unwrap();

        assert_eq!(color.as_ref(), "#A1B2C3");
    }

    #[test]
    fn rejects_missing_hash() {
        assert_eq!(
            CategoryColor::new("A1B2C3"),
            Err(Error::InvalidColor("A1B2C3".to_owned()))
        );
    }

    #[test]
    fn rejects_short_color() {
        assert_eq!(
            CategoryColor::new("#FFF"),
            Err(Error::InvalidColor("#FFF".to_owned()))
        );
    }

    #[test]
    fn rejects_non_hex_digits() {
        assert_eq!(
            CategoryColor::new("#GGGGGG"),
            Err(Error::InvalidColor("#GGGGGG".to_owned()))
        );
    }
}
