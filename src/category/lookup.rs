//! Resolves category IDs to display names and colors.

use std::collections::HashMap;

use crate::{category::Category, database_id::CategoryId};

/// The label used for transactions whose category cannot be found.
pub const UNKNOWN_CATEGORY_LABEL: &str = "Unknown";

/// The chart color used for transactions whose category cannot be found.
pub const UNKNOWN_CATEGORY_COLOR: &str = "#9CA3AF";

/// The display name and color of a transaction's category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolvedCategory<'a> {
    /// The category ID refers to one of the user's categories.
    Known(&'a Category),
    /// The category ID is missing or refers to a category that no longer exists.
    Unknown,
}

impl<'a> ResolvedCategory<'a> {
    /// The name to display for the category.
    pub fn label(&self) -> &'a str {
        match *self {
            ResolvedCategory::Known(category) => category.name.as_ref(),
            ResolvedCategory::Unknown => UNKNOWN_CATEGORY_LABEL,
        }
    }

    /// The chart color for the category.
    pub fn color(&self) -> &'a str {
        match *self {
            ResolvedCategory::Known(category) => category.color.as_ref(),
            ResolvedCategory::Unknown => UNKNOWN_CATEGORY_COLOR,
        }
    }
}

/// A mapping from category ID to [Category] for one user.
///
/// Build this once per request with [CategoryLookup::new] and pass it to anything that needs to
/// show category names, so that every unresolved reference falls back to "Unknown" in the same
/// way.
#[derive(Debug, Clone, Default)]
pub struct CategoryLookup {
    categories: HashMap<CategoryId, Category>,
}

impl CategoryLookup {
    /// Create a lookup from a user's categories.
    pub fn new(categories: impl IntoIterator<Item = Category>) -> Self {
        Self {
            categories: categories
                .into_iter()
                .map(|category| (category.id, category))
                .collect(),
        }
    }

    /// Resolve `category_id`, degrading to [ResolvedCategory::Unknown] if it is `None` or does
    /// not match any category.
    pub fn resolve(&self, category_id: Option<CategoryId>) -> ResolvedCategory<'_> {
        category_id
            .and_then(|id| self.categories.get(&id))
            .map_or(ResolvedCategory::Unknown, ResolvedCategory::Known)
    }

    /// The number of categories in the lookup.
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    /// Whether the lookup has no categories.
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}
