//! Groups expenses by category for pie and donut charts.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::{
    category::{CategoryLookup, ResolvedCategory},
    database_id::CategoryId,
    transaction::Transaction,
};

/// Expense totals per category as three index-aligned arrays.
///
/// `labels[i]`, `values[i]` and `colors[i]` all describe the same category.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CategoryBreakdown {
    /// The category names.
    pub labels: Vec<String>,
    /// The total spent in each category.
    pub values: Vec<f64>,
    /// The chart color of each category.
    pub colors: Vec<String>,
}

impl CategoryBreakdown {
    /// The number of categories in the breakdown.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Whether the breakdown has no categories.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// Total the expenses in `transactions` by category.
///
/// Categories are resolved with `categories`. Every transaction whose category cannot be
/// resolved is counted under a single "Unknown" group, which always comes last. The other
/// groups are sorted by descending total, then by name. Income is ignored.
pub fn compute_category_breakdown(
    transactions: &[Transaction],
    categories: &CategoryLookup,
) -> CategoryBreakdown {
    let mut totals_by_category: HashMap<CategoryId, (&str, &str, f64)> = HashMap::new();
    let mut unknown_group: Option<(&str, &str, f64)> = None;

    for transaction in transactions.iter().filter(|t| t.is_expense()) {
        let resolved = categories.resolve(transaction.category_id);
        let group = (resolved.label(), resolved.color(), 0.0);

        match resolved {
            ResolvedCategory::Known(category) => {
                totals_by_category.entry(category.id).or_insert(group).2 += transaction.amount;
            }
            ResolvedCategory::Unknown => {
                unknown_group.get_or_insert(group).2 += transaction.amount;
            }
        }
    }

    let mut groups: Vec<(&str, &str, f64)> = totals_by_category.into_values().collect();
    groups.sort_by(|(a_label, _, a_value), (b_label, _, b_value)| {
        b_value.total_cmp(a_value).then_with(|| a_label.cmp(b_label))
    });

    groups.extend(unknown_group);

    let mut breakdown = CategoryBreakdown {
        labels: Vec::with_capacity(groups.len()),
        values: Vec::with_capacity(groups.len()),
        colors: Vec::with_capacity(groups.len()),
    };

    for (label, color, value) in groups {
        breakdown.labels.push(label.to_owned());
        breakdown.values.push(value);
        breakdown.colors.push(color.to_owned());
    }

    breakdown
}
