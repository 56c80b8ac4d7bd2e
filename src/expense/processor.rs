//! Turns stored expenses into what the screens display: filtered lists, totals
//! and per-category or per-day sums.
//!
//! Everything except [fetch_all] and [fetch_or_empty] is a pure function over
//! a slice of expenses.

use std::collections::{BTreeMap, HashMap};

use serde::Deserialize;
use time::Date;

use crate::{
    Error,
    expense::core::{Category, Expense, ExpenseStore},
};

/// Read every expense from `store`.
///
/// # Errors
/// Returns an [Error::StorageUnavailable] if the store cannot be queried.
pub fn fetch_all(store: &impl ExpenseStore) -> Result<Vec<Expense>, Error> {
    store.find_all()
}

/// Read every expense from `store`, treating a failed read as an empty store.
///
/// The screens show the same "no expenses" message whether nothing has been
/// added yet or the store could not be read. The failure is only logged.
pub fn fetch_or_empty(store: &impl ExpenseStore) -> Vec<Expense> {
    fetch_all(store).unwrap_or_else(|error| {
        tracing::error!("could not fetch expenses, showing none: {error}");
        Vec::new()
    })
}

/// The criteria for narrowing down a list of expenses.
///
/// Deserializes from the query string of the expenses page, e.g.
/// `?category=Food&category=Travel&start_date=2024-01-01&end_date=`.
/// Empty strings for the dates are read as no bound.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ExpenseFilter {
    /// Keep only expenses in one of these categories. Empty keeps every category.
    #[serde(default, rename = "category")]
    pub categories: Vec<Category>,
    /// Keep only expenses on or after this date.
    #[serde(default)]
    pub start_date: Option<Date>,
    /// Keep only expenses on or before this date.
    #[serde(default)]
    pub end_date: Option<Date>,
}

impl ExpenseFilter {
    /// Whether `expense` satisfies every criterion of the filter.
    pub fn matches(&self, expense: &Expense) -> bool {
        let category_matches =
            self.categories.is_empty() || self.categories.contains(&expense.category);
        let after_start = self.start_date.is_none_or(|start| expense.date >= start);
        let before_end = self.end_date.is_none_or(|end| expense.date <= end);

        category_matches && after_start && before_end
    }
}

/// Select the expenses that match `expense_filter`, keeping their order.
pub fn filter(expenses: &[Expense], expense_filter: &ExpenseFilter) -> Vec<Expense> {
    expenses
        .iter()
        .filter(|expense| expense_filter.matches(expense))
        .cloned()
        .collect()
}

/// The sum of the amounts of `expenses`, zero if there are none.
pub fn total(expenses: &[Expense]) -> f64 {
    expenses.iter().map(|expense| expense.amount).sum()
}

/// Sums expense amounts per category.
///
/// # Returns
/// One entry for each category that appears in `expenses`, sorted by category name.
pub fn aggregate_by_category(expenses: &[Expense]) -> Vec<(Category, f64)> {
    let mut totals: HashMap<&Category, f64> = HashMap::new();

    for expense in expenses {
        *totals.entry(&expense.category).or_insert(0.0) += expense.amount;
    }

    let mut totals: Vec<(Category, f64)> = totals
        .into_iter()
        .map(|(category, amount)| (category.clone(), amount))
        .collect();
    totals.sort_by(|(a, _), (b, _)| a.as_str().cmp(b.as_str()));

    totals
}

/// Sums expense amounts per day.
///
/// # Returns
/// One entry for each date that appears in `expenses`, in ascending date order.
pub fn aggregate_by_date(expenses: &[Expense]) -> Vec<(Date, f64)> {
    let mut totals: BTreeMap<Date, f64> = BTreeMap::new();

    for expense in expenses {
        *totals.entry(expense.date).or_insert(0.0) += expense.amount;
    }

    totals.into_iter().collect()
}

/// The categories that appear in `expenses`, in the order they are first seen.
pub fn distinct_categories(expenses: &[Expense]) -> Vec<Category> {
    let mut categories: Vec<Category> = Vec::new();

    for expense in expenses {
        if !categories.contains(&expense.category) {
            categories.push(expense.category.clone());
        }
    }

    categories
}

/// The earliest and latest dates in `expenses`, or `None` if there are no expenses.
pub fn date_bounds(expenses: &[Expense]) -> Option<(Date, Date)> {
    let min = expenses.iter().map(|expense| expense.date).min()?;
    let max = expenses.iter().map(|expense| expense.date).max()?;

    Some((min, max))
}
