//! Aggregation over expense snapshots
//!
//! Pure functions: same input lists, same output. None of them assume the
//! input is sorted.
//!
//! Sums are accumulated in whole cents so that every way of slicing the same
//! expenses adds up to the same figure.

use std::collections::{BTreeMap, HashMap};

use chrono::Datelike;

use crate::models::{Budget, BudgetStatus, Category, Expense, TimeSeriesPoint};

/// Amount in whole cents, rounded half away from zero
fn to_cents(amount: f64) -> i64 {
    (amount * 100.0).round() as i64
}

fn from_cents(cents: i64) -> f64 {
    cents as f64 / 100.0
}

fn sum_cents<'a>(expenses: impl IntoIterator<Item = &'a Expense>) -> i64 {
    expenses.into_iter().map(|e| to_cents(e.amount)).sum()
}

/// Sum of every amount; 0 for an empty list
pub fn total(expenses: &[Expense]) -> f64 {
    from_cents(sum_cents(expenses))
}

/// Spending per category string
///
/// Only categories that occur appear as keys. Unrecognized categories get
/// their own bucket like any other.
pub fn by_category(expenses: &[Expense]) -> BTreeMap<String, f64> {
    let mut totals: BTreeMap<String, i64> = BTreeMap::new();
    for expense in expenses {
        *totals.entry(expense.category.clone()).or_insert(0) += to_cents(expense.amount);
    }
    totals
        .into_iter()
        .map(|(category, cents)| (category, from_cents(cents)))
        .collect()
}

/// Spending per date, ascending
///
/// Expenses are grouped by exact date string. Points are ordered by the
/// parsed date; strings that do not parse sort after every valid date.
pub fn over_time(expenses: &[Expense]) -> Vec<TimeSeriesPoint> {
    let mut grouped: HashMap<&str, i64> = HashMap::new();
    for expense in expenses {
        *grouped.entry(expense.date.as_str()).or_insert(0) += to_cents(expense.amount);
    }

    let mut points: Vec<TimeSeriesPoint> = grouped
        .into_iter()
        .map(|(date, cents)| TimeSeriesPoint {
            date: date.to_string(),
            amount: from_cents(cents),
        })
        .collect();

    points.sort_by_cached_key(|p| {
        let parsed = crate::models::parse_date(&p.date);
        (parsed.is_none(), parsed, p.date.clone())
    });
    points
}

/// One status entry per category in `categories`, in that order
///
/// Categories with no spending or no budget are zero-filled. Percentage is 0
/// when the limit is 0. Expenses in categories outside `categories` are not
/// reported here.
pub fn budget_status(
    expenses: &[Expense],
    budgets: &[Budget],
    categories: &[Category],
) -> Vec<BudgetStatus> {
    let spent_by_category = by_category(expenses);

    categories
        .iter()
        .map(|&category| {
            let spent = spent_by_category
                .get(category.as_str())
                .copied()
                .unwrap_or(0.0);
            let limit = budget_for(budgets, category.as_str())
                .map(|b| b.limit)
                .unwrap_or(0.0);
            let percentage = if limit > 0.0 {
                spent / limit * 100.0
            } else {
                0.0
            };

            BudgetStatus {
                category,
                spent,
                limit,
                percentage,
                over_budget: spent > limit,
            }
        })
        .collect()
}

/// Budget configured for `category`, if any
pub fn budget_for<'a>(budgets: &'a [Budget], category: &str) -> Option<&'a Budget> {
    budgets.iter().find(|b| b.category == category)
}

/// Spending within one calendar month; undated expenses are skipped
pub fn total_for_month(expenses: &[Expense], year: i32, month: u32) -> f64 {
    from_cents(sum_cents(expenses.iter().filter(|e| {
        e.parsed_date()
            .map(|d| d.year() == year && d.month() == month)
            .unwrap_or(false)
    })))
}

/// Up to `limit` expenses, newest first
pub fn recent(expenses: &[Expense], limit: usize) -> Vec<Expense> {
    let mut sorted = expenses.to_vec();
    sorted.sort_by(|a, b| b.parsed_date().cmp(&a.parsed_date()));
    sorted.truncate(limit);
    sorted
}

/// Criteria for narrowing an expense list
#[derive(Debug, Clone, Default)]
pub struct ExpenseFilter {
    /// Case-insensitive substring matched against description or category
    pub search: Option<String>,
    /// Exact category match
    pub category: Option<String>,
}

impl ExpenseFilter {
    pub fn matches(&self, expense: &Expense) -> bool {
        let matches_search = match self.search.as_deref().map(str::trim) {
            None | Some("") => true,
            Some(term) => {
                let term = term.to_lowercase();
                expense.description.to_lowercase().contains(&term)
                    || expense.category.to_lowercase().contains(&term)
            }
        };
        let matches_category = match self.category.as_deref() {
            None | Some("") => true,
            Some(category) => expense.category == category,
        };
        matches_search && matches_category
    }
}

pub fn filter(expenses: &[Expense], criteria: &ExpenseFilter) -> Vec<Expense> {
    expenses
        .iter()
        .filter(|e| criteria.matches(e))
        .cloned()
        .collect()
}
