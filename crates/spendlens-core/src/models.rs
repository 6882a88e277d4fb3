//! Domain models for spendlens

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{Error, Result};

/// Date format used on the wire and in CSV export
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Fixed spending categories, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    Food,
    Transportation,
    Entertainment,
    Utilities,
    Healthcare,
    Other,
}

impl Category {
    /// Every category, in the order budget status reports them
    pub const ALL: [Category; 6] = [
        Self::Food,
        Self::Transportation,
        Self::Entertainment,
        Self::Utilities,
        Self::Healthcare,
        Self::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Food => "Food",
            Self::Transportation => "Transportation",
            Self::Entertainment => "Entertainment",
            Self::Utilities => "Utilities",
            Self::Healthcare => "Healthcare",
            Self::Other => "Other",
        }
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown category: {}", s))
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A recorded expense
///
/// `category` and `date` are kept as the strings the remote store returned so
/// that legacy categories and odd date spellings survive a round-trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: String,
    pub amount: f64,
    pub category: String,
    pub date: String,
    /// Stored rows may carry `null` or omit it; both read as empty
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
}

/// Read an optional string field, mapping `null` to an empty string
pub(crate) fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl Expense {
    pub fn from_draft(id: String, draft: ExpenseDraft) -> Self {
        Self {
            id,
            amount: draft.amount,
            category: draft.category,
            date: draft.date,
            description: draft.description,
        }
    }

    /// The enumerated category, if this expense uses one
    pub fn known_category(&self) -> Option<Category> {
        self.category.parse().ok()
    }

    pub fn parsed_date(&self) -> Option<NaiveDate> {
        parse_date(&self.date)
    }

    /// Apply the present fields of a patch, leaving the rest untouched
    pub fn apply(&mut self, patch: &ExpensePatch) {
        if let Some(amount) = patch.amount {
            self.amount = amount;
        }
        if let Some(ref category) = patch.category {
            self.category = category.clone();
        }
        if let Some(ref date) = patch.date {
            self.date = date.clone();
        }
        if let Some(ref description) = patch.description {
            self.description = description.clone();
        }
    }
}

/// An expense as entered by the user, before it has an id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseDraft {
    pub amount: f64,
    pub category: String,
    pub date: String,
    #[serde(default)]
    pub description: String,
}

impl ExpenseDraft {
    pub fn new(amount: f64, category: impl Into<String>, date: impl Into<String>) -> Self {
        Self {
            amount,
            category: category.into(),
            date: date.into(),
            description: String::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn validate(&self) -> Result<()> {
        validate_amount(self.amount)?;
        validate_category(&self.category)?;
        validate_date(&self.date)
    }
}

/// Partial update for an expense; absent fields are not sent
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExpensePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ExpensePatch {
    pub fn is_empty(&self) -> bool {
        self.amount.is_none()
            && self.category.is_none()
            && self.date.is_none()
            && self.description.is_none()
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(amount) = self.amount {
            validate_amount(amount)?;
        }
        if let Some(ref category) = self.category {
            validate_category(category)?;
        }
        if let Some(ref date) = self.date {
            validate_date(date)?;
        }
        Ok(())
    }
}

/// Spending limit for one category (unique per category)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    pub category: String,
    pub limit: f64,
}

impl Budget {
    pub fn new(category: impl Into<String>, limit: f64) -> Self {
        Self {
            category: category.into(),
            limit,
        }
    }

    pub fn validate(&self) -> Result<()> {
        validate_category(&self.category)?;
        if !self.limit.is_finite() || self.limit < 0.0 {
            return Err(Error::Validation(format!(
                "budget limit must be a non-negative number, got {}",
                self.limit
            )));
        }
        Ok(())
    }
}

/// Total spending on one date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSeriesPoint {
    pub date: String,
    pub amount: f64,
}

/// Projected spending `index` steps past the end of a series
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    pub index: usize,
    pub amount: f64,
}

/// How close a category is to its limit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetHealth {
    Good,
    Warning,
    OverBudget,
}

impl BudgetHealth {
    pub fn from_percentage(percentage: f64) -> Self {
        if percentage >= 100.0 {
            Self::OverBudget
        } else if percentage >= 80.0 {
            Self::Warning
        } else {
            Self::Good
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Good => "good",
            Self::Warning => "warning",
            Self::OverBudget => "over-budget",
        }
    }
}

/// Spending against the limit for one enumerated category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetStatus {
    pub category: Category,
    pub spent: f64,
    pub limit: f64,
    pub percentage: f64,
    pub over_budget: bool,
}

impl BudgetStatus {
    pub fn health(&self) -> BudgetHealth {
        BudgetHealth::from_percentage(self.percentage)
    }
}

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT).ok()
}

fn validate_amount(amount: f64) -> Result<()> {
    if !amount.is_finite() || amount <= 0.0 {
        return Err(Error::Validation(format!(
            "amount must be a positive number, got {}",
            amount
        )));
    }
    Ok(())
}

fn validate_category(category: &str) -> Result<()> {
    if category.trim().is_empty() {
        return Err(Error::Validation("category is required".into()));
    }
    Ok(())
}

fn validate_date(date: &str) -> Result<()> {
    parse_date(date)
        .map(|_| ())
        .ok_or_else(|| Error::Validation(format!("invalid date (use YYYY-MM-DD): {}", date)))
}
