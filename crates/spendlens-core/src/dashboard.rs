//! Derived dashboard figures
//!
//! `Dashboard::compute` is a pure function of one expense snapshot and one
//! budget snapshot. `DashboardWatcher` pairs it with the cache's change
//! streams so the figures are recomputed whenever either collection is
//! replaced.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use tokio::sync::watch;

use crate::aggregate;
use crate::cache::{BudgetSnapshot, Cache, ExpenseSnapshot};
use crate::forecast::{self, LinearTrend};
use crate::models::{Budget, BudgetStatus, Category, Expense, ForecastPoint, TimeSeriesPoint};

/// Number of expenses listed under "recent"
pub const RECENT_LIMIT: usize = 5;

/// Everything the summary views show, computed from one snapshot pair
#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub total: f64,
    pub month_total: f64,
    pub by_category: BTreeMap<String, f64>,
    pub over_time: Vec<TimeSeriesPoint>,
    pub budget_status: Vec<BudgetStatus>,
    pub trend: Option<LinearTrend>,
    pub forecast: Vec<ForecastPoint>,
    pub recent: Vec<Expense>,
}

impl Dashboard {
    pub fn compute(
        expenses: &[Expense],
        budgets: &[Budget],
        today: NaiveDate,
        horizon: usize,
    ) -> Self {
        let over_time = aggregate::over_time(expenses);
        Self {
            total: aggregate::total(expenses),
            month_total: aggregate::total_for_month(expenses, today.year(), today.month()),
            by_category: aggregate::by_category(expenses),
            budget_status: aggregate::budget_status(expenses, budgets, &Category::ALL),
            trend: LinearTrend::fit(&over_time),
            forecast: forecast::forecast(&over_time, horizon),
            recent: aggregate::recent(expenses, RECENT_LIMIT),
            over_time,
        }
    }

    /// Compute from whatever the cache holds right now
    pub fn from_cache(cache: &Cache, today: NaiveDate, horizon: usize) -> Self {
        Self::compute(
            &cache.current_expenses(),
            &cache.current_budgets(),
            today,
            horizon,
        )
    }

    pub fn is_empty(&self) -> bool {
        self.over_time.is_empty()
    }
}

/// Recomputes the dashboard whenever the cache publishes a new snapshot
pub struct DashboardWatcher {
    expenses: watch::Receiver<ExpenseSnapshot>,
    budgets: watch::Receiver<BudgetSnapshot>,
    horizon: usize,
}

impl DashboardWatcher {
    pub fn new(cache: &Arc<Cache>, horizon: usize) -> Self {
        Self {
            expenses: cache.subscribe_expenses(),
            budgets: cache.subscribe_budgets(),
            horizon,
        }
    }

    /// Wait for either collection to change and return fresh figures
    ///
    /// Returns `None` once the cache has been dropped.
    pub async fn next(&mut self, today: NaiveDate) -> Option<Dashboard> {
        tokio::select! {
            changed = self.expenses.changed() => changed.ok()?,
            changed = self.budgets.changed() => changed.ok()?,
        }
        let expenses = self.expenses.borrow_and_update().clone();
        let budgets = self.budgets.borrow_and_update().clone();
        Some(Dashboard::compute(&expenses, &budgets, today, self.horizon))
    }
}
