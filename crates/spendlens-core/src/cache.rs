//! Snapshot cache for expenses and budgets
//!
//! Holds the last-known-good lists and publishes every replacement to
//! subscribers. Collections are swapped whole behind an `Arc`, so a reader
//! holding a snapshot never sees it change underneath it.
//!
//! Subscriptions are `tokio::sync::watch` channels: a subscriber that falls
//! behind skips intermediate snapshots and wakes up with the latest one.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::debug;

use crate::models::{Budget, Expense};

/// Shared, immutable expense list
pub type ExpenseSnapshot = Arc<Vec<Expense>>;
/// Shared, immutable budget list
pub type BudgetSnapshot = Arc<Vec<Budget>>;

/// Which collection a subscriber listens to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Topic {
    Expenses,
    Budgets,
}

impl Topic {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Expenses => "expenses",
            Self::Budgets => "budgets",
        }
    }
}

/// A full collection delivered to a subscriber
#[derive(Debug, Clone)]
pub enum Snapshot {
    Expenses(ExpenseSnapshot),
    Budgets(BudgetSnapshot),
}

/// In-memory view of the remote store
///
/// Construct once per session and share it (usually behind an `Arc`) with the
/// sync controller and any readers.
pub struct Cache {
    expenses: watch::Sender<ExpenseSnapshot>,
    budgets: watch::Sender<BudgetSnapshot>,
}

impl Cache {
    /// Create an empty cache; both collections start as empty lists
    pub fn new() -> Self {
        let (expenses, _) = watch::channel(Arc::new(Vec::new()));
        let (budgets, _) = watch::channel(Arc::new(Vec::new()));
        Self { expenses, budgets }
    }

    pub fn current_expenses(&self) -> ExpenseSnapshot {
        self.expenses.borrow().clone()
    }

    pub fn current_budgets(&self) -> BudgetSnapshot {
        self.budgets.borrow().clone()
    }

    /// Swap in a new expense list and notify subscribers
    pub fn replace_expenses(&self, expenses: Vec<Expense>) {
        debug!(count = expenses.len(), "Replacing cached expenses");
        self.expenses.send_replace(Arc::new(expenses));
    }

    /// Swap in a new budget list and notify subscribers
    pub fn replace_budgets(&self, budgets: Vec<Budget>) {
        debug!(count = budgets.len(), "Replacing cached budgets");
        self.budgets.send_replace(Arc::new(budgets));
    }

    pub fn subscribe_expenses(&self) -> watch::Receiver<ExpenseSnapshot> {
        self.expenses.subscribe()
    }

    pub fn subscribe_budgets(&self) -> watch::Receiver<BudgetSnapshot> {
        self.budgets.subscribe()
    }

    /// Stream of full snapshots for `topic`, starting with the next replacement
    pub fn on_change(&self, topic: Topic) -> ChangeStream {
        let inner = match topic {
            Topic::Expenses => StreamInner::Expenses(self.subscribe_expenses()),
            Topic::Budgets => StreamInner::Budgets(self.subscribe_budgets()),
        };
        ChangeStream { inner }
    }

    pub fn contains_expense(&self, id: &str) -> bool {
        self.expenses.borrow().iter().any(|e| e.id == id)
    }
}

impl Default for Cache {
    fn default() -> Self {
        Self::new()
    }
}

/// Change notifications for one topic
pub struct ChangeStream {
    inner: StreamInner,
}

enum StreamInner {
    Expenses(watch::Receiver<ExpenseSnapshot>),
    Budgets(watch::Receiver<BudgetSnapshot>),
}

impl ChangeStream {
    pub fn topic(&self) -> Topic {
        match self.inner {
            StreamInner::Expenses(_) => Topic::Expenses,
            StreamInner::Budgets(_) => Topic::Budgets,
        }
    }

    /// Wait for the next replacement; `None` once the cache is dropped
    pub async fn next(&mut self) -> Option<Snapshot> {
        match &mut self.inner {
            StreamInner::Expenses(rx) => {
                rx.changed().await.ok()?;
                Some(Snapshot::Expenses(rx.borrow_and_update().clone()))
            }
            StreamInner::Budgets(rx) => {
                rx.changed().await.ok()?;
                Some(Snapshot::Budgets(rx.borrow_and_update().clone()))
            }
        }
    }
}
