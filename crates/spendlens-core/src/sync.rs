//! Sync controller
//!
//! Keeps the cache consistent with the remote store. Every mutation is written
//! to the store first and then the affected collection is re-fetched in full,
//! so the cache only ever holds what the store itself returns.
//!
//! Failure policy:
//! - `bootstrap`: a collection that fails to load is set to empty and the
//!   failure goes to the `ErrorReporter`; nothing is propagated.
//! - mutations: a failed write is returned to the caller and the cache is left
//!   untouched. A failed re-fetch after a successful write is reported, the
//!   cache keeps its previous snapshot, and the write result is still returned.
//!
//! A mutation's re-fetch always finishes before the mutation resolves.

use std::sync::Arc;

use tracing::{debug, info};
use uuid::Uuid;

use crate::cache::{Cache, Topic};
use crate::error::{Error, Result};
use crate::models::{Budget, Expense, ExpenseDraft, ExpensePatch};
use crate::report::{ErrorReporter, TracingReporter};
use crate::store::RemoteStore;

/// Which collections loaded during bootstrap
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BootstrapOutcome {
    pub expenses_loaded: bool,
    pub budgets_loaded: bool,
}

impl BootstrapOutcome {
    pub fn is_complete(&self) -> bool {
        self.expenses_loaded && self.budgets_loaded
    }
}

/// Mediates every write between callers, the remote store and the cache
pub struct SyncController {
    store: Arc<dyn RemoteStore>,
    cache: Arc<Cache>,
    reporter: Arc<dyn ErrorReporter>,
}

impl SyncController {
    /// Create a controller that reports absorbed failures through `tracing`
    pub fn new(store: Arc<dyn RemoteStore>, cache: Arc<Cache>) -> Self {
        Self {
            store,
            cache,
            reporter: Arc::new(TracingReporter),
        }
    }

    pub fn with_reporter(mut self, reporter: Arc<dyn ErrorReporter>) -> Self {
        self.reporter = reporter;
        self
    }

    pub fn cache(&self) -> &Arc<Cache> {
        &self.cache
    }

    /// Load both collections once
    ///
    /// Never fails: whatever could not be fetched is left empty and reported.
    pub async fn bootstrap(&self) -> BootstrapOutcome {
        let (expenses, budgets) =
            tokio::join!(self.store.list_expenses(), self.store.list_budgets());

        let expenses_loaded = match expenses {
            Ok(list) => {
                self.cache.replace_expenses(list);
                true
            }
            Err(e) => {
                self.cache.replace_expenses(Vec::new());
                self.reporter.report("load expenses", &e.to_string());
                false
            }
        };

        let budgets_loaded = match budgets {
            Ok(list) => {
                self.cache.replace_budgets(list);
                true
            }
            Err(e) => {
                self.cache.replace_budgets(Vec::new());
                self.reporter.report("load budgets", &e.to_string());
                false
            }
        };

        info!(expenses_loaded, budgets_loaded, "Bootstrap finished");
        BootstrapOutcome {
            expenses_loaded,
            budgets_loaded,
        }
    }

    /// Re-fetch expenses into the cache; the cache is untouched on failure
    pub async fn refresh_expenses(&self) -> Result<()> {
        let expenses = self.store.list_expenses().await?;
        self.cache.replace_expenses(expenses);
        Ok(())
    }

    /// Re-fetch budgets into the cache; the cache is untouched on failure
    pub async fn refresh_budgets(&self) -> Result<()> {
        let budgets = self.store.list_budgets().await?;
        self.cache.replace_budgets(budgets);
        Ok(())
    }

    pub async fn add_expense(&self, draft: ExpenseDraft) -> Result<Expense> {
        draft.validate()?;
        let expense = Expense::from_draft(self.generate_id(), draft);
        debug!(id = %expense.id, "Creating expense");

        let created = self.store.create_expense(&expense).await?;
        self.refresh_after_write(Topic::Expenses, "add expense").await;
        Ok(created)
    }

    pub async fn update_expense(&self, id: &str, patch: ExpensePatch) -> Result<Expense> {
        if patch.is_empty() {
            return Err(Error::Validation("no fields to update".into()));
        }
        patch.validate()?;
        debug!(id, "Updating expense");

        let updated = self.store.update_expense(id, &patch).await?;
        self.refresh_after_write(Topic::Expenses, "update expense").await;
        Ok(updated)
    }

    pub async fn delete_expense(&self, id: &str) -> Result<()> {
        debug!(id, "Deleting expense");
        self.store.delete_expense(id).await?;
        self.refresh_after_write(Topic::Expenses, "delete expense").await;
        Ok(())
    }

    /// Insert or wholesale-replace the budget for `category`
    pub async fn set_budget(&self, category: &str, limit: f64) -> Result<Budget> {
        let budget = Budget::new(category, limit);
        budget.validate()?;
        debug!(category, limit, "Setting budget");

        let stored = self.store.upsert_budget(&budget).await?;
        self.refresh_after_write(Topic::Budgets, "set budget").await;
        Ok(stored)
    }

    async fn refresh_after_write(&self, topic: Topic, operation: &str) {
        let result = match topic {
            Topic::Expenses => self.refresh_expenses().await,
            Topic::Budgets => self.refresh_budgets().await,
        };
        if let Err(e) = result {
            self.reporter.report(
                &format!("{} (refresh {})", operation, topic.as_str()),
                &e.to_string(),
            );
        }
    }

    /// Fresh v4 id, regenerated on the off chance it is already cached
    fn generate_id(&self) -> String {
        loop {
            let id = Uuid::new_v4().to_string();
            if !self.cache.contains_expense(&id) {
                return id;
            }
        }
    }
}
