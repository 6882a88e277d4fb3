//! In-memory remote store
//!
//! Same semantics as the REST store without a server: unknown ids on
//! update/delete are `NotFound`, budgets are keyed by category. Useful for
//! unit tests and for running the CLI without a backend.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::RwLock;

use async_trait::async_trait;

use crate::error::{Error, Result};
use crate::models::{Budget, Expense, ExpensePatch};

use super::RemoteStore;

#[derive(Default)]
struct State {
    expenses: Vec<Expense>,
    budgets: Vec<Budget>,
}

/// Remote store backed by process memory
#[derive(Default)]
pub struct MemoryStore {
    state: RwLock<State>,
    failing: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with records
    pub fn with_data(expenses: Vec<Expense>, budgets: Vec<Budget>) -> Self {
        Self {
            state: RwLock::new(State { expenses, budgets }),
            failing: AtomicBool::new(false),
        }
    }

    /// Make every call fail with a network error until switched back
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    fn check_available(&self, operation: &str) -> Result<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(Error::Network(format!("{}: store unavailable", operation)));
        }
        Ok(())
    }

    fn read(&self) -> Result<std::sync::RwLockReadGuard<'_, State>> {
        self.state
            .read()
            .map_err(|_| Error::Network("Failed to acquire store lock".into()))
    }

    fn write(&self) -> Result<std::sync::RwLockWriteGuard<'_, State>> {
        self.state
            .write()
            .map_err(|_| Error::Network("Failed to acquire store lock".into()))
    }
}

#[async_trait]
impl RemoteStore for MemoryStore {
    async fn list_expenses(&self) -> Result<Vec<Expense>> {
        self.check_available("list expenses")?;
        Ok(self.read()?.expenses.clone())
    }

    async fn create_expense(&self, expense: &Expense) -> Result<Expense> {
        self.check_available("create expense")?;
        let mut state = self.write()?;
        if state.expenses.iter().any(|e| e.id == expense.id) {
            return Err(Error::Network(format!(
                "create expense: duplicate id {}",
                expense.id
            )));
        }
        state.expenses.push(expense.clone());
        Ok(expense.clone())
    }

    async fn update_expense(&self, id: &str, patch: &ExpensePatch) -> Result<Expense> {
        self.check_available("update expense")?;
        let mut state = self.write()?;
        let expense = state
            .expenses
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| Error::NotFound(format!("expense {}", id)))?;
        expense.apply(patch);
        Ok(expense.clone())
    }

    async fn delete_expense(&self, id: &str) -> Result<()> {
        self.check_available("delete expense")?;
        let mut state = self.write()?;
        let before = state.expenses.len();
        state.expenses.retain(|e| e.id != id);
        if state.expenses.len() == before {
            return Err(Error::NotFound(format!("expense {}", id)));
        }
        Ok(())
    }

    async fn list_budgets(&self) -> Result<Vec<Budget>> {
        self.check_available("list budgets")?;
        Ok(self.read()?.budgets.clone())
    }

    async fn upsert_budget(&self, budget: &Budget) -> Result<Budget> {
        self.check_available("upsert budget")?;
        let mut state = self.write()?;
        match state
            .budgets
            .iter_mut()
            .find(|b| b.category == budget.category)
        {
            Some(existing) => *existing = budget.clone(),
            None => state.budgets.push(budget.clone()),
        }
        Ok(budget.clone())
    }
}
