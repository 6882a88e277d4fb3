//! Remote store abstraction
//!
//! The remote store is the system of record for expenses and budgets. The
//! core only consumes it through the `RemoteStore` trait.
//!
//! # Architecture
//!
//! - `RemoteStore` trait: the CRUD surface the sync controller depends on
//! - `HttpRemoteStore`: REST client for the `/api/expenses` and `/api/budgets` routes
//! - `MemoryStore`: in-process store with the same semantics, for tests and offline use
//!
//! # Usage
//!
//! ```rust,ignore
//! let store = HttpRemoteStore::new("http://localhost:3001");
//! let expenses = store.list_expenses().await?;
//! ```

mod http;
mod memory;

pub use http::HttpRemoteStore;
pub use memory::MemoryStore;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{Budget, Expense, ExpensePatch};

/// CRUD surface of the remote expense/budget store
///
/// Implementations should be Send + Sync so one store can back a session
/// shared across async tasks.
#[async_trait]
pub trait RemoteStore: Send + Sync {
    /// Fetch every expense
    async fn list_expenses(&self) -> Result<Vec<Expense>>;

    /// Persist a new expense (id already assigned) and return what was stored
    async fn create_expense(&self, expense: &Expense) -> Result<Expense>;

    /// Apply a partial update; `Error::NotFound` if the id is unknown
    async fn update_expense(&self, id: &str, patch: &ExpensePatch) -> Result<Expense>;

    /// Remove an expense; `Error::NotFound` if the id is unknown
    async fn delete_expense(&self, id: &str) -> Result<()>;

    /// Fetch every budget
    async fn list_budgets(&self) -> Result<Vec<Budget>>;

    /// Insert or wholesale-replace the budget for `budget.category`
    async fn upsert_budget(&self, budget: &Budget) -> Result<Budget>;
}
