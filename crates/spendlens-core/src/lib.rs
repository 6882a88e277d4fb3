//! spendlens core library
//!
//! Client-side engine for the spendlens expense tracker:
//! - Snapshot cache of expenses and budgets with change notifications
//! - Sync controller that writes to the remote store and re-fetches after every write
//! - Remote store clients (REST and in-memory)
//! - Aggregation (category totals, time series, budget status)
//! - Linear-regression spending forecast
//! - CSV export and dashboard figures

pub mod aggregate;
pub mod cache;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod export;
pub mod forecast;
pub mod models;
pub mod report;
pub mod store;
pub mod sync;

/// Test utilities including mock remote store server
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use aggregate::ExpenseFilter;
pub use cache::{Cache, ChangeStream, Snapshot, Topic};
pub use config::Config;
pub use dashboard::{Dashboard, DashboardWatcher};
pub use error::{Error, ErrorKind, Result};
pub use forecast::LinearTrend;
pub use models::{
    Budget, BudgetHealth, BudgetStatus, Category, Expense, ExpenseDraft, ExpensePatch,
    ForecastPoint, TimeSeriesPoint,
};
pub use report::{CollectingReporter, ErrorReporter, TracingReporter};
pub use store::{HttpRemoteStore, MemoryStore, RemoteStore};
pub use sync::{BootstrapOutcome, SyncController};
