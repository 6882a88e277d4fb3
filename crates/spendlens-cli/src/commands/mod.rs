//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `core` - Session setup shared by every command (config, store, bootstrap)
//! - `expenses` - Expense commands (list, add, update, delete)
//! - `budgets` - Budget commands (set, list)
//! - `reports` - Summary and trend reports
//! - `export` - CSV export

pub mod budgets;
pub mod core;
pub mod expenses;
pub mod export;
pub mod reports;

// Re-export command functions for main.rs
pub use budgets::*;
pub use core::*;
pub use expenses::*;
pub use export::*;
pub use reports::*;

/// Truncate a string to a maximum length, adding "..." if truncated
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Format an amount the way every table in the CLI shows money
pub fn money(amount: f64) -> String {
    format!("${:.2}", amount)
}
