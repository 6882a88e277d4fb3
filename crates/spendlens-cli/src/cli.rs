//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// spendlens - Track expenses, budgets and spending trends
#[derive(Parser)]
#[command(name = "spendlens")]
#[command(about = "Expense tracker with budgets and spending forecasts", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Remote store base URL (overrides config and SPENDLENS_API_URL)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Config file (defaults to ~/.config/spendlens/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Print machine-readable JSON instead of tables
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List expenses
    List {
        /// Only show this category
        #[arg(short, long)]
        category: Option<String>,

        /// Case-insensitive search over description and category
        #[arg(short, long)]
        search: Option<String>,

        /// Maximum rows to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },

    /// Record a new expense
    Add {
        /// Amount spent (must be positive)
        #[arg(short, long)]
        amount: f64,

        /// Category: Food, Transportation, Entertainment, Utilities, Healthcare, Other
        #[arg(short, long)]
        category: String,

        /// Date as YYYY-MM-DD (defaults to today)
        #[arg(short, long)]
        date: Option<String>,

        /// Free-text description
        #[arg(long, default_value = "")]
        description: String,
    },

    /// Change fields of an existing expense
    Update {
        /// Expense id
        id: String,

        #[arg(short, long)]
        amount: Option<f64>,

        #[arg(short, long)]
        category: Option<String>,

        #[arg(short, long)]
        date: Option<String>,

        #[arg(long)]
        description: Option<String>,
    },

    /// Delete an expense
    Delete {
        /// Expense id
        id: String,
    },

    /// Manage category budgets (shows budget status when no action given)
    Budget {
        #[command(subcommand)]
        action: Option<BudgetAction>,
    },

    /// Show totals, budget status and recent expenses
    Summary,

    /// Show spending over time with a short forecast
    Trend {
        /// Number of future points to predict (defaults to config)
        #[arg(long)]
        horizon: Option<usize>,
    },

    /// Export all expenses to CSV
    Export {
        /// Output file (defaults to expenses_<today>.csv)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
pub enum BudgetAction {
    /// Set (or replace) the limit for a category
    Set {
        /// Category name
        category: String,
        /// Spending limit (0 or more)
        limit: f64,
    },

    /// Show spending against every category's limit
    List,
}
