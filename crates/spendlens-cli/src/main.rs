//! spendlens CLI - Expense tracker with budgets and forecasts
//!
//! Usage:
//!   spendlens list --category Food         List expenses
//!   spendlens add -a 12.50 -c Food         Record an expense
//!   spendlens budget set Food 300          Set a category budget
//!   spendlens summary                      Totals and budget status
//!   spendlens trend --horizon 5            Spending over time with forecast

mod cli;
mod commands;

#[cfg(test)]
mod tests;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    let config = commands::load_config(cli.config.as_deref(), cli.api_url.as_deref())?;
    let controller = commands::open_session(&config).await?;
    let today = chrono::Local::now().date_naive();

    match cli.command {
        Commands::List {
            category,
            search,
            limit,
        } => commands::cmd_list(
            &controller,
            category.as_deref(),
            search.as_deref(),
            limit,
            cli.json,
        ),
        Commands::Add {
            amount,
            category,
            date,
            description,
        } => {
            commands::cmd_add(
                &controller,
                amount,
                &category,
                date.as_deref(),
                &description,
                today,
            )
            .await
        }
        Commands::Update {
            id,
            amount,
            category,
            date,
            description,
        } => {
            commands::cmd_update(
                &controller,
                &id,
                amount,
                category.as_deref(),
                date.as_deref(),
                description.as_deref(),
            )
            .await
        }
        Commands::Delete { id } => commands::cmd_delete(&controller, &id).await,
        Commands::Budget { action } => match action {
            Some(BudgetAction::Set { category, limit }) => {
                commands::cmd_budget_set(&controller, &category, limit).await
            }
            None | Some(BudgetAction::List) => commands::cmd_budget_list(&controller, cli.json),
        },
        Commands::Summary => {
            commands::cmd_summary(&controller, today, config.forecast_horizon, cli.json)
        }
        Commands::Trend { horizon } => commands::cmd_trend(
            &controller,
            today,
            horizon.unwrap_or(config.forecast_horizon),
            cli.json,
        ),
        Commands::Export { output } => commands::cmd_export(&controller, output.as_deref(), today),
    }
}
