//! Budget command implementations

use anyhow::{Context, Result};
use spendlens_core::{aggregate, BudgetHealth, Category, SyncController};

use super::{money, parse_category};

pub async fn cmd_budget_set(controller: &SyncController, category: &str, limit: f64) -> Result<()> {
    let category = parse_category(category)?;
    let budget = controller
        .set_budget(category.as_str(), limit)
        .await
        .context("Failed to set budget")?;

    println!("✅ Budget for {} set to {}", budget.category, money(budget.limit));
    Ok(())
}

pub fn cmd_budget_list(controller: &SyncController, json: bool) -> Result<()> {
    let cache = controller.cache();
    let status = aggregate::budget_status(
        &cache.current_expenses(),
        &cache.current_budgets(),
        &Category::ALL,
    );

    if json {
        println!("{}", serde_json::to_string_pretty(&status)?);
        return Ok(());
    }

    println!();
    println!("🎯 Budgets");
    println!("   ──────────────────────────────────────────────────────────────");
    for row in &status {
        // Spending with no limit counts as over budget even at 0%
        let icon = match row.health() {
            _ if row.over_budget => "🔴",
            BudgetHealth::Good => "🟢",
            BudgetHealth::Warning => "🟡",
            BudgetHealth::OverBudget => "🔴",
        };
        let limit = if row.limit > 0.0 {
            money(row.limit)
        } else {
            "no limit".to_string()
        };
        println!(
            "   {} {:<14} │ {:>10} of {:>10} │ {:>6.1}%",
            icon,
            row.category.as_str(),
            money(row.spent),
            limit,
            row.percentage
        );
    }

    let over: Vec<&str> = status
        .iter()
        .filter(|row| row.over_budget)
        .map(|row| row.category.as_str())
        .collect();
    if !over.is_empty() {
        println!();
        println!("   ⚠️  Over budget: {}", over.join(", "));
    }

    Ok(())
}
