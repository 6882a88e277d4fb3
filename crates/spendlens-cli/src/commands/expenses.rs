//! Expense command implementations

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use spendlens_core::models::{parse_date, DATE_FORMAT};
use spendlens_core::{aggregate, ExpenseDraft, ExpenseFilter, ExpensePatch, SyncController};

use super::{money, parse_category, truncate};

pub fn cmd_list(
    controller: &SyncController,
    category: Option<&str>,
    search: Option<&str>,
    limit: usize,
    json: bool,
) -> Result<()> {
    let criteria = ExpenseFilter {
        search: search.map(str::to_string),
        category: category
            .map(parse_category)
            .transpose()?
            .map(|c| c.as_str().to_string()),
    };
    let expenses = controller.cache().current_expenses();
    let matched = aggregate::filter(&expenses, &criteria);
    let shown: Vec<_> = aggregate::recent(&matched, limit);

    if json {
        println!("{}", serde_json::to_string_pretty(&shown)?);
        return Ok(());
    }

    if shown.is_empty() {
        println!("No expenses found.");
        return Ok(());
    }

    println!();
    println!("💸 Expenses ({} of {})", shown.len(), matched.len());
    println!("   ─────────────────────────────────────────────────────────────────────────────");
    for expense in &shown {
        println!(
            "   {} │ {:>10} │ {:<14} │ {:<30} │ {}",
            expense.date,
            money(expense.amount),
            truncate(&expense.category, 14),
            truncate(&expense.description, 30),
            expense.id
        );
    }
    println!("   ─────────────────────────────────────────────────────────────────────────────");
    println!("   Total: {}", money(aggregate::total(&matched)));

    Ok(())
}

pub async fn cmd_add(
    controller: &SyncController,
    amount: f64,
    category: &str,
    date: Option<&str>,
    description: &str,
    today: NaiveDate,
) -> Result<()> {
    let category = parse_category(category)?;
    let date = match date {
        Some(raw) => check_date(raw)?,
        None => today.format(DATE_FORMAT).to_string(),
    };

    let draft = ExpenseDraft::new(amount, category.as_str(), date).with_description(description);
    let created = controller
        .add_expense(draft)
        .await
        .context("Failed to add expense")?;

    println!(
        "✅ Added {} {} on {} ({})",
        money(created.amount),
        created.category,
        created.date,
        created.id
    );
    Ok(())
}

pub async fn cmd_update(
    controller: &SyncController,
    id: &str,
    amount: Option<f64>,
    category: Option<&str>,
    date: Option<&str>,
    description: Option<&str>,
) -> Result<()> {
    let patch = ExpensePatch {
        amount,
        category: category
            .map(parse_category)
            .transpose()?
            .map(|c| c.as_str().to_string()),
        date: date.map(check_date).transpose()?,
        description: description.map(str::to_string),
    };
    if patch.is_empty() {
        bail!("Nothing to update: pass at least one of --amount, --category, --date, --description");
    }

    let updated = controller
        .update_expense(id, patch)
        .await
        .with_context(|| format!("Failed to update expense {}", id))?;

    println!(
        "✅ Updated {}: {} {} on {}",
        updated.id,
        money(updated.amount),
        updated.category,
        updated.date
    );
    Ok(())
}

pub async fn cmd_delete(controller: &SyncController, id: &str) -> Result<()> {
    controller
        .delete_expense(id)
        .await
        .with_context(|| format!("Failed to delete expense {}", id))?;

    println!("🗑️  Deleted expense {}", id);
    Ok(())
}

fn check_date(raw: &str) -> Result<String> {
    match parse_date(raw) {
        Some(date) => Ok(date.format(DATE_FORMAT).to_string()),
        None => bail!("Invalid date '{}' (use YYYY-MM-DD)", raw),
    }
}
