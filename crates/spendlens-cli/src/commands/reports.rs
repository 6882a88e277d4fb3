//! Report command implementations

use anyhow::Result;
use chrono::NaiveDate;
use spendlens_core::{Dashboard, SyncController};

use super::{money, truncate};

/// Width of the longest bar in the trend chart
const BAR_WIDTH: f64 = 30.0;

pub fn cmd_summary(
    controller: &SyncController,
    today: NaiveDate,
    horizon: usize,
    json: bool,
) -> Result<()> {
    let dashboard = Dashboard::from_cache(controller.cache(), today, horizon);

    if json {
        println!("{}", serde_json::to_string_pretty(&dashboard)?);
        return Ok(());
    }

    println!();
    println!("📊 Spending Summary");
    println!("   ─────────────────────────────────────");
    println!("   Total spent:      {:>12}", money(dashboard.total));
    println!(
        "   {}:    {:>12}",
        today.format("This month (%b)"),
        money(dashboard.month_total)
    );

    if !dashboard.by_category.is_empty() {
        println!();
        println!("   By category:");
        for (category, amount) in &dashboard.by_category {
            let share = if dashboard.total > 0.0 {
                amount / dashboard.total * 100.0
            } else {
                0.0
            };
            println!("   {:<16} {:>12}  ({:>5.1}%)", category, money(*amount), share);
        }
    }

    let over: Vec<&str> = dashboard
        .budget_status
        .iter()
        .filter(|row| row.over_budget)
        .map(|row| row.category.as_str())
        .collect();
    if !over.is_empty() {
        println!();
        println!("   ⚠️  Over budget: {}", over.join(", "));
    }

    if !dashboard.recent.is_empty() {
        println!();
        println!("   Recent:");
        for expense in &dashboard.recent {
            println!(
                "   {} │ {:>10} │ {}",
                expense.date,
                money(expense.amount),
                truncate(&expense.description, 40)
            );
        }
    }

    Ok(())
}

pub fn cmd_trend(
    controller: &SyncController,
    today: NaiveDate,
    horizon: usize,
    json: bool,
) -> Result<()> {
    let dashboard = Dashboard::from_cache(controller.cache(), today, horizon);

    if json {
        let body = serde_json::json!({
            "overTime": dashboard.over_time,
            "trend": dashboard.trend,
            "forecast": dashboard.forecast,
        });
        println!("{}", serde_json::to_string_pretty(&body)?);
        return Ok(());
    }

    if dashboard.is_empty() {
        println!("No expenses yet - nothing to chart.");
        return Ok(());
    }

    let peak = dashboard
        .over_time
        .iter()
        .map(|p| p.amount)
        .chain(dashboard.forecast.iter().map(|p| p.amount))
        .fold(0.0_f64, f64::max);

    println!();
    println!("📈 Spending Over Time");
    println!("   ─────────────────────────────────────────────────────");
    for point in &dashboard.over_time {
        println!(
            "   {:<10} │ {:>10} │ {}",
            point.date,
            money(point.amount),
            bar(point.amount, peak, '█')
        );
    }

    match dashboard.trend {
        Some(trend) => {
            println!();
            println!(
                "   Trend: {}{} per entry",
                if trend.slope >= 0.0 { "+" } else { "-" },
                money(trend.slope.abs())
            );
            println!("   Forecast:");
            for point in &dashboard.forecast {
                println!(
                    "   {:<10} │ {:>10} │ {}",
                    format!("+{}", point.index),
                    money(point.amount),
                    bar(point.amount, peak, '░')
                );
            }
        }
        None => {
            println!();
            println!("   Need at least two dates with spending to forecast.");
        }
    }

    Ok(())
}

fn bar(amount: f64, peak: f64, fill: char) -> String {
    if peak <= 0.0 || amount <= 0.0 {
        return String::new();
    }
    let len = ((amount / peak) * BAR_WIDTH).round() as usize;
    std::iter::repeat(fill).take(len.max(1)).collect()
}
