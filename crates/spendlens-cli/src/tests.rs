//! CLI command tests
//!
//! This module contains all tests for the CLI commands.

use std::sync::Arc;

use chrono::NaiveDate;
use spendlens_core::{
    BootstrapOutcome, Budget, Cache, Expense, MemoryStore, RemoteStore, SyncController,
};

use crate::commands::{self, money, truncate};

fn expense(id: &str, amount: f64, category: &str, date: &str, description: &str) -> Expense {
    Expense {
        id: id.to_string(),
        amount,
        category: category.to_string(),
        date: date.to_string(),
        description: description.to_string(),
    }
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
}

async fn setup_controller() -> (SyncController, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::with_data(
        vec![
            expense("e1", 50.0, "Food", "2024-01-01", "Groceries"),
            expense("e2", 30.0, "Food", "2024-01-02", "Takeout"),
            expense("e3", 20.0, "Transportation", "2024-01-03", "Bus pass"),
        ],
        vec![Budget::new("Food", 100.0)],
    ));
    let controller = SyncController::new(store.clone(), Arc::new(Cache::new()));
    controller.bootstrap().await;
    (controller, store)
}

// ========== Helper Tests ==========

#[test]
fn test_truncate() {
    assert_eq!(truncate("short", 10), "short");
    assert_eq!(truncate("a long description", 10), "a long ...");
    assert_eq!(truncate("café au lait", 6), "caf...");
}

#[test]
fn test_money() {
    assert_eq!(money(12.5), "$12.50");
    assert_eq!(money(0.0), "$0.00");
}

#[test]
fn test_parse_category_canonicalizes() {
    let category = commands::parse_category("food").unwrap();
    assert_eq!(category.as_str(), "Food");
}

#[test]
fn test_parse_category_unknown() {
    let err = commands::parse_category("Groceries").unwrap_err();
    assert!(err.to_string().contains("Transportation"));
}

// ========== Config Tests ==========

#[test]
fn test_load_config_api_url_flag_wins() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "api_url = \"http://from-file:3001\"\n").unwrap();

    let config = commands::load_config(Some(&path), Some("http://from-flag:9000")).unwrap();
    assert_eq!(config.api_url, "http://from-flag:9000");
}

#[test]
fn test_load_config_rejects_empty_url() {
    let result = commands::load_config(None, Some("  "));
    assert!(result.is_err());
}

#[test]
fn test_bootstrap_notice_names_missing_collection() {
    let url = "http://localhost:3001";
    let outcome = |expenses_loaded, budgets_loaded| BootstrapOutcome {
        expenses_loaded,
        budgets_loaded,
    };

    assert_eq!(commands::bootstrap_notice(&outcome(true, true), url), None);

    let budgets_only = commands::bootstrap_notice(&outcome(true, false), url).unwrap();
    assert!(budgets_only.contains("load budgets"));
    assert!(!budgets_only.contains("expenses"));

    let expenses_only = commands::bootstrap_notice(&outcome(false, true), url).unwrap();
    assert!(expenses_only.contains("load expenses from"));
    assert!(!expenses_only.contains("budgets"));

    let both = commands::bootstrap_notice(&outcome(false, false), url).unwrap();
    assert!(both.contains("expenses and budgets"));
}

// ========== Expense Command Tests ==========

#[tokio::test]
async fn test_cmd_list() {
    let (controller, _) = setup_controller().await;
    assert!(commands::cmd_list(&controller, None, None, 20, false).is_ok());
    assert!(commands::cmd_list(&controller, Some("food"), Some("take"), 5, true).is_ok());
}

#[tokio::test]
async fn test_cmd_list_unknown_category() {
    let (controller, _) = setup_controller().await;
    assert!(commands::cmd_list(&controller, Some("Pets"), None, 20, false).is_err());
}

#[tokio::test]
async fn test_cmd_add_defaults_date_to_today() {
    let (controller, store) = setup_controller().await;

    commands::cmd_add(&controller, 12.5, "utilities", None, "Water bill", today())
        .await
        .unwrap();

    let expenses = controller.cache().current_expenses();
    let added = expenses
        .iter()
        .find(|e| e.description == "Water bill")
        .unwrap();
    assert_eq!(added.date, "2024-01-15");
    assert_eq!(added.category, "Utilities");
    assert_eq!(store.list_expenses().await.unwrap().len(), 4);
}

#[tokio::test]
async fn test_cmd_add_rejects_bad_input() {
    let (controller, _) = setup_controller().await;

    let bad_date =
        commands::cmd_add(&controller, 10.0, "Food", Some("01/02/2024"), "", today()).await;
    assert!(bad_date.is_err());

    let bad_amount = commands::cmd_add(&controller, -5.0, "Food", None, "", today()).await;
    assert!(bad_amount.is_err());

    assert_eq!(controller.cache().current_expenses().len(), 3);
}

#[tokio::test]
async fn test_cmd_update() {
    let (controller, _) = setup_controller().await;

    commands::cmd_update(&controller, "e3", Some(25.0), None, None, Some("Monthly pass"))
        .await
        .unwrap();

    let expenses = controller.cache().current_expenses();
    let updated = expenses.iter().find(|e| e.id == "e3").unwrap();
    assert_eq!(updated.amount, 25.0);
    assert_eq!(updated.description, "Monthly pass");
    assert_eq!(updated.category, "Transportation");
}

#[tokio::test]
async fn test_cmd_update_requires_a_field() {
    let (controller, _) = setup_controller().await;
    let result = commands::cmd_update(&controller, "e3", None, None, None, None).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_cmd_delete() {
    let (controller, _) = setup_controller().await;

    commands::cmd_delete(&controller, "e1").await.unwrap();
    assert_eq!(controller.cache().current_expenses().len(), 2);

    let missing = commands::cmd_delete(&controller, "e1").await;
    assert!(missing.is_err());
}

#[tokio::test]
async fn test_cmd_delete_store_down() {
    let (controller, store) = setup_controller().await;
    store.set_failing(true);

    assert!(commands::cmd_delete(&controller, "e1").await.is_err());
    assert_eq!(controller.cache().current_expenses().len(), 3);
}

// ========== Budget Command Tests ==========

#[tokio::test]
async fn test_cmd_budget_set_and_list() {
    let (controller, _) = setup_controller().await;

    commands::cmd_budget_set(&controller, "transportation", 15.0)
        .await
        .unwrap();

    let budgets = controller.cache().current_budgets();
    assert_eq!(budgets.len(), 2);
    assert!(budgets
        .iter()
        .any(|b| b.category == "Transportation" && b.limit == 15.0));

    assert!(commands::cmd_budget_list(&controller, false).is_ok());
    assert!(commands::cmd_budget_list(&controller, true).is_ok());
}

#[tokio::test]
async fn test_cmd_budget_set_negative_limit() {
    let (controller, _) = setup_controller().await;
    let result = commands::cmd_budget_set(&controller, "Food", -1.0).await;
    assert!(result.is_err());
    assert_eq!(controller.cache().current_budgets()[0].limit, 100.0);
}

// ========== Report Command Tests ==========

#[tokio::test]
async fn test_cmd_summary() {
    let (controller, _) = setup_controller().await;
    assert!(commands::cmd_summary(&controller, today(), 5, false).is_ok());
    assert!(commands::cmd_summary(&controller, today(), 5, true).is_ok());
}

#[tokio::test]
async fn test_cmd_trend() {
    let (controller, _) = setup_controller().await;
    assert!(commands::cmd_trend(&controller, today(), 3, false).is_ok());
    assert!(commands::cmd_trend(&controller, today(), 3, true).is_ok());
}

#[tokio::test]
async fn test_reports_on_empty_cache() {
    let controller = SyncController::new(Arc::new(MemoryStore::new()), Arc::new(Cache::new()));
    controller.bootstrap().await;

    assert!(commands::cmd_summary(&controller, today(), 5, false).is_ok());
    assert!(commands::cmd_trend(&controller, today(), 5, false).is_ok());
    assert!(commands::cmd_budget_list(&controller, false).is_ok());
}

// ========== Export Command Tests ==========

#[tokio::test]
async fn test_cmd_export_writes_file() {
    let (controller, _) = setup_controller().await;
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.csv");

    commands::cmd_export(&controller, Some(&path), today()).unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    let mut lines = content.lines();
    assert_eq!(lines.next(), Some("ID,Amount,Category,Date,Description"));
    assert_eq!(lines.count(), 3);
    assert!(content.contains("e1,50,Food,2024-01-01,\"Groceries\""));
}

#[tokio::test]
async fn test_cmd_export_empty_is_not_an_error() {
    let controller = SyncController::new(Arc::new(MemoryStore::new()), Arc::new(Cache::new()));
    controller.bootstrap().await;
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.csv");

    commands::cmd_export(&controller, Some(&path), today()).unwrap();
    assert!(!path.exists());
}
