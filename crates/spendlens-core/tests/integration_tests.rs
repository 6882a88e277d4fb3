//! Integration tests for spendlens-core
//!
//! These tests exercise the full bootstrap → mutate → aggregate → forecast →
//! export workflow against the mock REST store.

use std::sync::Arc;

use spendlens_core::{
    aggregate, export, forecast,
    test_utils::MockStoreServer,
    Budget, Cache, Category, CollectingReporter, Dashboard, ErrorKind, Expense, ExpenseDraft,
    ExpensePatch, HttpRemoteStore, Snapshot, SyncController, Topic,
};

fn expense(id: &str, amount: f64, category: &str, date: &str, description: &str) -> Expense {
    Expense {
        id: id.to_string(),
        amount,
        category: category.to_string(),
        date: date.to_string(),
        description: description.to_string(),
    }
}

fn controller_for(server: &MockStoreServer) -> (SyncController, Arc<CollectingReporter>) {
    let reporter = Arc::new(CollectingReporter::new());
    let controller = SyncController::new(
        Arc::new(HttpRemoteStore::new(&server.url())),
        Arc::new(Cache::new()),
    )
    .with_reporter(reporter.clone());
    (controller, reporter)
}

// =============================================================================
// Sync Workflow
// =============================================================================

#[tokio::test]
async fn test_bootstrap_and_analytics() {
    let server = MockStoreServer::start_with(
        vec![
            expense("1", 50.0, "Food", "2023-01-01", "Lunch"),
            expense("2", 30.0, "Food", "2023-01-02", "Dinner"),
            expense("3", 20.0, "Transportation", "2023-01-03", "Bus"),
        ],
        vec![Budget::new("Food", 100.0)],
    )
    .await;
    let (controller, reporter) = controller_for(&server);

    let outcome = controller.bootstrap().await;
    assert!(outcome.is_complete());
    assert!(reporter.entries().is_empty());

    let expenses = controller.cache().current_expenses();
    let budgets = controller.cache().current_budgets();

    let by_category = aggregate::by_category(&expenses);
    assert_eq!(by_category["Food"], 80.0);
    assert_eq!(by_category["Transportation"], 20.0);

    let status = aggregate::budget_status(&expenses, &budgets, &Category::ALL);
    assert_eq!(status[0].category, Category::Food);
    assert_eq!(status[0].percentage, 80.0);
    assert!(!status[0].over_budget);
    assert!(status[1].over_budget);

    let series = aggregate::over_time(&expenses);
    let predicted = forecast::predict(&series, 2);
    assert_eq!(predicted.len(), 2);
}

#[tokio::test]
async fn test_bootstrap_with_unreachable_store() {
    let server = MockStoreServer::start().await;
    server.set_failing(true);
    let (controller, reporter) = controller_for(&server);

    let outcome = controller.bootstrap().await;

    assert!(!outcome.is_complete());
    assert!(controller.cache().current_expenses().is_empty());
    assert!(controller.cache().current_budgets().is_empty());
    assert_eq!(reporter.entries().len(), 2);

    // Analytics still work on the empty fallback
    let dashboard = Dashboard::from_cache(
        controller.cache(),
        chrono::NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        5,
    );
    assert_eq!(dashboard.total, 0.0);
    assert_eq!(dashboard.budget_status.len(), 6);
}

#[tokio::test]
async fn test_add_update_delete_round_trip() {
    let server = MockStoreServer::start().await;
    let (controller, _) = controller_for(&server);
    controller.bootstrap().await;

    let created = controller
        .add_expense(
            ExpenseDraft::new(25.0, "Transportation", "2023-01-02").with_description("Bus ticket"),
        )
        .await
        .unwrap();
    assert_eq!(created.amount, 25.0);
    assert_eq!(server.expenses()[0].id, created.id);
    assert_eq!(controller.cache().current_expenses().len(), 1);

    let updated = controller
        .update_expense(
            &created.id,
            ExpensePatch {
                amount: Some(27.5),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.amount, 27.5);
    assert_eq!(controller.cache().current_expenses()[0].amount, 27.5);
    assert_eq!(controller.cache().current_expenses()[0].description, "Bus ticket");

    controller.delete_expense(&created.id).await.unwrap();
    assert!(controller.cache().current_expenses().is_empty());
    assert!(server.expenses().is_empty());
}

#[tokio::test]
async fn test_delete_nonexistent_leaves_cache() {
    let server =
        MockStoreServer::start_with(vec![expense("1", 10.0, "Food", "2023-01-01", "")], vec![])
            .await;
    let (controller, _) = controller_for(&server);
    controller.bootstrap().await;

    let err = controller.delete_expense("missing").await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert_eq!(controller.cache().current_expenses().len(), 1);
}

#[tokio::test]
async fn test_set_budget_upserts() {
    let server = MockStoreServer::start_with(vec![], vec![Budget::new("Food", 100.0)]).await;
    let (controller, _) = controller_for(&server);
    controller.bootstrap().await;

    controller.set_budget("Food", 200.0).await.unwrap();
    controller.set_budget("Utilities", 75.0).await.unwrap();

    let budgets = controller.cache().current_budgets();
    assert_eq!(budgets.len(), 2);
    let food: Vec<_> = budgets.iter().filter(|b| b.category == "Food").collect();
    assert_eq!(food.len(), 1);
    assert_eq!(food[0].limit, 200.0);
}

#[tokio::test]
async fn test_failed_mutation_surfaces_network_failure() {
    let server = MockStoreServer::start().await;
    let (controller, _) = controller_for(&server);
    controller.bootstrap().await;
    server.set_failing(true);

    let err = controller.set_budget("Food", 10.0).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::NetworkFailure);
    assert!(controller.cache().current_budgets().is_empty());
}

#[tokio::test]
async fn test_subscribers_see_refetched_list() {
    let server = MockStoreServer::start().await;
    let (controller, _) = controller_for(&server);
    let mut stream = controller.cache().on_change(Topic::Expenses);

    controller
        .add_expense(ExpenseDraft::new(12.0, "Food", "2023-02-01"))
        .await
        .unwrap();

    match stream.next().await {
        Some(Snapshot::Expenses(list)) => assert_eq!(list.len(), 1),
        other => panic!("unexpected snapshot: {:?}", other),
    }
}

// =============================================================================
// Export
// =============================================================================

#[tokio::test]
async fn test_export_current_snapshot() {
    let server = MockStoreServer::start_with(
        vec![expense("1", 50.0, "Food", "2023-01-01", "Lunch \"special\"")],
        vec![],
    )
    .await;
    let (controller, _) = controller_for(&server);
    controller.bootstrap().await;

    let csv = export::export_csv(&controller.cache().current_expenses()).unwrap();

    assert!(csv.starts_with("ID,Amount,Category,Date,Description\n"));
    assert!(csv.contains(",\"Lunch \"\"special\"\"\"\n"));
}

#[tokio::test]
async fn test_export_empty_snapshot() {
    let server = MockStoreServer::start().await;
    let (controller, _) = controller_for(&server);
    controller.bootstrap().await;

    let err = export::export_csv(&controller.cache().current_expenses()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Local);
}
