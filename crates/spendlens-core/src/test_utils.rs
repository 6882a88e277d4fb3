//! Test utilities for spendlens-core
//!
//! This module provides a mock remote store server that speaks the same REST
//! surface as the real backend, for development and integration tests.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use axum::{
    extract::{Json, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, put},
    Router,
};
use serde::Deserialize;
use tokio::sync::oneshot;

use crate::models::{Budget, Expense, ExpensePatch};

#[derive(Default)]
struct MockState {
    expenses: Mutex<Vec<Expense>>,
    budgets: Mutex<Vec<Budget>>,
    failing: AtomicBool,
}

type SharedState = Arc<MockState>;

/// Mock remote store server for testing and development
pub struct MockStoreServer {
    addr: SocketAddr,
    state: SharedState,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockStoreServer {
    /// Start the mock server on an available port
    pub async fn start() -> Self {
        Self::start_with(Vec::new(), Vec::new()).await
    }

    /// Start the mock server pre-populated with records
    pub async fn start_with(expenses: Vec<Expense>, budgets: Vec<Budget>) -> Self {
        let state: SharedState = Arc::new(MockState {
            expenses: Mutex::new(expenses),
            budgets: Mutex::new(budgets),
            failing: AtomicBool::new(false),
        });

        let app = Router::new()
            .route("/api/expenses", get(list_expenses).post(create_expense))
            .route(
                "/api/expenses/:id",
                put(update_expense).delete(delete_expense),
            )
            .route("/api/budgets", get(list_budgets).post(upsert_budget))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let (shutdown_tx, shutdown_rx) = oneshot::channel();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    shutdown_rx.await.ok();
                })
                .await
                .unwrap();
        });

        Self {
            addr,
            state,
            shutdown_tx: Some(shutdown_tx),
        }
    }

    /// Get the base URL for this mock server
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Make every route answer 500 until switched back
    pub fn set_failing(&self, failing: bool) {
        self.state.failing.store(failing, Ordering::SeqCst);
    }

    /// Records currently held by the server
    pub fn expenses(&self) -> Vec<Expense> {
        self.state.expenses.lock().unwrap().clone()
    }

    pub fn budgets(&self) -> Vec<Budget> {
        self.state.budgets.lock().unwrap().clone()
    }

    /// Stop the mock server
    pub fn stop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for MockStoreServer {
    fn drop(&mut self) {
        self.stop();
    }
}

fn error(status: StatusCode, message: &str) -> Response {
    (status, Json(serde_json::json!({ "error": message }))).into_response()
}

fn unavailable(state: &MockState) -> Option<Response> {
    state
        .failing
        .load(Ordering::SeqCst)
        .then(|| error(StatusCode::INTERNAL_SERVER_ERROR, "database unavailable"))
}

/// Create body; the id is normally client-generated
#[derive(Deserialize)]
struct CreateExpense {
    id: Option<String>,
    amount: f64,
    category: String,
    date: String,
    #[serde(default, deserialize_with = "crate::models::null_as_empty")]
    description: String,
}

async fn list_expenses(State(state): State<SharedState>) -> Response {
    if let Some(resp) = unavailable(&state) {
        return resp;
    }
    Json(state.expenses.lock().unwrap().clone()).into_response()
}

async fn create_expense(
    State(state): State<SharedState>,
    Json(body): Json<CreateExpense>,
) -> Response {
    if let Some(resp) = unavailable(&state) {
        return resp;
    }
    let expense = Expense {
        id: body
            .id
            .unwrap_or_else(|| uuid::Uuid::new_v4().to_string()),
        amount: body.amount,
        category: body.category,
        date: body.date,
        description: body.description,
    };
    state.expenses.lock().unwrap().push(expense.clone());
    (StatusCode::CREATED, Json(expense)).into_response()
}

async fn update_expense(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    Json(patch): Json<ExpensePatch>,
) -> Response {
    if let Some(resp) = unavailable(&state) {
        return resp;
    }
    let mut expenses = state.expenses.lock().unwrap();
    match expenses.iter_mut().find(|e| e.id == id) {
        Some(expense) => {
            expense.apply(&patch);
            Json(expense.clone()).into_response()
        }
        None => error(StatusCode::NOT_FOUND, "Expense not found"),
    }
}

async fn delete_expense(State(state): State<SharedState>, Path(id): Path<String>) -> Response {
    if let Some(resp) = unavailable(&state) {
        return resp;
    }
    let mut expenses = state.expenses.lock().unwrap();
    let before = expenses.len();
    expenses.retain(|e| e.id != id);
    if expenses.len() == before {
        return error(StatusCode::NOT_FOUND, "Expense not found");
    }
    StatusCode::NO_CONTENT.into_response()
}

async fn list_budgets(State(state): State<SharedState>) -> Response {
    if let Some(resp) = unavailable(&state) {
        return resp;
    }
    Json(state.budgets.lock().unwrap().clone()).into_response()
}

async fn upsert_budget(State(state): State<SharedState>, Json(budget): Json<Budget>) -> Response {
    if let Some(resp) = unavailable(&state) {
        return resp;
    }
    let mut budgets = state.budgets.lock().unwrap();
    match budgets.iter_mut().find(|b| b.category == budget.category) {
        Some(existing) => *existing = budget.clone(),
        None => budgets.push(budget.clone()),
    }
    (StatusCode::CREATED, Json(budget)).into_response()
}
