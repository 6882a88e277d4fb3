//! REST remote store
//!
//! HTTP client for the expense API:
//!
//! | Operation       | Route                        | Success          |
//! |-----------------|------------------------------|------------------|
//! | list expenses   | `GET /api/expenses`          | 200, `[Expense]` |
//! | create expense  | `POST /api/expenses`         | 201, `Expense`   |
//! | update expense  | `PUT /api/expenses/{id}`     | 200, `Expense`   |
//! | delete expense  | `DELETE /api/expenses/{id}`  | 204              |
//! | list budgets    | `GET /api/budgets`           | 200, `[Budget]`  |
//! | upsert budget   | `POST /api/budgets`          | 201, `Budget`    |
//!
//! A 404 on update/delete becomes `Error::NotFound`; every other non-2xx
//! status becomes `Error::Network`.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode, Url};
use tracing::debug;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::models::{Budget, Expense, ExpensePatch};

use super::RemoteStore;

/// Remote store reached over HTTP
#[derive(Clone)]
pub struct HttpRemoteStore {
    http_client: Client,
    base_url: String,
}

impl HttpRemoteStore {
    /// Create a client without a request timeout
    pub fn new(base_url: &str) -> Self {
        Self {
            http_client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Create a client that gives up on requests after `timeout`
    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self> {
        let http_client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        match config.request_timeout() {
            Some(timeout) => Self::with_timeout(&config.api_url, timeout),
            None => Ok(Self::new(&config.api_url)),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn expenses_url(&self) -> String {
        format!("{}/api/expenses", self.base_url)
    }

    /// Record URL with `id` percent-encoded as a single path segment
    fn expense_url(&self, id: &str) -> Result<Url> {
        let mut url = Url::parse(&self.expenses_url())
            .map_err(|e| Error::Config(format!("Invalid api_url {}: {}", self.base_url, e)))?;
        url.path_segments_mut()
            .map_err(|_| Error::Config(format!("api_url {} cannot take a path", self.base_url)))?
            .push(id);
        Ok(url)
    }

    fn budgets_url(&self) -> String {
        format!("{}/api/budgets", self.base_url)
    }
}

/// Map a non-2xx response onto the error taxonomy
async fn check(response: Response, operation: &str, id: Option<&str>) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    if status == StatusCode::NOT_FOUND {
        if let Some(id) = id {
            return Err(Error::NotFound(format!("expense {}", id)));
        }
    }

    let body = response.text().await.unwrap_or_default();
    Err(Error::Network(format!(
        "{} returned {}: {}",
        operation,
        status,
        body.trim()
    )))
}

#[async_trait]
impl RemoteStore for HttpRemoteStore {
    async fn list_expenses(&self) -> Result<Vec<Expense>> {
        let response = self.http_client.get(self.expenses_url()).send().await?;
        let response = check(response, "list expenses", None).await?;
        let expenses: Vec<Expense> = response.json().await?;
        debug!(count = expenses.len(), "Fetched expenses");
        Ok(expenses)
    }

    async fn create_expense(&self, expense: &Expense) -> Result<Expense> {
        let response = self
            .http_client
            .post(self.expenses_url())
            .json(expense)
            .send()
            .await?;
        let response = check(response, "create expense", None).await?;
        Ok(response.json().await?)
    }

    async fn update_expense(&self, id: &str, patch: &ExpensePatch) -> Result<Expense> {
        let response = self
            .http_client
            .put(self.expense_url(id)?)
            .json(patch)
            .send()
            .await?;
        let response = check(response, "update expense", Some(id)).await?;
        Ok(response.json().await?)
    }

    async fn delete_expense(&self, id: &str) -> Result<()> {
        let response = self.http_client.delete(self.expense_url(id)?).send().await?;
        check(response, "delete expense", Some(id)).await?;
        Ok(())
    }

    async fn list_budgets(&self) -> Result<Vec<Budget>> {
        let response = self.http_client.get(self.budgets_url()).send().await?;
        let response = check(response, "list budgets", None).await?;
        let budgets: Vec<Budget> = response.json().await?;
        debug!(count = budgets.len(), "Fetched budgets");
        Ok(budgets)
    }

    async fn upsert_budget(&self, budget: &Budget) -> Result<Budget> {
        let response = self
            .http_client
            .post(self.budgets_url())
            .json(budget)
            .send()
            .await?;
        let response = check(response, "upsert budget", None).await?;
        Ok(response.json().await?)
    }
}
