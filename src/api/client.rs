//! Typed client for the finance backend
//!
//! Wraps the REST surface, attaches the bearer token and folds every outcome
//! into an `ApiResponse`.

use std::time::Duration;

use reqwest::blocking::{Client, RequestBuilder};
use reqwest::header::CONTENT_TYPE;
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use super::response::{
    ApiResponse, BudgetEnvelope, BudgetList, ExpenseEnvelope, ExpenseList, MessageEnvelope,
};
use crate::error::{TrackerError, TrackerResult};
use crate::models::{
    Budget, Expense, ExpenseUpdate, HealthStatus, MonthKey, NewBudget, NewExpense, Report,
    SummaryRecord,
};
use crate::session::{SecretString, SessionEvent};

/// Backend client
///
/// Cheap to clone; clones share the connection pool. Each clone holds its own
/// copy of the token.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    token: Option<SecretString>,
}

impl ApiClient {
    pub fn new(base_url: &str, timeout: Duration) -> TrackerResult<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TrackerError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url: base_url.trim().trim_end_matches('/').to_string(),
            token: None,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn set_token(&mut self, token: Option<SecretString>) {
        self.token = token;
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    /// Follow a session transition: keep the new token, or drop it on sign-out
    pub fn apply_session_event(&mut self, event: &SessionEvent) {
        self.token = event.token().cloned();
    }

    pub fn health_check(&self) -> ApiResponse<HealthStatus> {
        self.send(self.request(Method::GET, "/health"))
    }

    pub fn get_expenses(&self, user_id: &str, month: Option<&MonthKey>) -> ApiResponse<ExpenseList> {
        let mut builder = self.request(Method::GET, &format!("/api/users/{}/expenses", user_id));
        if let Some(month) = month {
            builder = builder.query(&[("month", month.as_str())]);
        }
        self.send(builder)
    }

    pub fn add_expense(&self, user_id: &str, expense: &NewExpense) -> ApiResponse<Expense> {
        let builder = self
            .request(Method::POST, &format!("/api/users/{}/expenses", user_id))
            .json(expense);
        self.send::<ExpenseEnvelope>(builder).map(|env| env.expense)
    }

    pub fn update_expense(
        &self,
        user_id: &str,
        expense_id: &str,
        update: &ExpenseUpdate,
    ) -> ApiResponse<Expense> {
        let builder = self
            .request(
                Method::PUT,
                &format!("/api/users/{}/expenses/{}", user_id, expense_id),
            )
            .json(update);
        self.send::<ExpenseEnvelope>(builder).map(|env| env.expense)
    }

    /// Returns the backend's confirmation message
    pub fn delete_expense(&self, user_id: &str, expense_id: &str) -> ApiResponse<String> {
        let builder = self.request(
            Method::DELETE,
            &format!("/api/users/{}/expenses/{}", user_id, expense_id),
        );
        self.send::<MessageEnvelope>(builder).map(|env| env.message)
    }

    pub fn get_budgets(&self, user_id: &str, month: Option<&MonthKey>) -> ApiResponse<BudgetList> {
        let mut builder = self.request(Method::GET, &format!("/api/users/{}/budgets", user_id));
        if let Some(month) = month {
            builder = builder.query(&[("month", month.as_str())]);
        }
        self.send(builder)
    }

    /// Create a budget, or replace the amount of the one already occupying
    /// the same `(category, month)`
    pub fn set_budget(&self, user_id: &str, budget: &NewBudget) -> ApiResponse<Budget> {
        let builder = self
            .request(Method::POST, &format!("/api/users/{}/budgets", user_id))
            .json(budget);
        self.send::<BudgetEnvelope>(builder).map(|env| env.budget)
    }

    pub fn delete_budget(&self, user_id: &str, budget_id: &str) -> ApiResponse<String> {
        let builder = self.request(
            Method::DELETE,
            &format!("/api/users/{}/budgets/{}", user_id, budget_id),
        );
        self.send::<MessageEnvelope>(builder).map(|env| env.message)
    }

    pub fn get_summary(&self, user_id: &str, month: &MonthKey) -> ApiResponse<SummaryRecord> {
        self.send(self.request(Method::GET, &format!("/api/summary/{}/{}", user_id, month)))
    }

    pub fn get_report(&self, user_id: &str, month: &MonthKey) -> ApiResponse<Report> {
        self.send(self.request(Method::GET, &format!("/api/report/{}/{}", user_id, month)))
    }

    fn request(&self, method: Method, endpoint: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, endpoint);
        debug!(method = method.as_str(), endpoint, "api request");
        let builder = self
            .http
            .request(method, url)
            .header(CONTENT_TYPE, "application/json");
        match &self.token {
            Some(token) => builder.bearer_auth(token.expose()),
            None => builder,
        }
    }

    fn send<T: DeserializeOwned>(&self, builder: RequestBuilder) -> ApiResponse<T> {
        let response = match builder.send() {
            Ok(response) => response,
            Err(e) => {
                warn!(error = %e, "api request failed");
                return ApiResponse::Failure(describe_transport_error(&e));
            }
        };

        let status = response.status();
        let body = match response.text() {
            Ok(body) => body,
            Err(e) => {
                warn!(error = %e, "failed to read api response");
                return ApiResponse::Failure(describe_transport_error(&e));
            }
        };

        normalize(status.as_u16(), status.canonical_reason().unwrap_or(""), &body)
    }
}

/// Fold a raw HTTP outcome into an `ApiResponse`
///
/// The body is parsed first; a non-JSON body is a failure whatever the status.
/// Error statuses prefer the body's `error` field.
pub fn normalize<T: DeserializeOwned>(status: u16, reason: &str, body: &str) -> ApiResponse<T> {
    let value: Value = match serde_json::from_str(body) {
        Ok(value) => value,
        Err(e) => {
            warn!(status, "api response is not JSON");
            return ApiResponse::Failure(format!("Invalid response from server: {}", e));
        }
    };

    if !(200..300).contains(&status) {
        let message = value
            .get("error")
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .unwrap_or_else(|| format!("HTTP {}: {}", status, reason).trim_end().to_string());
        warn!(status, error = %message, "api error response");
        return ApiResponse::Failure(message);
    }

    match serde_json::from_value(value) {
        Ok(data) => ApiResponse::Success(data),
        Err(e) => {
            warn!(error = %e, "api response has unexpected shape");
            ApiResponse::Failure(format!("Unexpected response: {}", e))
        }
    }
}

fn describe_transport_error(err: &reqwest::Error) -> String {
    let message = if err.is_timeout() {
        "Request timed out".to_string()
    } else if err.is_connect() {
        let target = err.url().map(|u| u.as_str()).unwrap_or("server");
        format!("Network error: could not connect to {}", target)
    } else {
        err.to_string()
    };
    if message.is_empty() {
        "Network error".to_string()
    } else {
        message
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_error_field_wins() {
        let resp: ApiResponse<Value> = normalize(404, "Not Found", r#"{"error":"not found"}"#);
        assert_eq!(resp, ApiResponse::Failure("not found".into()));
    }

    #[test]
    fn test_normalize_status_fallback() {
        let resp: ApiResponse<Value> = normalize(500, "Internal Server Error", "{}");
        assert_eq!(resp.error(), Some("HTTP 500: Internal Server Error"));
    }

    #[test]
    fn test_normalize_invalid_json() {
        let resp: ApiResponse<Value> = normalize(200, "OK", "<html>oops</html>");
        assert!(resp.error().unwrap().starts_with("Invalid response from server"));
    }

    #[test]
    fn test_normalize_unexpected_shape() {
        let resp: ApiResponse<HealthStatus> = normalize(200, "OK", r#"{"healthy":true}"#);
        assert!(resp.error().unwrap().starts_with("Unexpected response:"));
    }

    #[test]
    fn test_normalize_success() {
        let resp: ApiResponse<HealthStatus> =
            normalize(200, "OK", r#"{"status":"healthy","service":"Finance Tracker Backend"}"#);
        assert!(resp.data().unwrap().is_healthy());
    }

    #[test]
    fn test_session_events_drive_token() {
        let mut client = ApiClient::new("http://localhost:5000/", Duration::from_secs(1)).unwrap();
        assert_eq!(client.base_url(), "http://localhost:5000");
        assert!(!client.has_token());

        client.apply_session_event(&SessionEvent::TokenRefreshed {
            token: "abc".into(),
        });
        assert!(client.has_token());

        client.apply_session_event(&SessionEvent::SignedOut);
        assert!(!client.has_token());
    }
}
