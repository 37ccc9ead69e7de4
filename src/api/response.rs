//! Normalized API results and backend payload shapes

use serde::{Deserialize, Serialize};

use crate::error::{TrackerError, TrackerResult};
use crate::models::{Budget, Expense, Money, MonthKey};

/// Outcome of one backend call
///
/// Every transport, parse and HTTP error is folded into `Failure` with a
/// single message, so callers never see a panic or an `Err` from the client.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiResponse<T> {
    Success(T),
    Failure(String),
}

impl<T> ApiResponse<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, ApiResponse::Success(_))
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            ApiResponse::Success(data) => Some(data),
            ApiResponse::Failure(_) => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            ApiResponse::Success(_) => None,
            ApiResponse::Failure(msg) => Some(msg),
        }
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> ApiResponse<U> {
        match self {
            ApiResponse::Success(data) => ApiResponse::Success(f(data)),
            ApiResponse::Failure(msg) => ApiResponse::Failure(msg),
        }
    }

    /// Convert to a crate result, failures becoming `TrackerError::Api`
    pub fn into_result(self) -> TrackerResult<T> {
        match self {
            ApiResponse::Success(data) => Ok(data),
            ApiResponse::Failure(msg) => Err(TrackerError::Api(msg)),
        }
    }
}

/// `GET /api/users/{id}/expenses`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseList {
    pub expenses: Vec<Expense>,
    #[serde(default)]
    pub month: Option<MonthKey>,
    #[serde(default)]
    pub total_count: u32,
}

impl ExpenseList {
    pub fn total(&self) -> Money {
        self.expenses.iter().map(|e| e.amount).sum()
    }
}

/// `GET /api/users/{id}/budgets`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetList {
    pub budgets: Vec<Budget>,
    #[serde(default)]
    pub month: Option<MonthKey>,
    #[serde(default)]
    pub total_budget: Money,
    #[serde(default)]
    pub count: u32,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ExpenseEnvelope {
    pub expense: Expense,
}

#[derive(Debug, Deserialize)]
pub(crate) struct BudgetEnvelope {
    pub budget: Budget,
}

#[derive(Debug, Deserialize)]
pub(crate) struct MessageEnvelope {
    #[serde(default)]
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors() {
        let ok: ApiResponse<u32> = ApiResponse::Success(3);
        assert!(ok.is_success());
        assert_eq!(ok.data(), Some(&3));
        assert_eq!(ok.error(), None);
        assert_eq!(ok.map(|n| n * 2), ApiResponse::Success(6));

        let failed: ApiResponse<u32> = ApiResponse::Failure("not found".into());
        assert!(!failed.is_success());
        assert_eq!(failed.error(), Some("not found"));
        assert_eq!(failed.clone().map(|n| n * 2).error(), Some("not found"));

        let err = failed.into_result().unwrap_err();
        assert_eq!(err.to_string(), "not found");
    }

    #[test]
    fn test_expense_list_total() {
        let json = r#"{"expenses":[
            {"id":"1","amount":10.25,"category":"Travel","date":"2024-01-02T00:00:00"},
            {"id":"2","amount":4.75,"category":"Other","date":"2024-01-03T00:00:00"}
        ],"month":"2024-01","total_count":2}"#;
        let list: ExpenseList = serde_json::from_str(json).unwrap();
        assert_eq!(list.total(), Money::from_cents(1500));
    }
}
