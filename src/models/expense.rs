//! Expense models
//!
//! `Expense` is what the backend returns; `NewExpense` and `ExpenseUpdate`
//! are the request bodies for creating and partially updating one.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::category::Category;
use super::money::Money;

/// A recorded expense
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    /// Backend document id
    pub id: String,

    pub amount: Money,

    pub category: Category,

    /// Calendar date of the expense. The backend sends an ISO datetime;
    /// only the date part is kept.
    #[serde(with = "iso_date")]
    pub date: NaiveDate,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

/// Body for creating an expense
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewExpense {
    pub amount: Money,
    pub category: Category,
    #[serde(serialize_with = "iso_date::serialize")]
    pub date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl NewExpense {
    pub fn new(amount: Money, category: Category, date: NaiveDate) -> Self {
        Self {
            amount,
            category,
            date,
            note: None,
        }
    }

    /// Attach a note; blank notes are dropped
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        let note = note.into();
        let trimmed = note.trim();
        self.note = if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        };
        self
    }
}

/// Partial update for an expense; absent fields are left unchanged
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ExpenseUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_opt_date"
    )]
    pub date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl ExpenseUpdate {
    /// True when no field would change
    pub fn is_empty(&self) -> bool {
        self.amount.is_none()
            && self.category.is_none()
            && self.date.is_none()
            && self.note.is_none()
    }
}

fn serialize_opt_date<S: Serializer>(
    date: &Option<NaiveDate>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match date {
        Some(d) => iso_date::serialize(d, serializer),
        None => serializer.serialize_none(),
    }
}

/// Date parsing shared by every model that carries a calendar date
pub mod iso_date {
    use super::*;

    pub const FORMAT: &str = "%Y-%m-%d";

    /// Parse `YYYY-MM-DD`, ignoring any time component that follows
    pub fn parse(s: &str) -> Option<NaiveDate> {
        let s = s.trim();
        let date_part = s.get(..10).unwrap_or(s);
        NaiveDate::parse_from_str(date_part, FORMAT).ok()
    }

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&date.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).ok_or_else(|| serde::de::Error::custom(format!("invalid date '{}'", raw)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_backend_expense() {
        let json = r#"{
            "id": "abc123",
            "amount": 42.5,
            "category": "Food & Dining",
            "date": "2024-01-15T00:00:00",
            "note": "Lunch",
            "user_id": "u1",
            "created_at": "2024-01-15T12:30:00.123456"
        }"#;
        let expense: Expense = serde_json::from_str(json).unwrap();
        assert_eq!(expense.id, "abc123");
        assert_eq!(expense.amount, Money::from_cents(4250));
        assert_eq!(expense.category, Category::FoodDining);
        assert_eq!(expense.date, NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
        assert_eq!(expense.note.as_deref(), Some("Lunch"));
        assert!(expense.updated_at.is_none());
    }

    #[test]
    fn test_new_expense_body() {
        let body = NewExpense::new(
            Money::from_cents(1999),
            Category::Travel,
            NaiveDate::from_ymd_opt(2024, 3, 9).unwrap(),
        )
        .with_note("   ");
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"amount": 19.99, "category": "Travel", "date": "2024-03-09"})
        );
    }

    #[test]
    fn test_update_skips_absent_fields() {
        let update = ExpenseUpdate {
            date: NaiveDate::from_ymd_opt(2024, 2, 1),
            ..Default::default()
        };
        assert!(!update.is_empty());
        let value = serde_json::to_value(&update).unwrap();
        assert_eq!(value, serde_json::json!({"date": "2024-02-01"}));
        assert!(ExpenseUpdate::default().is_empty());
    }

    #[test]
    fn test_iso_date_parse() {
        assert!(iso_date::parse("2024-02-30").is_none());
        assert!(iso_date::parse("yesterday").is_none());
        assert_eq!(
            iso_date::parse("2024-02-29T10:00:00+00:00"),
            NaiveDate::from_ymd_opt(2024, 2, 29)
        );
    }
}
