//! Monthly budget models
//!
//! A budget caps spending for one category in one month. A budget without a
//! category is an overall budget for the month. The backend keeps at most one
//! budget per `(category, month)` and upserts on that pair.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::category::Category;
use super::money::Money;
use super::month::MonthKey;

/// A budget as returned by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    pub id: String,

    /// `None` for an overall budget (empty category on the wire)
    #[serde(
        default,
        deserialize_with = "deserialize_opt_category",
        serialize_with = "serialize_opt_category"
    )]
    pub category: Option<Category>,

    pub amount: Money,

    pub month: MonthKey,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl Budget {
    /// Name shown in lists and tables
    pub fn category_label(&self) -> &'static str {
        self.category.map(|c| c.name()).unwrap_or("Overall")
    }

    /// True if this budget occupies the given `(category, month)` slot
    pub fn occupies(&self, category: Option<Category>, month: &MonthKey) -> bool {
        self.category == category && &self.month == month
    }
}

/// Body for creating or updating a budget
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewBudget {
    pub amount: Money,
    pub month: MonthKey,
    #[serde(serialize_with = "serialize_opt_category")]
    pub category: Option<Category>,
}

impl NewBudget {
    pub fn new(amount: Money, month: MonthKey, category: Option<Category>) -> Self {
        Self {
            amount,
            month,
            category,
        }
    }
}

fn deserialize_opt_category<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<Category>, D::Error> {
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw
        .filter(|s| !s.trim().is_empty())
        .map(|s| Category::from_wire(&s)))
}

fn serialize_opt_category<S: Serializer>(
    category: &Option<Category>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(category.map(|c| c.name()).unwrap_or(""))
}
