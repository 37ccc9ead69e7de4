//! Expense categories
//!
//! The category list is fixed and shared by every form, table and report.
//! On the wire a category is its display name (`"Food & Dining"`).

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A spending category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    FoodDining,
    Transportation,
    Shopping,
    Entertainment,
    Utilities,
    Healthcare,
    Education,
    Travel,
    Other,
}

impl Category {
    /// All categories in display order
    pub const ALL: [Category; 9] = [
        Category::FoodDining,
        Category::Transportation,
        Category::Shopping,
        Category::Entertainment,
        Category::Utilities,
        Category::Healthcare,
        Category::Education,
        Category::Travel,
        Category::Other,
    ];

    /// Display name, also the wire value
    pub fn name(&self) -> &'static str {
        match self {
            Category::FoodDining => "Food & Dining",
            Category::Transportation => "Transportation",
            Category::Shopping => "Shopping",
            Category::Entertainment => "Entertainment",
            Category::Utilities => "Utilities",
            Category::Healthcare => "Healthcare",
            Category::Education => "Education",
            Category::Travel => "Travel",
            Category::Other => "Other",
        }
    }

    /// Short alias usable on the command line
    pub fn alias(&self) -> &'static str {
        match self {
            Category::FoodDining => "food-dining",
            Category::Transportation => "transportation",
            Category::Shopping => "shopping",
            Category::Entertainment => "entertainment",
            Category::Utilities => "utilities",
            Category::Healthcare => "healthcare",
            Category::Education => "education",
            Category::Travel => "travel",
            Category::Other => "other",
        }
    }

    /// Parse by display name or alias, case-insensitively
    pub fn parse(s: &str) -> Option<Self> {
        let needle = s.trim();
        Self::ALL.into_iter().find(|c| {
            c.name().eq_ignore_ascii_case(needle) || c.alias().eq_ignore_ascii_case(needle)
        })
    }

    /// Map a backend value to a category, falling back to `Other`
    pub fn from_wire(s: &str) -> Self {
        Self::parse(s).unwrap_or(Category::Other)
    }

    /// Index within `ALL`
    pub fn index(&self) -> usize {
        Self::ALL.iter().position(|c| c == self).unwrap_or(0)
    }

    /// The next category in display order, wrapping around
    pub fn cycle_next(&self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    /// The previous category in display order, wrapping around
    pub fn cycle_prev(&self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl Default for Category {
    fn default() -> Self {
        Category::FoodDining
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| {
            let known: Vec<&str> = Self::ALL.iter().map(|c| c.alias()).collect();
            format!("Unknown category '{}'. Use one of: {}", s, known.join(", "))
        })
    }
}

impl Serialize for Category {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for Category {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::from_wire(&raw))
    }
}
