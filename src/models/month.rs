//! Month key representation
//!
//! Every budget and summary is scoped to a calendar month identified by a
//! zero-padded `YYYY-MM` string. Because the key is always four-digit year and
//! two-digit month, comparing the strings orders months chronologically.

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// A validated `YYYY-MM` month key
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MonthKey(String);

impl MonthKey {
    /// Build a key from numeric parts
    pub fn new(year: i32, month: u32) -> Result<Self, MonthParseError> {
        if !(1000..=9999).contains(&year) {
            return Err(MonthParseError::InvalidYear(year));
        }
        if !(1..=12).contains(&month) {
            return Err(MonthParseError::InvalidMonth(month));
        }
        Ok(Self(format!("{:04}-{:02}", year, month)))
    }

    /// The month containing `date`
    pub fn from_date(date: NaiveDate) -> Self {
        Self(format!("{:04}-{:02}", date.year(), date.month()))
    }

    /// The current local month
    pub fn current() -> Self {
        Self::from_date(chrono::Local::now().date_naive())
    }

    /// Parse a `YYYY-MM` string
    pub fn parse(s: &str) -> Result<Self, MonthParseError> {
        let s = s.trim();
        let invalid = || MonthParseError::InvalidFormat(s.to_string());

        let (year, month) = s.split_once('-').ok_or_else(invalid)?;
        if year.len() != 4 || month.len() != 2 {
            return Err(invalid());
        }
        if !year.chars().chain(month.chars()).all(|c| c.is_ascii_digit()) {
            return Err(invalid());
        }

        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;
        Self::new(year, month)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn year(&self) -> i32 {
        self.0[..4].parse().unwrap_or_default()
    }

    pub fn month(&self) -> u32 {
        self.0[5..].parse().unwrap_or(1)
    }

    /// First day of the month
    pub fn start_date(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year(), self.month(), 1).unwrap_or_default()
    }

    /// Last day of the month (inclusive)
    pub fn end_date(&self) -> NaiveDate {
        match self.month() {
            12 => NaiveDate::from_ymd_opt(self.year(), 12, 31).unwrap_or_default(),
            m => {
                NaiveDate::from_ymd_opt(self.year(), m + 1, 1).unwrap_or_default()
                    - Duration::days(1)
            }
        }
    }

    /// Number of days in the month
    pub fn days(&self) -> u32 {
        self.end_date().day()
    }

    /// Check if a date falls within this month
    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year() && date.month() == self.month()
    }

    /// The following month; stays put at `9999-12`
    pub fn next(&self) -> Self {
        let (year, month) = match self.month() {
            12 => (self.year() + 1, 1),
            m => (self.year(), m + 1),
        };
        Self::new(year, month).unwrap_or_else(|_| self.clone())
    }

    /// The preceding month; stays put at `1000-01`
    pub fn prev(&self) -> Self {
        let (year, month) = match self.month() {
            1 => (self.year() - 1, 12),
            m => (self.year(), m - 1),
        };
        Self::new(year, month).unwrap_or_else(|_| self.clone())
    }

    /// Human label, e.g. "January 2024"
    pub fn label(&self) -> String {
        let name = MONTH_NAMES
            .get(self.month() as usize - 1)
            .copied()
            .unwrap_or("January");
        format!("{} {}", name, self.year())
    }

    /// The `count` months ending with this one, newest first
    pub fn trailing(&self, count: usize) -> Vec<MonthKey> {
        let mut months = Vec::with_capacity(count);
        let mut month = self.clone();
        for _ in 0..count {
            let prev = month.prev();
            let at_start = prev == month;
            months.push(month);
            if at_start {
                break;
            }
            month = prev;
        }
        months
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for MonthKey {
    type Error = MonthParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<MonthKey> for String {
    fn from(key: MonthKey) -> Self {
        key.0
    }
}

impl std::str::FromStr for MonthKey {
    type Err = MonthParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Error type for month key parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MonthParseError {
    InvalidFormat(String),
    InvalidMonth(u32),
    InvalidYear(i32),
}

impl fmt::Display for MonthParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MonthParseError::InvalidFormat(s) => {
                write!(f, "Invalid month format '{}'. Use YYYY-MM", s)
            }
            MonthParseError::InvalidMonth(m) => write!(f, "Invalid month: {}", m),
            MonthParseError::InvalidYear(y) => write!(f, "Invalid year: {}", y),
        }
    }
}

impl std::error::Error for MonthParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(s: &str) -> MonthKey {
        MonthKey::parse(s).unwrap()
    }

    #[test]
    fn test_parse_requires_zero_padding() {
        assert_eq!(key("2024-03").as_str(), "2024-03");
        assert!(MonthKey::parse("2024-3").is_err());
        assert!(MonthKey::parse("24-03").is_err());
        assert!(MonthKey::parse("2024-13").is_err());
        assert!(MonthKey::parse("2024-00").is_err());
        assert!(MonthKey::parse("2024/03").is_err());
        assert!(MonthKey::parse("2024-+3").is_err());
    }

    #[test]
    fn test_descending_sort() {
        let mut months = vec![key("2024-03"), key("2024-01"), key("2024-12")];
        months.sort_by(|a, b| b.cmp(a));
        let sorted: Vec<&str> = months.iter().map(|m| m.as_str()).collect();
        assert_eq!(sorted, vec!["2024-12", "2024-03", "2024-01"]);
    }

    #[test]
    fn test_navigation_wraps_years() {
        assert_eq!(key("2024-12").next(), key("2025-01"));
        assert_eq!(key("2025-01").prev(), key("2024-12"));
        assert_eq!(key("2024-06").next().prev(), key("2024-06"));
    }

    #[test]
    fn test_navigation_stops_at_range_edges() {
        let last = key("9999-12");
        assert_eq!(last.next(), last);
        assert_eq!(last.end_date(), NaiveDate::from_ymd_opt(9999, 12, 31).unwrap());
        assert_eq!(key("1000-01").prev(), key("1000-01"));
        assert_eq!(key("1000-02").trailing(5).len(), 2);
    }

    #[test]
    fn test_dates() {
        let feb = key("2024-02");
        assert_eq!(feb.start_date(), NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
        assert_eq!(feb.end_date(), NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
        assert_eq!(feb.days(), 29);
        assert_eq!(key("2023-02").days(), 28);
        assert!(feb.contains(NaiveDate::from_ymd_opt(2024, 2, 15).unwrap()));
        assert!(!feb.contains(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()));
    }

    #[test]
    fn test_label() {
        assert_eq!(key("2024-01").label(), "January 2024");
        assert_eq!(key("2023-12").label(), "December 2023");
    }

    #[test]
    fn test_trailing() {
        let months = key("2024-02").trailing(3);
        let keys: Vec<&str> = months.iter().map(|m| m.as_str()).collect();
        assert_eq!(keys, vec!["2024-02", "2024-01", "2023-12"]);
    }

    #[test]
    fn test_serde_validates() {
        let parsed: MonthKey = serde_json::from_str("\"2024-05\"").unwrap();
        assert_eq!(parsed, key("2024-05"));
        assert_eq!(serde_json::to_string(&parsed).unwrap(), "\"2024-05\"");
        assert!(serde_json::from_str::<MonthKey>("\"May 2024\"").is_err());
    }
}
