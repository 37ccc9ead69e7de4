//! Input validation shared by the CLI and the TUI forms
//!
//! Everything here runs before a request is sent. Messages are shown to the
//! user verbatim.

use chrono::NaiveDate;

use crate::error::{TrackerError, TrackerResult};
use crate::models::expense::iso_date;
use crate::models::{Category, Money, MonthKey};

pub const MSG_REQUIRED: &str = "Please fill in all required fields";
pub const MSG_INVALID_AMOUNT: &str = "Please enter a valid amount";
pub const MSG_INVALID_DATE: &str = "Invalid date format. Use YYYY-MM-DD";
pub const MSG_INVALID_MONTH: &str = "Invalid month format. Use YYYY-MM";
pub const MSG_BUDGET_EXISTS: &str = "Budget already exists for this category and month";

/// Parse a strictly positive amount
pub fn parse_amount(input: &str) -> TrackerResult<Money> {
    let input = input.trim();
    if input.is_empty() {
        return Err(TrackerError::Validation(MSG_REQUIRED.into()));
    }
    let amount = Money::parse(input).map_err(|_| TrackerError::Validation(MSG_INVALID_AMOUNT.into()))?;
    check_amount(amount)?;
    Ok(amount)
}

/// Reject zero and negative amounts
pub fn check_amount(amount: Money) -> TrackerResult<()> {
    if amount.is_positive() {
        Ok(())
    } else {
        Err(TrackerError::Validation(MSG_INVALID_AMOUNT.into()))
    }
}

/// Parse a `YYYY-MM-DD` date
pub fn parse_date(input: &str) -> TrackerResult<NaiveDate> {
    let input = input.trim();
    if input.is_empty() {
        return Err(TrackerError::Validation(MSG_REQUIRED.into()));
    }
    if input.len() != 10 {
        return Err(TrackerError::Validation(MSG_INVALID_DATE.into()));
    }
    iso_date::parse(input).ok_or_else(|| TrackerError::Validation(MSG_INVALID_DATE.into()))
}

/// Parse a `YYYY-MM` month key
pub fn parse_month(input: &str) -> TrackerResult<MonthKey> {
    MonthKey::parse(input).map_err(|_| TrackerError::Validation(MSG_INVALID_MONTH.into()))
}

/// Parse an optional month argument, defaulting to the current month
pub fn month_or_current(input: Option<&str>) -> TrackerResult<MonthKey> {
    match input {
        Some(s) => parse_month(s),
        None => Ok(MonthKey::current()),
    }
}

/// Parse a category name or alias
pub fn parse_category(input: &str) -> TrackerResult<Category> {
    if input.trim().is_empty() {
        return Err(TrackerError::Validation(MSG_REQUIRED.into()));
    }
    input.parse::<Category>().map_err(TrackerError::Validation)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(err: TrackerError) -> String {
        err.to_string()
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("42.50").unwrap(), Money::from_cents(4250));
        assert_eq!(message(parse_amount("").unwrap_err()), MSG_REQUIRED);
        assert_eq!(message(parse_amount("abc").unwrap_err()), MSG_INVALID_AMOUNT);
        assert_eq!(message(parse_amount("0").unwrap_err()), MSG_INVALID_AMOUNT);
        assert_eq!(message(parse_amount("-5").unwrap_err()), MSG_INVALID_AMOUNT);
        assert_eq!(message(parse_amount("12.999").unwrap_err()), MSG_INVALID_AMOUNT);
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("2024-01-15").unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
        );
        assert_eq!(message(parse_date("15/01/2024").unwrap_err()), MSG_INVALID_DATE);
        assert_eq!(message(parse_date("2024-02-30").unwrap_err()), MSG_INVALID_DATE);
        assert_eq!(
            message(parse_date("2024-01-15T10:00").unwrap_err()),
            MSG_INVALID_DATE
        );
    }

    #[test]
    fn test_parse_month() {
        assert_eq!(parse_month("2024-03").unwrap().as_str(), "2024-03");
        assert_eq!(message(parse_month("March").unwrap_err()), MSG_INVALID_MONTH);
        assert!(month_or_current(None).is_ok());
    }

    #[test]
    fn test_parse_category() {
        assert_eq!(parse_category("food-dining").unwrap(), Category::FoodDining);
        assert!(parse_category("Groceries").unwrap_err().is_validation());
        assert_eq!(message(parse_category(" ").unwrap_err()), MSG_REQUIRED);
    }
}
