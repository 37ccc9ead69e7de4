//! Formatting helpers for terminal output

use crate::models::Money;

/// Format a money amount with color hints for terminal display
pub fn format_money_colored(amount: Money) -> String {
    if amount.is_negative() {
        format!("\x1b[31m{}\x1b[0m", amount)
    } else if amount.is_positive() {
        format!("\x1b[32m{}\x1b[0m", amount)
    } else {
        amount.to_string()
    }
}

/// Format a percentage with one decimal place
pub fn format_percentage(pct: f64) -> String {
    if pct.is_finite() {
        format!("{:.1}%", pct)
    } else {
        "0.0%".to_string()
    }
}

/// Text gauge filled to `ratio` (0-1) of `width` cells
pub fn format_bar(ratio: f64, width: usize) -> String {
    let ratio = if ratio.is_finite() { ratio.clamp(0.0, 1.0) } else { 0.0 };
    let filled = ((ratio * width as f64).round() as usize).min(width);
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Format a separator line
pub fn separator(width: usize) -> String {
    "─".repeat(width)
}

/// Format a double separator line
pub fn double_separator(width: usize) -> String {
    "═".repeat(width)
}

/// Truncate a string to a maximum number of characters with ellipsis
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        ".".repeat(max_len)
    } else {
        let kept: String = s.chars().take(max_len - 3).collect();
        format!("{}...", kept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_percentage() {
        assert_eq!(format_percentage(112.5), "112.5%");
        assert_eq!(format_percentage(0.0), "0.0%");
        assert_eq!(format_percentage(f64::NAN), "0.0%");
    }

    #[test]
    fn test_format_bar() {
        assert_eq!(format_bar(0.5, 10), "█████░░░░░");
        assert_eq!(format_bar(1.5, 4), "████");
        assert_eq!(format_bar(0.0, 3), "░░░");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("Food & Dining expenses", 10), "Food & ...");
        assert_eq!(truncate("Entertainment", 2), "..");
    }

    #[test]
    fn test_colored_money() {
        assert!(format_money_colored(Money::from_cents(-100)).contains("\x1b[31m"));
        assert_eq!(format_money_colored(Money::zero()), "$0.00");
    }
}
