//! Monthly Report
//!
//! Everything the dashboard and reports screens show for one month, built
//! from the fetched summary and category report. Rendered as text for the
//! CLI and exportable as CSV, JSON or YAML.

use std::io::Write;

use chrono::NaiveDate;
use serde::Serialize;

use super::category::{category_bars, CategoryBar};
use super::insights::SpendingInsights;
use super::status::{budget_status_message, StatusAlert, UsageLevel};
use crate::display::format::{double_separator, format_bar, format_percentage, separator};
use crate::error::{TrackerError, TrackerResult};
use crate::models::{MonthKey, SummaryRecord};
use crate::services::MonthOverview;

const WIDTH: usize = 72;
const GAUGE_WIDTH: usize = 24;

/// One of the four dashboard summary cards
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryCard {
    pub title: &'static str,
    pub value: String,
    pub caption: String,
}

/// The four cards shown at the top of the dashboard
pub fn summary_cards(summary: &SummaryRecord) -> [SummaryCard; 4] {
    let remaining_caption = if summary.remaining_budget.is_negative() {
        "Over budget"
    } else {
        "Under budget"
    };

    [
        SummaryCard {
            title: "Total Expenses",
            value: summary.total_expenses.to_string(),
            caption: format!("{} transactions", summary.expense_count),
        },
        SummaryCard {
            title: "Total Budget",
            value: summary.total_budget.to_string(),
            caption: format!("{} budgets set", summary.budget_count),
        },
        SummaryCard {
            title: "Remaining",
            value: summary.remaining_budget.abs().to_string(),
            caption: remaining_caption.to_string(),
        },
        SummaryCard {
            title: "Budget Usage",
            value: format_percentage(summary.budget_usage_percent),
            caption: "Of total budget used".to_string(),
        },
    ]
}

/// A month's dashboard and report data in display order
#[derive(Debug, Clone, Serialize)]
pub struct MonthlyReport {
    pub month: MonthKey,
    pub summary: SummaryRecord,
    pub status: StatusAlert,
    pub categories: Vec<CategoryBar>,
    pub insights: SpendingInsights,
}

impl MonthlyReport {
    /// Build the report for a fetched month as seen on `today`
    pub fn generate(overview: &MonthOverview, today: NaiveDate) -> Self {
        let breakdown = &overview.report.expenses_by_category;
        Self {
            month: overview.month.clone(),
            summary: overview.summary.clone(),
            status: budget_status_message(Some(&overview.summary), breakdown),
            categories: category_bars(breakdown),
            insights: SpendingInsights::compute(
                &overview.month,
                &overview.summary,
                &overview.report,
                today,
            ),
        }
    }

    pub fn usage_level(&self) -> UsageLevel {
        UsageLevel::from_percent(self.summary.budget_usage_percent)
    }

    /// Format the dashboard view for terminal display
    pub fn format_dashboard(&self) -> String {
        let mut output = String::new();

        output.push_str(&format!("Dashboard: {}\n", self.month.label()));
        output.push_str(&double_separator(WIDTH));
        output.push('\n');
        output.push_str(&format!("{}\n\n", self.status.message));

        for card in summary_cards(&self.summary) {
            output.push_str(&format!(
                "{:<16} {:>14}  {}\n",
                card.title, card.value, card.caption
            ));
        }

        output.push_str(&format!("\nSpending by Category\n{}\n", separator(WIDTH)));
        if self.categories.is_empty() {
            output.push_str("No expenses yet\n");
            output.push_str("Start tracking your expenses to see spending patterns.\n");
            return output;
        }

        for bar in &self.categories {
            output.push_str(&format!(
                "{:<16} {} {:>12} / {:<12}\n",
                bar.name,
                format_bar(bar.fill, GAUGE_WIDTH),
                bar.total.to_string(),
                bar.budget.to_string()
            ));
            output.push_str(&format!(
                "{:<16} {} transactions, {}\n",
                "",
                bar.count,
                bar.remaining_label()
            ));
        }

        output
    }

    /// Format the full month report for terminal display
    pub fn format_terminal(&self) -> String {
        let mut output = String::new();

        output.push_str(&format!("Monthly Report: {}\n", self.month.label()));
        output.push_str(&double_separator(WIDTH));
        output.push('\n');

        let top = match &self.insights.top_category {
            Some(top) => format!("{} ({})", top.category, top.amount),
            None => "None".to_string(),
        };
        output.push_str(&format!("Top Category:        {}\n", top));
        output.push_str(&format!(
            "Average Daily:       {} over {} days\n",
            self.insights.average_daily, self.insights.days_elapsed
        ));
        output.push_str(&format!(
            "Budget Utilization:  {}\n",
            format_percentage(self.insights.budget_utilization)
        ));
        output.push_str(&format!(
            "Over Budget:         {} categories\n\n",
            self.insights.over_budget_categories
        ));
        output.push_str(&format!("{}\n\n", self.insights.alert().message));

        output.push_str(&format!(
            "{:<18} {:>12} {:>12} {:>7} {:>7}  {}\n",
            "Category", "Spent", "Budget", "Count", "%", "Variance"
        ));
        output.push_str(&separator(WIDTH));
        output.push('\n');

        if self.categories.is_empty() {
            output.push_str("No expenses yet\n");
        }
        for bar in &self.categories {
            output.push_str(&format!(
                "{:<18} {:>12} {:>12} {:>7} {:>6.1}%  {}\n",
                bar.name,
                bar.total.to_string(),
                bar.budget.to_string(),
                bar.count,
                bar.percentage,
                bar.variance_label()
            ));
        }

        output.push_str(&separator(WIDTH));
        output.push('\n');
        output.push_str(&format!(
            "{:<18} {:>12} {:>12} {:>7}\n",
            "TOTAL",
            self.summary.total_expenses.to_string(),
            self.summary.total_budget.to_string(),
            self.summary.expense_count
        ));

        output
    }

    /// Export the category rows to CSV
    pub fn export_csv<W: Write>(&self, writer: W) -> TrackerResult<()> {
        let mut csv = csv::Writer::from_writer(writer);
        csv.write_record([
            "Month",
            "Category",
            "Spent",
            "Budget",
            "Remaining",
            "Transactions",
            "Percentage",
            "Over Budget",
        ])?;

        for bar in &self.categories {
            csv.write_record([
                self.month.to_string(),
                bar.name.clone(),
                format!("{:.2}", bar.total.to_f64()),
                format!("{:.2}", bar.budget.to_f64()),
                format!("{:.2}", (bar.budget - bar.total).to_f64()),
                bar.count.to_string(),
                format!("{:.2}", bar.percentage),
                bar.over_budget.to_string(),
            ])?;
        }

        csv.write_record([
            self.month.to_string(),
            "TOTAL".to_string(),
            format!("{:.2}", self.summary.total_expenses.to_f64()),
            format!("{:.2}", self.summary.total_budget.to_f64()),
            format!("{:.2}", self.summary.remaining_budget.to_f64()),
            self.summary.expense_count.to_string(),
            format!("{:.2}", self.summary.budget_usage_percent),
            self.summary.remaining_budget.is_negative().to_string(),
        ])?;

        csv.flush()
            .map_err(|e| TrackerError::Export(format!("Failed to write CSV: {}", e)))
    }

    /// Export the whole report as JSON
    pub fn export_json<W: Write>(&self, writer: W, pretty: bool) -> TrackerResult<()> {
        let result = if pretty {
            serde_json::to_writer_pretty(writer, self)
        } else {
            serde_json::to_writer(writer, self)
        };
        result.map_err(|e| TrackerError::Export(e.to_string()))
    }

    /// Export the whole report as YAML
    pub fn export_yaml<W: Write>(&self, mut writer: W) -> TrackerResult<()> {
        writeln!(writer, "# Finance Tracker Monthly Report: {}", self.month.label())
            .map_err(|e| TrackerError::Export(e.to_string()))?;
        serde_yaml::to_writer(writer, self)?;
        Ok(())
    }
}
