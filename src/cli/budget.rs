//! Budget CLI commands
//!
//! Budgets are set per month, either overall or for one category.

use clap::Subcommand;

use super::CliContext;
use crate::display::{format_budget_list, format_budget_settings};
use crate::error::TrackerResult;
use crate::models::{Category, MonthKey, NewBudget};
use crate::reports::group_budgets_by_month;
use crate::services::validation::{month_or_current, parse_amount, parse_category};
use crate::services::BudgetService;

/// Months shown by `budget settings`, ending with the current one
const SETTINGS_MONTHS: usize = 12;

/// Budget subcommands
#[derive(Subcommand)]
pub enum BudgetCommands {
    /// List budgets for a month
    #[command(alias = "ls")]
    List {
        /// Month (YYYY-MM), defaults to the current month
        #[arg(short, long)]
        month: Option<String>,
    },

    /// Set a new budget
    Set {
        /// Budget amount
        amount: String,
        /// Category; omit for an overall budget
        #[arg(short, long)]
        category: Option<String>,
        /// Month (YYYY-MM), defaults to the current month
        #[arg(short, long)]
        month: Option<String>,
    },

    /// Change the amount of an existing budget
    Update {
        /// New budget amount
        amount: String,
        /// Category; omit for the overall budget
        #[arg(short, long)]
        category: Option<String>,
        /// Month (YYYY-MM), defaults to the current month
        #[arg(short, long)]
        month: Option<String>,
    },

    /// Delete a budget
    #[command(alias = "rm")]
    Delete {
        /// Budget ID
        id: String,
    },

    /// Show budgets for the last twelve months, grouped by month
    Settings,
}

fn parse_slot(category: Option<&str>) -> TrackerResult<Option<Category>> {
    match category {
        None => Ok(None),
        Some(c) if c.trim().eq_ignore_ascii_case("overall") => Ok(None),
        Some(c) => parse_category(c).map(Some),
    }
}

/// Handle a budget command
pub fn handle_budget_command(ctx: &CliContext, cmd: BudgetCommands) -> TrackerResult<()> {
    match cmd {
        BudgetCommands::List { month } => {
            let month = month_or_current(month.as_deref())?;
            let signed_in = ctx.signed_in()?;
            let list = BudgetService::new(&signed_in.api, &signed_in.user.uid).list(Some(&month))?;
            println!("Budgets: {}", month.label());
            print!("{}", format_budget_list(&list));
        }

        BudgetCommands::Set {
            amount,
            category,
            month,
        } => {
            let amount = parse_amount(&amount)?;
            let category = parse_slot(category.as_deref())?;
            let month = month_or_current(month.as_deref())?;

            let signed_in = ctx.signed_in()?;
            let budget = BudgetService::new(&signed_in.api, &signed_in.user.uid)
                .create(&NewBudget::new(amount, month, category))?;
            println!("Budget set successfully!");
            println!(
                "  {} for {}: {} (ID: {})",
                budget.category_label(),
                budget.month.label(),
                budget.amount,
                budget.id
            );
        }

        BudgetCommands::Update {
            amount,
            category,
            month,
        } => {
            let amount = parse_amount(&amount)?;
            let category = parse_slot(category.as_deref())?;
            let month = month_or_current(month.as_deref())?;

            let signed_in = ctx.signed_in()?;
            let budget = BudgetService::new(&signed_in.api, &signed_in.user.uid)
                .update_slot(category, &month, amount)?;
            println!("Budget updated successfully!");
            println!(
                "  {} for {}: {}",
                budget.category_label(),
                budget.month.label(),
                budget.amount
            );
        }

        BudgetCommands::Delete { id } => {
            let signed_in = ctx.signed_in()?;
            BudgetService::new(&signed_in.api, &signed_in.user.uid).delete(&id)?;
            println!("Budget deleted successfully!");
        }

        BudgetCommands::Settings => {
            let months = MonthKey::current().trailing(SETTINGS_MONTHS);
            let signed_in = ctx.signed_in()?;
            let budgets =
                BudgetService::new(&signed_in.api, &signed_in.user.uid).list_months(&months)?;
            println!("Budget Settings");
            println!();
            print!("{}", format_budget_settings(&group_budgets_by_month(&budgets)));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_slot() {
        assert_eq!(parse_slot(None).unwrap(), None);
        assert_eq!(parse_slot(Some("Overall")).unwrap(), None);
        assert_eq!(parse_slot(Some("travel")).unwrap(), Some(Category::Travel));
        assert!(parse_slot(Some("groceries")).is_err());
    }
}
