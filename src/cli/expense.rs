//! Expense CLI commands

use chrono::Local;
use clap::Subcommand;

use super::CliContext;
use crate::display::{format_expense_details, format_expense_list};
use crate::error::TrackerResult;
use crate::models::{ExpenseUpdate, NewExpense};
use crate::services::validation::{month_or_current, parse_amount, parse_category, parse_date};
use crate::services::ExpenseService;

/// Expense subcommands
#[derive(Subcommand)]
pub enum ExpenseCommands {
    /// List expenses for a month
    #[command(alias = "ls")]
    List {
        /// Month (YYYY-MM), defaults to the current month
        #[arg(short, long)]
        month: Option<String>,
    },

    /// Record an expense
    Add {
        /// Amount (e.g., "12.50" or "$1,200")
        amount: String,
        /// Category name (e.g., "Food & Dining" or "food-dining")
        #[arg(short, long)]
        category: String,
        /// Date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<String>,
        /// Optional note
        #[arg(short, long)]
        note: Option<String>,
    },

    /// Change fields of an expense
    Edit {
        /// Expense ID
        id: String,
        #[arg(short, long)]
        amount: Option<String>,
        #[arg(short, long)]
        category: Option<String>,
        #[arg(short, long)]
        date: Option<String>,
        #[arg(short, long)]
        note: Option<String>,
    },

    /// Delete an expense
    #[command(alias = "rm")]
    Delete {
        /// Expense ID
        id: String,
    },
}

/// Handle an expense command
pub fn handle_expense_command(ctx: &CliContext, cmd: ExpenseCommands) -> TrackerResult<()> {
    match cmd {
        ExpenseCommands::List { month } => {
            let month = month_or_current(month.as_deref())?;
            let signed_in = ctx.signed_in()?;
            let service = ExpenseService::new(&signed_in.api, &signed_in.user.uid);

            let list = service.list(Some(&month))?;
            println!("Expenses: {}", month.label());
            print!("{}", format_expense_list(&list));
        }

        ExpenseCommands::Add {
            amount,
            category,
            date,
            note,
        } => {
            let amount = parse_amount(&amount)?;
            let category = parse_category(&category)?;
            let date = match date {
                Some(d) => parse_date(&d)?,
                None => Local::now().date_naive(),
            };
            let mut expense = NewExpense::new(amount, category, date);
            if let Some(note) = note {
                expense = expense.with_note(note);
            }

            let signed_in = ctx.signed_in()?;
            let created = ExpenseService::new(&signed_in.api, &signed_in.user.uid).create(&expense)?;
            println!("Expense added successfully!");
            print!("{}", format_expense_details(&created));
        }

        ExpenseCommands::Edit {
            id,
            amount,
            category,
            date,
            note,
        } => {
            let update = ExpenseUpdate {
                amount: amount.as_deref().map(parse_amount).transpose()?,
                category: category.as_deref().map(parse_category).transpose()?,
                date: date.as_deref().map(parse_date).transpose()?,
                note,
            };

            let signed_in = ctx.signed_in()?;
            let updated =
                ExpenseService::new(&signed_in.api, &signed_in.user.uid).update(&id, &update)?;
            println!("Expense updated successfully!");
            print!("{}", format_expense_details(&updated));
        }

        ExpenseCommands::Delete { id } => {
            let signed_in = ctx.signed_in()?;
            let message = ExpenseService::new(&signed_in.api, &signed_in.user.uid).delete(&id)?;
            println!("{}", message);
        }
    }

    Ok(())
}
