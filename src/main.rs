use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use finance_tracker::cli::{
    handle_auth_command, handle_budget_command, handle_config_command,
    handle_dashboard_command, handle_expense_command, handle_health_command,
    handle_report_command, AuthCommands, BudgetCommands, CliContext, ConfigCommands,
    ExpenseCommands, ExportFormat,
};
use finance_tracker::config::{logging, paths::TrackerPaths, settings::Settings};

#[derive(Parser)]
#[command(
    name = "fintrack",
    version,
    about = "Track expenses against monthly budgets from the terminal",
    long_about = "fintrack records your expenses, keeps monthly budgets per category \
                  and shows how the month is going. Run without a command to open \
                  the interactive interface."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Launch the interactive TUI
    #[command(alias = "ui")]
    Tui,

    /// Sign in, sign up or sign out
    #[command(subcommand)]
    Auth(AuthCommands),

    /// Expense management commands
    #[command(subcommand, alias = "exp")]
    Expense(ExpenseCommands),

    /// Budget management commands
    #[command(subcommand)]
    Budget(BudgetCommands),

    /// Show the month's summary and spending by category
    Dashboard {
        /// Month to show (YYYY-MM, defaults to the current month)
        #[arg(short, long)]
        month: Option<String>,
    },

    /// Show or export the monthly report
    Report {
        /// Month to report on (YYYY-MM, defaults to the current month)
        #[arg(short, long)]
        month: Option<String>,
        /// Write the report to this file instead of printing it
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Export format (defaults to the output file's extension)
        #[arg(short, long, value_enum)]
        format: Option<ExportFormat>,
    },

    /// Check that the backend is reachable
    Health,

    /// Show or change configuration
    #[command(subcommand)]
    Config(ConfigCommands),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = TrackerPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;
    logging::init(&paths, &settings.log_level)?;

    let ctx = CliContext::new(paths, settings);

    match cli.command {
        None | Some(Commands::Tui) => {
            finance_tracker::tui::run_tui(&ctx.paths, &ctx.settings)?;
        }
        Some(Commands::Auth(cmd)) => handle_auth_command(&ctx, cmd)?,
        Some(Commands::Expense(cmd)) => handle_expense_command(&ctx, cmd)?,
        Some(Commands::Budget(cmd)) => handle_budget_command(&ctx, cmd)?,
        Some(Commands::Dashboard { month }) => handle_dashboard_command(&ctx, month)?,
        Some(Commands::Report {
            month,
            output,
            format,
        }) => handle_report_command(&ctx, month, output, format)?,
        Some(Commands::Health) => handle_health_command(&ctx)?,
        Some(Commands::Config(cmd)) => handle_config_command(&ctx, cmd)?,
    }

    Ok(())
}
