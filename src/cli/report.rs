//! CLI commands for the dashboard, monthly report and backend health

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use chrono::Local;
use clap::ValueEnum;

use super::CliContext;
use crate::error::{TrackerError, TrackerResult};
use crate::reports::MonthlyReport;
use crate::services::validation::month_or_current;
use crate::services::DashboardService;

/// Export format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    /// CSV format (one row per category plus a total row)
    Csv,
    /// JSON format (full report)
    Json,
    /// YAML format (full report, human-readable)
    Yaml,
}

impl ExportFormat {
    /// Guess the format from a file extension, defaulting to CSV
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .as_deref()
        {
            Some("json") => Self::Json,
            Some("yaml") | Some("yml") => Self::Yaml,
            _ => Self::Csv,
        }
    }
}

fn load_report(ctx: &CliContext, month: Option<&str>) -> TrackerResult<MonthlyReport> {
    let month = month_or_current(month)?;
    let signed_in = ctx.signed_in()?;
    let overview = DashboardService::new(&signed_in.api, &signed_in.user.uid).overview(&month)?;
    Ok(MonthlyReport::generate(&overview, Local::now().date_naive()))
}

/// Print the dashboard for a month
pub fn handle_dashboard_command(ctx: &CliContext, month: Option<String>) -> TrackerResult<()> {
    let report = load_report(ctx, month.as_deref())?;
    print!("{}", report.format_dashboard());
    Ok(())
}

/// Print the monthly report, or export it to a file
pub fn handle_report_command(
    ctx: &CliContext,
    month: Option<String>,
    output: Option<PathBuf>,
    format: Option<ExportFormat>,
) -> TrackerResult<()> {
    let report = load_report(ctx, month.as_deref())?;

    let Some(path) = output else {
        print!("{}", report.format_terminal());
        return Ok(());
    };

    let format = format.unwrap_or_else(|| ExportFormat::from_path(&path));
    let file = File::create(&path).map_err(|e| {
        TrackerError::Export(format!("Failed to create file {}: {}", path.display(), e))
    })?;
    let writer = BufWriter::new(file);

    match format {
        ExportFormat::Csv => report.export_csv(writer)?,
        ExportFormat::Json => report.export_json(writer, true)?,
        ExportFormat::Yaml => report.export_yaml(writer)?,
    }

    println!(
        "Report for {} exported to: {}",
        report.month.label(),
        path.display()
    );
    Ok(())
}

/// Check that the backend is reachable
pub fn handle_health_command(ctx: &CliContext) -> TrackerResult<()> {
    let api = ctx.api_client()?;
    let health = api.health_check().into_result()?;

    println!("Backend:  {}", api.base_url());
    println!("Status:   {}", health.status);
    if let Some(service) = &health.service {
        println!("Service:  {}", service);
    }
    if let Some(timestamp) = &health.timestamp {
        println!("Time:     {}", timestamp);
    }

    if health.is_healthy() {
        Ok(())
    } else {
        Err(TrackerError::Api(format!(
            "Backend reported status '{}'",
            health.status
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_path() {
        assert_eq!(ExportFormat::from_path(Path::new("out.json")), ExportFormat::Json);
        assert_eq!(ExportFormat::from_path(Path::new("out.YML")), ExportFormat::Yaml);
        assert_eq!(ExportFormat::from_path(Path::new("out.csv")), ExportFormat::Csv);
        assert_eq!(ExportFormat::from_path(Path::new("report")), ExportFormat::Csv);
    }
}
