//! Report rendering and delivery.

use std::io::IsTerminal;
use std::path::Path;

use anyhow::Context;
use convlint_core::ReportFormat;
use convlint_report::Report;
use convlint_rules::RuleRegistry;

pub mod table;
pub mod text;

use table::{Align, TableOptions};

/// Table options for text written to `destination` (`None` = stdout).
///
/// Color only for a terminal with `NO_COLOR` unset; width from `COLUMNS`.
#[must_use]
pub fn table_options(destination: Option<&Path>) -> TableOptions {
    let color = destination.is_none()
        && std::io::stdout().is_terminal()
        && std::env::var_os("NO_COLOR").is_none();
    let max_width = std::env::var("COLUMNS")
        .ok()
        .and_then(|value| value.parse::<usize>().ok())
        .filter(|width| *width >= 40);
    TableOptions { max_width, color }
}

/// Render a report in the requested format.
pub fn render(
    report: &Report,
    format: ReportFormat,
    show_passing: bool,
    options: TableOptions,
) -> anyhow::Result<String> {
    match format {
        ReportFormat::Json => Ok(report.to_json()?),
        ReportFormat::Text => Ok(text::render(report, show_passing, options)),
    }
}

/// Render the active rule set.
pub fn render_rules(
    registry: &RuleRegistry,
    format: ReportFormat,
    options: TableOptions,
) -> anyhow::Result<String> {
    let rules = registry.list_rules();
    match format {
        ReportFormat::Json => {
            let value: Vec<serde_json::Value> = rules
                .iter()
                .map(|rule| {
                    serde_json::json!({
                        "id": rule.id,
                        "name": rule.name,
                        "severity": rule.severity,
                        "description": rule.description,
                    })
                })
                .collect();
            Ok(serde_json::to_string_pretty(&value)?)
        }
        ReportFormat::Text => {
            let rows: Vec<Vec<String>> = rules
                .iter()
                .map(|rule| {
                    vec![
                        rule.id.to_string(),
                        rule.name.to_string(),
                        rule.severity.to_string(),
                        rule.description.to_string(),
                    ]
                })
                .collect();
            Ok(table::render_table(
                &["id", "name", "severity", "description"],
                &[Align::Left; 4],
                &rows,
                options,
            ))
        }
    }
}

/// Write rendered output to `destination`, or stdout.
pub fn emit(rendered: &str, destination: Option<&Path>) -> anyhow::Result<()> {
    match destination {
        Some(path) => std::fs::write(path, format!("{rendered}\n"))
            .with_context(|| format!("failed to write report to {}", path.display())),
        None => {
            println!("{rendered}");
            Ok(())
        }
    }
}
