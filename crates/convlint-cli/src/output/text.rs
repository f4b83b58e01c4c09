//! Human-readable report: one table per file, then warnings and a summary.

use std::fmt::Write as _;

use convlint_core::{Outcome, Verdict};
use convlint_report::Report;

use super::table::{Align, TableOptions, render_table};

const HEADERS: [&str; 6] = ["line", "rule", "severity", "outcome", "test", "message"];
const ALIGN: [Align; 6] = [
    Align::Right,
    Align::Left,
    Align::Left,
    Align::Left,
    Align::Left,
    Align::Left,
];

#[must_use]
pub fn render(report: &Report, show_passing: bool, options: TableOptions) -> String {
    let shown: Vec<&Verdict> = report
        .verdicts
        .iter()
        .filter(|v| show_passing || v.outcome != Outcome::Pass)
        .collect();

    let mut out = String::new();
    for group in shown.chunk_by(|a, b| a.record.path == b.record.path) {
        let rows: Vec<Vec<String>> = group
            .iter()
            .map(|v| {
                vec![
                    v.record.line.to_string(),
                    v.rule_id.clone(),
                    v.severity.to_string(),
                    v.outcome.to_string(),
                    v.record.name.clone(),
                    v.message.clone(),
                ]
            })
            .collect();
        let _ = writeln!(out, "{}", group[0].record.path);
        let _ = writeln!(out, "{}\n", render_table(&HEADERS, &ALIGN, &rows, options));
    }

    if !report.warnings.is_empty() {
        let _ = writeln!(out, "Skipped files:");
        for warning in &report.warnings {
            let _ = writeln!(out, "  {warning}");
        }
        out.push('\n');
    }

    out.push_str(&summary_line(report));
    out
}

fn summary_line(report: &Report) -> String {
    let counts = &report.summary.by_outcome;
    format!(
        "{}: {} tests in {} files; {} pass, {} warn, {} fail (fail-on: {})",
        if report.passed { "PASSED" } else { "FAILED" },
        report.tests_scanned,
        report.files_scanned,
        counts.pass,
        counts.warn,
        counts.fail,
        report.fail_on,
    )
}
