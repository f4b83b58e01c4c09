//! Lint pipeline: scan → evaluate → aggregate.
//!
//! Files are scanned and (rule, record) pairs evaluated on a rayon pool
//! sized by `run.concurrency`. Every stage reads immutable input and returns
//! new values; the report sorts and folds whatever order results arrive in.

use std::path::Path;

use anyhow::Context;
use convlint_config::LintConfig;
use convlint_core::{FileReadWarning, TestCaseRecord};
use convlint_report::Report;
use convlint_rules::{RuleRegistry, evaluate_all};
use convlint_scan::Scanner;
use rayon::prelude::*;

/// Build the rule registry for a run.
pub fn registry(config: &LintConfig) -> anyhow::Result<RuleRegistry> {
    RuleRegistry::builtin()
        .apply_overrides(&config.rules)
        .context("invalid [rules] configuration")
}

/// Lint every test file under `root`.
pub fn run_lint(root: &Path, config: &LintConfig) -> anyhow::Result<Report> {
    let registry = registry(config)?;
    let scanner = Scanner::new(root, config.scan.clone())?;
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.run.concurrency)
        .build()
        .context("failed to start worker pool")?;

    let report = pool.install(|| {
        let discovery = scanner.test_files();
        let scanned: Vec<Result<Vec<TestCaseRecord>, FileReadWarning>> = discovery
            .files
            .par_iter()
            .map(|path| scanner.scan_file(path))
            .collect();

        let mut records = Vec::new();
        let mut warnings = discovery.warnings;
        for result in scanned {
            match result {
                Ok(found) => records.extend(found),
                Err(warning) => warnings.push(warning),
            }
        }
        tracing::info!(
            files = discovery.files.len(),
            tests = records.len(),
            skipped = warnings.len(),
            "scan complete"
        );

        let verdicts = evaluate_all(&registry, &records);
        Report::aggregate(
            verdicts,
            warnings,
            discovery.files.len(),
            records.len(),
            config.report.fail_on,
        )
    });

    Ok(report)
}
