use std::path::Path;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use convlint_config::LintConfig;

mod cli;
mod output;
mod pipeline;

/// Exit status for a run that found failing verdicts.
const EXIT_FAILED: u8 = 1;
/// Exit status for unusable input (missing root, bad config).
const EXIT_ERROR: u8 = 2;

fn main() -> ExitCode {
    match run() {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(EXIT_FAILED),
        Err(error) => {
            eprintln!("lint-conventions error: {error:#}");
            ExitCode::from(EXIT_ERROR)
        }
    }
}

/// Returns whether the run passed.
fn run() -> anyhow::Result<bool> {
    let cli = cli::Cli::parse();
    init_tracing(cli.quiet, cli.verbose)?;

    let root = cli.root.as_deref().unwrap_or_else(|| Path::new("."));
    let mut config = LintConfig::load(root, cli.config.as_deref())
        .context("failed to load configuration")?;
    cli.apply_to(&mut config);
    tracing::debug!(root = %root.display(), ?config, "configuration loaded");

    let destination = cli.output.as_deref();
    let options = output::table_options(destination);

    if cli.list_rules {
        let registry = pipeline::registry(&config)?;
        let rendered = output::render_rules(&registry, config.report.format, options)?;
        output::emit(&rendered, destination)?;
        return Ok(true);
    }

    let report = pipeline::run_lint(root, &config)?;
    let rendered = output::render(
        &report,
        config.report.format,
        config.report.show_passing,
        options,
    )?;
    output::emit(&rendered, destination)?;
    Ok(report.passed)
}

fn init_tracing(quiet: bool, verbose: bool) -> anyhow::Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("CONVLINT_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}
