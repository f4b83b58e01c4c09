use std::path::PathBuf;

use clap::Parser;
use convlint_config::LintConfig;

pub mod values;

pub use values::{FailOnArg, OutputFormat};

/// Top-level CLI parser for the `lint-conventions` binary.
#[derive(Debug, Parser)]
#[command(
    name = "lint-conventions",
    version,
    about = "Check JavaScript/TypeScript test files against testing conventions"
)]
pub struct Cli {
    /// Directory to scan for test files
    #[arg(required_unless_present = "list_rules")]
    pub root: Option<PathBuf>,

    /// Which verdicts fail the run: blocking, warning
    #[arg(long, value_enum)]
    pub fail_on: Option<FailOnArg>,

    /// Report format: text, json
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Write the report to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Config file (defaults to <ROOT>/.convlint.toml)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Worker threads (0 = one per core)
    #[arg(short = 'j', long)]
    pub concurrency: Option<usize>,

    /// Include passing verdicts in the text report
    #[arg(long)]
    pub show_passing: bool,

    /// Print the active rules and exit
    #[arg(long)]
    pub list_rules: bool,

    /// Quiet mode (errors only on stderr)
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Apply command-line flags on top of the loaded configuration.
    pub fn apply_to(&self, config: &mut LintConfig) {
        if let Some(fail_on) = self.fail_on {
            config.report.fail_on = fail_on.into();
        }
        if let Some(format) = self.format {
            config.report.format = format.into();
        }
        if let Some(concurrency) = self.concurrency {
            config.run.concurrency = concurrency;
        }
        if self.show_passing {
            config.report.show_passing = true;
        }
    }
}
