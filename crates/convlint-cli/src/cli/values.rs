use clap::ValueEnum;
use convlint_core::{FailOn, ReportFormat};

/// Report format accepted on the command line.
#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

impl From<OutputFormat> for ReportFormat {
    fn from(value: OutputFormat) -> Self {
        match value {
            OutputFormat::Text => Self::Text,
            OutputFormat::Json => Self::Json,
        }
    }
}

/// `--fail-on` policy.
#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum FailOnArg {
    /// Only failing blocking rules fail the run.
    Blocking,
    /// Any warning also fails the run.
    Warning,
}

impl From<FailOnArg> for FailOn {
    fn from(value: FailOnArg) -> Self {
        match value {
            FailOnArg::Blocking => Self::Blocking,
            FailOnArg::Warning => Self::Warning,
        }
    }
}
