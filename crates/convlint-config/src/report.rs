//! Report output configuration.

use convlint_core::{FailOn, ReportFormat};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ReportConfig {
    /// Which verdicts fail the run.
    #[serde(default)]
    pub fail_on: FailOn,

    #[serde(default)]
    pub format: ReportFormat,

    /// Include passing verdicts in the text report.
    #[serde(default)]
    pub show_passing: bool,
}
