//! Rule selection and severity overrides.

use std::collections::BTreeMap;

use convlint_core::Severity;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RulesConfig {
    /// Rule ids (`R4`) or names (`test-has-assertion`) to skip entirely.
    #[serde(default)]
    pub disabled: Vec<String>,

    /// Severity overrides keyed by rule id or name.
    #[serde(default)]
    pub severity: BTreeMap<String, Severity>,
}
