//! Verdicts produced by the rule evaluator.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{Outcome, Severity};
use crate::record::RecordRef;

/// Outcome of checking one rule against one test-case record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub struct Verdict {
    pub rule_id: String,
    pub severity: Severity,
    pub record: RecordRef,
    pub outcome: Outcome,
    pub message: String,
}

impl Verdict {
    /// Ordering key used by the report: file, line, then rule id.
    #[must_use]
    pub fn sort_key(&self) -> (&str, u32, &str, &str) {
        (
            &self.record.path,
            self.record.line,
            &self.rule_id,
            &self.record.name,
        )
    }
}
