//! The `Rule` type.

use std::fmt;

use convlint_core::{Detection, Severity, TestCaseRecord};

/// Predicate over one record. `Match` means the convention is violated.
pub type Check = fn(&TestCaseRecord) -> Detection;

/// One testing convention.
#[derive(Clone, Copy)]
pub struct Rule {
    /// Stable identifier (`R1`, `R2`, ...).
    pub id: &'static str,
    /// Kebab-case name (`descriptive-test-name`).
    pub name: &'static str,
    /// The convention, phrased as what a good test does.
    pub description: &'static str,
    /// Message attached to a violation.
    pub violation: &'static str,
    pub severity: Severity,
    pub check: Check,
}

impl Rule {
    /// Whether `key` names this rule by id (case-insensitive) or name.
    #[must_use]
    pub fn is_named(&self, key: &str) -> bool {
        let key = key.trim();
        self.id.eq_ignore_ascii_case(key) || self.name == key
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("severity", &self.severity)
            .finish_non_exhaustive()
    }
}
