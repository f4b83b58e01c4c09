//! The final report.

use convlint_core::{FailOn, FileReadWarning, Outcome, Verdict};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::summary::Summary;

/// Everything one run found, in a deterministic order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Report {
    /// `false` if any verdict fails under `fail_on`.
    pub passed: bool,
    pub fail_on: FailOn,
    pub files_scanned: usize,
    /// Test declarations extracted, whether or not any rule checked them.
    pub tests_scanned: usize,
    pub summary: Summary,
    /// Sorted by path, line, then rule id.
    pub verdicts: Vec<Verdict>,
    /// Files skipped because they could not be read, sorted by path.
    pub warnings: Vec<FileReadWarning>,
}

impl Report {
    /// Build a report from verdicts arriving in any order.
    #[must_use]
    pub fn aggregate(
        mut verdicts: Vec<Verdict>,
        mut warnings: Vec<FileReadWarning>,
        files_scanned: usize,
        tests_scanned: usize,
        fail_on: FailOn,
    ) -> Self {
        verdicts.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));
        warnings.sort();

        let summary = Summary::from_verdicts(&verdicts);
        let passed = !verdicts.iter().any(|v| fail_on.fails(v.outcome));

        tracing::debug!(
            verdicts = verdicts.len(),
            warnings = warnings.len(),
            passed,
            "report aggregated"
        );

        Self {
            passed,
            fail_on,
            files_scanned,
            tests_scanned,
            summary,
            verdicts,
            warnings,
        }
    }

    /// Verdicts other than `pass`.
    pub fn findings(&self) -> impl Iterator<Item = &Verdict> {
        self.verdicts.iter().filter(|v| v.outcome != Outcome::Pass)
    }

    /// Pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// JSON Schema describing [`to_json`](Self::to_json) output.
    ///
    /// # Errors
    ///
    /// Returns an error if the generated schema cannot be converted to a value.
    pub fn json_schema() -> Result<serde_json::Value, serde_json::Error> {
        serde_json::to_value(schemars::schema_for!(Self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use convlint_core::{RecordRef, Severity};
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn verdict(path: &str, line: u32, rule: &str, severity: Severity, outcome: Outcome) -> Verdict {
        Verdict {
            rule_id: rule.into(),
            severity,
            record: RecordRef {
                path: path.into(),
                line,
                name: format!("test at {line}"),
            },
            outcome,
            message: String::new(),
        }
    }

    #[test]
    fn verdicts_are_sorted_by_location_then_rule() {
        let report = Report::aggregate(
            vec![
                verdict("b.spec.ts", 1, "R1", Severity::Warning, Outcome::Pass),
                verdict("a.spec.ts", 9, "R2", Severity::Blocking, Outcome::Pass),
                verdict("a.spec.ts", 9, "R1", Severity::Warning, Outcome::Pass),
                verdict("a.spec.ts", 2, "R5", Severity::Blocking, Outcome::Pass),
            ],
            vec![],
            2,
            3,
            FailOn::Blocking,
        );
        let order: Vec<_> = report
            .verdicts
            .iter()
            .map(|v| (v.record.path.as_str(), v.record.line, v.rule_id.as_str()))
            .collect();
        assert_eq!(
            order,
            vec![
                ("a.spec.ts", 2, "R5"),
                ("a.spec.ts", 9, "R1"),
                ("a.spec.ts", 9, "R2"),
                ("b.spec.ts", 1, "R1"),
            ]
        );
        assert_eq!(report.tests_scanned, 3);
    }

    #[rstest]
    #[case(FailOn::Blocking, Outcome::Fail, false)]
    #[case(FailOn::Blocking, Outcome::Warn, true)]
    #[case(FailOn::Warning, Outcome::Warn, false)]
    #[case(FailOn::Warning, Outcome::Pass, true)]
    fn pass_follows_policy(#[case] fail_on: FailOn, #[case] outcome: Outcome, #[case] passed: bool) {
        let report = Report::aggregate(
            vec![verdict("a.spec.ts", 1, "R1", Severity::Warning, outcome)],
            vec![],
            1,
            1,
            fail_on,
        );
        assert_eq!(report.passed, passed);
    }

    #[test]
    fn empty_run_passes() {
        let report = Report::aggregate(vec![], vec![], 0, 0, FailOn::Blocking);
        assert!(report.passed);
        assert_eq!(report.summary.total(), 0);
        assert_eq!(report.findings().count(), 0);
    }

    #[test]
    fn warnings_do_not_fail_the_run() {
        let report = Report::aggregate(
            vec![],
            vec![FileReadWarning {
                path: "bad.spec.ts".into(),
                message: "file is not valid UTF-8".into(),
            }],
            1,
            0,
            FailOn::Warning,
        );
        assert!(report.passed);
        assert_eq!(report.warnings.len(), 1);
    }

    #[test]
    fn tests_scanned_counts_records_without_verdicts() {
        let report = Report::aggregate(vec![], vec![], 2, 5, FailOn::Blocking);
        assert_eq!(report.tests_scanned, 5);
        assert_eq!(report.summary.total(), 0);
        assert!(report.passed);
    }
}
