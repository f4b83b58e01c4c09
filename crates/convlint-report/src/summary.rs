//! Verdict counts.
//!
//! Counting is a commutative fold: [`Summary::record`] adds one verdict and
//! [`Summary::merge`] combines partial sums, so any split or order of the
//! input gives the same totals.

use convlint_core::{Outcome, Severity, Verdict};
use rayon::prelude::*;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct OutcomeCounts {
    pub pass: usize,
    pub warn: usize,
    pub fail: usize,
}

impl OutcomeCounts {
    #[must_use]
    pub const fn total(&self) -> usize {
        self.pass + self.warn + self.fail
    }

    const fn add(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Pass => self.pass += 1,
            Outcome::Warn => self.warn += 1,
            Outcome::Fail => self.fail += 1,
        }
    }

    #[must_use]
    const fn merge(self, other: Self) -> Self {
        Self {
            pass: self.pass + other.pass,
            warn: self.warn + other.warn,
            fail: self.fail + other.fail,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SeverityCounts {
    pub blocking: OutcomeCounts,
    pub warning: OutcomeCounts,
}

/// Verdict totals by outcome and by rule severity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Summary {
    pub by_outcome: OutcomeCounts,
    pub by_severity: SeverityCounts,
}

impl Summary {
    /// Fold every verdict in parallel.
    #[must_use]
    pub fn from_verdicts(verdicts: &[Verdict]) -> Self {
        verdicts
            .par_iter()
            .fold(Self::default, Self::record)
            .reduce(Self::default, Self::merge)
    }

    /// Count one more verdict.
    #[must_use]
    pub const fn record(mut self, verdict: &Verdict) -> Self {
        self.by_outcome.add(verdict.outcome);
        match verdict.severity {
            Severity::Blocking => self.by_severity.blocking.add(verdict.outcome),
            Severity::Warning => self.by_severity.warning.add(verdict.outcome),
        }
        self
    }

    /// Combine two partial sums.
    #[must_use]
    pub const fn merge(self, other: Self) -> Self {
        Self {
            by_outcome: self.by_outcome.merge(other.by_outcome),
            by_severity: SeverityCounts {
                blocking: self.by_severity.blocking.merge(other.by_severity.blocking),
                warning: self.by_severity.warning.merge(other.by_severity.warning),
            },
        }
    }

    #[must_use]
    pub const fn total(&self) -> usize {
        self.by_outcome.total()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use convlint_core::RecordRef;
    use pretty_assertions::assert_eq;

    fn verdict(severity: Severity, outcome: Outcome) -> Verdict {
        Verdict {
            rule_id: "R1".into(),
            severity,
            record: RecordRef {
                path: "a.spec.ts".into(),
                line: 1,
                name: "x".into(),
            },
            outcome,
            message: String::new(),
        }
    }

    #[test]
    fn counts_by_outcome_and_severity() {
        let verdicts = vec![
            verdict(Severity::Blocking, Outcome::Fail),
            verdict(Severity::Blocking, Outcome::Pass),
            verdict(Severity::Warning, Outcome::Warn),
            verdict(Severity::Blocking, Outcome::Warn),
        ];
        let summary = Summary::from_verdicts(&verdicts);

        assert_eq!(
            summary.by_outcome,
            OutcomeCounts {
                pass: 1,
                warn: 2,
                fail: 1
            }
        );
        assert_eq!(
            summary.by_severity.blocking,
            OutcomeCounts {
                pass: 1,
                warn: 1,
                fail: 1
            }
        );
        assert_eq!(summary.by_severity.warning.warn, 1);
        assert_eq!(summary.total(), verdicts.len());
    }

    #[test]
    fn merge_is_commutative() {
        let a = Summary::default().record(&verdict(Severity::Blocking, Outcome::Fail));
        let b = Summary::default()
            .record(&verdict(Severity::Warning, Outcome::Warn))
            .record(&verdict(Severity::Warning, Outcome::Pass));
        assert_eq!(a.merge(b), b.merge(a));
        assert_eq!(Summary::default().merge(a), a);
    }

    #[test]
    fn empty_input_is_all_zero() {
        assert_eq!(Summary::from_verdicts(&[]), Summary::default());
    }
}
