//! The rule evaluator: one verdict per (rule, record) pair.

use convlint_core::{Detection, Outcome, Severity, TestCaseRecord, Verdict};
use rayon::prelude::*;

use crate::registry::RuleRegistry;
use crate::rule::Rule;

/// Map a rule's detection to an outcome.
///
/// A match fails blocking rules and warns on warning rules. An ambiguous
/// detection always warns.
#[must_use]
pub const fn outcome_for(severity: Severity, detection: Detection) -> Outcome {
    match (detection, severity) {
        (Detection::NoMatch, _) => Outcome::Pass,
        (Detection::Match, Severity::Blocking) => Outcome::Fail,
        (Detection::Match, Severity::Warning) | (Detection::Ambiguous, _) => Outcome::Warn,
    }
}

/// Check one rule against one record.
#[must_use]
pub fn evaluate(rule: &Rule, record: &TestCaseRecord) -> Verdict {
    let detection = (rule.check)(record);
    let message = match detection {
        Detection::NoMatch => rule.description.to_string(),
        Detection::Match => rule.violation.to_string(),
        Detection::Ambiguous => format!("could not be decided statically: {}", rule.description),
    };
    Verdict {
        rule_id: rule.id.to_string(),
        severity: rule.severity,
        record: record.reference(),
        outcome: outcome_for(rule.severity, detection),
        message,
    }
}

/// Evaluate every rule against every record on the current rayon pool.
///
/// Output is grouped by record, then rule, in input order.
#[must_use]
pub fn evaluate_all(registry: &RuleRegistry, records: &[TestCaseRecord]) -> Vec<Verdict> {
    records
        .par_iter()
        .flat_map_iter(|record| {
            registry
                .list_rules()
                .iter()
                .map(move |rule| evaluate(rule, record))
        })
        .collect()
}
