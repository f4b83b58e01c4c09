//! Built-in testing conventions.
//!
//! Each rule reads only the record: its name, kind, modifiers, and the
//! signal map computed by the scanner. `todo` tests have no body, so body
//! rules pass them.

use convlint_core::{Detection, Severity, Signal, TestCaseRecord, TestKind};

use crate::rule::Rule;

/// The static rule table, in id order.
pub const BUILTIN_RULES: [Rule; 8] = [
    Rule {
        id: "R1",
        name: "descriptive-test-name",
        description: "Test names describe the expected behavior",
        violation: "test name is too vague to describe the expected behavior",
        severity: Severity::Warning,
        check: descriptive_test_name,
    },
    Rule {
        id: "R2",
        name: "no-real-network-in-unit-tests",
        description: "Unit tests mock external calls instead of hitting the network",
        violation: "unit test makes a real network call without a mock",
        severity: Severity::Blocking,
        check: no_real_network_in_unit_tests,
    },
    Rule {
        id: "R3",
        name: "await-async-operations",
        description: "Async operations such as nextTick, trigger, and setValue are awaited",
        violation: "async operation is not awaited",
        severity: Severity::Blocking,
        check: await_async_operations,
    },
    Rule {
        id: "R4",
        name: "test-has-assertion",
        description: "Every test asserts on an observable result",
        violation: "test has no assertion",
        severity: Severity::Warning,
        check: test_has_assertion,
    },
    Rule {
        id: "R5",
        name: "no-focused-tests",
        description: "No focused tests (.only, fit) are committed",
        violation: "focused test would silence the rest of the suite",
        severity: Severity::Blocking,
        check: no_focused_tests,
    },
    Rule {
        id: "R6",
        name: "no-skipped-tests",
        description: "No skipped tests (.skip, xit) are committed",
        violation: "test is skipped",
        severity: Severity::Warning,
        check: no_skipped_tests,
    },
    Rule {
        id: "R7",
        name: "no-arbitrary-waits",
        description: "Tests wait on conditions or fake timers, never on fixed delays",
        violation: "test waits for a fixed amount of time",
        severity: Severity::Warning,
        check: no_arbitrary_waits,
    },
    Rule {
        id: "R8",
        name: "test-behavior-not-implementation",
        description: "Tests drive components through their public interface",
        violation: "test reaches into component internals (wrapper.vm or setData)",
        severity: Severity::Warning,
        check: test_behavior_not_implementation,
    },
];

// ---------------------------------------------------------------------------
// R1
// ---------------------------------------------------------------------------

const VAGUE_NAMES: &[&str] = &[
    "should work",
    "should work correctly",
    "should work properly",
    "it works",
    "works",
    "works correctly",
    "works properly",
    "basic test",
    "simple test",
    "sanity check",
    "smoke test",
    "should pass",
    "passes",
    "should render",
    "renders",
    "does something",
    "does stuff",
    "test it",
    "todo",
    "fixme",
];

const VAGUE_TAILS: &[&str] = &["correctly", "properly", "fine", "ok", "as expected"];

/// Lowercase, punctuation to spaces, whitespace collapsed.
fn normalize_name(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                ' '
            }
        })
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn is_placeholder(words: &[&str]) -> bool {
    matches!(words, ["test" | "spec" | "case" | "it", n] if n.chars().all(|c| c.is_ascii_digit()))
}

#[must_use]
pub fn descriptive_test_name(record: &TestCaseRecord) -> Detection {
    if record.dynamic_name {
        return Detection::Ambiguous;
    }
    let normalized = normalize_name(&record.name);
    let words: Vec<&str> = normalized.split(' ').filter(|w| !w.is_empty()).collect();

    let vague = words.len() <= 1
        || VAGUE_NAMES.contains(&normalized.as_str())
        || is_placeholder(&words)
        || (words.len() <= 3
            && VAGUE_TAILS
                .iter()
                .any(|tail| normalized.ends_with(&format!(" {tail}"))));
    Detection::from_bool(vague)
}

// ---------------------------------------------------------------------------
// R2, R3, R4, R7, R8: body signals
// ---------------------------------------------------------------------------

#[must_use]
pub fn no_real_network_in_unit_tests(record: &TestCaseRecord) -> Detection {
    if record.modifiers.todo {
        return Detection::NoMatch;
    }
    let detection = record.signal(Signal::RealNetwork);
    match record.kind {
        TestKind::Unit => detection,
        TestKind::Integration | TestKind::E2e => Detection::NoMatch,
        // Could be a unit test; a hit is worth a look but not a failure.
        TestKind::Unknown => match detection {
            Detection::Match => Detection::Ambiguous,
            other => other,
        },
    }
}

#[must_use]
pub fn await_async_operations(record: &TestCaseRecord) -> Detection {
    body_signal(record, Signal::UnawaitedAsync)
}

#[must_use]
pub fn test_has_assertion(record: &TestCaseRecord) -> Detection {
    if record.modifiers.todo {
        return Detection::NoMatch;
    }
    record.signal(Signal::Assertion).invert()
}

#[must_use]
pub fn no_arbitrary_waits(record: &TestCaseRecord) -> Detection {
    body_signal(record, Signal::ArbitraryWait)
}

#[must_use]
pub fn test_behavior_not_implementation(record: &TestCaseRecord) -> Detection {
    body_signal(record, Signal::ImplementationAccess)
}

fn body_signal(record: &TestCaseRecord, signal: Signal) -> Detection {
    if record.modifiers.todo {
        Detection::NoMatch
    } else {
        record.signal(signal)
    }
}

// ---------------------------------------------------------------------------
// R5, R6: modifiers
// ---------------------------------------------------------------------------

#[must_use]
pub const fn no_focused_tests(record: &TestCaseRecord) -> Detection {
    Detection::from_bool(record.modifiers.focused)
}

#[must_use]
pub const fn no_skipped_tests(record: &TestCaseRecord) -> Detection {
    Detection::from_bool(record.modifiers.skipped)
}
