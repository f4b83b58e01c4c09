//! Severity, outcome, detection, and classification enums.
//!
//! All enums use `snake_case` serialization via `#[serde(rename_all = "snake_case")]`
//! so the JSON report and the TOML config share one vocabulary.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Severity
// ---------------------------------------------------------------------------

/// How much a rule violation matters to the overall run.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// A violation fails the run.
    Blocking,
    /// A violation is reported but never fails the run on its own.
    Warning,
}

impl Severity {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Blocking => "blocking",
            Self::Warning => "warning",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Outcome
// ---------------------------------------------------------------------------

/// Result of checking one convention against one test declaration.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Pass,
    Warn,
    Fail,
}

impl Outcome {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pass => "pass",
            Self::Warn => "warn",
            Self::Fail => "fail",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Detection
// ---------------------------------------------------------------------------

/// Outcome of a single textual heuristic.
///
/// Heuristics over free-form source text cannot always decide. `Ambiguous`
/// is carried through to the verdict as a warning instead of collapsing into
/// either answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Detection {
    Match,
    NoMatch,
    Ambiguous,
}

impl Detection {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Match => "match",
            Self::NoMatch => "no_match",
            Self::Ambiguous => "ambiguous",
        }
    }

    /// Swap `Match` and `NoMatch`, keeping `Ambiguous`.
    ///
    /// Used by rules whose violation is the absence of a pattern
    /// (e.g. a test without any assertion).
    #[must_use]
    pub const fn invert(self) -> Self {
        match self {
            Self::Match => Self::NoMatch,
            Self::NoMatch => Self::Match,
            Self::Ambiguous => Self::Ambiguous,
        }
    }

    #[must_use]
    pub const fn from_bool(matched: bool) -> Self {
        if matched { Self::Match } else { Self::NoMatch }
    }
}

impl fmt::Display for Detection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Signal
// ---------------------------------------------------------------------------

/// Name of a textual heuristic computed by the scanner for every test body.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum Signal {
    /// The body performs a network call that is not mocked in the file.
    RealNetwork,
    /// The body calls a known async API without awaiting or returning it.
    UnawaitedAsync,
    /// The body contains at least one assertion.
    Assertion,
    /// The body sleeps for a fixed amount of time.
    ArbitraryWait,
    /// The body reaches into component internals (`wrapper.vm`, `setData`).
    ImplementationAccess,
}

impl Signal {
    pub const ALL: [Self; 5] = [
        Self::RealNetwork,
        Self::UnawaitedAsync,
        Self::Assertion,
        Self::ArbitraryWait,
        Self::ImplementationAccess,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::RealNetwork => "real_network",
            Self::UnawaitedAsync => "unawaited_async",
            Self::Assertion => "assertion",
            Self::ArbitraryWait => "arbitrary_wait",
            Self::ImplementationAccess => "implementation_access",
        }
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// TestKind
// ---------------------------------------------------------------------------

/// Test tier of a file, derived from markers in its path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum TestKind {
    Unit,
    Integration,
    E2e,
    Unknown,
}

impl TestKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unit => "unit",
            Self::Integration => "integration",
            Self::E2e => "e2e",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for TestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// FailOn
// ---------------------------------------------------------------------------

/// Which verdict outcomes flip the overall result to failed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum FailOn {
    /// Only `fail` verdicts (produced by blocking rules).
    #[default]
    Blocking,
    /// `fail` and `warn` verdicts.
    Warning,
}

impl FailOn {
    /// Whether a verdict with `outcome` fails the run under this policy.
    #[must_use]
    pub const fn fails(self, outcome: Outcome) -> bool {
        match (self, outcome) {
            (_, Outcome::Fail) | (Self::Warning, Outcome::Warn) => true,
            (_, Outcome::Pass) | (Self::Blocking, Outcome::Warn) => false,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Blocking => "blocking",
            Self::Warning => "warning",
        }
    }
}

impl fmt::Display for FailOn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ReportFormat
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}
