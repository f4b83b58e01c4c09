//! Test-case records produced by the scanner.

use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{Detection, Signal, TestKind};

/// Declaration modifiers such as `it.only`, `xit`, or `it.todo`.
///
/// `focused` and `skipped` are inherited from enclosing `describe.only` /
/// `describe.skip` blocks.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema,
)]
pub struct Modifiers {
    pub focused: bool,
    pub skipped: bool,
    pub todo: bool,
}

impl Modifiers {
    /// Combine a parent suite's modifiers with a declaration's own.
    #[must_use]
    pub const fn inherit(self, parent: Self) -> Self {
        Self {
            focused: self.focused || parent.focused,
            skipped: self.skipped || parent.skipped,
            todo: self.todo,
        }
    }
}

/// One discovered test declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct TestCaseRecord {
    /// File path relative to the scan root, `/`-separated.
    pub path: String,
    /// 1-based line of the declaration call.
    pub line: u32,
    /// Test name. For dynamic names this is the raw source text.
    pub name: String,
    /// The name is not a plain string literal (identifier, interpolated template).
    pub dynamic_name: bool,
    /// Names of enclosing `describe` blocks, outermost first.
    pub suite: Vec<String>,
    pub kind: TestKind,
    pub modifiers: Modifiers,
    /// The declaration's closing parenthesis was found before end of file.
    pub body_complete: bool,
    pub signals: BTreeMap<Signal, Detection>,
}

impl TestCaseRecord {
    /// Detection for `signal`; missing signals read as `Ambiguous`.
    #[must_use]
    pub fn signal(&self, signal: Signal) -> Detection {
        self.signals
            .get(&signal)
            .copied()
            .unwrap_or(Detection::Ambiguous)
    }

    /// Suite path and name joined the way test runners print them.
    #[must_use]
    pub fn full_name(&self) -> String {
        if self.suite.is_empty() {
            return self.name.clone();
        }
        format!("{} > {}", self.suite.join(" > "), self.name)
    }

    #[must_use]
    pub fn reference(&self) -> RecordRef {
        RecordRef {
            path: self.path.clone(),
            line: self.line,
            name: self.full_name(),
        }
    }
}

/// Location and display name of a record, carried by each verdict.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
pub struct RecordRef {
    pub path: String,
    pub line: u32,
    pub name: String,
}
