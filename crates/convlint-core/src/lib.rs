//! # convlint-core
//!
//! Core types shared by every convlint crate.
//!
//! - Severity, outcome, and detection enums
//! - `TestCaseRecord`, the scanner's output for one test declaration
//! - `Verdict`, the evaluator's output for one (rule, record) pair
//! - `FileReadWarning`, the non-fatal scan diagnostic

pub mod enums;
pub mod record;
pub mod verdict;
pub mod warning;

pub use enums::{Detection, FailOn, Outcome, ReportFormat, Severity, Signal, TestKind};
pub use record::{Modifiers, RecordRef, TestCaseRecord};
pub use verdict::Verdict;
pub use warning::FileReadWarning;
