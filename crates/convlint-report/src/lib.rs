//! # convlint-report
//!
//! Aggregates verdicts into a [`Report`]: deterministic ordering, a
//! commutative [`Summary`] fold, and the overall pass/fail decision.

pub mod report;
pub mod summary;

pub use report::Report;
pub use summary::{OutcomeCounts, SeverityCounts, Summary};
