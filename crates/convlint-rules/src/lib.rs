//! # convlint-rules
//!
//! Testing conventions and their evaluation.
//!
//! - [`Rule`]: id, name, severity, and a predicate over a
//!   [`TestCaseRecord`](convlint_core::TestCaseRecord)
//! - [`BUILTIN_RULES`]: the static rule table
//! - [`RuleRegistry`]: the rules active for one run
//! - [`evaluate`] / [`evaluate_all`]: pure mapping from (rule, record) to
//!   [`Verdict`](convlint_core::Verdict)

pub mod builtin;
pub mod error;
pub mod evaluate;
pub mod registry;
pub mod rule;

pub use builtin::BUILTIN_RULES;
pub use error::RegistryError;
pub use evaluate::{evaluate, evaluate_all, outcome_for};
pub use registry::RuleRegistry;
pub use rule::{Check, Rule};
