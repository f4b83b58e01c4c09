//! Registry error types.

use thiserror::Error;

/// Errors from building or configuring the rule registry.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    /// Two rules were registered under one identifier.
    #[error("duplicate rule id: {id}")]
    DuplicateRule { id: String },

    /// Configuration named a rule that does not exist.
    #[error("unknown rule in [rules].{setting}: {key}")]
    UnknownRule { setting: &'static str, key: String },
}
