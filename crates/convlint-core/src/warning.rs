use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A test file that could not be read; recorded in the report, never fatal.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
pub struct FileReadWarning {
    pub path: String,
    pub message: String,
}

impl std::fmt::Display for FileReadWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}
