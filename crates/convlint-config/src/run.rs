//! Execution settings.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RunConfig {
    /// Worker threads for scanning and evaluation. `0` uses one per core.
    #[serde(default)]
    pub concurrency: usize,
}
