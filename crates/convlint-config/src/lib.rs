//! # convlint-config
//!
//! Layered configuration loading using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`CONVLINT_*` prefix, `__` as separator)
//! 2. An explicit config file, or `<root>/.convlint.toml`
//! 3. User-level `~/.config/convlint/config.toml`
//! 4. Built-in defaults
//!
//! Command-line flags are applied on top by the binary.
//!
//! # Environment Variable Mapping
//!
//! Figment maps `CONVLINT_RUN__CONCURRENCY` -> `run.concurrency`,
//! `CONVLINT_REPORT__FAIL_ON` -> `report.fail_on`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use std::path::Path;
//! use convlint_config::LintConfig;
//!
//! let config = LintConfig::load(Path::new("."), None).expect("config");
//! println!("{} test suffixes", config.scan.suffixes.len());
//! ```

mod error;
mod report;
mod rules;
mod run;
mod scan;

pub use error::ConfigError;
pub use report::ReportConfig;
pub use rules::RulesConfig;
pub use run::RunConfig;
pub use scan::ScanConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Project-local config file name, looked up in the scan root.
pub const PROJECT_CONFIG_FILE: &str = ".convlint.toml";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct LintConfig {
    #[serde(default)]
    pub scan: ScanConfig,
    #[serde(default)]
    pub rules: RulesConfig,
    #[serde(default)]
    pub report: ReportConfig,
    #[serde(default)]
    pub run: RunConfig,
}

impl LintConfig {
    /// Load configuration for a scan rooted at `root`.
    ///
    /// When `explicit` is given it replaces the project-local file and must exist.
    pub fn load(root: &Path, explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            if !path.is_file() {
                return Err(ConfigError::MissingFile {
                    path: path.to_path_buf(),
                });
            }
        }
        let config: Self = Self::figment(root, explicit).extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Build the figment provider chain.
    ///
    /// This is public so tests can inspect the figment directly or add
    /// additional providers on top.
    pub fn figment(root: &Path, explicit: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        // Layer 2: Explicit file, else project-local config
        let local_path = explicit.map_or_else(|| root.join(PROJECT_CONFIG_FILE), Path::to_path_buf);
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Environment variables (highest priority)
        figment.merge(Env::prefixed("CONVLINT_").split("__"))
    }

    /// Reject values that deserialize fine but cannot drive a scan.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.scan.suffixes.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "scan.suffixes".into(),
                reason: "at least one test file suffix is required".into(),
            });
        }
        if let Some(blank) = self.scan.suffixes.iter().find(|s| s.trim().is_empty()) {
            return Err(ConfigError::InvalidValue {
                field: "scan.suffixes".into(),
                reason: format!("blank suffix {blank:?}"),
            });
        }
        Ok(())
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("convlint").join("config.toml"))
    }
}
