//! Source scanning configuration.

use convlint_core::TestKind;
use serde::{Deserialize, Serialize};

fn default_suffixes() -> Vec<String> {
    [
        ".spec.js", ".spec.ts", ".spec.jsx", ".spec.tsx", ".spec.mjs", ".spec.cjs", ".test.js",
        ".test.ts", ".test.jsx", ".test.tsx", ".test.mjs", ".test.cjs", ".cy.js", ".cy.ts",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

fn default_unit_markers() -> Vec<String> {
    vec!["unit".into(), "__tests__".into()]
}

fn default_integration_markers() -> Vec<String> {
    vec!["integration".into()]
}

fn default_e2e_markers() -> Vec<String> {
    vec!["e2e".into(), "cypress".into(), "playwright".into(), "cy".into()]
}

const fn default_kind() -> TestKind {
    TestKind::Unknown
}

const fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ScanConfig {
    /// File-name suffixes that identify test files (case-insensitive).
    #[serde(default = "default_suffixes")]
    pub suffixes: Vec<String>,

    /// Globs (relative to the root) for files or directories to skip.
    #[serde(default)]
    pub exclude: Vec<String>,

    /// Path segments or dotted file-name parts marking unit tests
    /// (`tests/unit/...`, `Foo.unit.spec.ts`).
    #[serde(default = "default_unit_markers")]
    pub unit_markers: Vec<String>,

    #[serde(default = "default_integration_markers")]
    pub integration_markers: Vec<String>,

    #[serde(default = "default_e2e_markers")]
    pub e2e_markers: Vec<String>,

    /// Kind assigned when no marker matches.
    #[serde(default = "default_kind")]
    pub default_kind: TestKind,

    /// Honour `.gitignore` files while walking.
    #[serde(default = "default_true")]
    pub respect_gitignore: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            suffixes: default_suffixes(),
            exclude: Vec::new(),
            unit_markers: default_unit_markers(),
            integration_markers: default_integration_markers(),
            e2e_markers: default_e2e_markers(),
            default_kind: default_kind(),
            respect_gitignore: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        let config = ScanConfig::default();
        assert!(config.suffixes.iter().any(|s| s == ".spec.ts"));
        assert!(config.suffixes.iter().any(|s| s == ".test.js"));
        assert!(config.exclude.is_empty());
        assert_eq!(config.default_kind, TestKind::Unknown);
        assert!(config.respect_gitignore);
    }
}
