//! Test file detection and test-tier classification.
//!
//! Used by the scanner to pick test files out of a walked tree and to
//! decide whether each one holds unit, integration, or end-to-end tests.

use convlint_config::ScanConfig;
use convlint_core::TestKind;
use globset::{GlobBuilder, GlobSet, GlobSetBuilder};

/// Matches file names against the configured test-file suffixes.
///
/// Comparison is case-insensitive, and the suffix alone (`.spec.ts`) is not
/// a test file: at least one character must precede it.
#[derive(Debug, Clone)]
pub struct TestFileFilter {
    set: GlobSet,
}

impl TestFileFilter {
    pub fn new(suffixes: &[String]) -> Result<Self, globset::Error> {
        let mut builder = GlobSetBuilder::new();
        for suffix in suffixes {
            let glob = GlobBuilder::new(&format!("?*{}", escape_glob(suffix.trim())))
                .case_insensitive(true)
                .build()?;
            builder.add(glob);
        }
        Ok(Self {
            set: builder.build()?,
        })
    }

    /// Returns `true` if `file_name` ends with one of the configured suffixes.
    ///
    /// # Examples
    ///
    /// ```
    /// use convlint_scan::TestFileFilter;
    /// let filter = TestFileFilter::new(&[".spec.ts".to_string()]).unwrap();
    /// assert!(filter.is_test_file("Counter.spec.ts"));
    /// assert!(!filter.is_test_file("Counter.ts"));
    /// ```
    #[must_use]
    pub fn is_test_file(&self, file_name: &str) -> bool {
        self.set.is_match(file_name)
    }
}

fn escape_glob(literal: &str) -> String {
    let mut out = String::with_capacity(literal.len());
    for ch in literal.chars() {
        if matches!(ch, '*' | '?' | '[' | ']' | '{' | '}') {
            out.push('[');
            out.push(ch);
            out.push(']');
        } else {
            out.push(ch);
        }
    }
    out
}

/// Classify a root-relative, `/`-separated path into a test tier.
///
/// Every directory segment and every dotted part of the file name is
/// compared (case-insensitively) against the configured markers. End-to-end
/// markers win over integration markers, which win over unit markers.
#[must_use]
pub fn classify(rel_path: &str, config: &ScanConfig) -> TestKind {
    let mut segments: Vec<String> = rel_path.split('/').map(str::to_lowercase).collect();
    if let Some(file_name) = segments.pop() {
        segments.extend(file_name.split('.').map(String::from));
    }

    let has_marker = |markers: &[String]| {
        markers
            .iter()
            .any(|marker| segments.iter().any(|s| s.eq_ignore_ascii_case(marker)))
    };

    if has_marker(&config.e2e_markers) {
        TestKind::E2e
    } else if has_marker(&config.integration_markers) {
        TestKind::Integration
    } else if has_marker(&config.unit_markers) {
        TestKind::Unit
    } else {
        config.default_kind
    }
}
