//! Scan error types for convlint-scan.

use std::path::PathBuf;

/// Fatal errors that abort a scan before any file is read.
///
/// Problems with individual files are not errors: they surface as
/// [`convlint_core::FileReadWarning`] values and the scan continues.
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    #[error("root path does not exist: {}", path.display())]
    RootNotFound { path: PathBuf },

    #[error("root path is not a directory: {}", path.display())]
    NotADirectory { path: PathBuf },

    #[error("root path is unreadable: {}: {source}", path.display())]
    RootUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An exclude glob failed to compile.
    #[error("invalid exclude glob: {0}")]
    InvalidGlob(#[from] ignore::Error),

    /// A test-file suffix failed to compile into a glob.
    #[error("invalid test file suffix: {0}")]
    InvalidSuffix(#[from] globset::Error),
}
