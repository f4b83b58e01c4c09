//! # convlint-scan
//!
//! Source scanner for the convention linter.
//!
//! - `walk`: gitignore-aware directory walking (`ignore` crate)
//! - `test_files`: test-file suffix filter and unit/integration/e2e classification
//! - `lexer`: comment and string masking with parenthesis depth tracking
//! - `extract`: `describe`/`it`/`test` declaration extraction
//! - `detect`: per-body heuristics producing a [`Detection`](convlint_core::Detection) per signal
//! - `scanner`: [`Scanner`], tying the above into a restartable record stream

pub mod detect;
pub mod error;
pub mod extract;
pub mod lexer;
pub mod scanner;
pub mod test_files;
pub mod walk;

pub use error::ScanError;
pub use scanner::{Discovery, Records, ScanEvent, Scanner, extract_records};
pub use test_files::{TestFileFilter, classify};
