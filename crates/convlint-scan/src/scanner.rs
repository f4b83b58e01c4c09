//! Directory scanning: discovery, per-file extraction, and the record stream.

use std::collections::VecDeque;
use std::path::{Path, PathBuf};

use convlint_config::ScanConfig;
use convlint_core::{FileReadWarning, TestCaseRecord, TestKind};
use ignore::overrides::Override;

use crate::detect::{self, DetectInput, FileContext};
use crate::error::ScanError;
use crate::extract::declarations;
use crate::lexer::lex;
use crate::test_files::{TestFileFilter, classify};
use crate::walk::{build_excludes, build_walker};

/// One item of the record stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanEvent {
    Record(TestCaseRecord),
    Warning(FileReadWarning),
}

/// Test files found under the root, in walk order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Discovery {
    pub files: Vec<PathBuf>,
    /// Directories or entries the walker could not read.
    pub warnings: Vec<FileReadWarning>,
}

/// Walks a validated root directory and turns test files into records.
///
/// A `Scanner` holds no state between scans: every call to
/// [`test_files`](Self::test_files) or [`records`](Self::records) walks the
/// tree again, so an unchanged tree always yields the same sequence.
#[derive(Debug, Clone)]
pub struct Scanner {
    root: PathBuf,
    config: ScanConfig,
    filter: TestFileFilter,
    excludes: Override,
}

impl Scanner {
    /// Validate `root` and compile the file filters.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError`] if the root is missing, not a directory, or
    /// unreadable, or if a suffix or exclude glob does not compile.
    pub fn new(root: impl Into<PathBuf>, config: ScanConfig) -> Result<Self, ScanError> {
        let root = root.into();
        let metadata = std::fs::metadata(&root).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                ScanError::RootNotFound { path: root.clone() }
            } else {
                ScanError::RootUnreadable {
                    path: root.clone(),
                    source,
                }
            }
        })?;
        if !metadata.is_dir() {
            return Err(ScanError::NotADirectory { path: root });
        }
        if let Err(source) = std::fs::read_dir(&root) {
            return Err(ScanError::RootUnreadable { path: root, source });
        }

        let filter = TestFileFilter::new(&config.suffixes)?;
        let excludes = build_excludes(&root, &config.exclude)?;

        Ok(Self {
            root,
            config,
            filter,
            excludes,
        })
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    #[must_use]
    pub const fn config(&self) -> &ScanConfig {
        &self.config
    }

    /// Walk the root and collect every test file.
    #[must_use]
    pub fn test_files(&self) -> Discovery {
        let mut discovery = Discovery::default();
        for entry in self.walk() {
            match entry {
                Ok(path) => discovery.files.push(path),
                Err(warning) => discovery.warnings.push(warning),
            }
        }
        tracing::debug!(
            root = %self.root.display(),
            files = discovery.files.len(),
            "discovered test files"
        );
        discovery
    }

    /// Read one test file and extract its records.
    ///
    /// # Errors
    ///
    /// Returns a [`FileReadWarning`] if the file cannot be read or is not
    /// valid UTF-8. Callers record it and carry on.
    pub fn scan_file(&self, path: &Path) -> Result<Vec<TestCaseRecord>, FileReadWarning> {
        let rel = relative_path(&self.root, path);

        let source = std::fs::read(path)
            .map_err(|e| e.to_string())
            .and_then(|bytes| {
                String::from_utf8(bytes).map_err(|_| "file is not valid UTF-8".to_string())
            })
            .map_err(|message| {
                tracing::warn!(path = %rel, %message, "skipping unreadable test file");
                FileReadWarning {
                    path: rel.clone(),
                    message,
                }
            })?;

        let kind = classify(&rel, &self.config);
        let records = extract_records(&rel, &source, kind);
        tracing::debug!(path = %rel, %kind, tests = records.len(), "scanned test file");
        Ok(records)
    }

    /// Lazily scan the tree, yielding records file by file in walk order.
    ///
    /// Calling this again starts a fresh walk.
    #[must_use]
    pub fn records(&self) -> Records<'_> {
        Records {
            scanner: self,
            files: Box::new(self.walk()),
            pending: VecDeque::new(),
        }
    }

    fn walk(&self) -> impl Iterator<Item = Result<PathBuf, FileReadWarning>> + '_ {
        build_walker(
            &self.root,
            self.config.respect_gitignore,
            self.excludes.clone(),
        )
        .filter_map(move |entry| match entry {
            Ok(entry) => {
                let wanted = entry.file_type().is_some_and(|ft| ft.is_file())
                    && self
                        .filter
                        .is_test_file(&entry.file_name().to_string_lossy());
                wanted.then(|| Ok(entry.into_path()))
            }
            Err(err) => Some(Err(self.walk_warning(&err))),
        })
    }

    fn walk_warning(&self, err: &ignore::Error) -> FileReadWarning {
        let path = error_path(err).map_or_else(String::new, |p| relative_path(&self.root, p));
        tracing::warn!(path = %path, error = %err, "skipping unreadable entry");
        FileReadWarning {
            path,
            message: err.to_string(),
        }
    }
}

/// Iterator returned by [`Scanner::records`].
pub struct Records<'a> {
    scanner: &'a Scanner,
    files: Box<dyn Iterator<Item = Result<PathBuf, FileReadWarning>> + 'a>,
    pending: VecDeque<TestCaseRecord>,
}

impl Iterator for Records<'_> {
    type Item = ScanEvent;

    fn next(&mut self) -> Option<ScanEvent> {
        loop {
            if let Some(record) = self.pending.pop_front() {
                return Some(ScanEvent::Record(record));
            }
            match self.files.next()? {
                Ok(path) => match self.scanner.scan_file(&path) {
                    Ok(records) => self.pending.extend(records),
                    Err(warning) => return Some(ScanEvent::Warning(warning)),
                },
                Err(warning) => return Some(ScanEvent::Warning(warning)),
            }
        }
    }
}

/// Turn one file's source text into test-case records.
///
/// `path` is stored on each record as given.
#[must_use]
pub fn extract_records(path: &str, source: &str, kind: TestKind) -> Vec<TestCaseRecord> {
    let lines = lex(source);
    let context = FileContext::from_lines(&lines);

    declarations(&lines)
        .into_iter()
        .map(|decl| {
            let signals = detect::signals(&DetectInput {
                body: &decl.body,
                complete: decl.complete,
                context: &context,
            });
            TestCaseRecord {
                path: path.to_owned(),
                line: decl.line,
                name: decl.name,
                dynamic_name: decl.dynamic_name,
                suite: decl.suite,
                kind,
                modifiers: decl.modifiers,
                body_complete: decl.complete,
                signals,
            }
        })
        .collect()
}

/// `path` relative to `root`, `/`-separated.
fn relative_path(root: &Path, path: &Path) -> String {
    let rel = path.strip_prefix(root).unwrap_or(path);
    rel.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

fn error_path(err: &ignore::Error) -> Option<&Path> {
    match err {
        ignore::Error::WithPath { path, .. } => Some(path.as_path()),
        ignore::Error::WithDepth { err, .. } | ignore::Error::WithLineNumber { err, .. } => {
            error_path(err)
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use convlint_core::{Detection, Signal};
    use pretty_assertions::assert_eq;
    use std::fs;

    const COUNTER_SPEC: &str = r"import { mount } from '@vue/test-utils'
import Counter from '../Counter.vue'

describe('Counter', () => {
  it('increments the count when the button is clicked', async () => {
    const wrapper = mount(Counter)
    await wrapper.find('button').trigger('click')
    expect(wrapper.text()).toContain('1')
  })

  it('should work', () => {
    const wrapper = mount(Counter)
    expect(wrapper.exists()).toBe(true)
  })
})
";

    #[test]
    fn extract_records_fills_every_field() {
        let records = extract_records(
            "src/__tests__/Counter.spec.ts",
            COUNTER_SPEC,
            TestKind::Unit,
        );
        assert_eq!(records.len(), 2);

        let first = &records[0];
        assert_eq!(first.path, "src/__tests__/Counter.spec.ts");
        assert_eq!(first.line, 5);
        assert_eq!(first.name, "increments the count when the button is clicked");
        assert_eq!(first.suite, vec!["Counter".to_string()]);
        assert_eq!(first.kind, TestKind::Unit);
        assert!(first.body_complete);
        assert_eq!(first.signal(Signal::Assertion), Detection::Match);
        assert_eq!(first.signal(Signal::UnawaitedAsync), Detection::NoMatch);
        assert_eq!(first.signal(Signal::RealNetwork), Detection::NoMatch);

        assert_eq!(records[1].name, "should work");
        assert_eq!(records[1].line, 11);
    }

    #[test]
    fn string_contents_do_not_trigger_heuristics() {
        let source = "it('does not call fetch(url) or sleep(10)', () => {\n  expect(1).toBe(1)\n})\n";
        let records = extract_records("a.spec.ts", source, TestKind::Unit);
        assert_eq!(records[0].signal(Signal::RealNetwork), Detection::NoMatch);
        assert_eq!(records[0].signal(Signal::ArbitraryWait), Detection::NoMatch);
    }

    #[test]
    fn file_without_tests_has_no_records() {
        let records = extract_records("helpers.spec.ts", "export const x = 1\n", TestKind::Unit);
        assert!(records.is_empty());
    }

    #[test]
    fn missing_root_is_rejected() {
        let tmp = tempfile::tempdir().unwrap();
        let err = Scanner::new(tmp.path().join("nope"), ScanConfig::default()).unwrap_err();
        assert!(matches!(err, ScanError::RootNotFound { .. }));
    }

    #[test]
    fn file_root_is_rejected() {
        let tmp = tempfile::tempdir().unwrap();
        let file = tmp.path().join("a.spec.ts");
        fs::write(&file, "").unwrap();
        let err = Scanner::new(&file, ScanConfig::default()).unwrap_err();
        assert!(matches!(err, ScanError::NotADirectory { .. }));
    }

    #[test]
    fn invalid_exclude_is_rejected() {
        let tmp = tempfile::tempdir().unwrap();
        let config = ScanConfig {
            exclude: vec!["src/[".into()],
            ..ScanConfig::default()
        };
        let err = Scanner::new(tmp.path(), config).unwrap_err();
        assert!(matches!(err, ScanError::InvalidGlob(_)));
    }

    #[test]
    fn non_utf8_file_becomes_a_warning() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join("bad.spec.ts"), [0xff, 0xfe, 0x00]).unwrap();
        let scanner = Scanner::new(tmp.path(), ScanConfig::default()).unwrap();

        let warning = scanner
            .scan_file(&tmp.path().join("bad.spec.ts"))
            .unwrap_err();
        assert_eq!(warning.path, "bad.spec.ts");
        assert!(warning.message.contains("UTF-8"));
    }

    #[test]
    fn records_stream_continues_past_a_bad_file() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join("a.spec.ts"), [0xff, 0xfe]).unwrap();
        fs::write(tmp.path().join("b.spec.ts"), COUNTER_SPEC).unwrap();
        let scanner = Scanner::new(tmp.path(), ScanConfig::default()).unwrap();

        let mut warnings = Vec::new();
        let mut paths = Vec::new();
        for event in scanner.records() {
            match event {
                ScanEvent::Warning(warning) => warnings.push(warning.path),
                ScanEvent::Record(record) => paths.push(record.path),
            }
        }

        assert_eq!(warnings, vec!["a.spec.ts".to_string()]);
        assert!(!paths.is_empty());
        assert!(paths.iter().all(|p| p == "b.spec.ts"));
    }

    #[test]
    fn only_test_files_are_discovered() {
        let tmp = tempfile::tempdir().unwrap();
        fs::create_dir_all(tmp.path().join("src/__tests__")).unwrap();
        fs::write(tmp.path().join("src/Counter.vue"), "<template />").unwrap();
        fs::write(tmp.path().join("src/__tests__/Counter.spec.ts"), COUNTER_SPEC).unwrap();

        let scanner = Scanner::new(tmp.path(), ScanConfig::default()).unwrap();
        let discovery = scanner.test_files();
        assert_eq!(
            discovery.files,
            vec![tmp.path().join("src/__tests__/Counter.spec.ts")]
        );
        assert!(discovery.warnings.is_empty());
    }

    #[test]
    fn records_stream_classifies_kind_from_path() {
        let tmp = tempfile::tempdir().unwrap();
        fs::create_dir_all(tmp.path().join("tests/e2e")).unwrap();
        fs::write(
            tmp.path().join("tests/e2e/login.spec.ts"),
            "test('user can log in', async ({ page }) => {\n  await expect(page).toHaveTitle('x')\n})\n",
        )
        .unwrap();

        let scanner = Scanner::new(tmp.path(), ScanConfig::default()).unwrap();
        let events: Vec<ScanEvent> = scanner.records().collect();
        assert_eq!(events.len(), 1);
        let ScanEvent::Record(record) = &events[0] else {
            panic!("expected a record, got {:?}", events[0]);
        };
        assert_eq!(record.path, "tests/e2e/login.spec.ts");
        assert_eq!(record.kind, TestKind::E2e);
    }

    #[test]
    fn relative_paths_use_forward_slashes() {
        let root = Path::new("/repo");
        assert_eq!(
            relative_path(root, Path::new("/repo/src/a/b.spec.ts")),
            "src/a/b.spec.ts"
        );
    }
}
