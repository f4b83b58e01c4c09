//! File walker factory for test discovery.
//!
//! Uses the `ignore` crate for gitignore-aware directory walking with support
//! for a custom ignore file (`.convlintignore`) and exclude globs.
//!
//! Walk order is sorted by file name within each directory, so two walks over
//! an unchanged tree yield the same sequence.

use ignore::WalkBuilder;
use ignore::overrides::{Override, OverrideBuilder};
use std::path::Path;

/// Custom ignore file honoured in every directory of the scan.
pub const IGNORE_FILE: &str = ".convlintignore";

/// Directories never worth descending into.
const ALWAYS_SKIPPED_DIRS: &[&str] = &["node_modules", ".git"];

/// Compile exclude globs into an override matcher.
///
/// Callers pass raw patterns (e.g. `"legacy/**"`); they are negated here so
/// the override acts as an ignore list.
pub fn build_excludes(root: &Path, exclude_globs: &[String]) -> Result<Override, ignore::Error> {
    let mut overrides = OverrideBuilder::new(root);
    for glob in exclude_globs {
        overrides.add(&format!("!{glob}"))?;
    }
    overrides.build()
}

/// Build a file walker over `root`.
///
/// - `respect_gitignore`: honour `.gitignore`, `.ignore`, and git excludes,
///   whether or not `root` is inside a git repository.
/// - `excludes`: compiled with [`build_excludes`].
///
/// Hidden files are walked; `node_modules/` and `.git/` never are.
///
/// # Examples
///
/// ```no_run
/// use std::path::Path;
/// use convlint_scan::walk::{build_excludes, build_walker};
///
/// let root = Path::new("/path/to/project");
/// let excludes = build_excludes(root, &[]).unwrap();
/// for entry in build_walker(root, true, excludes) {
///     println!("{:?}", entry.map(|e| e.into_path()));
/// }
/// ```
#[must_use]
pub fn build_walker(root: &Path, respect_gitignore: bool, excludes: Override) -> ignore::Walk {
    let mut builder = WalkBuilder::new(root);

    if respect_gitignore {
        builder.hidden(false);
        builder.require_git(false);
    } else {
        // Disable all default filters (gitignore, hidden, etc.)
        builder.standard_filters(false);
    }
    builder.add_custom_ignore_filename(IGNORE_FILE);
    builder.overrides(excludes);
    builder.sort_by_file_name(|a, b| a.cmp(b));

    builder.filter_entry(|entry| {
        let is_dir = entry.file_type().is_some_and(|ft| ft.is_dir());
        let file_name = entry.file_name().to_string_lossy();
        !(is_dir && ALWAYS_SKIPPED_DIRS.contains(&file_name.as_ref()))
    });

    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    // Helper: create a fixture directory with various files and subdirs
    fn create_fixture(dir: &Path) {
        let dirs = [
            "src/components/__tests__",
            "tests/unit",
            "tests/e2e",
            "node_modules/lodash",
            "legacy",
            "dist",
        ];
        for d in &dirs {
            fs::create_dir_all(dir.join(d)).expect("mkdir should succeed");
        }

        let files = [
            ("src/components/Counter.vue", "<template />"),
            ("src/components/__tests__/Counter.spec.ts", "it('a', () => {})"),
            ("tests/unit/api.spec.ts", "it('b', () => {})"),
            ("tests/e2e/login.spec.ts", "it('c', () => {})"),
            ("node_modules/lodash/index.spec.js", "it('d', () => {})"),
            ("legacy/old.spec.js", "it('e', () => {})"),
            ("dist/bundle.spec.js", "it('f', () => {})"),
            (".gitignore", "dist/\n"),
            (".hidden.spec.ts", "it('g', () => {})"),
        ];
        for (path, content) in &files {
            fs::write(dir.join(path), content).expect("write should succeed");
        }
    }

    fn walk_files(root: &Path, respect_gitignore: bool, excludes: &[String]) -> Vec<String> {
        let overrides = build_excludes(root, excludes).expect("valid excludes");
        build_walker(root, respect_gitignore, overrides)
            .filter_map(Result::ok)
            .filter(|e| e.file_type().is_some_and(|ft| ft.is_file()))
            .map(|e| {
                e.path()
                    .strip_prefix(root)
                    .unwrap()
                    .to_string_lossy()
                    .replace('\\', "/")
            })
            .collect()
    }

    #[test]
    fn gitignore_applies_without_git_repo() {
        let tmp = tempfile::tempdir().unwrap();
        create_fixture(tmp.path());

        let entries = walk_files(tmp.path(), true, &[]);

        assert!(!entries.iter().any(|e| e.starts_with("dist")));
        assert!(entries.contains(&"tests/unit/api.spec.ts".to_string()));
        assert!(entries.contains(&".hidden.spec.ts".to_string()));
    }

    #[test]
    fn raw_walk_ignores_gitignore_but_not_node_modules() {
        let tmp = tempfile::tempdir().unwrap();
        create_fixture(tmp.path());

        let entries = walk_files(tmp.path(), false, &[]);

        assert!(entries.contains(&"dist/bundle.spec.js".to_string()));
        assert!(!entries.iter().any(|e| e.contains("node_modules")));
    }

    #[test]
    fn custom_ignore_file_is_honoured() {
        let tmp = tempfile::tempdir().unwrap();
        create_fixture(tmp.path());
        fs::write(tmp.path().join(IGNORE_FILE), "tests/e2e/\n").expect("write ignore file");

        let entries = walk_files(tmp.path(), true, &[]);

        assert!(!entries.iter().any(|e| e.starts_with("tests/e2e")));
        assert!(entries.contains(&"tests/unit/api.spec.ts".to_string()));
    }

    #[test]
    fn exclude_globs_remove_matches() {
        let tmp = tempfile::tempdir().unwrap();
        create_fixture(tmp.path());

        let entries = walk_files(tmp.path(), true, &["legacy/**".to_string()]);

        assert!(!entries.iter().any(|e| e.starts_with("legacy")));
        assert!(entries.contains(&"src/components/__tests__/Counter.spec.ts".to_string()));
    }

    #[test]
    fn walk_order_is_stable() {
        let tmp = tempfile::tempdir().unwrap();
        create_fixture(tmp.path());

        let first = walk_files(tmp.path(), true, &[]);
        let second = walk_files(tmp.path(), true, &[]);
        assert_eq!(first, second);
    }

    #[test]
    fn invalid_exclude_glob_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        assert!(build_excludes(tmp.path(), &["src/[".to_string()]).is_err());
    }
}
