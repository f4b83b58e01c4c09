//! Scans the fixture project under `tests/fixtures/project`.

use std::path::PathBuf;

use convlint_config::ScanConfig;
use convlint_core::{Detection, Signal, TestCaseRecord, TestKind};
use convlint_scan::{ScanEvent, Scanner};
use pretty_assertions::assert_eq;

fn fixture_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/project")
}

fn scanner() -> Scanner {
    Scanner::new(fixture_root(), ScanConfig::default()).expect("fixture root is valid")
}

fn records(scanner: &Scanner) -> Vec<TestCaseRecord> {
    scanner
        .records()
        .map(|event| match event {
            ScanEvent::Record(record) => record,
            ScanEvent::Warning(warning) => panic!("unexpected warning: {warning}"),
        })
        .collect()
}

fn find<'a>(records: &'a [TestCaseRecord], name: &str) -> &'a TestCaseRecord {
    records
        .iter()
        .find(|r| r.name == name)
        .unwrap_or_else(|| panic!("no record named {name:?}"))
}

#[test]
fn discovers_test_files_in_walk_order() {
    let discovery = scanner().test_files();
    let root = fixture_root();
    let rel: Vec<String> = discovery
        .files
        .iter()
        .map(|p| {
            p.strip_prefix(&root)
                .unwrap()
                .to_string_lossy()
                .replace('\\', "/")
        })
        .collect();

    assert_eq!(
        rel,
        vec![
            "src/api/profile.unit.spec.ts",
            "src/api/users.unit.spec.ts",
            "src/components/__tests__/Counter.spec.ts",
            "src/components/__tests__/Modal.spec.ts",
            "tests/e2e/login.cy.ts",
        ]
    );
    assert!(discovery.warnings.is_empty());
}

#[test]
fn rescanning_yields_identical_records() {
    let scanner = scanner();
    let first = records(&scanner);
    let second = records(&scanner);
    let fresh = records(&self::scanner());

    assert_eq!(first.len(), 9);
    assert_eq!(first, second);
    assert_eq!(first, fresh);
}

#[test]
fn unmocked_fetch_in_unit_file_is_detected() {
    let all = records(&scanner());
    let record = find(&all, "returns the list of users from the API");

    assert_eq!(record.kind, TestKind::Unit);
    assert_eq!(record.suite, vec!["fetchUsers".to_string()]);
    assert_eq!(record.signal(Signal::RealNetwork), Detection::Match);
}

#[test]
fn mocked_axios_is_not_real_network() {
    let all = records(&scanner());
    let record = find(&all, "maps the API response to a profile");
    assert_eq!(record.signal(Signal::RealNetwork), Detection::NoMatch);
}

#[test]
fn suite_modifiers_reach_nested_tests() {
    let all = records(&scanner());

    let opens = find(&all, "opens when the trigger is clicked");
    assert!(opens.modifiers.focused);
    assert!(!opens.modifiers.skipped);
    assert_eq!(opens.signal(Signal::ImplementationAccess), Detection::Match);

    let closes = find(&all, "closes on escape");
    assert!(closes.modifiers.focused);
    assert!(closes.modifiers.skipped);
    assert_eq!(closes.signal(Signal::UnawaitedAsync), Detection::Match);

    let todo = find(&all, "traps focus inside the dialog");
    assert!(todo.modifiers.todo);
    assert_eq!(todo.line, 17);
}

#[test]
fn cypress_wait_is_arbitrary() {
    let all = records(&scanner());
    let record = find(&all, "signs the user in with valid credentials");

    assert_eq!(record.kind, TestKind::E2e);
    assert_eq!(record.signal(Signal::ArbitraryWait), Detection::Match);
    assert_eq!(record.signal(Signal::Assertion), Detection::Match);
    assert_eq!(record.signal(Signal::UnawaitedAsync), Detection::NoMatch);
}

#[test]
fn excluded_directories_are_skipped() {
    let config = ScanConfig {
        exclude: vec!["tests/**".into()],
        ..ScanConfig::default()
    };
    let scanner = Scanner::new(fixture_root(), config).unwrap();
    let all = records(&scanner);

    assert_eq!(all.len(), 8);
    assert!(all.iter().all(|r| !r.path.starts_with("tests/")));
}
