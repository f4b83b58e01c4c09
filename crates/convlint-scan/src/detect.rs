//! Textual heuristics computed over each test body.
//!
//! Every heuristic is a named detector returning [`Detection`]. A detector
//! reports `Match` only on positive evidence; when it finds nothing in a
//! body that was cut off at end of file it reports `Ambiguous`.
//!
//! Bodies are masked (string contents blanked), so a test named
//! `'calls fetch()'` does not look like a network call. File-level facts
//! that depend on string contents (mocked module names) come from
//! [`FileContext`], which reads the comment-free text.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use convlint_core::{Detection, Signal};
use regex::Regex;

use crate::lexer::LexedLine;

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("heuristic regex is valid")
}

static NETWORK_CALL: LazyLock<Regex> = LazyLock::new(|| {
    compile(concat!(
        r"(?:^|[^\w$.])(?:(?:window|globalThis|global|self)\.)?(?:fetch|\$fetch|ofetch)\s*\(",
        r"|\baxios\s*(?:\.\s*(?:get|post|put|patch|delete|head|options|request)\s*)?\(",
        r"|\bnew\s+(?:XMLHttpRequest|WebSocket|EventSource)\b",
        r"|\bhttps?\s*\.\s*(?:get|request)\s*\(",
    ))
});

static NETWORK_MOCK: LazyLock<Regex> = LazyLock::new(|| {
    compile(concat!(
        r#"\b(?:vi|jest)\s*\.\s*(?:mock|doMock)\s*\(\s*['"`](?:axios|ky|got|ofetch|node-fetch|cross-fetch|undici|superagent)['"`]"#,
        r#"|\bvi\s*\.\s*stubGlobal\s*\(\s*['"`]fetch['"`]"#,
        r#"|\b(?:vi|jest)\s*\.\s*spyOn\s*\(\s*(?:global|globalThis|window)\s*,\s*['"`]fetch['"`]"#,
        r"|\b(?:global|globalThis|window)\s*\.\s*fetch\s*=",
        r"|\bsetup(?:Server|Worker)\s*\(",
        r"|fetchMock|fetch-mock|createFetchMock|MockAdapter|\bnock\s*\(",
        r"|\bcy\s*\.\s*intercept\s*\(|\bpage\s*\.\s*route\s*\(",
    ))
});

static MODULE_MOCK: LazyLock<Regex> =
    LazyLock::new(|| compile(r"\b(?:vi|jest)\s*\.\s*(?:mock|doMock)\s*\("));

static FAKE_TIMERS: LazyLock<Regex> =
    LazyLock::new(|| compile(r"\buseFakeTimers\s*\(|\bcy\s*\.\s*clock\s*\("));

static ASYNC_CALL: LazyLock<Regex> = LazyLock::new(|| {
    compile(concat!(
        r"\b(?:nextTick|flushPromises|waitFor|waitForElementToBeRemoved|find(?:All)?By[A-Z]\w*)\s*\(",
        r"|\.\s*(?:trigger|setValue|setProps|setData|setChecked|setSelected)\s*\(",
        r"|\buserEvent\s*\.\s*(?:click|dblClick|tripleClick|type|clear|selectOptions|deselectOptions|keyboard|hover|unhover|upload|tab|paste|pointer|copy|cut)\s*\(",
        r"|\.\s*(?:resolves|rejects)\b",
    ))
});

// Cypress chains are queued by the runner rather than awaited.
static AWAITED_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| compile(r"\b(?:await|return)\b|=>[^{;]*$|\bcy\s*\."));

static CALLBACK_STYLE: LazyLock<Regex> =
    LazyLock::new(|| compile(r"\.\s*then\s*\(|\(\s*done\s*\)|\bdone\s*=>"));

static ASSERTION: LazyLock<Regex> = LazyLock::new(|| {
    compile(r"\b(?:expect|assert)\w*\s*[(.]|\.\s*should\s*\(|\bexpectTypeOf\b|\bt\s*\.\s*(?:is|deepEqual|truthy|falsy|throws)\s*\(")
});

static ASSERTION_HELPER: LazyLock<Regex> =
    LazyLock::new(|| compile(r"\b(?:verify|check|ensure)\w*\s*\("));

static HARD_WAIT: LazyLock<Regex> = LazyLock::new(|| {
    compile(concat!(
        r"\b(?:sleep|delay|wait)\s*\(\s*\d",
        r"|\bwaitForTimeout\s*\(",
        r"|\bcy\s*\.\s*wait\s*\(\s*\d",
    ))
});

static SET_TIMEOUT: LazyLock<Regex> = LazyLock::new(|| compile(r"\bsetTimeout\s*\("));

static IMPLEMENTATION_ACCESS: LazyLock<Regex> =
    LazyLock::new(|| compile(r"\.\s*vm\b|\.\s*setData\s*\("));

/// File-wide facts that change how body matches are read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FileContext {
    /// A network client or `fetch` is mocked somewhere in the file.
    pub mocks_network: bool,
    /// Some module is mocked, possibly one that wraps the network.
    pub mocks_modules: bool,
    pub fake_timers: bool,
}

impl FileContext {
    #[must_use]
    pub fn from_lines(lines: &[LexedLine]) -> Self {
        let code = lines
            .iter()
            .map(|line| line.code.as_str())
            .collect::<Vec<_>>()
            .join("\n");
        Self {
            mocks_network: NETWORK_MOCK.is_match(&code),
            mocks_modules: MODULE_MOCK.is_match(&code),
            fake_timers: FAKE_TIMERS.is_match(&code),
        }
    }
}

/// What a detector sees for one test.
#[derive(Debug, Clone, Copy)]
pub struct DetectInput<'a> {
    /// Masked body text.
    pub body: &'a str,
    pub complete: bool,
    pub context: &'a FileContext,
}

impl DetectInput<'_> {
    /// Result when nothing was found: conclusive only for complete bodies.
    const fn nothing_found(&self) -> Detection {
        if self.complete {
            Detection::NoMatch
        } else {
            Detection::Ambiguous
        }
    }
}

/// A named heuristic.
#[derive(Debug, Clone, Copy)]
pub struct Detector {
    pub signal: Signal,
    pub detect: fn(&DetectInput<'_>) -> Detection,
}

/// Every detector, one per [`Signal`].
pub const DETECTORS: &[Detector] = &[
    Detector {
        signal: Signal::RealNetwork,
        detect: real_network,
    },
    Detector {
        signal: Signal::UnawaitedAsync,
        detect: unawaited_async,
    },
    Detector {
        signal: Signal::Assertion,
        detect: assertion,
    },
    Detector {
        signal: Signal::ArbitraryWait,
        detect: arbitrary_wait,
    },
    Detector {
        signal: Signal::ImplementationAccess,
        detect: implementation_access,
    },
];

/// Run every detector over one body.
#[must_use]
pub fn signals(input: &DetectInput<'_>) -> BTreeMap<Signal, Detection> {
    DETECTORS
        .iter()
        .map(|detector| (detector.signal, (detector.detect)(input)))
        .collect()
}

/// A network call that nothing in the file mocks.
#[must_use]
pub fn real_network(input: &DetectInput<'_>) -> Detection {
    if !NETWORK_CALL.is_match(input.body) {
        return input.nothing_found();
    }
    if input.context.mocks_network {
        Detection::NoMatch
    } else if input.context.mocks_modules {
        Detection::Ambiguous
    } else {
        Detection::Match
    }
}

/// A known async API whose statement is neither awaited nor returned.
#[must_use]
pub fn unawaited_async(input: &DetectInput<'_>) -> Detection {
    let lines: Vec<&str> = input.body.lines().collect();
    let mut unawaited = false;

    for (index, line) in lines.iter().enumerate() {
        for found in ASYNC_CALL.find_iter(line) {
            let prefix = &line[..found.start()];
            if !statement_is_awaited(&lines, index, prefix) {
                unawaited = true;
            }
        }
    }

    if unawaited {
        if CALLBACK_STYLE.is_match(input.body) {
            Detection::Ambiguous
        } else {
            Detection::Match
        }
    } else {
        input.nothing_found()
    }
}

/// Whether the statement containing a call is awaited or returned.
///
/// Chained calls split over lines (`await wrapper\n  .find(..)\n  .trigger(..)`)
/// are traced back to the line that starts the chain.
fn statement_is_awaited(lines: &[&str], index: usize, prefix: &str) -> bool {
    if AWAITED_PREFIX.is_match(prefix) {
        return true;
    }
    if !prefix.trim().is_empty() && !prefix.trim_start().starts_with('.') {
        return false;
    }
    let mut cursor = index;
    while cursor > 0 && lines[cursor].trim_start().starts_with('.') {
        cursor -= 1;
        if AWAITED_PREFIX.is_match(lines[cursor]) {
            return true;
        }
    }
    false
}

/// At least one assertion. `Match` means the convention is satisfied.
#[must_use]
pub fn assertion(input: &DetectInput<'_>) -> Detection {
    if ASSERTION.is_match(input.body) {
        Detection::Match
    } else if ASSERTION_HELPER.is_match(input.body) {
        Detection::Ambiguous
    } else {
        input.nothing_found()
    }
}

/// Sleeping for a fixed time instead of waiting on a condition.
#[must_use]
pub fn arbitrary_wait(input: &DetectInput<'_>) -> Detection {
    if HARD_WAIT.is_match(input.body) {
        return Detection::Match;
    }
    if SET_TIMEOUT.is_match(input.body) {
        return if input.context.fake_timers {
            Detection::NoMatch
        } else {
            Detection::Match
        };
    }
    input.nothing_found()
}

/// Reaching into component internals through `wrapper.vm` or `setData`.
#[must_use]
pub fn implementation_access(input: &DetectInput<'_>) -> Detection {
    if IMPLEMENTATION_ACCESS.is_match(input.body) {
        Detection::Match
    } else {
        input.nothing_found()
    }
}
