//! Test declaration extraction over lexed lines.
//!
//! Recognizes `describe`/`it`/`test` style call forms (with Vitest, Jest,
//! Mocha, and Playwright modifiers) on the masked text, reads names from the
//! original text, and captures each test body from its opening parenthesis
//! to the matching close.
//!
//! Heuristic boundaries:
//! - a name literal may start on the line after the call's `(`
//! - template names containing `${` and non-literal names are dynamic
//! - curried forms (`it.each(table)('name', fn)`) need the second call to
//!   start on the line where the first one closes; otherwise the name is
//!   dynamic and the body ends with the first call
//! - tagged-template tables (``it.each`...` ``) are not recognized

use std::sync::LazyLock;

use convlint_core::Modifiers;
use regex::Regex;

use crate::lexer::LexedLine;

static DECLARATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?:^|[^\w$.])(?P<callee>describe|context|suite|it|test|specify|xit|fit|xtest|xspecify|xdescribe|fdescribe|xcontext)(?P<mods>(?:\.[A-Za-z]+)*)\s*\(",
    )
    .expect("declaration regex is valid")
});

static FUNCTION_KEYWORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bfunction\s*$").expect("function regex is valid"));

/// One test declaration found in a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    /// 1-based line of the declaration call.
    pub line: u32,
    pub name: String,
    pub dynamic_name: bool,
    /// Enclosing suite names, outermost first.
    pub suite: Vec<String>,
    /// Own modifiers combined with those inherited from enclosing suites.
    pub modifiers: Modifiers,
    /// Masked text (comments and string contents blanked) from the callee to
    /// the closing parenthesis.
    pub body: String,
    /// The closing parenthesis was found.
    pub complete: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Role {
    Suite,
    Test,
}

/// Callee and modifier chain of a declaration call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct CallForm {
    role: Role,
    modifiers: Modifiers,
    /// `.each(table)(...)`, `.skipIf(cond)(...)`: the name is in a second call.
    curried: bool,
}

impl CallForm {
    /// Interpret `callee` plus its `.mod` chain; `None` for non-declarations
    /// such as `test.extend(...)` or `test.beforeEach(...)`.
    fn parse(callee: &str, mods: &str) -> Option<Self> {
        let mut form = match callee {
            "describe" | "context" | "suite" => Self::new(Role::Suite),
            "xdescribe" | "xcontext" => Self::new(Role::Suite).skipped(),
            "fdescribe" => Self::new(Role::Suite).focused(),
            "it" | "test" | "specify" => Self::new(Role::Test),
            "xit" | "xtest" | "xspecify" => Self::new(Role::Test).skipped(),
            "fit" => Self::new(Role::Test).focused(),
            _ => return None,
        };

        for (index, modifier) in mods.split('.').filter(|m| !m.is_empty()).enumerate() {
            match modifier {
                // Playwright: test.describe(...)
                "describe" if index == 0 && callee == "test" => form.role = Role::Suite,
                "only" => form.modifiers.focused = true,
                "skip" => form.modifiers.skipped = true,
                "todo" => form.modifiers.todo = true,
                "each" | "skipIf" | "runIf" | "for" => form.curried = true,
                "concurrent" | "sequential" | "fails" | "failing" | "shuffle" | "serial"
                | "parallel" => {}
                _ => return None,
            }
        }
        Some(form)
    }

    const fn new(role: Role) -> Self {
        Self {
            role,
            modifiers: Modifiers {
                focused: false,
                skipped: false,
                todo: false,
            },
            curried: false,
        }
    }

    const fn skipped(mut self) -> Self {
        self.modifiers.skipped = true;
        self
    }

    const fn focused(mut self) -> Self {
        self.modifiers.focused = true;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum NameState {
    /// Waiting for the second call of a curried form.
    AwaitingCall,
    /// The call's `(` ended its line; the name starts on a later line.
    Pending,
    Resolved { name: String, dynamic: bool },
}

#[derive(Debug, Clone)]
struct Frame {
    form: CallForm,
    /// Depth the declaration's own `)` returns to.
    close_depth: usize,
    start_line: usize,
    start_offset: usize,
    name: NameState,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Event {
    Start {
        callee: usize,
        open: usize,
        form: CallForm,
    },
    Close {
        offset: usize,
        depth_after: usize,
    },
}

impl Event {
    const fn offset(self) -> usize {
        match self {
            Self::Start { open, .. } => open,
            Self::Close { offset, .. } => offset,
        }
    }
}

/// Extract every test declaration from lexed lines, ordered by position.
#[must_use]
pub fn declarations(lines: &[LexedLine]) -> Vec<Declaration> {
    let mut extractor = Extractor {
        lines,
        frames: Vec::new(),
        found: Vec::new(),
    };
    for index in 0..lines.len() {
        extractor.line(index);
    }
    extractor.finish()
}

struct Extractor<'a> {
    lines: &'a [LexedLine],
    frames: Vec<Frame>,
    found: Vec<(usize, usize, Declaration)>,
}

impl Extractor<'_> {
    fn line(&mut self, index: usize) {
        let lines = self.lines;
        let line = &lines[index];

        for frame in &mut self.frames {
            if frame.name == NameState::Pending {
                frame.name = resolve(parse_name(&line.code, 0));
            }
        }

        let mut events: Vec<Event> = DECLARATION
            .captures_iter(&line.masked)
            .filter_map(|caps| {
                let callee = caps.name("callee")?;
                let whole = caps.get(0)?;
                if FUNCTION_KEYWORD.is_match(&line.masked[..callee.start()]) {
                    return None;
                }
                let form = CallForm::parse(callee.as_str(), caps.name("mods")?.as_str())?;
                Some(Event::Start {
                    callee: callee.start(),
                    open: whole.end() - 1,
                    form,
                })
            })
            .collect();
        events.extend(
            line.closes
                .iter()
                .map(|&(offset, depth_after)| Event::Close {
                    offset,
                    depth_after,
                }),
        );
        events.sort_by_key(|event| event.offset());

        for event in events {
            match event {
                Event::Start { callee, open, form } => self.start(index, callee, open, form),
                Event::Close {
                    offset,
                    depth_after,
                } => self.close(index, offset, depth_after),
            }
        }
    }

    fn start(&mut self, index: usize, callee: usize, open: usize, form: CallForm) {
        let lines = self.lines;
        let line = &lines[index];

        let name = if form.curried {
            NameState::AwaitingCall
        } else {
            resolve(parse_name(&line.code, open + 1))
        };

        self.frames.push(Frame {
            form,
            close_depth: line.depth_before(open),
            start_line: index,
            start_offset: callee,
            name,
        });
    }

    fn close(&mut self, index: usize, offset: usize, depth_after: usize) {
        let lines = self.lines;
        while let Some(top) = self.frames.last_mut() {
            if top.close_depth < depth_after {
                return;
            }
            if top.close_depth == depth_after && top.name == NameState::AwaitingCall {
                let line = &lines[index];
                if let Some(next_open) = next_call(&line.masked, offset + 1) {
                    top.name = resolve(parse_name(&line.code, next_open + 1));
                    return;
                }
                top.name = NameState::Resolved {
                    name: String::new(),
                    dynamic: true,
                };
            }
            let closed_here = top.close_depth == depth_after;
            if let Some(frame) = self.frames.pop() {
                self.finalize(frame, index, offset, true);
            }
            if closed_here {
                return;
            }
        }
    }

    fn finalize(&mut self, frame: Frame, end_line: usize, end_offset: usize, complete: bool) {
        if frame.form.role == Role::Suite {
            return;
        }

        let suites = self
            .frames
            .iter()
            .filter(|f| f.form.role == Role::Suite)
            .collect::<Vec<_>>();
        let inherited = suites
            .iter()
            .fold(Modifiers::default(), |acc, f| f.form.modifiers.inherit(acc));
        let suite = suites.iter().map(|f| frame_name(f).0).collect();
        let (name, dynamic_name) = frame_name(&frame);

        let declaration = Declaration {
            line: u32::try_from(frame.start_line + 1).unwrap_or(u32::MAX),
            name,
            dynamic_name,
            suite,
            modifiers: frame.form.modifiers.inherit(inherited),
            body: self.slice(frame.start_line, frame.start_offset, end_line, end_offset),
            complete,
        };
        self.found
            .push((frame.start_line, frame.start_offset, declaration));
    }

    /// Masked text from `(start_line, start_offset)` through the byte at
    /// `(end_line, end_offset)` inclusive.
    fn slice(
        &self,
        start_line: usize,
        start_offset: usize,
        end_line: usize,
        end_offset: usize,
    ) -> String {
        let mut parts = Vec::with_capacity(end_line - start_line + 1);
        for index in start_line..=end_line {
            let text = self.lines[index].masked.as_str();
            let from = if index == start_line { start_offset } else { 0 };
            let to = if index == end_line {
                (end_offset + 1).min(text.len())
            } else {
                text.len()
            };
            parts.push(text.get(from..to).unwrap_or_default());
        }
        parts.join("\n")
    }

    fn finish(mut self) -> Vec<Declaration> {
        let last_line = self.lines.len().saturating_sub(1);
        let last_offset = self
            .lines
            .last()
            .map_or(0, |line| line.masked.len().saturating_sub(1));
        while let Some(frame) = self.frames.pop() {
            self.finalize(frame, last_line, last_offset, false);
        }
        self.found
            .sort_by_key(|(line, offset, _)| (*line, *offset));
        self.found.into_iter().map(|(_, _, decl)| decl).collect()
    }
}

fn frame_name(frame: &Frame) -> (String, bool) {
    match &frame.name {
        NameState::Resolved { name, dynamic } => (name.clone(), *dynamic),
        NameState::Pending | NameState::AwaitingCall => (String::new(), true),
    }
}

/// Offset of a `(` that directly follows `from` (after whitespace).
fn next_call(masked: &str, from: usize) -> Option<usize> {
    let rest = masked.get(from..)?;
    let skipped = rest.len() - rest.trim_start().len();
    rest.trim_start()
        .starts_with('(')
        .then_some(from + skipped)
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum NameParse {
    Literal(String),
    Dynamic(String),
    /// Nothing but whitespace after the offset.
    Missing,
}

fn resolve(parse: NameParse) -> NameState {
    match parse {
        NameParse::Literal(name) => NameState::Resolved {
            name,
            dynamic: false,
        },
        NameParse::Dynamic(name) => NameState::Resolved {
            name,
            dynamic: true,
        },
        NameParse::Missing => NameState::Pending,
    }
}

/// Read the first call argument starting at `from` in the comment-free text.
fn parse_name(code: &str, from: usize) -> NameParse {
    let rest = code.get(from..).unwrap_or_default().trim_start();
    let Some(first) = rest.chars().next() else {
        return NameParse::Missing;
    };

    if !matches!(first, '\'' | '"' | '`') {
        let expr: String = rest
            .chars()
            .take_while(|c| *c != ',' && *c != ')')
            .collect();
        return NameParse::Dynamic(expr.trim().to_string());
    }

    let mut out = String::new();
    let mut escaped = false;
    for ch in rest[first.len_utf8()..].chars() {
        if escaped {
            out.push(ch);
            escaped = false;
        } else if ch == '\\' {
            escaped = true;
        } else if ch == first {
            if first == '`' && out.contains("${") {
                return NameParse::Dynamic(format!("`{out}`"));
            }
            return NameParse::Literal(out);
        } else {
            out.push(ch);
        }
    }
    // Unterminated on this line: a multi-line template.
    NameParse::Dynamic(rest.trim_end().to_string())
}
