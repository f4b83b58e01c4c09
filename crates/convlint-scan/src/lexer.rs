//! Minimal line lexer for JavaScript/TypeScript test sources.
//!
//! Not a tokenizer: it only knows enough to blank out comments, blank out the
//! contents of string literals, and count parentheses outside both. That is
//! all declaration extraction needs.
//!
//! Limits: regex literals and `${...}` expressions inside template literals
//! are treated as opaque text. A `'` or `"` with no closing quote on its line
//! (JSX text such as `<p>Don't</p>`) is an ordinary character.

/// One source line after lexing.
///
/// `code` and `masked` have the same byte length as the original line, so
/// byte offsets are interchangeable between the three.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexedLine {
    /// Original line with comments replaced by spaces.
    pub code: String,
    /// `code` with string-literal contents replaced by spaces (quotes kept).
    pub masked: String,
    /// Parenthesis depth before each byte of the line.
    pub depths: Vec<usize>,
    /// `(offset, depth after)` for every `)` outside strings and comments.
    pub closes: Vec<(usize, usize)>,
}

impl LexedLine {
    /// Parenthesis depth just before byte `offset`.
    #[must_use]
    pub fn depth_before(&self, offset: usize) -> usize {
        self.depths.get(offset).copied().unwrap_or_default()
    }
}

#[derive(Debug, Default)]
struct LexState {
    depth: usize,
    in_block_comment: bool,
    in_template: bool,
}

/// Lex a whole source file, carrying comment, template, and depth state
/// across lines.
#[must_use]
pub fn lex(source: &str) -> Vec<LexedLine> {
    let mut state = LexState::default();
    source
        .lines()
        .map(|line| lex_line(line, &mut state))
        .collect()
}

fn blank(out: &mut String, width: usize) {
    out.extend(std::iter::repeat_n(' ', width));
}

/// Whether `rest` holds an unescaped `quote`.
fn closes_on_line(rest: &str, quote: char) -> bool {
    let mut escaped = false;
    for ch in rest.chars() {
        match ch {
            _ if escaped => escaped = false,
            '\\' => escaped = true,
            c if c == quote => return true,
            _ => {}
        }
    }
    false
}

fn lex_line(line: &str, state: &mut LexState) -> LexedLine {
    let mut code = String::with_capacity(line.len());
    let mut masked = String::with_capacity(line.len());
    let mut depths = Vec::with_capacity(line.len());
    let mut closes = Vec::new();

    // Single and double quoted strings cannot span lines; templates can.
    let mut quote = state.in_template.then_some('`');
    let mut escaped = false;
    let mut chars = line.char_indices().peekable();

    while let Some((offset, ch)) = chars.next() {
        let width = ch.len_utf8();
        depths.extend(std::iter::repeat_n(state.depth, width));
        let next = chars.peek().map(|&(_, c)| c);

        if state.in_block_comment {
            if ch == '*' && next == Some('/') {
                chars.next();
                depths.push(state.depth);
                blank(&mut code, 2);
                blank(&mut masked, 2);
                state.in_block_comment = false;
            } else {
                blank(&mut code, width);
                blank(&mut masked, width);
            }
            continue;
        }

        if let Some(open) = quote {
            code.push(ch);
            if escaped {
                escaped = false;
                blank(&mut masked, width);
            } else if ch == '\\' {
                escaped = true;
                blank(&mut masked, width);
            } else if ch == open {
                quote = None;
                masked.push(ch);
            } else {
                blank(&mut masked, width);
            }
            continue;
        }

        match (ch, next) {
            ('/', Some('/')) => {
                let rest = line.len() - offset;
                depths.extend(std::iter::repeat_n(state.depth, rest - width));
                blank(&mut code, rest);
                blank(&mut masked, rest);
                break;
            }
            ('/', Some('*')) => {
                chars.next();
                depths.push(state.depth);
                blank(&mut code, 2);
                blank(&mut masked, 2);
                state.in_block_comment = true;
            }
            ('`', _) => {
                quote = Some(ch);
                code.push(ch);
                masked.push(ch);
            }
            ('\'' | '"', _) => {
                if closes_on_line(&line[offset + width..], ch) {
                    quote = Some(ch);
                }
                code.push(ch);
                masked.push(ch);
            }
            ('(', _) => {
                state.depth += 1;
                code.push(ch);
                masked.push(ch);
            }
            (')', _) => {
                state.depth = state.depth.saturating_sub(1);
                closes.push((offset, state.depth));
                code.push(ch);
                masked.push(ch);
            }
            _ => {
                code.push(ch);
                masked.push(ch);
            }
        }
    }

    state.in_template = quote == Some('`');

    LexedLine {
        code,
        masked,
        depths,
        closes,
    }
}
