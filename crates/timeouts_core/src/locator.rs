//! Block boundary location by delimiter depth counting
//!
//! This is a bracket counter, not a tokenizer. Braces and parentheses inside
//! string literals or comments are counted like any others, so a body such as
//! `print('}');` will end the block early. Well-formed test files rarely hit
//! this and the rewriter refuses to touch anything it cannot close.

use std::fmt;

use crate::declaration::Declaration;

/// One located test declaration together with its body and call trailer.
///
/// ```text
/// test('x', () async { body(); }, skip: false);
/// ^start             ^open_brace ^body_end    ^end
/// ```
///
/// `end` is one past the call's closing `)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TestBlock {
    pub start: usize,
    pub open_brace: usize,
    pub body_end: usize,
    pub end: usize,
}

impl TestBlock {
    /// Offset of the call's closing `)`.
    pub fn close_paren(&self) -> usize {
        self.end - 1
    }

    /// Full declaration text, `test` through the closing `)`.
    pub fn span<'a>(&self, source: &'a str) -> &'a str {
        &source[self.start..self.end]
    }

    /// Declaration text before the body's opening brace.
    pub fn header<'a>(&self, source: &'a str) -> &'a str {
        &source[self.start..self.open_brace]
    }

    /// Body text including both braces.
    pub fn body<'a>(&self, source: &'a str) -> &'a str {
        &source[self.open_brace..self.body_end]
    }

    /// Text between the body's closing `}` and the call's closing `)`.
    pub fn trailer<'a>(&self, source: &'a str) -> &'a str {
        &source[self.body_end..self.close_paren()]
    }
}

/// Which delimiter never balanced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unclosed {
    /// The async body's `{`
    Body,
    /// The `test(` call itself
    Call,
}

/// A declaration whose delimiters never balance before end of text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnterminatedBlock {
    pub start: usize,
    /// 1-based line of the declaration keyword
    pub line: usize,
    pub unclosed: Unclosed,
}

impl fmt::Display for UnterminatedBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let what = match self.unclosed {
            Unclosed::Body => "body brace",
            Unclosed::Call => "call parenthesis",
        };
        write!(f, "line {}: unterminated test block ({} never closes)", self.line, what)
    }
}

/// Locate the end of the block opened by `decl`.
///
/// The body's `{` counts as depth 1; the body ends where depth returns to 0.
/// The enclosing `test(` call is then closed the same way with parentheses.
pub fn locate_block(source: &str, decl: Declaration) -> Result<TestBlock, UnterminatedBlock> {
    let unterminated = |unclosed: Unclosed| UnterminatedBlock {
        start: decl.start,
        line: line_of(source, decl.start),
        unclosed,
    };

    let body_end = matching_close(source, decl.open_brace + 1, b'{', b'}').ok_or_else(|| unterminated(Unclosed::Body))?;
    let end = matching_close(source, body_end, b'(', b')').ok_or_else(|| unterminated(Unclosed::Call))?;

    Ok(TestBlock {
        start: decl.start,
        open_brace: decl.open_brace,
        body_end,
        end,
    })
}

/// Scan from `from` with one `open` already seen; return the offset just past
/// the `close` that brings depth back to zero.
///
/// Works on bytes: both delimiters are ASCII and can never appear inside a
/// multi-byte UTF-8 sequence.
fn matching_close(source: &str, from: usize, open: u8, close: u8) -> Option<usize> {
    let mut depth = 1usize;
    for (i, &b) in source.as_bytes().get(from..)?.iter().enumerate() {
        if b == open {
            depth += 1;
        } else if b == close {
            depth -= 1;
            if depth == 0 {
                return Some(from + i + 1);
            }
        }
    }
    None
}

/// 1-based line number of a byte offset.
pub fn line_of(source: &str, offset: usize) -> usize {
    source.as_bytes()[..offset.min(source.len())]
        .iter()
        .filter(|&&b| b == b'\n')
        .count()
        + 1
}
