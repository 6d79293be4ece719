//! Recognition of async test declarations
//!
//! Only one call shape is understood: `test(<args>) async {`. The match is
//! purely textual, so a declaration inside a string or comment is still
//! reported.

use std::sync::LazyLock;

use regex::Regex;

/// `test(<args>) async {` where `<args>` holds no closing paren before the
/// closure's own `()`.
static DECLARATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\btest\s*\([^)]+\)\s*async\s*\{").expect("INVARIANT: declaration pattern is valid")
});

/// A recognised `test(...) async {` header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Declaration {
    /// Offset of the `test` keyword
    pub start: usize,
    /// Offset of the body's opening `{`
    pub open_brace: usize,
}

impl Declaration {
    /// Header text from the keyword up to (not including) the opening brace.
    pub fn header<'a>(&self, source: &'a str) -> &'a str {
        &source[self.start..self.open_brace]
    }
}

/// Find the first declaration starting at or after `from`.
pub fn find_declaration(source: &str, from: usize) -> Option<Declaration> {
    if from > source.len() {
        return None;
    }
    DECLARATION.find_at(source, from).map(|m| Declaration {
        start: m.start(),
        // The pattern ends on `{`, a single byte.
        open_brace: m.end() - 1,
    })
}
