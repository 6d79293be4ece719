//! Single-pass source rewriting
//!
//! Scans left to right for declarations, locates each block, and splices a
//! timeout into every block that lacks one. Scanning resumes at the end of
//! the previous block whether it was injected or skipped, so blocks never
//! overlap and a test nested inside another body is never visited.

use tracing::{debug, warn};

use crate::declaration::find_declaration;
use crate::detector::has_timeout;
use crate::injector::inject_timeout;
use crate::locator::{TestBlock, UnterminatedBlock, line_of, locate_block};

/// Result of rewriting one source text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rewrite {
    /// Rewritten text; equal to the input when `injected == 0`
    pub text: String,
    /// Blocks that received a timeout
    pub injected: usize,
    /// Blocks left alone because they already had one
    pub already_timed: usize,
    /// Declarations whose delimiters never balanced
    pub unterminated: Vec<UnterminatedBlock>,
}

impl Rewrite {
    pub fn is_changed(&self) -> bool {
        self.injected > 0
    }

    /// Every declaration seen, terminated or not
    pub fn declarations(&self) -> usize {
        self.injected + self.already_timed + self.unterminated.len()
    }
}

/// Does this block already declare a timeout in its own call arguments?
///
/// The body is excluded: a `timeout:` passed to some client call inside the
/// test says nothing about the test's own timeout.
pub fn block_has_timeout(source: &str, block: &TestBlock) -> bool {
    has_timeout(block.header(source)) || has_timeout(block.trailer(source))
}

/// Inject `seconds` into every async test block of `source` that has no timeout.
pub fn rewrite_source(source: &str, seconds: u64) -> Rewrite {
    let mut text = String::with_capacity(source.len() + 64);
    let mut copied = 0;
    let mut pos = 0;
    let mut injected = 0;
    let mut already_timed = 0;
    let mut unterminated = Vec::new();

    while let Some(decl) = find_declaration(source, pos) {
        let block = match locate_block(source, decl) {
            Ok(block) => block,
            Err(err) => {
                warn!("{err}; leaving it untouched");
                unterminated.push(err);
                pos = decl.open_brace + 1;
                continue;
            }
        };

        if block_has_timeout(source, &block) {
            debug!(line = line_of(source, block.start), "test already has a timeout");
            already_timed += 1;
        } else {
            debug!(line = line_of(source, block.start), seconds, "injecting timeout");
            text.push_str(&source[copied..block.body_end]);
            text.push_str(&inject_timeout(block.trailer(source), seconds));
            copied = block.close_paren();
            injected += 1;
        }
        pos = block.end;
    }

    text.push_str(&source[copied..]);

    Rewrite {
        text,
        injected,
        already_timed,
        unterminated,
    }
}
