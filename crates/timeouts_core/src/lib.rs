#![forbid(unsafe_code)]
//! Text-level timeout injection for async Dart tests
//!
//! Pure transformations only; reading and writing files is the caller's job.
//!
//! ## Module Structure
//!
//! - `declaration` - finds `test(<args>) async {` headers
//! - `locator` - closes a block by brace/paren depth counting
//! - `detector` - timeout marker test over one declaration's text
//! - `injector` - inserts the timeout argument into a call trailer
//! - `rewriter` - the full left-to-right pass over one source text
//! - `policy` - per-file-class durations
//!
//! ## Known Limitation
//!
//! Delimiters inside string literals and comments are counted like code.
//! There is no tokenizer; a block that cannot be closed is reported and left
//! untouched rather than guessed at. The injector steps over trailing `//`
//! comments in a call trailer, but a trailing `/* ... */` comment is treated
//! as an argument and the timeout lands after it.

pub mod declaration;
pub mod detector;
pub mod injector;
pub mod locator;
pub mod policy;
pub mod rewriter;

pub use declaration::{Declaration, find_declaration};
pub use detector::{TIMEOUT_MARKERS, has_timeout};
pub use injector::{inject_timeout, timeout_parameter};
pub use locator::{TestBlock, Unclosed, UnterminatedBlock, locate_block};
pub use policy::{DEFAULT_NETWORK_FILES, DEFAULT_TIMEOUT_SECS, FileClass, NETWORK_TIMEOUT_SECS, TimeoutPolicy};
pub use rewriter::{Rewrite, block_has_timeout, rewrite_source};
