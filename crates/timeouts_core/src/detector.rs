//! Timeout marker detection
//!
//! Applied to one declaration's own argument text at a time, never to the
//! whole file: a timeout on one test says nothing about its neighbours.

/// Substrings that mean a timeout is already configured
pub const TIMEOUT_MARKERS: &[&str] = &["timeout:", "Timeout("];

/// True if `span` contains any timeout marker.
pub fn has_timeout(span: &str) -> bool {
    TIMEOUT_MARKERS.iter().any(|marker| span.contains(marker))
}
