//! Layering guardrails to keep the text-rewriting core free of I/O and CLI concerns.
//!
//! `timeouts_core` must stay a pure transformation crate. This test scans its `Cargo.toml` and fails if a
//! filesystem, diagnostics, or CLI crate shows up in `[dependencies]`.

const FORBIDDEN_IN_CORE: &[&str] = &["clap", "miette", "tempfile", "tracing-subscriber", "test-timeouts"];

#[test]
fn core_does_not_depend_on_cli_stack() {
    let manifest = include_str!("../crates/timeouts_core/Cargo.toml");
    let mut in_dependencies = false;

    for raw_line in manifest.lines() {
        let line = raw_line.trim();
        // Track when we enter/exit the `[dependencies]` table.
        if line.starts_with('[') {
            if line == "[dependencies]" {
                in_dependencies = true;
                continue;
            }
            // Any new section after `[dependencies]` ends the scan window.
            if in_dependencies {
                break;
            }
        }

        if !in_dependencies || line.is_empty() || line.starts_with('#') {
            continue;
        }

        // Strip inline comments for robustness.
        let line_no_comment = line.split('#').next().unwrap_or("").trim();
        let name = line_no_comment.split('=').next().unwrap_or("").trim();
        if FORBIDDEN_IN_CORE.contains(&name) {
            panic!("`{name}` must not appear in timeouts_core [dependencies]; keep it in the root package");
        }
    }
}

#[test]
fn core_sources_do_not_touch_the_filesystem() {
    let sources = [
        include_str!("../crates/timeouts_core/src/declaration.rs"),
        include_str!("../crates/timeouts_core/src/detector.rs"),
        include_str!("../crates/timeouts_core/src/injector.rs"),
        include_str!("../crates/timeouts_core/src/locator.rs"),
        include_str!("../crates/timeouts_core/src/policy.rs"),
        include_str!("../crates/timeouts_core/src/rewriter.rs"),
    ];

    for source in sources {
        assert!(!source.contains("std::fs"), "timeouts_core must not use std::fs");
    }
}
