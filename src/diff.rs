//! Line-by-line change listing for `--diff`

use std::fmt::Write;

/// Numbered listing of the lines that differ, or `None` if the texts match.
///
/// Lines are compared by position. Injection never adds or removes lines, so
/// positional comparison is enough here.
pub fn line_diff(original: &str, rewritten: &str) -> Option<String> {
    if original == rewritten {
        return None;
    }

    let mut before = original.lines();
    let mut after = rewritten.lines();
    let mut listing = String::new();

    for number in 1.. {
        let (old, new) = match (before.next(), after.next()) {
            (None, None) => break,
            pair => pair,
        };
        if old.unwrap_or("") == new.unwrap_or("") {
            continue;
        }
        for (sign, line) in [('-', old), ('+', new)] {
            if let Some(line) = line.filter(|l| !l.is_empty()) {
                let _ = writeln!(listing, "{sign}{number:4} | {line}");
            }
        }
    }

    Some(listing)
}
