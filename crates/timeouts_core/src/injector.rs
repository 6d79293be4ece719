//! Timeout parameter insertion into a declaration's call trailer

/// The named argument appended to a `test(...)` call.
pub fn timeout_parameter(seconds: u64) -> String {
    format!("timeout: Timeout(Duration(seconds: {seconds}))")
}

/// Rewrite a call trailer so it carries a timeout.
///
/// `trailer` is the text between the body's closing `}` and the call's
/// closing `)`, e.g. `""`, `", skip: true"` or `",\n"`. The parameter goes
/// after the last argument, ahead of any trailing `//` comments; whatever
/// followed that argument is kept where it was.
pub fn inject_timeout(trailer: &str, seconds: u64) -> String {
    let args = last_argument_end(trailer);
    let rest = &trailer[args.len()..];
    let param = timeout_parameter(seconds);

    if args.ends_with(',') {
        format!("{args} {param},{rest}")
    } else {
        format!("{args}, {param}{rest}")
    }
}

/// `trailer` up to the end of its last argument, with trailing whitespace
/// and line comments cut off.
fn last_argument_end(trailer: &str) -> &str {
    let mut code = trailer.trim_end();
    loop {
        let line_start = code.rfind('\n').map_or(0, |i| i + 1);
        match line_comment_start(&code[line_start..]) {
            Some(at) => code = code[..line_start + at].trim_end(),
            None => return code,
        }
    }
}

/// Byte offset of a `//` comment in `line`, ignoring `//` inside quotes.
fn line_comment_start(line: &str) -> Option<usize> {
    let bytes = line.as_bytes();
    let mut quote = None;
    let mut i = 0;
    while i < bytes.len() {
        let b = bytes[i];
        match quote {
            Some(_) if b == b'\\' => i += 1,
            Some(q) if b == q => quote = None,
            Some(_) => {}
            None if b == b'\'' || b == b'"' => quote = Some(b),
            None if b == b'/' && bytes.get(i + 1) == Some(&b'/') => return Some(i),
            None => {}
        }
        i += 1;
    }
    None
}
