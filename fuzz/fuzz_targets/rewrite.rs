#![no_main]

use libfuzzer_sys::fuzz_target;
use timeouts_core::rewrite_source;

fuzz_target!(|data: &[u8]| {
    // Convert bytes to UTF-8 string (ignore invalid UTF-8)
    if let Ok(s) = std::str::from_utf8(data) {
        let first = rewrite_source(s, 5);
        if !first.is_changed() {
            assert_eq!(first.text, s);
        }

        let second = rewrite_source(&first.text, 5);
        assert!(!second.is_changed(), "second pass injected again");
    }
});
