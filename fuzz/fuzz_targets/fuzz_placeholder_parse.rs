#![no_main]

use libfuzzer_sys::fuzz_target;
use mockexpr::config::Syntax;
use mockexpr::template::parse_placeholder;

fuzz_target!(|data: &[u8]| {
    if let Ok(body) = std::str::from_utf8(data) {
        if let Ok(input) = parse_placeholder(body, &Syntax::default()) {
            assert!(!input.identifier().is_empty());
        }
    }
});
