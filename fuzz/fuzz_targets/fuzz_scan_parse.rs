#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    // The identifier is always a comma-free prefix of non-empty text.
    match facegate_capture::parse_scanned_identifier(text) {
        Some(identifier) => {
            assert!(!identifier.as_str().contains(','));
            assert!(text.starts_with(identifier.as_str()));
        }
        None => assert!(text.is_empty()),
    }
});
