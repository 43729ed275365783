use proptest::prelude::*;

use facegate_capture::parse_scanned_identifier;

proptest! {
    /// Parsing never panics and never yields an identifier containing a comma.
    #[test]
    fn parse_never_panics(text in ".*") {
        if let Some(id) = parse_scanned_identifier(&text) {
            prop_assert!(!id.as_str().contains(','));
        }
    }

    /// Only empty input is ignored; whitespace is decoded text like any other.
    #[test]
    fn only_empty_input_is_ignored(text in "[ \t]*") {
        prop_assert_eq!(parse_scanned_identifier(&text).is_none(), text.is_empty());
    }
}
