//! List Selection Codec
//!
//! Converts between a card's optional list reference and the flat text
//! value used by selection controls, where the empty string means
//! "uncategorized". Pure format conversion; whether the referenced list
//! actually exists is the caller's concern.

/// Display form of a list reference for a selection control.
pub fn to_selection(list_id: Option<&str>) -> String {
    match list_id {
        Some(id) => id.to_string(),
        None => String::new(),
    }
}

/// Parse a selection control value back into a list reference.
pub fn from_selection(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_uncategorized_is_empty() {
        assert_eq!(to_selection(None), "");
        assert_eq!(from_selection(""), None);
    }

    #[test]
    fn test_reference_round_trip() {
        let shown = to_selection(Some("cat-42"));
        assert_eq!(shown, "cat-42");
        assert_eq!(from_selection(&shown), Some("cat-42".to_string()));
    }

    proptest! {
        #[test]
        fn prop_round_trip_some(id in "[a-z0-9-]{1,36}") {
            let back = from_selection(&to_selection(Some(id.as_str())));
            prop_assert_eq!(back, Some(id));
        }

        #[test]
        fn prop_parse_display_identity(value in "[a-z0-9-]{0,36}") {
            // from_selection followed by to_selection reproduces the input text
            let parsed = from_selection(&value);
            prop_assert_eq!(to_selection(parsed.as_deref()), value);
        }
    }
}
