use crate::character_sets::{is_ascii_tab_or_newline, is_c0_or_space};
use crate::compat::Cow;

/// Fast check if string contains tabs or newlines
pub fn has_tabs_or_newline(input: &str) -> bool {
    memchr::memchr3(b'\t', b'\n', b'\r', input.as_bytes()).is_some()
}

/// Prepare raw input for the state machine: trim leading/trailing
/// C0-controls-or-space once, then remove ASCII tab/newline from the whole
/// remainder. Returns a Cow to avoid allocation for clean inputs.
pub fn clean_input(input: &str) -> Cow<'_, str> {
    let trimmed = input.trim_matches(is_c0_or_space);
    if has_tabs_or_newline(trimmed) {
        Cow::Owned(
            trimmed
                .chars()
                .filter(|&c| !is_ascii_tab_or_newline(c))
                .collect(),
        )
    } else {
        Cow::Borrowed(trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_input() {
        assert_eq!(clean_input("\t\nhello\r\n"), "hello");
        assert_eq!(clean_input("hello"), "hello");
        assert_eq!(clean_input("\t\n\r"), "");
        assert_eq!(clean_input("hel\tlo\nworld"), "helloworld");

        // Edge trim only; internal spaces survive
        assert_eq!(clean_input("  hello world  "), "hello world");
        assert_eq!(clean_input(" \x01http://x/ "), "http://x/");
    }

    #[test]
    fn test_has_tabs_or_newline() {
        assert!(has_tabs_or_newline("a\tb"));
        assert!(has_tabs_or_newline("a\r"));
        assert!(!has_tabs_or_newline("plain"));
    }
}
