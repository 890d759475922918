/// Check if a character is an ASCII tab or newline
pub fn is_ascii_tab_or_newline(c: char) -> bool {
    matches!(c, '\t' | '\n' | '\r')
}

/// Check if a code point is a C0 control or space (the trim set)
pub fn is_c0_or_space(c: char) -> bool {
    c <= '\u{20}'
}

/// Forbidden host code point classification.
/// Returns: 0=allowed, 1=forbidden for any host, 2=additionally forbidden in domains
const HOST_CHAR_TABLE: [u8; 128] = {
    let mut table = [0u8; 128];

    // C0 controls are forbidden in domains
    let mut i = 0;
    while i < 0x20 {
        table[i] = 2;
        i += 1;
    }

    // Forbidden host code points
    table[0x00] = 1; // NUL is forbidden everywhere
    table[b'\t' as usize] = 1;
    table[b'\n' as usize] = 1;
    table[b'\r' as usize] = 1;
    table[b' ' as usize] = 1;
    table[b'#' as usize] = 1;
    table[b'/' as usize] = 1;
    table[b':' as usize] = 1;
    table[b'<' as usize] = 1;
    table[b'>' as usize] = 1;
    table[b'?' as usize] = 1;
    table[b'@' as usize] = 1;
    table[b'[' as usize] = 1;
    table[b'\\' as usize] = 1;
    table[b']' as usize] = 1;
    table[b'^' as usize] = 1;
    table[b'|' as usize] = 1;

    // Additionally forbidden in domains
    table[b'%' as usize] = 2;
    table[0x7F] = 2;

    table
};

/// Check if a code point may never appear in any parsed host
pub fn is_forbidden_host_code_point(c: char) -> bool {
    (c as u32) < 128 && HOST_CHAR_TABLE[c as usize] == 1
}

/// Check if a code point may never appear in a domain (superset of the host set)
pub fn is_forbidden_domain_code_point(c: char) -> bool {
    (c as u32) < 128 && HOST_CHAR_TABLE[c as usize] != 0
}

/// Check if a code point belongs to the URL code point set.
/// Everything outside the set is still parseable; membership only drives
/// validation diagnostics.
pub fn is_url_code_point(c: char) -> bool {
    if c.is_ascii() {
        return c.is_ascii_alphanumeric()
            || matches!(
                c,
                '!' | '$'
                    | '&'
                    | '\''
                    | '('
                    | ')'
                    | '*'
                    | '+'
                    | ','
                    | '-'
                    | '.'
                    | '/'
                    | ':'
                    | ';'
                    | '='
                    | '?'
                    | '@'
                    | '_'
                    | '~'
            );
    }

    let cp = c as u32;
    // U+00A0 through U+10FFFD, excluding noncharacters
    if !(0xA0..=0x10_FFFD).contains(&cp) {
        return false;
    }
    if (0xFDD0..=0xFDEF).contains(&cp) {
        return false;
    }
    // U+xFFFE / U+xFFFF in every plane
    (cp & 0xFFFE) != 0xFFFE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trim_set() {
        assert!(is_c0_or_space(' '));
        assert!(is_c0_or_space('\u{1f}'));
        assert!(!is_c0_or_space('!'));
    }

    #[test]
    fn test_forbidden_host_code_points() {
        for c in ['\0', ' ', '#', '/', ':', '<', '>', '?', '@', '[', '\\', ']', '^', '|'] {
            assert!(is_forbidden_host_code_point(c), "{c:?} should be forbidden");
        }
        assert!(!is_forbidden_host_code_point('%'));
        assert!(!is_forbidden_host_code_point('a'));
    }

    #[test]
    fn test_forbidden_domain_is_superset() {
        assert!(is_forbidden_domain_code_point('%'));
        assert!(is_forbidden_domain_code_point('\u{7f}'));
        assert!(is_forbidden_domain_code_point('\u{01}'));
        assert!(is_forbidden_domain_code_point(':'));
        assert!(!is_forbidden_domain_code_point('-'));
    }

    #[test]
    fn test_url_code_points() {
        assert!(is_url_code_point('a'));
        assert!(is_url_code_point('~'));
        assert!(is_url_code_point('\u{00e9}'));
        assert!(!is_url_code_point('"'));
        assert!(!is_url_code_point('\\'));
        assert!(!is_url_code_point('\u{fdd0}'));
        assert!(!is_url_code_point('\u{ffff}'));
    }
}
