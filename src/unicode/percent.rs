use crate::compat::{String, ToString};
use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};

// Percent-encode sets, one per component context. Each set is a strict
// superset of the previous one:
// controls < fragment < query < special-query/path < userinfo.

/// C0 control percent-encode set
pub const C0_CONTROL_SET: &AsciiSet = CONTROLS;

/// Fragment percent-encode set: controls + space, ", <, >, \`
pub const FRAGMENT_SET: &AsciiSet = &C0_CONTROL_SET
    .add(b' ')
    .add(b'"')
    .add(b'<')
    .add(b'>')
    .add(b'`');

/// Query percent-encode set: fragment + #
pub const QUERY_SET: &AsciiSet = &FRAGMENT_SET.add(b'#');

/// Special query percent-encode set: query + ' (special schemes only)
pub const SPECIAL_QUERY_SET: &AsciiSet = &QUERY_SET.add(b'\'');

/// Path percent-encode set: query + ?, ^, {, }
pub const PATH_SET: &AsciiSet = &QUERY_SET.add(b'?').add(b'^').add(b'{').add(b'}');

/// Userinfo percent-encode set: path + /, :, ;, =, @, [, \, ], |
pub const USERINFO_SET: &AsciiSet = &PATH_SET
    .add(b'/')
    .add(b':')
    .add(b';')
    .add(b'=')
    .add(b'@')
    .add(b'[')
    .add(b'\\')
    .add(b']')
    .add(b'|');

/// Percent-encode a string using the provided encode set
pub fn percent_encode_with_set(input: &str, encode_set: &'static AsciiSet) -> String {
    utf8_percent_encode(input, encode_set).to_string()
}

/// Write percent-encoded string directly to buffer.
/// Encodes each UTF-8 byte of a set member as an uppercase-hex triplet.
pub fn percent_encode_into(buffer: &mut String, input: &str, encode_set: &'static AsciiSet) {
    buffer.reserve(input.len());
    for chunk in utf8_percent_encode(input, encode_set) {
        buffer.push_str(chunk);
    }
}

/// Decode percent-encoded text. Valid `%XX` triplets become their byte;
/// stray `%` sequences stay literal; invalid UTF-8 decodes with U+FFFD.
/// Total: never fails.
pub fn percent_decode_lossy(input: &str) -> String {
    percent_encoding::percent_decode_str(input)
        .decode_utf8_lossy()
        .into_owned()
}

/// Scan for a `%` not followed by two ASCII hex digits.
/// Feeds validation diagnostics; decoding itself tolerates these.
pub fn has_invalid_percent_triplet(input: &str) -> bool {
    let bytes = input.as_bytes();
    memchr::memchr_iter(b'%', bytes).any(|pos| {
        bytes.get(pos + 1).is_none_or(|b| !b.is_ascii_hexdigit())
            || bytes.get(pos + 2).is_none_or(|b| !b.is_ascii_hexdigit())
    })
}
