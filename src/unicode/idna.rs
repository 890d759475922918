use crate::compat::String;
use crate::error::HostErrorKind;

/// Check if 4 bytes match "xn--" (case insensitive)
fn is_punycode_prefix(slice: &[u8]) -> bool {
    slice.len() >= 4
        && matches!(slice[0], b'x' | b'X')
        && matches!(slice[1], b'n' | b'N')
        && slice[2] == b'-'
        && slice[3] == b'-'
}

/// Check if any label of the domain carries a Punycode prefix
pub fn has_punycode(domain: &str) -> bool {
    let bytes = domain.as_bytes();
    if bytes.len() < 4 {
        return false;
    }
    if is_punycode_prefix(bytes) {
        return true;
    }
    memchr::memchr_iter(b'.', bytes).any(|pos| is_punycode_prefix(&bytes[pos + 1..]))
}

/// IDNA `ToASCII` (non-transitional, STD3 ASCII rules, no DNS length check).
///
/// Domains that are already plain lowercase-safe ASCII skip the full UTS-46
/// mapping; Punycode labels always take the slow path so they get validated.
pub fn domain_to_ascii(domain: &str) -> Result<String, HostErrorKind> {
    let is_plain_ascii = domain
        .bytes()
        .all(|b| matches!(b, b'a'..=b'z' | b'A'..=b'Z' | b'0'..=b'9' | b'.' | b'-'));
    if is_plain_ascii && !has_punycode(domain) {
        let mut result = String::with_capacity(domain.len());
        for b in domain.bytes() {
            result.push(b.to_ascii_lowercase() as char);
        }
        return Ok(result);
    }

    idna::domain_to_ascii(domain).map_err(|_| HostErrorKind::IdnaFailure)
}
