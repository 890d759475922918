/// IPv4 address parsing supporting decimal, octal, and hexadecimal notation.
use crate::compat::{String, Vec, format};
use crate::error::HostErrorKind;

/// Outcome of a single IPv4 number part.
enum Ipv4Number {
    Value(u64),
    /// Not a number in any supported radix; the whole host stays a domain
    NotNumeric,
    /// Numeric but too large for u64
    Overflow,
}

/// Try to read a host as an IPv4 address.
///
/// Grammar: up to 4 dot-separated parts, each decimal, `0x` hex or
/// leading-zero octal, with an optional single trailing dot.
///
/// - `Ok(Some(addr))` — the host is this IPv4 address
/// - `Ok(None)` — the host does not match the IPv4 grammar and stays a domain
/// - `Err(Ipv4OutOfRange)` — grammar matched but a part exceeds its range
pub fn parse_ipv4(input: &str) -> Result<Option<[u8; 4]>, HostErrorKind> {
    if input.is_empty() {
        return Ok(None);
    }

    // Trailing dot is allowed and ignored
    let input = input.strip_suffix('.').unwrap_or(input);
    if input.is_empty() || input.contains('.') && input.ends_with('.') {
        return Ok(None);
    }

    let parts: Vec<&str> = input.split('.').collect();
    let part_count = parts.len();
    if part_count > 4 {
        return Ok(None);
    }

    let mut numbers: Vec<u64> = Vec::with_capacity(part_count);
    for part in &parts {
        match parse_ipv4_number(part) {
            Ipv4Number::Value(v) => numbers.push(v),
            Ipv4Number::NotNumeric => return Ok(None),
            Ipv4Number::Overflow => return Err(HostErrorKind::Ipv4OutOfRange),
        }
    }

    // The last number fills the remaining bytes; everything before it is one byte
    let last = numbers[part_count - 1];
    let max = 256u64.pow((5 - part_count) as u32);
    if last >= max {
        return Err(HostErrorKind::Ipv4OutOfRange);
    }
    if numbers.iter().take(part_count - 1).any(|&num| num >= 256) {
        return Err(HostErrorKind::Ipv4OutOfRange);
    }

    let mut value: u32 = 0;
    for (i, &number) in numbers.iter().enumerate().take(part_count - 1) {
        value |= (number as u32) << ((3 - i) * 8);
    }
    value |= numbers[part_count - 1] as u32;

    Ok(Some(value.to_be_bytes()))
}

/// Parse a single IPv4 number part (decimal, hex, or octal).
fn parse_ipv4_number(input: &str) -> Ipv4Number {
    if input.is_empty() {
        return Ipv4Number::NotNumeric;
    }

    // Hex with 0x/0X prefix; a bare "0x" counts as zero
    if let Some(hex) = input.strip_prefix("0x").or_else(|| input.strip_prefix("0X")) {
        if hex.is_empty() {
            return Ipv4Number::Value(0);
        }
        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Ipv4Number::NotNumeric;
        }
        return match u64::from_str_radix(hex, 16) {
            Ok(v) => Ipv4Number::Value(v),
            Err(_) => Ipv4Number::Overflow,
        };
    }

    // Octal (leading zero, more than one digit)
    if input.len() >= 2 && input.starts_with('0') {
        if !input.bytes().all(|b| (b'0'..=b'7').contains(&b)) {
            return Ipv4Number::NotNumeric;
        }
        return match u64::from_str_radix(input, 8) {
            Ok(v) => Ipv4Number::Value(v),
            Err(_) => Ipv4Number::Overflow,
        };
    }

    if !input.bytes().all(|b| b.is_ascii_digit()) {
        return Ipv4Number::NotNumeric;
    }
    match input.parse::<u64>() {
        Ok(v) => Ipv4Number::Value(v),
        Err(_) => Ipv4Number::Overflow,
    }
}

/// Serialize an IPv4 address to dotted decimal notation
pub fn serialize_ipv4(addr: [u8; 4]) -> String {
    format!("{}.{}.{}.{}", addr[0], addr[1], addr[2], addr[3])
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_decimal() {
        assert_eq!(parse_ipv4("192.168.1.1").unwrap(), Some([192, 168, 1, 1]));
        assert_eq!(parse_ipv4("127.0.0.1").unwrap(), Some([127, 0, 0, 1]));
        assert_eq!(parse_ipv4("127.0.0.1.").unwrap(), Some([127, 0, 0, 1]));
    }

    #[test]
    fn test_parse_hex_and_octal() {
        assert_eq!(parse_ipv4("0xC0A80101").unwrap(), Some([192, 168, 1, 1]));
        assert_eq!(parse_ipv4("192.0x00A80001").unwrap(), Some([192, 168, 0, 1]));
        assert_eq!(parse_ipv4("0300.0250.01.01").unwrap(), Some([192, 168, 1, 1]));
        assert_eq!(parse_ipv4("0x").unwrap(), Some([0, 0, 0, 0]));
    }

    #[test]
    fn test_short_forms() {
        // Last number fills the remaining bytes
        assert_eq!(parse_ipv4("127.1").unwrap(), Some([127, 0, 0, 1]));
        assert_eq!(parse_ipv4("2130706433").unwrap(), Some([127, 0, 0, 1]));
    }

    #[test]
    fn test_not_ipv4_stays_domain() {
        assert_eq!(parse_ipv4("example.com").unwrap(), None);
        assert_eq!(parse_ipv4("1.2.3.4.5").unwrap(), None);
        assert_eq!(parse_ipv4("1.a.3.4").unwrap(), None);
        assert_eq!(parse_ipv4("").unwrap(), None);
    }

    #[test]
    fn test_out_of_range() {
        assert_eq!(parse_ipv4("1.2.3.256"), Err(HostErrorKind::Ipv4OutOfRange));
        assert_eq!(parse_ipv4("256.1.1.1"), Err(HostErrorKind::Ipv4OutOfRange));
        assert_eq!(parse_ipv4("4294967296"), Err(HostErrorKind::Ipv4OutOfRange));
    }

    #[test]
    fn test_serialize() {
        assert_eq!(serialize_ipv4([192, 168, 1, 1]), "192.168.1.1");
        assert_eq!(serialize_ipv4([127, 0, 0, 1]), "127.0.0.1");
    }
}
