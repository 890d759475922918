/// IPv6 address parsing and canonical serialization.
use crate::compat::{String, Vec};
use crate::error::HostErrorKind;
use core::fmt::Write;

/// Parse the interior of a bracketed IPv6 literal (brackets already removed)
/// into its 8 16-bit groups. Strict grouping: 1-4 hex digits per group, at
/// most one `::` compression, optional trailing embedded IPv4 as the last
/// 32 bits.
pub fn parse_ipv6(input: &str) -> Result<[u16; 8], HostErrorKind> {
    // Zone IDs are not allowed in URLs
    if input.contains('%') {
        return Err(HostErrorKind::Ipv6Malformed);
    }

    let has_embedded_ipv4 = input
        .rfind(':')
        .is_some_and(|pos| input[pos + 1..].contains('.'));

    if has_embedded_ipv4 {
        parse_with_embedded_ipv4(input)
    } else {
        parse_pure(input)
    }
}

fn parse_pure(input: &str) -> Result<[u16; 8], HostErrorKind> {
    let mut groups = [0u16; 8];

    let Some(double_colon_pos) = input.find("::") else {
        // No compression: exactly 8 groups required
        let parsed = parse_groups(input)?;
        if parsed.len() != 8 {
            return Err(HostErrorKind::Ipv6Malformed);
        }
        groups.copy_from_slice(&parsed);
        return Ok(groups);
    };

    // At most one compression
    if input[double_colon_pos + 2..].contains("::") {
        return Err(HostErrorKind::Ipv6Malformed);
    }

    let before = parse_groups(&input[..double_colon_pos])?;
    let after = parse_groups(&input[double_colon_pos + 2..])?;

    let total = before.len() + after.len();
    if total > 7 {
        return Err(HostErrorKind::Ipv6Malformed);
    }

    groups[..before.len()].copy_from_slice(&before);
    let after_start = 8 - after.len();
    groups[after_start..].copy_from_slice(&after);

    Ok(groups)
}

fn parse_with_embedded_ipv4(input: &str) -> Result<[u16; 8], HostErrorKind> {
    let last_colon = input.rfind(':').ok_or(HostErrorKind::Ipv6Malformed)?;
    let ipv6_part = &input[..last_colon];
    let ipv4_part = &input[last_colon + 1..];

    let ipv4 = parse_dotted_quad(ipv4_part)?;
    let ipv4_high = u16::from(ipv4[0]) << 8 | u16::from(ipv4[1]);
    let ipv4_low = u16::from(ipv4[2]) << 8 | u16::from(ipv4[3]);

    let mut groups = [0u16; 8];

    if ipv6_part.is_empty() || ipv6_part == ":" {
        groups[6] = ipv4_high;
        groups[7] = ipv4_low;
        return Ok(groups);
    }

    if let Some(double_colon_pos) = ipv6_part.find("::") {
        if ipv6_part[double_colon_pos + 2..].contains("::") {
            return Err(HostErrorKind::Ipv6Malformed);
        }
        let before = parse_groups(&ipv6_part[..double_colon_pos])?;
        let after = parse_groups(&ipv6_part[double_colon_pos + 2..])?;

        let total = before.len() + after.len();
        if total > 6 {
            return Err(HostErrorKind::Ipv6Malformed);
        }

        groups[..before.len()].copy_from_slice(&before);
        let after_start = 6 - after.len();
        groups[after_start..6].copy_from_slice(&after);
    } else {
        let parsed = parse_groups(ipv6_part)?;
        if parsed.len() != 6 {
            return Err(HostErrorKind::Ipv6Malformed);
        }
        groups[..6].copy_from_slice(&parsed);
    }

    groups[6] = ipv4_high;
    groups[7] = ipv4_low;

    Ok(groups)
}

/// Parse a single hex group (1-4 digits).
fn parse_hex_group(s: &str) -> Result<u16, HostErrorKind> {
    if s.is_empty() || s.len() > 4 || !s.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(HostErrorKind::Ipv6Malformed);
    }
    u16::from_str_radix(s, 16).map_err(|_| HostErrorKind::Ipv6Malformed)
}

/// Parse colon-separated hex groups from one side of a compression.
fn parse_groups(s: &str) -> Result<Vec<u16>, HostErrorKind> {
    if s.is_empty() {
        return Ok(Vec::new());
    }
    s.split(':').map(parse_hex_group).collect()
}

/// Strict dotted-decimal IPv4 for the embedded form (no hex/octal here).
fn parse_dotted_quad(s: &str) -> Result<[u8; 4], HostErrorKind> {
    let mut out = [0u8; 4];
    let mut count = 0;
    for part in s.split('.') {
        if count == 4 || part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
            return Err(HostErrorKind::Ipv6Malformed);
        }
        // No leading zeros in the embedded form
        if part.len() > 1 && part.starts_with('0') {
            return Err(HostErrorKind::Ipv6Malformed);
        }
        out[count] = part.parse().map_err(|_| HostErrorKind::Ipv6Malformed)?;
        count += 1;
    }
    if count != 4 {
        return Err(HostErrorKind::Ipv6Malformed);
    }
    Ok(out)
}

/// Serialize 8 groups to the canonical compressed form (no brackets).
/// The longest run of two or more zero groups collapses to `::` once.
pub fn serialize_ipv6(groups: &[u16; 8]) -> String {
    let (compress_start, compress_len) = find_longest_zero_run(groups);

    let mut result = String::with_capacity(39);

    let compress_range = compress_start
        .filter(|_| compress_len > 1)
        .map(|start| start..start + compress_len);

    let mut i = 0;
    while i < 8 {
        if let Some(ref range) = compress_range
            && range.start == i
        {
            result.push_str("::");
            i = range.end;
            continue;
        }

        if i > 0 && !result.ends_with("::") {
            result.push(':');
        }

        let _ = write!(&mut result, "{:x}", groups[i]);
        i += 1;
    }

    result
}

/// Find the longest run of consecutive zero groups.
fn find_longest_zero_run(groups: &[u16; 8]) -> (Option<usize>, usize) {
    let mut best_start: Option<usize> = None;
    let mut best_len = 0;
    let mut current_start: Option<usize> = None;
    let mut current_len = 0;

    for (i, &group) in groups.iter().enumerate() {
        if group == 0 {
            if current_start.is_none() {
                current_start = Some(i);
                current_len = 1;
            } else {
                current_len += 1;
            }
            if current_len > best_len {
                best_start = current_start;
                best_len = current_len;
            }
        } else {
            current_start = None;
            current_len = 0;
        }
    }

    (best_start, best_len)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_loopback() {
        assert_eq!(parse_ipv6("::1").unwrap(), [0, 0, 0, 0, 0, 0, 0, 1]);
    }

    #[test]
    fn test_full_form() {
        assert_eq!(
            parse_ipv6("2001:db8:0:0:1:0:0:1").unwrap(),
            [0x2001, 0xdb8, 0, 0, 1, 0, 0, 1]
        );
    }

    #[test]
    fn test_compressed() {
        assert_eq!(
            parse_ipv6("2001:db8::1").unwrap(),
            [0x2001, 0xdb8, 0, 0, 0, 0, 0, 1]
        );
    }

    #[test]
    fn test_embedded_ipv4() {
        assert_eq!(
            parse_ipv6("::127.0.0.1").unwrap(),
            [0, 0, 0, 0, 0, 0, 0x7f00, 0x0001]
        );
        assert_eq!(
            parse_ipv6("::ffff:192.168.1.1").unwrap(),
            [0, 0, 0, 0, 0, 0xffff, 0xc0a8, 0x0101]
        );
    }

    #[test]
    fn test_malformed() {
        assert!(parse_ipv6("12345::").is_err());
        assert!(parse_ipv6("1:2:3:4:5:6:7:8:9").is_err());
        assert!(parse_ipv6("1::2::3").is_err());
        assert!(parse_ipv6("::1%eth0").is_err());
        assert!(parse_ipv6("::01.2.3.4").is_err());
        assert!(parse_ipv6("g::1").is_err());
    }

    #[test]
    fn test_serialize_compression() {
        assert_eq!(serialize_ipv6(&[0, 0, 0, 0, 0, 0, 0, 1]), "::1");
        assert_eq!(
            serialize_ipv6(&[0x2001, 0xdb8, 0, 0, 0, 0, 0, 1]),
            "2001:db8::1"
        );
        assert_eq!(
            serialize_ipv6(&[0, 0, 0, 0, 0, 0, 0x7f00, 0x0001]),
            "::7f00:1"
        );
        assert_eq!(
            serialize_ipv6(&[0x2001, 0xdb8, 1, 1, 1, 1, 1, 1]),
            "2001:db8:1:1:1:1:1:1"
        );
    }
}
