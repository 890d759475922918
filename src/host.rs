use crate::character_sets::{is_forbidden_domain_code_point, is_forbidden_host_code_point};
use crate::compat::String;
use crate::error::HostErrorKind;
use crate::ipv4::{parse_ipv4, serialize_ipv4};
use crate::ipv6::{parse_ipv6, serialize_ipv6};
use crate::scheme::SchemeType;
use crate::unicode::idna::domain_to_ascii;
use crate::unicode::percent::{C0_CONTROL_SET, percent_decode_lossy, percent_encode_with_set};

/// A parsed host value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Host {
    /// ASCII domain after IDNA processing
    Domain(String),
    /// IPv4 address as 4 bytes
    Ipv4([u8; 4]),
    /// IPv6 address as 8 16-bit groups
    Ipv6([u16; 8]),
    /// Host of a non-special scheme, kept as given modulo minimal encoding
    Opaque(String),
    /// Present-but-empty host (`file://`, `foo://`)
    Empty,
}

/// Host-processing knobs derived from the parser mode.
#[derive(Debug, Clone, Copy)]
pub struct HostRules {
    /// Store non-special hosts opaquely instead of applying domain rules
    pub opaque_hosts: bool,
    /// Re-parse numeric domains as IPv4 addresses
    pub ipv4_canonical: bool,
}

impl Host {
    /// Render the host in its canonical textual form.
    pub fn write_to(&self, buffer: &mut String) {
        match self {
            Self::Domain(domain) | Self::Opaque(domain) => buffer.push_str(domain),
            Self::Ipv4(addr) => buffer.push_str(&serialize_ipv4(*addr)),
            Self::Ipv6(groups) => {
                buffer.push('[');
                buffer.push_str(&serialize_ipv6(groups));
                buffer.push(']');
            }
            Self::Empty => {}
        }
    }

    /// Canonical textual form as an owned string.
    pub fn to_text(&self) -> String {
        let mut buffer = String::new();
        self.write_to(&mut buffer);
        buffer
    }
}

/// Classify and parse a host string.
///
/// Bracketed input is an IPv6 literal; non-special schemes keep an opaque
/// host (unless the mode applies domain rules everywhere); special schemes
/// percent-decode, run IDNA ToASCII, and then try the IPv4 grammar.
pub fn parse_host(
    input: &str,
    scheme: SchemeType,
    rules: HostRules,
) -> Result<Host, HostErrorKind> {
    if input.is_empty() {
        if scheme.is_special() && scheme != SchemeType::File {
            return Err(HostErrorKind::EmptyHostNotAllowed);
        }
        return Ok(Host::Empty);
    }

    if input.starts_with('[') {
        let Some(interior) = input.strip_suffix(']').map(|s| &s[1..]) else {
            return Err(HostErrorKind::Ipv6Malformed);
        };
        return parse_ipv6(interior).map(Host::Ipv6);
    }

    if !scheme.is_special() && rules.opaque_hosts {
        return parse_opaque_host(input);
    }

    // Domain rules: percent-decode first, then IDNA ToASCII
    let decoded = percent_decode_lossy(input);
    if decoded.chars().any(is_forbidden_domain_code_point) {
        return Err(HostErrorKind::ForbiddenCodePoint);
    }
    let ascii = domain_to_ascii(&decoded)?;

    if ascii.is_empty() {
        if scheme == SchemeType::File {
            return Ok(Host::Empty);
        }
        return Err(HostErrorKind::EmptyHostNotAllowed);
    }
    if ascii.chars().any(is_forbidden_domain_code_point) {
        return Err(HostErrorKind::ForbiddenCodePoint);
    }

    // file: treats localhost as an empty host
    if scheme == SchemeType::File && ascii == "localhost" {
        return Ok(Host::Empty);
    }

    if rules.ipv4_canonical
        && let Some(addr) = parse_ipv4(&ascii)?
    {
        return Ok(Host::Ipv4(addr));
    }

    Ok(Host::Domain(ascii))
}

/// Opaque host: forbid the structural code points, percent-encode controls
/// and non-ASCII, keep everything else verbatim (no IDNA, no IPv4).
fn parse_opaque_host(input: &str) -> Result<Host, HostErrorKind> {
    if input.chars().any(is_forbidden_host_code_point) {
        return Err(HostErrorKind::ForbiddenCodePoint);
    }
    Ok(Host::Opaque(percent_encode_with_set(input, C0_CONTROL_SET)))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const WHATWG: HostRules = HostRules {
        opaque_hosts: true,
        ipv4_canonical: true,
    };

    #[test]
    fn test_domain() {
        assert_eq!(
            parse_host("Example.COM", SchemeType::Http, WHATWG).unwrap(),
            Host::Domain("example.com".into())
        );
    }

    #[test]
    fn test_percent_decoded_domain() {
        assert_eq!(
            parse_host("ex%61mple.com", SchemeType::Http, WHATWG).unwrap(),
            Host::Domain("example.com".into())
        );
    }

    #[test]
    fn test_idna_domain() {
        assert_eq!(
            parse_host("\u{ff21}\u{ff22}\u{ff23}.example", SchemeType::Http, WHATWG).unwrap(),
            Host::Domain("abc.example".into())
        );
    }

    #[test]
    fn test_ipv4_classification() {
        assert_eq!(
            parse_host("127.0.0.1", SchemeType::Http, WHATWG).unwrap(),
            Host::Ipv4([127, 0, 0, 1])
        );
        assert_eq!(
            parse_host("0x7f.1", SchemeType::Http, WHATWG).unwrap(),
            Host::Ipv4([127, 0, 0, 1])
        );
        // Fails the IPv4 grammar: stays a domain
        assert_eq!(
            parse_host("1.2.3.4.5", SchemeType::Http, WHATWG).unwrap(),
            Host::Domain("1.2.3.4.5".into())
        );
        assert_eq!(
            parse_host("1.2.3.256", SchemeType::Http, WHATWG),
            Err(HostErrorKind::Ipv4OutOfRange)
        );
    }

    #[test]
    fn test_ipv6_literal() {
        assert_eq!(
            parse_host("[2001:db8::1]", SchemeType::Http, WHATWG).unwrap(),
            Host::Ipv6([0x2001, 0xdb8, 0, 0, 0, 0, 0, 1])
        );
        assert_eq!(
            parse_host("[2001:db8::1", SchemeType::Http, WHATWG),
            Err(HostErrorKind::Ipv6Malformed)
        );
    }

    #[test]
    fn test_opaque_host() {
        assert_eq!(
            parse_host("Not_A-Standard.Host", SchemeType::Other, WHATWG).unwrap(),
            Host::Opaque("Not_A-Standard.Host".into())
        );
        assert_eq!(
            parse_host("a b", SchemeType::Other, WHATWG),
            Err(HostErrorKind::ForbiddenCodePoint)
        );
    }

    #[test]
    fn test_empty_hosts() {
        assert_eq!(
            parse_host("", SchemeType::File, WHATWG).unwrap(),
            Host::Empty
        );
        assert_eq!(
            parse_host("", SchemeType::Other, WHATWG).unwrap(),
            Host::Empty
        );
        assert_eq!(
            parse_host("", SchemeType::Http, WHATWG),
            Err(HostErrorKind::EmptyHostNotAllowed)
        );
    }

    #[test]
    fn test_file_localhost() {
        assert_eq!(
            parse_host("localhost", SchemeType::File, WHATWG).unwrap(),
            Host::Empty
        );
        assert_eq!(
            parse_host("LOCALHOST", SchemeType::File, WHATWG).unwrap(),
            Host::Empty
        );
    }

    #[test]
    fn test_forbidden_code_point_in_domain() {
        assert_eq!(
            parse_host("exa%23mple.com", SchemeType::Http, WHATWG),
            Err(HostErrorKind::ForbiddenCodePoint)
        );
    }

    #[test]
    fn test_legacy_rules_apply_domains_everywhere() {
        let legacy = HostRules {
            opaque_hosts: false,
            ipv4_canonical: false,
        };
        assert_eq!(
            parse_host("Mixed.Case", SchemeType::Other, legacy).unwrap(),
            Host::Domain("mixed.case".into())
        );
        // Numeric hosts keep their textual form in legacy mode
        assert_eq!(
            parse_host("0x7f.1", SchemeType::Http, legacy).unwrap(),
            Host::Domain("0x7f.1".into())
        );
    }

    #[test]
    fn test_round_trip_text() {
        let host = parse_host("[2001:0db8:0:0:0:0:0:1]", SchemeType::Http, WHATWG).unwrap();
        assert_eq!(host.to_text(), "[2001:db8::1]");
    }
}
