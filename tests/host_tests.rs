#![allow(clippy::unwrap_used, clippy::panic, clippy::expect_used)]

/// Host classification through the public parsing API: domains, IDNA,
/// IPv4/IPv6 literals, opaque hosts, and the file-scheme special cases.
use canurl::{Host, HostErrorKind, ParseErrorKind, parse};

#[test]
fn test_domain_lowercased() {
    let url = parse("http://WWW.Example.COM/", None).unwrap();
    assert_eq!(url.hostname(), "www.example.com");
}

#[test]
fn test_percent_decoded_domain() {
    let url = parse("http://ex%61mple.com/", None).unwrap();
    assert_eq!(url.hostname(), "example.com");
}

#[test]
fn test_idna_unicode_domain() {
    let url = parse("http://bücher.example/", None).unwrap();
    assert_eq!(url.hostname(), "xn--bcher-kva.example");

    // Fullwidth compatibility characters map to ASCII
    let url = parse("http://ＡＢＣ.example/", None).unwrap();
    assert_eq!(url.hostname(), "abc.example");
}

#[test]
fn test_ipv4_notations_canonicalize() {
    for input in [
        "http://127.0.0.1/",
        "http://0x7f.0.0.1/",
        "http://0177.0.0.1/",
        "http://127.1/",
        "http://2130706433/",
        "http://127.0.0.1./",
    ] {
        let url = parse(input, None).unwrap();
        assert_eq!(url.hostname(), "127.0.0.1", "input: {input}");
        assert_eq!(url.host_value(), Some(&Host::Ipv4([127, 0, 0, 1])));
    }
}

#[test]
fn test_almost_ipv4_stays_domain() {
    // Five parts fail the IPv4 grammar, so this remains a domain
    let url = parse("http://1.2.3.4.5/", None).unwrap();
    assert_eq!(url.host_value(), Some(&Host::Domain("1.2.3.4.5".into())));
}

#[test]
fn test_ipv4_out_of_range() {
    let err = parse("http://1.2.3.300/", None).unwrap_err();
    assert_eq!(
        err.kind(),
        ParseErrorKind::Host(HostErrorKind::Ipv4OutOfRange)
    );
}

#[test]
fn test_ipv6_compression() {
    let url = parse("http://[2001:0db8:0000:0000:0000:0000:0000:0001]/", None).unwrap();
    assert_eq!(url.hostname(), "[2001:db8::1]");

    let url = parse("http://[::ffff:192.168.1.1]/", None).unwrap();
    assert_eq!(url.hostname(), "[::ffff:c0a8:101]");
}

#[test]
fn test_ipv6_malformed() {
    for input in [
        "http://[1::2::3]/",
        "http://[12345::]/",
        "http://[::1%25eth0]/",
        "http://[::1/",
    ] {
        let err = parse(input, None).unwrap_err();
        assert_eq!(
            err.kind(),
            ParseErrorKind::Host(HostErrorKind::Ipv6Malformed),
            "input: {input}"
        );
    }
}

#[test]
fn test_opaque_host_for_non_special() {
    let url = parse("git://Case_Kept-Host.example/repo", None).unwrap();
    assert_eq!(
        url.host_value(),
        Some(&Host::Opaque("Case_Kept-Host.example".into()))
    );
    assert_eq!(url.hostname(), "Case_Kept-Host.example");
}

#[test]
fn test_opaque_host_with_port() {
    // The host is stored verbatim, but the port range still applies
    let url = parse("foo://Not_A-Standard.Host:99/x", None).unwrap();
    assert_eq!(
        url.host_value(),
        Some(&Host::Opaque("Not_A-Standard.Host".into()))
    );
    assert_eq!(url.port(), "99");

    let err = parse("foo://Not_A-Standard.Host:99999/x", None).unwrap_err();
    assert_eq!(err.kind(), ParseErrorKind::PortOutOfRange);
}

#[test]
fn test_opaque_host_forbidden_code_point() {
    let err = parse("git://bad host/", None).unwrap_err();
    assert_eq!(
        err.kind(),
        ParseErrorKind::Host(HostErrorKind::ForbiddenCodePoint)
    );
}

#[test]
fn test_domain_forbidden_code_point() {
    let err = parse("http://exa%23mple.com/", None).unwrap_err();
    assert_eq!(
        err.kind(),
        ParseErrorKind::Host(HostErrorKind::ForbiddenCodePoint)
    );
}

#[test]
fn test_file_empty_host_forms() {
    for input in ["file:///tmp/x", "file://localhost/tmp/x", "file://LOCALHOST/tmp/x"] {
        let url = parse(input, None).unwrap();
        assert_eq!(url.host_value(), Some(&Host::Empty), "input: {input}");
        assert_eq!(url.href(), "file:///tmp/x");
    }
}

#[test]
fn test_file_with_real_host() {
    let url = parse("file://server/share/x", None).unwrap();
    assert_eq!(url.hostname(), "server");
    assert_eq!(url.href(), "file://server/share/x");
}

#[test]
fn test_file_host_survives_drive_path() {
    // A drive letter after a real host normalizes in place; the host stays
    let url = parse("file://host/C:/x", None).unwrap();
    assert_eq!(url.hostname(), "host");
    assert_eq!(url.href(), "file://host/C:/x");

    let url = parse("file://host/C|/x", None).unwrap();
    assert_eq!(url.hostname(), "host");
    assert_eq!(url.href(), "file://host/C:/x");
}

#[test]
fn test_non_special_empty_host() {
    let url = parse("foo:///x", None).unwrap();
    assert_eq!(url.host_value(), Some(&Host::Empty));
    assert_eq!(url.href(), "foo:///x");
}
