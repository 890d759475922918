#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

// Compatibility layer for std/no_std
mod compat;

// Internal modules (not public API)
mod character_sets;
mod error;
mod helpers;
mod host;
mod ipv4;
mod ipv6;
mod parser;
mod record;
mod resolver;
mod scheme;
mod serializer;
mod unicode;

// Public API
pub use error::{HostErrorKind, ParseError, ParseErrorKind, Result};
pub use host::Host;
pub use parser::{Mode, ParseOptions, State, ValidationError, ValidationErrorKind};
pub use record::{Path, UrlRecord};
pub use resolver::{ResolveOptions, resolve};
pub use scheme::SchemeType;

use compat::String;

/// Parse an absolute or relative URL string with the default options
/// (WHATWG mode, strict).
pub fn parse(input: &str, base: Option<&str>) -> Result<UrlRecord> {
    parse_with(input, base, ParseOptions::default())
}

/// Parse a URL string with explicit options. The base, when given, is parsed
/// first with the same options.
pub fn parse_with(input: &str, base: Option<&str>, options: ParseOptions) -> Result<UrlRecord> {
    let base_record = match base {
        Some(text) => Some(parser::parse_with(text, None, options)?),
        None => None,
    };
    parser::parse_with(input, base_record.as_ref(), options)
}

/// Render a record back to its canonical string form.
pub fn serialize(record: &UrlRecord) -> String {
    serializer::serialize(record)
}

/// The standard revision a mode tracks.
pub fn version(mode: Mode) -> &'static str {
    mode.label()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_with_string_base() {
        let url = parse("../b", Some("http://h/a/x/y")).unwrap();
        assert_eq!(url.href(), "http://h/a/b");
    }

    #[test]
    fn test_serialize_matches_href() {
        let url = parse("https://example.com/a?b#c", None).unwrap();
        assert_eq!(serialize(&url), url.href());
    }

    #[test]
    fn test_version_strings() {
        assert_eq!(version(Mode::Whatwg), "whatwg");
        assert_eq!(version(Mode::Legacy), "legacy-rfc3986");
    }
}
