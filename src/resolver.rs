//! Reference resolution: parse a base, parse an input against it, and
//! optionally force a hostless special-scheme result into authority form.

use crate::compat::{String, Vec, vec};
use crate::error::{HostErrorKind, ParseError, ParseErrorKind, Result};
use crate::host::{Host, parse_host};
use crate::parser::{
    ParseOptions, ParserConfig, State, ValidationError, ValidationErrorKind, parse_with,
};
use crate::record::{Path, UrlRecord};
use crate::scheme::SchemeType;

/// Options accepted by [`resolve`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ResolveOptions {
    /// Options forwarded to both the base and input parses
    pub parse: ParseOptions,
    /// Promote the first path segment of a hostless special-scheme result to
    /// the host position. Non-standard, default off.
    pub force_absolute: bool,
}

/// Resolve `input` against an optional `base` URL string.
///
/// The base is parsed first with the same options; its record then anchors
/// the relative states of the input parse. With `force_absolute` set, a
/// special-scheme result that ended up without a usable host gets one pulled
/// out of its path.
pub fn resolve(input: &str, base: Option<&str>, options: ResolveOptions) -> Result<UrlRecord> {
    let base_record = match base {
        Some(text) => Some(parse_with(text, None, options.parse)?),
        None => None,
    };
    let record = parse_with(input, base_record.as_ref(), options.parse)?;

    if options.force_absolute {
        return force_host(record, input, base, options.parse);
    }
    Ok(record)
}

/// Rewrite a hostless special-scheme record so its first path segment
/// becomes the host. `file:` keeps its empty host; a non-special scheme has
/// no authority to force.
fn force_host(
    mut record: UrlRecord,
    input: &str,
    base: Option<&str>,
    options: ParseOptions,
) -> Result<UrlRecord> {
    let fail = |kind: ParseErrorKind| ParseError::new(kind, input, base);

    let host_usable = match record.host_value() {
        Some(Host::Empty) | None => false,
        Some(_) => true,
    };
    if host_usable || record.scheme_type() == SchemeType::File {
        return Ok(record);
    }
    if !record.scheme_type().is_special() {
        return Err(fail(ParseErrorKind::InvalidScheme));
    }

    let (candidate, rest) = split_first_segment(&record.path);
    let Some(candidate) = candidate else {
        return Err(fail(ParseErrorKind::Host(
            HostErrorKind::EmptyHostNotAllowed,
        )));
    };

    // The promoted segment may carry its own port
    let (host_text, port_text) = match candidate.rsplit_once(':') {
        Some((host, port)) if !port.is_empty() && port.bytes().all(|b| b.is_ascii_digit()) => {
            (host, Some(port))
        }
        _ => (candidate.as_str(), None),
    };

    let rules = ParserConfig::from_mode(options.mode).host_rules();
    let host = parse_host(host_text, record.scheme_type(), rules)
        .map_err(|kind| fail(ParseErrorKind::Host(kind)))?;

    let mut port = None;
    if let Some(text) = port_text {
        match text.parse::<u32>() {
            Ok(value) if value <= u32::from(u16::MAX) => {
                let value = value as u16;
                if Some(value) != record.scheme_type().default_port() {
                    port = Some(value);
                }
            }
            _ => {
                if !options.lenient {
                    return Err(fail(ParseErrorKind::PortOutOfRange));
                }
                record.validation.push(ValidationError {
                    kind: ValidationErrorKind::PortOutOfRange,
                    state: State::Port,
                    position: 0,
                });
            }
        }
    }

    record.host = Some(host);
    record.port = port;
    record.path = Path::Segments(if rest.is_empty() {
        vec![String::new()]
    } else {
        rest
    });
    Ok(record)
}

/// Pull the first non-empty path segment out of a path, returning it with
/// the remaining segments.
fn split_first_segment(path: &Path) -> (Option<String>, Vec<String>) {
    match path {
        Path::Segments(segments) => {
            let Some(index) = segments.iter().position(|s| !s.is_empty()) else {
                return (None, Vec::new());
            };
            (
                Some(segments[index].clone()),
                segments[index + 1..].to_vec(),
            )
        }
        Path::Opaque(text) => {
            let trimmed = text.trim_start_matches('/');
            if trimmed.is_empty() {
                return (None, Vec::new());
            }
            let mut parts = trimmed.split('/').map(String::from);
            let first = parts.next();
            (first, parts.collect())
        }
    }
}
