use crate::compat::String;
use crate::parser::State;

/// Ways a host string can fail to parse
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostErrorKind {
    /// Bracketed literal is not a well-formed IPv6 address
    Ipv6Malformed,
    /// Host matches the IPv4 grammar but a part exceeds its range
    Ipv4OutOfRange,
    /// Host contains a forbidden host (or domain) code point
    ForbiddenCodePoint,
    /// IDNA ToASCII conversion failed
    IdnaFailure,
    /// Empty host where the scheme requires one
    EmptyHostNotAllowed,
}

impl core::fmt::Display for HostErrorKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let msg = match self {
            Self::Ipv6Malformed => "malformed IPv6 address",
            Self::Ipv4OutOfRange => "IPv4 address part out of range",
            Self::ForbiddenCodePoint => "forbidden code point in host",
            Self::IdnaFailure => "IDNA processing failed",
            Self::EmptyHostNotAllowed => "empty host not allowed for this scheme",
        };
        f.write_str(msg)
    }
}

/// Structural parse failures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// Input has no scheme and no base URL was given
    MissingSchemeNoBase,
    /// Scheme is unusable for the requested operation
    InvalidScheme,
    /// Host parsing failed
    Host(HostErrorKind),
    /// Port value does not fit 0-65535
    PortOutOfRange,
    /// Relative reference cannot be resolved against an opaque-path base
    InvalidOpaquePath,
    /// A code point the current state cannot accept
    UnexpectedCharacter {
        /// State the machine was in
        state: State,
        /// The offending code point
        codepoint: char,
    },
}

impl core::fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::MissingSchemeNoBase => f.write_str("missing scheme and no base URL"),
            Self::InvalidScheme => f.write_str("invalid scheme"),
            Self::Host(kind) => write!(f, "host parse error: {kind}"),
            Self::PortOutOfRange => f.write_str("port out of range"),
            Self::InvalidOpaquePath => {
                f.write_str("cannot resolve a relative reference against an opaque path")
            }
            Self::UnexpectedCharacter { state, codepoint } => {
                write!(f, "unexpected character {codepoint:?} in {state:?} state")
            }
        }
    }
}

impl From<HostErrorKind> for ParseErrorKind {
    fn from(kind: HostErrorKind) -> Self {
        Self::Host(kind)
    }
}

/// A failed parse: the error kind together with the original input and base,
/// so consumers can report exactly what was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    kind: ParseErrorKind,
    input: String,
    base: Option<String>,
}

impl ParseError {
    pub(crate) fn new(kind: ParseErrorKind, input: &str, base: Option<&str>) -> Self {
        Self {
            kind,
            input: String::from(input),
            base: base.map(String::from),
        }
    }

    /// The failure kind
    pub fn kind(&self) -> ParseErrorKind {
        self.kind
    }

    /// The input string as given by the caller
    pub fn input(&self) -> &str {
        &self.input
    }

    /// The base string, if one was given
    pub fn base(&self) -> Option<&str> {
        self.base.as_deref()
    }
}

impl core::fmt::Display for ParseError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match &self.base {
            Some(base) => write!(f, "{} (input: {:?}, base: {:?})", self.kind, self.input, base),
            None => write!(f, "{} (input: {:?})", self.kind, self.input),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ParseError {}

/// Result type for URL parsing operations
pub type Result<T> = core::result::Result<T, ParseError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_carries_input_and_base() {
        let err = ParseError::new(ParseErrorKind::MissingSchemeNoBase, "a/b", Some("x:y"));
        assert_eq!(err.kind(), ParseErrorKind::MissingSchemeNoBase);
        assert_eq!(err.input(), "a/b");
        assert_eq!(err.base(), Some("x:y"));
        let rendered = crate::compat::format!("{err}");
        assert!(rendered.contains("a/b"));
        assert!(rendered.contains("x:y"));
    }

    #[test]
    fn test_host_error_display() {
        let kind = ParseErrorKind::Host(HostErrorKind::Ipv6Malformed);
        assert_eq!(
            crate::compat::format!("{kind}"),
            "host parse error: malformed IPv6 address"
        );
    }
}
