//! The URL parser: mode/option surface, validation diagnostics, and the
//! state machine entry points.

mod machine;
mod state;

pub use state::State;

use crate::error::{ParseError, Result};
use crate::host::HostRules;
use crate::record::UrlRecord;

/// Parsing dialect.
///
/// `Whatwg` follows the living-standard behavior browsers implement.
/// `Legacy` keeps the stricter generic-syntax reading older stacks used:
/// backslashes stay literal, domain rules apply to every scheme, and
/// numeric hosts keep their textual form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Whatwg,
    Legacy,
}

impl Mode {
    /// Stable identifier for the dialect, suitable for reports.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Whatwg => "whatwg",
            Self::Legacy => "legacy-rfc3986",
        }
    }
}

/// Options accepted by [`parse_with`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ParseOptions {
    /// Parsing dialect
    pub mode: Mode,
    /// Demote recoverable failures (bad ports) to validation errors
    pub lenient: bool,
}

/// Per-parse behavior knobs derived from the mode. Grouping them here keeps
/// the state machine free of `Mode` comparisons.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ParserConfig {
    /// Treat `\` as `/` in special-scheme authority and path positions
    pub backslash_is_slash: bool,
    /// Percent-encode `'` in special-scheme queries
    pub quote_in_special_query: bool,
    /// Keep non-special hosts opaque instead of applying domain rules
    pub opaque_hosts: bool,
    /// Canonicalize numeric domains to IPv4 addresses
    pub ipv4_canonical: bool,
    /// Recognize Windows drive letters in `file:` URLs
    pub file_drive_letters: bool,
    /// Let special schemes imply `//` when the slashes are missing
    pub implied_special_authority: bool,
}

impl ParserConfig {
    pub(crate) fn from_mode(mode: Mode) -> Self {
        match mode {
            Mode::Whatwg => Self {
                backslash_is_slash: true,
                quote_in_special_query: true,
                opaque_hosts: true,
                ipv4_canonical: true,
                file_drive_letters: true,
                implied_special_authority: true,
            },
            Mode::Legacy => Self {
                backslash_is_slash: false,
                quote_in_special_query: false,
                opaque_hosts: false,
                ipv4_canonical: false,
                file_drive_letters: false,
                implied_special_authority: false,
            },
        }
    }

    pub(crate) fn host_rules(self) -> HostRules {
        HostRules {
            opaque_hosts: self.opaque_hosts,
            ipv4_canonical: self.ipv4_canonical,
        }
    }
}

/// Recoverable problems noticed during a parse. The parse still succeeds;
/// these are reported on the resulting record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// `%` not followed by two hex digits
    InvalidPercentTriplet,
    /// A code point outside the URL code point set
    NonUrlCodePoint,
    /// `\` treated as `/` in a special URL
    ReverseSolidus,
    /// Port did not fit 0-65535 (lenient mode dropped it)
    PortOutOfRange,
    /// Port contained a non-digit (lenient mode dropped it)
    PortNotNumeric,
}

/// A non-fatal diagnostic: what was noticed, where the machine was, and the
/// code point offset into the cleaned input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationError {
    pub kind: ValidationErrorKind,
    pub state: State,
    pub position: usize,
}

impl core::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let msg = match self.kind {
            ValidationErrorKind::InvalidPercentTriplet => "invalid percent-encoded triplet",
            ValidationErrorKind::NonUrlCodePoint => "code point outside the URL set",
            ValidationErrorKind::ReverseSolidus => "backslash treated as slash",
            ValidationErrorKind::PortOutOfRange => "port out of range, dropped",
            ValidationErrorKind::PortNotNumeric => "non-numeric port, dropped",
        };
        write!(f, "{msg} at offset {} ({:?} state)", self.position, self.state)
    }
}

/// Parse a URL string, optionally against a base record.
///
/// This is the single entry point into the state machine; [`parse`] and the
/// resolver both route through it. On failure the error carries the original
/// input (and serialized base) for reporting.
pub fn parse_with(input: &str, base: Option<&UrlRecord>, options: ParseOptions) -> Result<UrlRecord> {
    machine::run(input, base, options).map_err(|kind| {
        let base_text = base.map(UrlRecord::href);
        ParseError::new(kind, input, base_text.as_deref())
    })
}
