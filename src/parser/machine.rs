//! The URL state machine. One pass over the cleaned input, one state per
//! iteration step, scratch fields committed to a `UrlRecord` only when the
//! whole parse succeeds.

use crate::character_sets::is_url_code_point;
use crate::compat::{String, Vec};
use crate::error::{HostErrorKind, ParseErrorKind};
use crate::helpers::clean_input;
use crate::host::{Host, parse_host};
use crate::record::{Path, UrlRecord};
use crate::scheme::SchemeType;
use crate::unicode::percent::{
    C0_CONTROL_SET, FRAGMENT_SET, PATH_SET, QUERY_SET, SPECIAL_QUERY_SET, USERINFO_SET,
    has_invalid_percent_triplet, percent_encode_into,
};

use super::{ParseOptions, ParserConfig, State, ValidationError, ValidationErrorKind};

use percent_encoding::AsciiSet;

pub(super) fn run(
    input: &str,
    base: Option<&UrlRecord>,
    options: ParseOptions,
) -> Result<UrlRecord, ParseErrorKind> {
    Machine::new(base, options).run(&clean_input(input))
}

/// Scratch space for one parse.
struct Machine<'a> {
    config: ParserConfig,
    lenient: bool,
    base: Option<&'a UrlRecord>,

    state: State,
    buffer: String,
    at_sign_seen: bool,
    password_token_seen: bool,
    inside_brackets: bool,
    port_invalid: bool,

    scheme: String,
    scheme_type: SchemeType,
    username: String,
    password: String,
    host: Option<Host>,
    port: Option<u16>,
    path: Path,
    query: Option<String>,
    fragment: Option<String>,
    validation: Vec<ValidationError>,
}

impl<'a> Machine<'a> {
    fn new(base: Option<&'a UrlRecord>, options: ParseOptions) -> Self {
        Self {
            config: ParserConfig::from_mode(options.mode),
            lenient: options.lenient,
            base,
            state: State::SchemeStart,
            buffer: String::new(),
            at_sign_seen: false,
            password_token_seen: false,
            inside_brackets: false,
            port_invalid: false,
            scheme: String::new(),
            scheme_type: SchemeType::Other,
            username: String::new(),
            password: String::new(),
            host: None,
            port: None,
            path: Path::Segments(Vec::new()),
            query: None,
            fragment: None,
            validation: Vec::new(),
        }
    }

    fn run(mut self, input: &str) -> Result<UrlRecord, ParseErrorKind> {
        let chars: Vec<char> = input.chars().collect();

        // Empty input denotes the base itself, fragment included
        if chars.is_empty() {
            let Some(base) = self.base else {
                return Err(ParseErrorKind::MissingSchemeNoBase);
            };
            let mut record = base.clone();
            record.validation.clear();
            return Ok(record);
        }

        let mut i: usize = 0;

        // i == chars.len() is the EOF round. States that reprocess the
        // current code point `continue` without advancing.
        while i <= chars.len() {
            let c = chars.get(i).copied();

            match self.state {
                State::SchemeStart => match c {
                    Some(ch) if ch.is_ascii_alphabetic() => {
                        self.buffer.push(ch.to_ascii_lowercase());
                        self.state = State::Scheme;
                    }
                    _ => {
                        self.state = State::NoScheme;
                        continue;
                    }
                },

                State::Scheme => match c {
                    Some(ch) if ch.is_ascii_alphanumeric() || matches!(ch, '+' | '-' | '.') => {
                        self.buffer.push(ch.to_ascii_lowercase());
                    }
                    Some(':') => {
                        self.scheme = core::mem::take(&mut self.buffer);
                        self.scheme_type = SchemeType::from_scheme(&self.scheme);

                        if self.config.implied_special_authority {
                            if self.scheme_type == SchemeType::File {
                                self.state = State::File;
                            } else if self.scheme_type.is_special() {
                                let base_matches = self
                                    .base
                                    .is_some_and(|base| base.scheme == self.scheme);
                                self.state = if base_matches {
                                    State::SpecialRelativeOrAuthority
                                } else {
                                    State::SpecialAuthoritySlashes
                                };
                            } else if chars.get(i + 1) == Some(&'/') {
                                self.state = State::PathOrAuthority;
                                i += 2;
                                continue;
                            } else {
                                self.path = Path::Opaque(String::new());
                                self.state = State::OpaquePath;
                            }
                        } else if chars.get(i + 1) == Some(&'/') {
                            // Authority only when spelled out with slashes
                            self.state = State::PathOrAuthority;
                            i += 2;
                            continue;
                        } else {
                            self.path = Path::Opaque(String::new());
                            self.state = State::OpaquePath;
                        }
                    }
                    _ => {
                        // Not a scheme after all; reparse from the start
                        self.buffer.clear();
                        self.state = State::NoScheme;
                        i = 0;
                        continue;
                    }
                },

                State::NoScheme => {
                    let Some(base) = self.base else {
                        return Err(ParseErrorKind::MissingSchemeNoBase);
                    };
                    if base.path.is_opaque() {
                        if c != Some('#') {
                            return Err(ParseErrorKind::InvalidOpaquePath);
                        }
                        self.scheme = base.scheme.clone();
                        self.scheme_type = SchemeType::from_scheme(&self.scheme);
                        self.path = base.path.clone();
                        self.query = base.query.clone();
                        self.fragment = Some(String::new());
                        self.state = State::Fragment;
                    } else if base.scheme != "file" {
                        self.state = State::Relative;
                        continue;
                    } else {
                        self.state = State::File;
                        continue;
                    }
                }

                State::SpecialRelativeOrAuthority => {
                    if c == Some('/') && chars.get(i + 1) == Some(&'/') {
                        self.state = State::SpecialAuthorityIgnoreSlashes;
                        i += 2;
                        continue;
                    }
                    self.state = State::Relative;
                    continue;
                }

                State::PathOrAuthority => {
                    if c == Some('/') {
                        self.state = State::Authority;
                    } else {
                        self.state = State::Path;
                        continue;
                    }
                }

                State::Relative => {
                    let Some(base) = self.base else {
                        return Err(ParseErrorKind::MissingSchemeNoBase);
                    };
                    self.scheme = base.scheme.clone();
                    self.scheme_type = SchemeType::from_scheme(&self.scheme);
                    match c {
                        Some('/') => self.state = State::RelativeSlash,
                        Some('\\') if self.folds_backslash() => {
                            self.note(ValidationErrorKind::ReverseSolidus, i);
                            self.state = State::RelativeSlash;
                        }
                        _ => {
                            self.username = base.username.clone();
                            self.password = base.password.clone();
                            self.host = base.host.clone();
                            self.port = base.port;
                            self.path = base.path.clone();
                            self.query = base.query.clone();
                            match c {
                                Some('?') => {
                                    self.query = Some(String::new());
                                    self.state = State::Query;
                                }
                                Some('#') => {
                                    self.fragment = Some(String::new());
                                    self.state = State::Fragment;
                                }
                                None => {}
                                Some(_) => {
                                    self.query = None;
                                    self.shorten_path();
                                    self.state = State::Path;
                                    continue;
                                }
                            }
                        }
                    }
                }

                State::RelativeSlash => match c {
                    Some('/') if self.scheme_type.is_special() => {
                        self.state = State::SpecialAuthorityIgnoreSlashes;
                    }
                    Some('\\') if self.folds_backslash() => {
                        self.note(ValidationErrorKind::ReverseSolidus, i);
                        self.state = State::SpecialAuthorityIgnoreSlashes;
                    }
                    Some('/') => self.state = State::Authority,
                    _ => {
                        let Some(base) = self.base else {
                            return Err(ParseErrorKind::MissingSchemeNoBase);
                        };
                        self.username = base.username.clone();
                        self.password = base.password.clone();
                        self.host = base.host.clone();
                        self.port = base.port;
                        self.state = State::Path;
                        continue;
                    }
                },

                State::SpecialAuthoritySlashes => {
                    if c == Some('/') && chars.get(i + 1) == Some(&'/') {
                        self.state = State::SpecialAuthorityIgnoreSlashes;
                        i += 2;
                        continue;
                    }
                    self.state = State::SpecialAuthorityIgnoreSlashes;
                    continue;
                }

                State::SpecialAuthorityIgnoreSlashes => match c {
                    Some('/') => {}
                    Some('\\') if self.folds_backslash() => {
                        self.note(ValidationErrorKind::ReverseSolidus, i);
                    }
                    _ => {
                        self.state = State::Authority;
                        continue;
                    }
                },

                State::Authority => match c {
                    Some('@') => {
                        if has_invalid_percent_triplet(&self.buffer) {
                            self.note(ValidationErrorKind::InvalidPercentTriplet, i);
                        }
                        // A second @ means the first was part of the userinfo
                        let mut source = String::new();
                        if self.at_sign_seen {
                            source.push_str("%40");
                        }
                        source.push_str(&self.buffer);
                        self.at_sign_seen = true;
                        for ch in source.chars() {
                            if ch == ':' && !self.password_token_seen {
                                self.password_token_seen = true;
                                continue;
                            }
                            let target = if self.password_token_seen {
                                &mut self.password
                            } else {
                                &mut self.username
                            };
                            encode_char_into(target, ch, USERINFO_SET);
                        }
                        self.buffer.clear();
                    }
                    None | Some('/' | '?' | '#') => {
                        if self.at_sign_seen && self.buffer.is_empty() {
                            return Err(HostErrorKind::EmptyHostNotAllowed.into());
                        }
                        // Rewind so the host state re-reads the buffered text
                        let count = self.buffer.chars().count();
                        i -= count;
                        self.buffer.clear();
                        self.state = State::Host;
                        continue;
                    }
                    Some('\\') if self.folds_backslash() => {
                        if self.at_sign_seen && self.buffer.is_empty() {
                            return Err(HostErrorKind::EmptyHostNotAllowed.into());
                        }
                        let count = self.buffer.chars().count();
                        i -= count;
                        self.buffer.clear();
                        self.state = State::Host;
                        continue;
                    }
                    Some(ch) => self.buffer.push(ch),
                },

                State::Host => match c {
                    Some(':') if !self.inside_brackets => {
                        if self.buffer.is_empty() {
                            return Err(HostErrorKind::EmptyHostNotAllowed.into());
                        }
                        self.commit_host()?;
                        self.state = State::Port;
                    }
                    None | Some('/' | '?' | '#') => {
                        if self.buffer.is_empty()
                            && self.scheme_type.is_special()
                            && self.scheme_type != SchemeType::File
                        {
                            return Err(HostErrorKind::EmptyHostNotAllowed.into());
                        }
                        self.commit_host()?;
                        self.state = State::PathStart;
                        continue;
                    }
                    Some('\\') if self.folds_backslash() => {
                        if self.buffer.is_empty()
                            && self.scheme_type.is_special()
                            && self.scheme_type != SchemeType::File
                        {
                            return Err(HostErrorKind::EmptyHostNotAllowed.into());
                        }
                        self.commit_host()?;
                        self.state = State::PathStart;
                        continue;
                    }
                    Some('[') => {
                        self.inside_brackets = true;
                        self.buffer.push('[');
                    }
                    Some(']') => {
                        self.inside_brackets = false;
                        self.buffer.push(']');
                    }
                    Some(ch) => self.buffer.push(ch),
                },

                State::Hostname => match c {
                    None | Some('/' | '?' | '#') => {
                        self.commit_host()?;
                        self.state = State::PathStart;
                        continue;
                    }
                    Some('\\') if self.folds_backslash() => {
                        self.commit_host()?;
                        self.state = State::PathStart;
                        continue;
                    }
                    Some(ch) => self.buffer.push(ch),
                },

                State::Port => match c {
                    Some(d) if d.is_ascii_digit() => {
                        if !self.port_invalid {
                            self.buffer.push(d);
                        }
                    }
                    None | Some('/' | '?' | '#') => {
                        self.commit_port(i)?;
                        self.state = State::PathStart;
                        continue;
                    }
                    Some('\\') if self.folds_backslash() => {
                        self.commit_port(i)?;
                        self.state = State::PathStart;
                        continue;
                    }
                    Some(ch) => {
                        if !self.lenient {
                            return Err(ParseErrorKind::UnexpectedCharacter {
                                state: State::Port,
                                codepoint: ch,
                            });
                        }
                        self.port_invalid = true;
                    }
                },

                State::File => {
                    self.scheme = String::from("file");
                    self.scheme_type = SchemeType::File;
                    self.host = Some(Host::Empty);
                    match c {
                        Some('/') => self.state = State::FileSlash,
                        Some('\\') if self.folds_backslash() => {
                            self.note(ValidationErrorKind::ReverseSolidus, i);
                            self.state = State::FileSlash;
                        }
                        _ => {
                            if let Some(base) = self.base.filter(|base| base.scheme == "file") {
                                self.host = base.host.clone();
                                self.path = base.path.clone();
                                self.query = base.query.clone();
                                match c {
                                    Some('?') => {
                                        self.query = Some(String::new());
                                        self.state = State::Query;
                                    }
                                    Some('#') => {
                                        self.fragment = Some(String::new());
                                        self.state = State::Fragment;
                                    }
                                    None => {}
                                    Some(_) => {
                                        self.query = None;
                                        if starts_with_windows_drive_letter(&chars, i) {
                                            // Drive letter in the input replaces
                                            // the whole base path
                                            self.path = Path::Segments(Vec::new());
                                        } else {
                                            self.shorten_path();
                                        }
                                        self.state = State::Path;
                                        continue;
                                    }
                                }
                            } else {
                                self.state = State::Path;
                                continue;
                            }
                        }
                    }
                }

                State::FileSlash => match c {
                    Some('/') => self.state = State::FileHost,
                    Some('\\') if self.folds_backslash() => {
                        self.note(ValidationErrorKind::ReverseSolidus, i);
                        self.state = State::FileHost;
                    }
                    _ => {
                        if let Some(base) = self.base.filter(|base| base.scheme == "file") {
                            self.host = base.host.clone();
                            if !starts_with_windows_drive_letter(&chars, i)
                                && let Path::Segments(segments) = &base.path
                                && let Some(first) = segments.first()
                                && is_normalized_windows_drive_letter(first)
                            {
                                // The base drive letter survives a
                                // root-relative reference
                                self.push_segment(first.clone());
                            }
                        }
                        self.state = State::Path;
                        continue;
                    }
                },

                State::FileHost => {
                    if self.config.file_drive_letters
                        && starts_with_windows_drive_letter(&chars, i)
                    {
                        // file://C:/x puts the drive in the path, not the host
                        self.host = Some(Host::Empty);
                        self.state = State::Path;
                        continue;
                    }
                    match c {
                        None | Some('/' | '?' | '#') => {
                            self.host = Some(Host::Empty);
                            self.state = State::PathStart;
                            continue;
                        }
                        Some('\\') if self.folds_backslash() => {
                            self.host = Some(Host::Empty);
                            self.state = State::PathStart;
                            continue;
                        }
                        Some(_) => {
                            self.state = State::Hostname;
                            continue;
                        }
                    }
                }

                State::PathStart => {
                    if self.scheme_type.is_special() {
                        if c == Some('\\') && self.folds_backslash() {
                            self.note(ValidationErrorKind::ReverseSolidus, i);
                        }
                        self.state = State::Path;
                        let consumed = c == Some('/')
                            || (c == Some('\\') && self.folds_backslash());
                        if !consumed {
                            continue;
                        }
                    } else {
                        match c {
                            Some('?') => {
                                self.query = Some(String::new());
                                self.state = State::Query;
                            }
                            Some('#') => {
                                self.fragment = Some(String::new());
                                self.state = State::Fragment;
                            }
                            Some('/') => self.state = State::Path,
                            None => {}
                            Some(_) => {
                                self.state = State::Path;
                                continue;
                            }
                        }
                    }
                }

                State::Path => {
                    let folded = c == Some('\\') && self.folds_backslash();
                    let at_delimiter = folded || matches!(c, None | Some('/' | '?' | '#'));
                    if at_delimiter {
                        if folded {
                            self.note(ValidationErrorKind::ReverseSolidus, i);
                        }
                        self.flush_path_segment(c, folded);
                        match c {
                            Some('?') => {
                                self.query = Some(String::new());
                                self.state = State::Query;
                            }
                            Some('#') => {
                                self.fragment = Some(String::new());
                                self.state = State::Fragment;
                            }
                            _ => {}
                        }
                    } else if let Some(ch) = c {
                        self.check_code_point(ch, i, &chars);
                        encode_char_into(&mut self.buffer, ch, PATH_SET);
                    }
                }

                State::OpaquePath => match c {
                    Some('?') => {
                        self.query = Some(String::new());
                        self.state = State::Query;
                    }
                    Some('#') => {
                        self.fragment = Some(String::new());
                        self.state = State::Fragment;
                    }
                    None => {}
                    Some(' ') => {
                        // A space directly before the query or fragment
                        // delimiter must survive a reparse
                        if let Path::Opaque(path) = &mut self.path {
                            if matches!(chars.get(i + 1), Some('?' | '#')) {
                                path.push_str("%20");
                            } else {
                                path.push(' ');
                            }
                        }
                    }
                    Some(ch) => {
                        self.check_code_point(ch, i, &chars);
                        if let Path::Opaque(path) = &mut self.path {
                            encode_char_into(path, ch, C0_CONTROL_SET);
                        }
                    }
                },

                State::Query => match c {
                    Some('#') => {
                        self.fragment = Some(String::new());
                        self.state = State::Fragment;
                    }
                    None => {}
                    Some(ch) => {
                        self.check_code_point(ch, i, &chars);
                        let set = if self.scheme_type.is_special()
                            && self.config.quote_in_special_query
                        {
                            SPECIAL_QUERY_SET
                        } else {
                            QUERY_SET
                        };
                        if let Some(query) = &mut self.query {
                            encode_char_into(query, ch, set);
                        }
                    }
                },

                State::Fragment => {
                    if let Some(ch) = c {
                        self.check_code_point(ch, i, &chars);
                        if let Some(fragment) = &mut self.fragment {
                            encode_char_into(fragment, ch, FRAGMENT_SET);
                        }
                    }
                }
            }

            i += 1;
        }

        Ok(UrlRecord {
            scheme: self.scheme,
            username: self.username,
            password: self.password,
            host: self.host,
            port: self.port,
            path: self.path,
            query: self.query,
            fragment: self.fragment,
            validation: self.validation,
        })
    }

    fn folds_backslash(&self) -> bool {
        self.scheme_type.is_special() && self.config.backslash_is_slash
    }

    fn note(&mut self, kind: ValidationErrorKind, position: usize) {
        self.validation.push(ValidationError {
            kind,
            state: self.state,
            position,
        });
    }

    /// Diagnostics for content characters: bad `%` triplets and code points
    /// outside the URL set. Never fatal.
    fn check_code_point(&mut self, c: char, i: usize, chars: &[char]) {
        if c == '%' {
            let valid = matches!(chars.get(i + 1), Some(h) if h.is_ascii_hexdigit())
                && matches!(chars.get(i + 2), Some(h) if h.is_ascii_hexdigit());
            if !valid {
                self.note(ValidationErrorKind::InvalidPercentTriplet, i);
            }
        } else if !is_url_code_point(c) {
            self.note(ValidationErrorKind::NonUrlCodePoint, i);
        }
    }

    fn commit_host(&mut self) -> Result<(), ParseErrorKind> {
        let host = parse_host(&self.buffer, self.scheme_type, self.config.host_rules())?;
        self.host = Some(host);
        self.buffer.clear();
        Ok(())
    }

    fn commit_port(&mut self, i: usize) -> Result<(), ParseErrorKind> {
        if self.port_invalid {
            self.note(ValidationErrorKind::PortNotNumeric, i);
            self.port = None;
            self.port_invalid = false;
            self.buffer.clear();
            return Ok(());
        }
        if self.buffer.is_empty() {
            return Ok(());
        }
        match self.buffer.parse::<u32>() {
            Ok(value) if value <= u32::from(u16::MAX) => {
                let value = value as u16;
                self.port = if Some(value) == self.scheme_type.default_port() {
                    None
                } else {
                    Some(value)
                };
            }
            _ => {
                if !self.lenient {
                    return Err(ParseErrorKind::PortOutOfRange);
                }
                self.note(ValidationErrorKind::PortOutOfRange, i);
                self.port = None;
            }
        }
        self.buffer.clear();
        Ok(())
    }

    fn push_segment(&mut self, segment: String) {
        if let Path::Segments(segments) = &mut self.path {
            segments.push(segment);
        }
    }

    /// Pop the last path segment, keeping a lone `file:` drive letter.
    fn shorten_path(&mut self) {
        if let Path::Segments(segments) = &mut self.path {
            if self.scheme_type == SchemeType::File
                && segments.len() == 1
                && segments
                    .first()
                    .is_some_and(|s| is_normalized_windows_drive_letter(s))
            {
                return;
            }
            segments.pop();
        }
    }

    /// Close the current path segment at a delimiter, applying dot-segment
    /// resolution and the `file:` drive-letter quirks.
    fn flush_path_segment(&mut self, c: Option<char>, folded_backslash: bool) {
        let lower = self.buffer.to_ascii_lowercase();
        let is_double_dot = matches!(lower.as_str(), ".." | ".%2e" | "%2e." | "%2e%2e");
        let is_single_dot = matches!(lower.as_str(), "." | "%2e");
        let at_separator = c == Some('/') || folded_backslash;

        if is_double_dot {
            self.shorten_path();
            if !at_separator {
                self.push_segment(String::new());
            }
        } else if is_single_dot {
            if !at_separator {
                self.push_segment(String::new());
            }
        } else {
            if self.scheme_type == SchemeType::File
                && self.config.file_drive_letters
                && self.path_is_empty()
                && is_windows_drive_letter(&self.buffer)
            {
                // First file: path segment is a drive letter: normalize | to :
                self.buffer.pop();
                self.buffer.push(':');
            }
            let segment = core::mem::take(&mut self.buffer);
            self.push_segment(segment);
        }
        self.buffer.clear();
    }

    fn path_is_empty(&self) -> bool {
        matches!(&self.path, Path::Segments(segments) if segments.is_empty())
    }
}

fn encode_char_into(target: &mut String, c: char, set: &'static AsciiSet) {
    let mut tmp = [0u8; 4];
    percent_encode_into(target, c.encode_utf8(&mut tmp), set);
}

/// `X:` or `X|` where X is an ASCII letter.
fn is_windows_drive_letter(s: &str) -> bool {
    let bytes = s.as_bytes();
    bytes.len() == 2 && bytes[0].is_ascii_alphabetic() && matches!(bytes[1], b':' | b'|')
}

/// `X:` only; the stored form after `|` normalization.
fn is_normalized_windows_drive_letter(s: &str) -> bool {
    let bytes = s.as_bytes();
    bytes.len() == 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':'
}

/// Drive letter at `chars[i..]`, delimited or at end of input.
fn starts_with_windows_drive_letter(chars: &[char], i: usize) -> bool {
    matches!(chars.get(i), Some(ch) if ch.is_ascii_alphabetic())
        && matches!(chars.get(i + 1), Some(':' | '|'))
        && matches!(chars.get(i + 2), None | Some('/' | '\\' | '?' | '#'))
}
