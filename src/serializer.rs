//! Rendering a `UrlRecord` back to text. Total over any valid record: every
//! stored string is already percent-encoded, so this is structural assembly
//! only.

use crate::compat::{String, ToString};
use crate::record::{Path, UrlRecord};

/// Render the canonical URL string (href).
pub fn serialize(record: &UrlRecord) -> String {
    let mut out = String::with_capacity(32);

    out.push_str(&record.scheme);
    out.push(':');

    if let Some(host) = &record.host {
        out.push_str("//");
        if !record.username.is_empty() || !record.password.is_empty() {
            out.push_str(&record.username);
            if !record.password.is_empty() {
                out.push(':');
                out.push_str(&record.password);
            }
            out.push('@');
        }
        host.write_to(&mut out);
        if let Some(port) = record.port {
            out.push(':');
            out.push_str(&port.to_string());
        }
    }

    write_pathname(record, &mut out);

    if let Some(query) = &record.query {
        out.push('?');
        out.push_str(query);
    }
    if let Some(fragment) = &record.fragment {
        out.push('#');
        out.push_str(fragment);
    }

    out
}

/// Hostname plus non-default port (the `host` component view).
pub fn host_and_port(record: &UrlRecord) -> String {
    let mut out = String::new();
    if let Some(host) = &record.host {
        host.write_to(&mut out);
        if let Some(port) = record.port {
            out.push(':');
            out.push_str(&port.to_string());
        }
    }
    out
}

/// Serialized path component.
pub fn pathname(record: &UrlRecord) -> String {
    let mut out = String::new();
    match &record.path {
        Path::Opaque(path) => out.push_str(path),
        Path::Segments(segments) => {
            for segment in segments {
                out.push('/');
                out.push_str(segment);
            }
        }
    }
    out
}

fn write_pathname(record: &UrlRecord, out: &mut String) {
    match &record.path {
        Path::Opaque(path) => out.push_str(path),
        Path::Segments(segments) => {
            // A hostless URL whose path starts with an empty segment would
            // serialize as "scheme://...", which re-parses as an authority.
            // Prefix "/." to keep the round trip unambiguous.
            if record.host.is_none()
                && segments.len() > 1
                && segments.first().is_some_and(String::is_empty)
            {
                out.push_str("/.");
            }
            for segment in segments {
                out.push('/');
                out.push_str(segment);
            }
        }
    }
}

/// `?`-prefixed query; empty string for a null or empty query.
pub fn search(record: &UrlRecord) -> String {
    match record.query.as_deref() {
        None | Some("") => String::new(),
        Some(query) => {
            let mut out = String::with_capacity(query.len() + 1);
            out.push('?');
            out.push_str(query);
            out
        }
    }
}

/// `#`-prefixed fragment; empty string for a null or empty fragment.
pub fn hash(record: &UrlRecord) -> String {
    match record.fragment.as_deref() {
        None | Some("") => String::new(),
        Some(fragment) => {
            let mut out = String::with_capacity(fragment.len() + 1);
            out.push('#');
            out.push_str(fragment);
            out
        }
    }
}
