//! Labeled field extraction from raw document text
//!
//! Each search is a fresh, position-independent scan: `regex::Regex` keeps no
//! match state between calls, so repeated calls against the same or different
//! documents always see the first occurrence.

use once_cell::sync::Lazy;
use regex::Regex;
use ssdtag_domain::{Label, Metadata};

static TYPE_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"TYPE\s*=\s*(\S+)").unwrap());

static BPV_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"POINT\s+VALUE\s*=\s*(\S+)").unwrap());

static REFERENCE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"REFERENCE\s*=\s*(\S+)").unwrap());

fn first_capture(pattern: &Regex, text: &str) -> Option<String> {
    pattern
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Unit type code, from `TYPE = <token>`
pub fn find_type(text: &str) -> Option<String> {
    first_capture(&TYPE_PATTERN, text)
}

/// Point value, from `POINT VALUE = <token>`
pub fn find_bpv(text: &str) -> Option<String> {
    first_capture(&BPV_PATTERN, text)
}

/// Rule reference, from `REFERENCE = <token>`
pub fn find_reference(text: &str) -> Option<String> {
    first_capture(&REFERENCE_PATTERN, text)
}

/// All three labeled fields, as metadata with an empty name
pub fn extract_fields(text: &str) -> Metadata {
    let mut metadata = Metadata::default();
    metadata.set(Label::Type, find_type(text));
    metadata.set(Label::Bpv, find_bpv(text));
    metadata.set(Label::Ref, find_reference(text));
    metadata
}
