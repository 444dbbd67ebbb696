//! Reading an annotation back into metadata

use once_cell::sync::Lazy;
use regex::Regex;
use ssdtag_domain::{Label, Metadata};

/// First line that starts with any label
static ANY_LABEL_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^(Type|BPV|Ref|Book):").unwrap());

/// Full `Label: value` lines, one pattern per label in precedence order
static FIELD_LINES: Lazy<Vec<(Label, Regex)>> = Lazy::new(|| {
    Label::ALL
        .into_iter()
        .map(|label| {
            let pattern = format!(r"(?m)^{}:[ \t]*(.*?)[ \t\r]*$", label.title());
            (label, Regex::new(&pattern).unwrap())
        })
        .collect()
});

pub(crate) fn field_line(label: Label) -> &'static Regex {
    &FIELD_LINES[label as usize].1
}

/// Parse an annotation into metadata
///
/// The name is everything before the first label line, trimmed (the whole
/// text when there is none). Each field is the first line for its label;
/// a label with an empty value counts as absent.
pub fn parse_annotation(annotation: &str) -> Metadata {
    let name_end = ANY_LABEL_LINE
        .find(annotation)
        .map_or(annotation.len(), |m| m.start());

    let mut metadata = Metadata::new(annotation[..name_end].trim());
    for (label, pattern) in FIELD_LINES.iter() {
        let value = pattern
            .captures(annotation)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
            .filter(|v| !v.is_empty())
            .map(str::to_string);
        metadata.set(*label, value);
    }
    metadata
}

/// True when any label has more than one line
///
/// Such an annotation describes several physical units and must not be
/// merged automatically.
pub fn has_ambiguous_fields(annotation: &str) -> bool {
    FIELD_LINES
        .iter()
        .any(|(_, pattern)| pattern.find_iter(annotation).nth(1).is_some())
}

#[cfg(test)]
mod tests {
    use super::*;

    const FREIGHTER: &str = "(General)\n\
        Large Disruptor-Armed Freighter\n\
        Type: F-AL\n\
        BPV: 75\n\
        Ref: R1.21\n\
        Book: Captain's Advanced Missions SSD Book";

    #[test]
    fn test_parse_full_annotation() {
        let metadata = parse_annotation(FREIGHTER);
        assert_eq!(metadata.name, "(General)\nLarge Disruptor-Armed Freighter");
        assert_eq!(metadata.unit_type.as_deref(), Some("F-AL"));
        assert_eq!(metadata.bpv.as_deref(), Some("75"));
        assert_eq!(metadata.reference.as_deref(), Some("R1.21"));
        assert_eq!(
            metadata.book.as_deref(),
            Some("Captain's Advanced Missions SSD Book")
        );
    }

    #[test]
    fn test_parse_name_only() {
        let metadata = parse_annotation("  Federation Heavy Cruiser \n");
        assert_eq!(metadata.name, "Federation Heavy Cruiser");
        assert_eq!(metadata.fields().count(), 0);
    }

    #[test]
    fn test_parse_out_of_order_and_crlf() {
        let metadata = parse_annotation("Gorn BC\r\nRef: R6.3\r\nType: BC\r\n");
        assert_eq!(metadata.name, "Gorn BC");
        assert_eq!(metadata.unit_type.as_deref(), Some("BC"));
        assert_eq!(metadata.reference.as_deref(), Some("R6.3"));
    }

    #[test]
    fn test_labels_only_at_line_start() {
        let metadata = parse_annotation("Notes mention BPV: 40 inline\nBPV: 45");
        assert_eq!(metadata.name, "Notes mention BPV: 40 inline");
        assert_eq!(metadata.bpv.as_deref(), Some("45"));
    }

    #[test]
    fn test_empty_value_is_absent() {
        let metadata = parse_annotation("Hydran Ranger\nType:\nBPV: 125");
        assert_eq!(metadata.unit_type, None);
        assert_eq!(metadata.bpv.as_deref(), Some("125"));
    }

    #[test]
    fn test_labels_are_case_sensitive() {
        let metadata = parse_annotation("Lyran CA\nbpv: 120");
        assert_eq!(metadata.name, "Lyran CA\nbpv: 120");
        assert_eq!(metadata.bpv, None);
    }

    #[test]
    fn test_ambiguous_duplicate_bpv() {
        assert!(has_ambiguous_fields("Base\nBPV: 15\n\nOther base\nBPV: 30\n"));
    }

    #[test]
    fn test_not_ambiguous() {
        assert!(!has_ambiguous_fields(FREIGHTER));
        assert!(!has_ambiguous_fields("Just a name"));
    }
}
