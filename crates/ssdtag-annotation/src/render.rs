//! Building a fresh annotation from metadata

use ssdtag_domain::Metadata;

/// Render metadata as a new annotation
///
/// The name (when non-empty) followed by one `Label: value` line per present
/// field, newline-separated, with no trailing newline. Used for documents that
/// have no annotation yet and for partial previews of failed parses.
pub fn render_annotation(metadata: &Metadata) -> String {
    let name = (!metadata.name.is_empty()).then(|| metadata.name.clone());
    name.into_iter()
        .chain(
            metadata
                .fields()
                .map(|(label, value)| format!("{}: {}", label, value)),
        )
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::parse_annotation;
    use ssdtag_domain::Label;

    #[test]
    fn test_render_full() {
        let metadata = Metadata::new("Federation Heavy Cruiser")
            .with(Label::Type, "CA")
            .with(Label::Bpv, "125")
            .with(Label::Ref, "R2.4")
            .with(Label::Book, "Commander's SSD Book #1");
        assert_eq!(
            render_annotation(&metadata),
            "Federation Heavy Cruiser\nType: CA\nBPV: 125\nRef: R2.4\nBook: Commander's SSD Book #1"
        );
    }

    #[test]
    fn test_render_partial_preview() {
        let metadata = Metadata::default().with(Label::Bpv, "42");
        assert_eq!(render_annotation(&metadata), "BPV: 42");
    }

    #[test]
    fn test_render_parses_back() {
        let metadata = Metadata::new("Gorn Destroyer")
            .with(Label::Type, "DD")
            .with(Label::Book, "Captain's Basic Set SSD Book");
        assert_eq!(parse_annotation(&render_annotation(&metadata)), metadata);
    }
}
