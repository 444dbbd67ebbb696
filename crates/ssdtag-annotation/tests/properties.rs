//! Property tests for merge idempotence, label ordering and round trips

use proptest::prelude::*;
use ssdtag_annotation::{apply_updates, parse_annotation, AnnotationMerger};
use ssdtag_domain::{Label, Metadata, Updates};

fn value() -> impl Strategy<Value = String> {
    "[A-Za-z0-9#'.-]([A-Za-z0-9 #'.-]{0,16}[A-Za-z0-9#'.-])?"
}

/// Values as they may arrive from extraction or config: sometimes blank or
/// padded with spaces and tabs
fn fresh_value() -> impl Strategy<Value = String> {
    prop_oneof![
        3 => value(),
        1 => "[ \t]{0,2}",
        1 => ("[ \t]{0,2}", value(), "[ \t]{0,2}").prop_map(|(l, v, r)| format!("{}{}{}", l, v, r)),
    ]
}

fn name() -> impl Strategy<Value = String> {
    prop::collection::vec("[A-Za-z(][A-Za-z0-9 ()-]{0,24}", 0..3).prop_map(|lines| lines.join("\n"))
}

/// A well-formed single-unit annotation: name, then labels in order
fn annotation() -> impl Strategy<Value = String> {
    (
        name(),
        prop::collection::vec((prop::option::of(value()), any::<bool>()), 4),
        any::<bool>(),
    )
        .prop_map(|(name, fields, trailing_newline)| {
            let mut text = name;
            for (label, (value, blank)) in Label::ALL.iter().zip(fields) {
                if let Some(value) = value {
                    if !text.is_empty() {
                        text.push('\n');
                    }
                    text.push_str(&format!("{}: {}", label, value));
                    if blank {
                        text.push('\n');
                    }
                }
            }
            if trailing_newline {
                text.push('\n');
            }
            text
        })
}

fn metadata() -> impl Strategy<Value = Metadata> {
    (name(), prop::collection::vec(prop::option::of(fresh_value()), 4)).prop_map(|(name, values)| {
        let mut metadata = Metadata::new(name);
        for (label, value) in Label::ALL.iter().zip(values) {
            metadata.set(*label, value);
        }
        metadata
    })
}

fn updates() -> impl Strategy<Value = Updates> {
    prop::collection::vec(prop::option::of(value()), 4).prop_map(|values| {
        Label::ALL
            .into_iter()
            .zip(values)
            .filter_map(|(label, value)| value.map(|v| (label, v)))
            .collect()
    })
}

fn label_positions(text: &str) -> Vec<usize> {
    Label::ALL
        .iter()
        .filter_map(|label| {
            let prefix = format!("{}:", label);
            text.lines().position(|line| line.starts_with(&prefix))
        })
        .collect()
}

proptest! {
    #[test]
    fn merge_is_idempotent(annotation in annotation(), fresh in metadata()) {
        let merger = AnnotationMerger::default();
        if let Ok(Some(merged)) = merger.merge(&annotation, &fresh) {
            prop_assert_eq!(merger.merge(&merged, &fresh), Ok(None));
        }
    }

    #[test]
    fn merge_never_writes_blank_values(annotation in annotation(), fresh in metadata()) {
        if let Ok(Some(merged)) = AnnotationMerger::default().merge(&annotation, &fresh) {
            for line in merged.lines() {
                for label in Label::ALL {
                    if let Some(rest) = line.strip_prefix(&format!("{}:", label)) {
                        let value = rest.strip_prefix(' ').unwrap_or(rest);
                        prop_assert!(!value.is_empty() && value.trim() == value, "bad line: {:?}", line);
                    }
                }
            }
        }
    }

    #[test]
    fn merge_keeps_label_order(annotation in annotation(), fresh in metadata()) {
        if let Ok(Some(merged)) = AnnotationMerger::default().merge(&annotation, &fresh) {
            let positions = label_positions(&merged);
            prop_assert!(positions.windows(2).all(|w| w[0] < w[1]), "out of order: {:?}", merged);
        }
    }

    #[test]
    fn applied_values_parse_back(annotation in annotation(), updates in updates()) {
        if let Ok(applied) = apply_updates(&annotation, &updates) {
            let parsed = parse_annotation(&applied);
            for (label, value) in &updates {
                prop_assert_eq!(parsed.get(*label), Some(value.as_str()));
            }
        }
    }

    #[test]
    fn book_update_always_applies(annotation in annotation(), book in value()) {
        let mut updates = Updates::new();
        updates.insert(Label::Book, book.clone());
        let applied = apply_updates(&annotation, &updates).unwrap();
        let line = format!("{}: {}\n", Label::Book, book);
        let ok = applied.ends_with(&format!("\n{}", line)) || applied == line;
        prop_assert!(ok, "book not appended last: {:?}", applied);
    }
}
