//! Merging fresh metadata into an existing annotation

use crate::error::MergeError;
use crate::parse::{field_line, has_ambiguous_fields, parse_annotation};
use serde::{Deserialize, Serialize};
use ssdtag_domain::{Label, Metadata, Updates};
use tracing::debug;

/// Which existing values a merge may replace
///
/// Missing fields are always filled in. A field that is present but differs
/// from the fresh value is only replaced when its label is listed in
/// `overwrite`; everything else a human (or an earlier run) wrote is kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergePolicy {
    /// Labels resynchronized to the fresh value when they differ
    #[serde(default = "default_overwrite")]
    pub overwrite: Vec<Label>,
}

fn default_overwrite() -> Vec<Label> {
    vec![Label::Book]
}

impl Default for MergePolicy {
    /// Only `Book` follows the filename-derived value
    fn default() -> Self {
        Self {
            overwrite: default_overwrite(),
        }
    }
}

impl MergePolicy {
    /// Never replace an existing value
    pub fn fill_only() -> Self {
        Self {
            overwrite: Vec::new(),
        }
    }

    /// Load a policy from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize the policy to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }

    fn overwrites(&self, label: Label) -> bool {
        self.overwrite.contains(&label)
    }
}

/// Merges fresh metadata into annotations under a [`MergePolicy`]
#[derive(Debug, Clone, Default)]
pub struct AnnotationMerger {
    policy: MergePolicy,
}

impl AnnotationMerger {
    /// Create a merger with the given policy
    pub fn new(policy: MergePolicy) -> Self {
        Self { policy }
    }

    /// The policy in effect
    pub fn policy(&self) -> &MergePolicy {
        &self.policy
    }

    /// Labels whose values need writing
    ///
    /// An empty result means the annotation is already up to date.
    pub fn compute_updates(&self, existing: &Metadata, fresh: &Metadata) -> Updates {
        let mut updates = Updates::new();
        for (label, value) in fresh.fields() {
            let value = trim_value(value);
            if value.is_empty() {
                continue;
            }
            match existing.get(label) {
                None => {
                    updates.insert(label, value.to_string());
                }
                Some(current) if current != value && self.policy.overwrites(label) => {
                    debug!(%label, current, value, "Resynchronizing field");
                    updates.insert(label, value.to_string());
                }
                Some(_) => {}
            }
        }
        updates
    }

    /// Merge `fresh` into `annotation`
    ///
    /// Returns `Ok(None)` when nothing needs to change.
    ///
    /// # Errors
    ///
    /// Refuses composite annotations with [`MergeError::AmbiguousAnnotation`];
    /// other errors come from [`apply_updates`].
    pub fn merge(&self, annotation: &str, fresh: &Metadata) -> Result<Option<String>, MergeError> {
        if has_ambiguous_fields(annotation) {
            return Err(MergeError::AmbiguousAnnotation);
        }
        let existing = parse_annotation(annotation);
        let updates = self.compute_updates(&existing, fresh);
        if updates.is_empty() {
            return Ok(None);
        }
        apply_updates(annotation, &updates).map(Some)
    }
}

/// Labels whose values need writing, under the default policy
pub fn compute_updates(existing: &Metadata, fresh: &Metadata) -> Updates {
    AnnotationMerger::default().compute_updates(existing, fresh)
}

/// Merge `fresh` into `annotation` under the default policy
pub fn merge_annotation(annotation: &str, fresh: &Metadata) -> Result<Option<String>, MergeError> {
    AnnotationMerger::default().merge(annotation, fresh)
}

/// Strip what reading an annotation back would strip from a value
fn trim_value(value: &str) -> &str {
    value.trim_matches([' ', '\t', '\r'])
}

fn is_valid_value(value: &str) -> bool {
    !value.is_empty() && trim_value(value) == value && !value.contains(['\n', '\r'])
}

/// Write `updates` into `annotation`
///
/// Any single existing line of an updated label is removed first, and a
/// replaced `Book` line takes one following blank line with it. `Book` is
/// appended at the end after making sure the text ends in one newline; every
/// other label is inserted just before the first line of a later-precedence
/// label, so `Type, BPV, Ref, Book` order is kept. Inserted lines are
/// `"Label: value\n"`.
///
/// # Errors
///
/// - [`MergeError::MultipleLabelLines`] when an updated label has several lines
/// - [`MergeError::MissingInsertionPoint`] when no later label line exists
/// - [`MergeError::InvalidValue`] when a value is blank, padded or spans lines
pub fn apply_updates(annotation: &str, updates: &Updates) -> Result<String, MergeError> {
    if let Some(label) = updates
        .iter()
        .find(|(_, value)| !is_valid_value(value))
        .map(|(label, _)| *label)
    {
        return Err(MergeError::InvalidValue { label });
    }

    let mut output = annotation.to_string();
    for label in updates.keys() {
        remove_line(&mut output, *label)?;
    }

    // Book goes first: once placed, it anchors labels that precede it.
    if let Some(book) = updates.get(&Label::Book) {
        let kept = output.trim_end_matches('\n').len();
        output.truncate(kept);
        if !output.is_empty() {
            output.push('\n');
        }
        output.push_str(&format!("{}: {}\n", Label::Book, book));
    }

    for (label, value) in updates.iter().filter(|(label, _)| **label != Label::Book) {
        let index = label
            .later()
            .iter()
            .filter_map(|later| field_line(*later).find(&output).map(|m| m.start()))
            .min()
            .ok_or(MergeError::MissingInsertionPoint { label: *label })?;
        output.insert_str(index, &format!("{}: {}\n", label, value));
    }

    Ok(output)
}

/// Remove the line of `label`, with its newline, if there is exactly one
///
/// A `Book` line also loses the blank line right after it.
fn remove_line(text: &mut String, label: Label) -> Result<(), MergeError> {
    let lines: Vec<(usize, usize)> = field_line(label)
        .find_iter(text)
        .map(|m| (m.start(), m.end()))
        .collect();

    match lines.as_slice() {
        [] => Ok(()),
        [(start, end)] => {
            let mut end = if text[*end..].starts_with('\n') { end + 1 } else { *end };
            if label == Label::Book {
                end += ["\n", "\r\n"]
                    .iter()
                    .find(|blank| text[end..].starts_with(*blank))
                    .map_or(0, |blank| blank.len());
            }
            text.replace_range(*start..end, "");
            Ok(())
        }
        _ => Err(MergeError::MultipleLabelLines {
            label,
            count: lines.len(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn updates(pairs: &[(Label, &str)]) -> Updates {
        pairs.iter().map(|(l, v)| (*l, v.to_string())).collect()
    }

    #[test]
    fn test_compute_fills_missing_only() {
        let existing = Metadata::new("Gorn BC").with(Label::Bpv, "150");
        let fresh = Metadata::new("Gorn Battle Cruiser")
            .with(Label::Type, "BC")
            .with(Label::Bpv, "155");

        let result = compute_updates(&existing, &fresh);
        assert_eq!(result, updates(&[(Label::Type, "BC")]));
    }

    #[test]
    fn test_compute_resyncs_book() {
        let existing = Metadata::new("Gorn BC").with(Label::Book, "Old Book");
        let fresh = Metadata::new("Gorn BC").with(Label::Book, "Commander's SSD Book #2");

        let result = compute_updates(&existing, &fresh);
        assert_eq!(result, updates(&[(Label::Book, "Commander's SSD Book #2")]));
    }

    #[test]
    fn test_compute_fill_only_policy() {
        let merger = AnnotationMerger::new(MergePolicy::fill_only());
        let existing = Metadata::new("Gorn BC").with(Label::Book, "Old Book");
        let fresh = Metadata::new("Gorn BC").with(Label::Book, "New Book");
        assert!(merger.compute_updates(&existing, &fresh).is_empty());
    }

    #[test]
    fn test_compute_nothing_to_do() {
        let existing = Metadata::new("Gorn BC").with(Label::Type, "BC");
        let fresh = Metadata::new("Gorn BC").with(Label::Type, "BC");
        assert!(compute_updates(&existing, &fresh).is_empty());
    }

    #[test]
    fn test_insert_type_at_start_of_labels() {
        let result = apply_updates("Name\nBPV: 75\n", &updates(&[(Label::Type, "F-AL")])).unwrap();
        assert_eq!(result, "Name\nType: F-AL\nBPV: 75\n");
    }

    #[test]
    fn test_missing_insertion_point() {
        let result = apply_updates("Name only", &updates(&[(Label::Type, "CA")]));
        assert_eq!(
            result,
            Err(MergeError::MissingInsertionPoint { label: Label::Type })
        );
    }

    #[test]
    fn test_book_replaces_single_line() {
        let result = apply_updates(
            "Name\nBPV: 75\nBook: Old\nNotes after",
            &updates(&[(Label::Book, "New")]),
        )
        .unwrap();
        assert_eq!(result, "Name\nBPV: 75\nNotes after\nBook: New\n");
    }

    #[test]
    fn test_multiple_book_lines_refused() {
        let result = apply_updates("A\nBook: X\nB\nBook: Y\n", &updates(&[(Label::Book, "Z")]));
        assert_eq!(
            result,
            Err(MergeError::MultipleLabelLines {
                label: Label::Book,
                count: 2
            })
        );
    }

    #[test]
    fn test_book_anchors_other_labels() {
        let result = apply_updates(
            "Name\nBook: Old",
            &updates(&[(Label::Type, "CA"), (Label::Book, "New")]),
        )
        .unwrap();
        assert_eq!(result, "Name\nType: CA\nBook: New\n");
    }

    #[test]
    fn test_empty_label_line_replaced() {
        let result = apply_updates("Name\nType:\nBPV: 1\n", &updates(&[(Label::Type, "CA")])).unwrap();
        assert_eq!(result, "Name\nType: CA\nBPV: 1\n");
    }

    #[test]
    fn test_multiline_value_rejected() {
        let result = apply_updates("Name\n", &updates(&[(Label::Book, "A\nBPV: 3")]));
        assert_eq!(result, Err(MergeError::InvalidValue { label: Label::Book }));
    }

    #[test]
    fn test_blank_or_padded_value_rejected() {
        for value in ["", " ", "Commander's SSD Book #2 ", "\tCA"] {
            let result = apply_updates("Name\nBook: B\n", &updates(&[(Label::Type, value)]));
            assert_eq!(result, Err(MergeError::InvalidValue { label: Label::Type }));
        }
    }

    #[test]
    fn test_compute_skips_empty_fresh_values() {
        let existing = Metadata::new("Gorn BC").with(Label::Bpv, "1");
        let fresh = Metadata::new("Gorn BC")
            .with(Label::Type, "")
            .with(Label::Ref, " \t")
            .with(Label::Book, "B");
        assert_eq!(compute_updates(&existing, &fresh), updates(&[(Label::Book, "B")]));
    }

    #[test]
    fn test_compute_compares_trimmed_values() {
        let existing = Metadata::new("Gorn BC").with(Label::Book, "Commander's SSD Book #2");
        let fresh = Metadata::new("Gorn BC").with(Label::Book, "Commander's SSD Book #2 ");
        assert!(compute_updates(&existing, &fresh).is_empty());

        let fresh = Metadata::new("Gorn BC").with(Label::Type, " BC ");
        assert_eq!(compute_updates(&existing, &fresh), updates(&[(Label::Type, "BC")]));
    }

    #[test]
    fn test_book_takes_following_blank_line() {
        let result = apply_updates(
            "Name\nBPV: 1\nBook: Old\n\nNotes",
            &updates(&[(Label::Book, "New")]),
        )
        .unwrap();
        assert_eq!(result, "Name\nBPV: 1\nNotes\nBook: New\n");
    }

    #[test]
    fn test_other_labels_keep_following_blank_line() {
        let result = apply_updates("Name\nType: A\n\nBPV: 1\n", &updates(&[(Label::Type, "B")])).unwrap();
        assert_eq!(result, "Name\n\nType: B\nBPV: 1\n");
    }

    #[test]
    fn test_merge_refuses_composite() {
        let merger = AnnotationMerger::default();
        let fresh = Metadata::new("x").with(Label::Type, "CA");
        assert_eq!(
            merger.merge("A\nBPV: 1\nB\nBPV: 2\nBook: X", &fresh),
            Err(MergeError::AmbiguousAnnotation)
        );
    }

    #[test]
    fn test_merge_annotation_fills_bpv() {
        let fresh = Metadata::new("Gorn BC").with(Label::Bpv, "150");
        let merged = merge_annotation("Gorn BC\nBook: B", &fresh).unwrap();
        assert_eq!(merged.as_deref(), Some("Gorn BC\nBPV: 150\nBook: B"));
    }

    #[test]
    fn test_policy_toml() {
        let policy = MergePolicy::from_toml(r#"overwrite = ["book", "bpv"]"#).unwrap();
        assert_eq!(policy.overwrite, vec![Label::Book, Label::Bpv]);

        let default = MergePolicy::from_toml("").unwrap();
        assert_eq!(default, MergePolicy::default());

        let round_trip = MergePolicy::from_toml(&policy.to_toml().unwrap()).unwrap();
        assert_eq!(round_trip, policy);
    }
}
