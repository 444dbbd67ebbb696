//! The identity record of a unit record sheet

use crate::Label;
use std::collections::BTreeMap;

/// Label values a merge needs to write, iterated in precedence order
pub type Updates = BTreeMap<Label, String>;

/// Identity data for one unit record sheet
///
/// Produced fresh per parse; `book` never comes from document text, only from
/// the document's filename.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Metadata {
    /// Display name of the unit (may be empty for partial results)
    pub name: String,

    /// Short type code
    pub unit_type: Option<String>,

    /// Point value, kept as text
    pub bpv: Option<String>,

    /// Rulebook reference
    pub reference: Option<String>,

    /// Human-readable source book label
    pub book: Option<String>,
}

impl Metadata {
    /// Create metadata with only a name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Builder-style setter for a labeled field
    pub fn with(mut self, label: Label, value: impl Into<String>) -> Self {
        self.set(label, Some(value.into()));
        self
    }

    /// Value of a labeled field
    pub fn get(&self, label: Label) -> Option<&str> {
        match label {
            Label::Type => self.unit_type.as_deref(),
            Label::Bpv => self.bpv.as_deref(),
            Label::Ref => self.reference.as_deref(),
            Label::Book => self.book.as_deref(),
        }
    }

    /// Replace the value of a labeled field
    pub fn set(&mut self, label: Label, value: Option<String>) {
        let slot = match label {
            Label::Type => &mut self.unit_type,
            Label::Bpv => &mut self.bpv,
            Label::Ref => &mut self.reference,
            Label::Book => &mut self.book,
        };
        *slot = value;
    }

    /// Labeled fields that carry a value, in precedence order
    pub fn fields(&self) -> impl Iterator<Item = (Label, &str)> + '_ {
        Label::ALL
            .into_iter()
            .filter_map(move |label| self.get(label).map(|value| (label, value)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_and_set() {
        let mut metadata = Metadata::new("Federation Heavy Cruiser");
        assert_eq!(metadata.get(Label::Bpv), None);

        metadata.set(Label::Bpv, Some("125".to_string()));
        assert_eq!(metadata.get(Label::Bpv), Some("125"));
        assert_eq!(metadata.bpv.as_deref(), Some("125"));
    }

    #[test]
    fn test_fields_in_precedence_order() {
        let metadata = Metadata::new("Gorn Battle Cruiser")
            .with(Label::Book, "Commander's SSD Book #2")
            .with(Label::Type, "BC");

        let fields: Vec<_> = metadata.fields().collect();
        assert_eq!(
            fields,
            vec![(Label::Type, "BC"), (Label::Book, "Commander's SSD Book #2")]
        );
    }
}
