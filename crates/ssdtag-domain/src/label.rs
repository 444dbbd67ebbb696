//! Annotation labels and their precedence

/// A labeled field of an annotation
///
/// Variants are declared in precedence order; the derived `Ord` is that order,
/// so ordered maps of labels iterate `Type, BPV, Ref, Book`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Label {
    /// Short unit type code, e.g. `F-AL`
    Type,

    /// Basic point value
    Bpv,

    /// Rulebook reference, e.g. `R1.21`
    Ref,

    /// Source book, derived from the document filename
    Book,
}

impl Label {
    /// All labels in precedence order
    pub const ALL: [Label; 4] = [Label::Type, Label::Bpv, Label::Ref, Label::Book];

    /// The exact token written before the colon in an annotation line
    pub fn title(&self) -> &'static str {
        match self {
            Label::Type => "Type",
            Label::Bpv => "BPV",
            Label::Ref => "Ref",
            Label::Book => "Book",
        }
    }

    /// Labels that must appear after this one
    pub fn later(&self) -> &'static [Label] {
        match self {
            Label::Type => &[Label::Bpv, Label::Ref, Label::Book],
            Label::Bpv => &[Label::Ref, Label::Book],
            Label::Ref => &[Label::Book],
            Label::Book => &[],
        }
    }

    /// Parse a label from its annotation token (case-sensitive)
    pub fn from_title(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|label| label.title() == s)
    }
}

impl std::fmt::Display for Label {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.title())
    }
}

impl std::str::FromStr for Label {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_title(s).ok_or_else(|| format!("Invalid label: {}", s))
    }
}
