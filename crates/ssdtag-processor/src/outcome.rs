//! Per-document results of a batch

use std::fmt;

/// What happened to one document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentOutcome {
    /// A new or updated annotation was written (or would have been, in
    /// dry-run mode)
    Written,

    /// The annotation already held everything the document yields
    Unchanged,

    /// Deliberately left alone, e.g. a composite annotation
    Skipped(String),

    /// Fetching, extracting, parsing, merging or writing failed
    Failed(String),
}

impl DocumentOutcome {
    /// Short lowercase name, for tables and logs
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentOutcome::Written => "written",
            DocumentOutcome::Unchanged => "unchanged",
            DocumentOutcome::Skipped(_) => "skipped",
            DocumentOutcome::Failed(_) => "failed",
        }
    }

    /// Reason attached to a skip or failure
    pub fn reason(&self) -> Option<&str> {
        match self {
            DocumentOutcome::Skipped(reason) | DocumentOutcome::Failed(reason) => Some(reason),
            DocumentOutcome::Written | DocumentOutcome::Unchanged => None,
        }
    }
}

impl fmt::Display for DocumentOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.reason() {
            Some(reason) => write!(f, "{}: {}", self.as_str(), reason),
            None => f.write_str(self.as_str()),
        }
    }
}

/// Outcome of one document, with enough context to review it by hand
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentReport {
    /// Store identifier
    pub id: String,

    /// Filename
    pub name: String,

    /// What happened
    pub outcome: DocumentOutcome,

    /// Annotation written, or the partial preview of a failed parse
    pub annotation: Option<String>,

    /// Review link, when the store or configuration provides one
    pub link: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_display() {
        assert_eq!(DocumentOutcome::Written.to_string(), "written");
        assert_eq!(
            DocumentOutcome::Skipped("composite annotation".to_string()).to_string(),
            "skipped: composite annotation"
        );
        assert_eq!(DocumentOutcome::Unchanged.reason(), None);
    }
}
