//! Error types for annotation merging

use ssdtag_domain::Label;
use thiserror::Error;

/// Errors that can occur while merging into an annotation
///
/// Every variant is fatal for the document at hand: nothing may be written.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MergeError {
    /// A label appears on more than one line: the annotation describes
    /// several units
    #[error("Ambiguous annotation: a label appears more than once")]
    AmbiguousAnnotation,

    /// No line of a later-precedence label to insert before
    #[error("Could not find insertion point for {label}")]
    MissingInsertionPoint {
        /// Label being inserted
        label: Label,
    },

    /// Several existing lines of a label being replaced; refusing to guess
    /// which one to drop
    #[error("Found {count} {label}: lines, expected at most one")]
    MultipleLabelLines {
        /// Label being replaced (normally `Book`)
        label: Label,
        /// Number of lines found
        count: usize,
    },

    /// A value would not read back as written: blank, padded with
    /// whitespace, or spanning lines
    #[error("Invalid value for {label}: values must be a single non-blank line without surrounding whitespace")]
    InvalidValue {
        /// Label of the offending value
        label: Label,
    },
}
