//! Trait definitions for external collaborators
//!
//! Fetching, authentication and binary-to-text conversion live outside the
//! core; these traits are the only view the core has of them.

/// A document as listed by a store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentSummary {
    /// Store-specific identifier
    pub id: String,

    /// Filename, used to derive the source book
    pub name: String,

    /// Current annotation text, if any
    pub annotation: Option<String>,
}

impl DocumentSummary {
    /// True when the document has no annotation or only whitespace
    pub fn is_unannotated(&self) -> bool {
        self.annotation
            .as_deref()
            .map_or(true, |text| text.trim().is_empty())
    }
}

/// Trait for listing documents and persisting annotations
pub trait DocumentStore {
    /// Error type for store operations
    type Error;

    /// List every document with its current annotation
    fn list_documents(&self) -> Result<Vec<DocumentSummary>, Self::Error>;

    /// Fetch the raw content of a document
    fn fetch_content(&self, id: &str) -> Result<Vec<u8>, Self::Error>;

    /// Replace the annotation of a document
    fn write_annotation(&mut self, id: &str, text: &str) -> Result<(), Self::Error>;

    /// Link for manual review of a document, if the store has one
    fn view_link(&self, _id: &str) -> Option<String> {
        None
    }
}

/// Trait for converting document bytes into text
pub trait TextExtractor {
    /// Error type for extraction
    type Error;

    /// Extract the text of a document
    fn extract_text(&self, bytes: &[u8]) -> Result<String, Self::Error>;
}
