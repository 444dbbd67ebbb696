//! Error types for batch processing

use thiserror::Error;

/// Errors that can occur during batch processing
///
/// Only failures that stop a whole batch surface as this type; per-document
/// problems become a [`DocumentOutcome`](crate::DocumentOutcome).
#[derive(Error, Debug)]
pub enum ProcessorError {
    /// Storage layer error
    #[error("Storage error: {0}")]
    Store(String),

    /// Text extraction error
    #[error("Extraction error: {0}")]
    Extract(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Errors from the bundled document stores
#[derive(Error, Debug)]
pub enum StoreError {
    /// No document with this id
    #[error("Document not found: {0}")]
    NotFound(String),

    /// Filesystem failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
