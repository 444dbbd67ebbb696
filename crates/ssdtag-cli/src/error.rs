//! Error types for the CLI application.

use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Document could not be parsed
    #[error("Parse error: {0}")]
    Parse(#[from] ssdtag_parser::ParseError),

    /// Annotation could not be merged
    #[error("Merge error: {0}")]
    Merge(#[from] ssdtag_annotation::MergeError),

    /// Batch processing error
    #[error(transparent)]
    Processor(#[from] ssdtag_processor::ProcessorError),

    /// Document store error
    #[error("Store error: {0}")]
    Store(#[from] ssdtag_processor::StoreError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
