//! Error types for the parser

use ssdtag_domain::Metadata;
use thiserror::Error;

/// Failure to bound a unit name in the text
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NameError {
    /// No category anchor anywhere in the text
    #[error("No name found")]
    NotFound,

    /// Anchor matched, but the bounded name is implausibly long
    #[error("Name '{name}' is too long ({length} chars, max: {max})")]
    TooLong {
        /// The over-long candidate
        name: String,
        /// Its length in characters
        length: usize,
        /// Configured ceiling
        max: usize,
    },
}

/// Errors that can occur while parsing a document
///
/// Name failures carry the fields that could still be extracted, as a
/// `Metadata` with an empty name.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// No category anchor at either escalation tier
    #[error("No name found in document text")]
    NameNotFound {
        /// Best-effort fields
        partial: Metadata,
    },

    /// Name bound at the first tier was too long, and the retry did not help
    #[error("Name '{name}' is too long")]
    NameTooLong {
        /// The over-long candidate
        name: String,
        /// Best-effort fields
        partial: Metadata,
    },

    /// Invalid table or pattern in configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ParseError {
    pub(crate) fn from_name_error(error: NameError, partial: Metadata) -> Self {
        match error {
            NameError::NotFound => ParseError::NameNotFound { partial },
            NameError::TooLong { name, .. } => ParseError::NameTooLong { name, partial },
        }
    }

    /// Fields recovered despite the failure, if any were attempted
    pub fn partial(&self) -> Option<&Metadata> {
        match self {
            ParseError::NameNotFound { partial } | ParseError::NameTooLong { partial, .. } => {
                Some(partial)
            }
            ParseError::Config(_) => None,
        }
    }
}

impl From<regex::Error> for ParseError {
    fn from(e: regex::Error) -> Self {
        ParseError::Config(e.to_string())
    }
}
