//! ssdtag Domain Layer
//!
//! Core model shared by every ssdtag crate. It has no required external
//! dependencies and defines the record extracted from a unit record sheet,
//! the labels used to serialize it into an annotation, and the trait
//! interfaces for the document store and text extraction collaborators.
//!
//! ## Key Concepts
//!
//! - **Metadata**: name, type code, point value, rule reference and source book
//! - **Label**: one of `Type`, `BPV`, `Ref`, `Book`, in fixed precedence order
//! - **Updates**: the minimal set of label values a merge has to write
//! - **DocumentStore / TextExtractor**: the outside world, seen only through traits

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod label;
pub mod metadata;
pub mod traits;

// Re-exports for convenience
pub use label::Label;
pub use metadata::{Metadata, Updates};
pub use traits::{DocumentStore, DocumentSummary, TextExtractor};
