//! ssdtag Annotation
//!
//! Reads and rewrites the free-text annotation attached to each record sheet.
//!
//! # Overview
//!
//! An annotation is human-owned text: a display name (possibly several lines,
//! possibly with a parenthesized category marker) followed by `Label: value`
//! lines for `Type`, `BPV`, `Ref` and `Book`. This crate treats it as a
//! semi-structured record:
//!
//! - [`parse_annotation`] reads it back into [`Metadata`]
//! - [`has_ambiguous_fields`] detects composite annotations describing several
//!   units, which are never edited automatically
//! - [`AnnotationMerger`] computes the minimal set of missing fields and
//!   inserts them at their canonical position, leaving every other byte alone
//!
//! Merging is idempotent: merging the same metadata into its own output
//! reports no change.
//!
//! # Example Usage
//!
//! ```
//! use ssdtag_annotation::AnnotationMerger;
//! use ssdtag_domain::{Label, Metadata};
//!
//! # fn example() -> Result<(), ssdtag_annotation::MergeError> {
//! let merger = AnnotationMerger::default();
//! let annotation = "(General)\nLarge Disruptor-Armed Freighter\nBPV: 75\n";
//! let fresh = Metadata::new("Large Disruptor-Armed Freighter").with(Label::Type, "F-AL");
//!
//! let updated = merger.merge(annotation, &fresh)?.expect("type was missing");
//! assert_eq!(updated, "(General)\nLarge Disruptor-Armed Freighter\nType: F-AL\nBPV: 75\n");
//!
//! assert_eq!(merger.merge(&updated, &fresh)?, None);
//! # Ok(())
//! # }
//! ```
//!
//! [`Metadata`]: ssdtag_domain::Metadata

#![warn(missing_docs)]

mod error;
mod parse;
mod merge;
mod render;

pub use error::MergeError;
pub use parse::{has_ambiguous_fields, parse_annotation};
pub use merge::{apply_updates, compute_updates, merge_annotation, AnnotationMerger, MergePolicy};
pub use render::render_annotation;
