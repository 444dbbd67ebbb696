//! ssdtag Parser
//!
//! Recovers the identity of a unit record sheet from OCR-degraded text.
//!
//! # Overview
//!
//! Record sheets are scanned documents; the text handed to this crate has
//! already been through OCR and is noisy, inconsistently spaced and sometimes
//! misspells the very words needed to find the unit's name. The parser:
//!
//! - **Normalizes** a closed vocabulary of known category misreadings, at two
//!   escalation tiers
//! - **Anchors** on the first category name, then scans forward to the nearest
//!   stop pattern to bound the unit name
//! - **Extracts** the `TYPE`, `POINT VALUE` and `REFERENCE` fields independently
//! - **Retries** once at the desperate tier before giving up, and even then
//!   reports whatever fields it could find
//!
//! The source book is not in the text at all; [`BookResolver`] derives it
//! from the document filename.
//!
//! # Architecture
//!
//! ```text
//! text → TextNormalizer → NameExtractor ─┐
//! text → fields ─────────────────────────┴→ MetadataParser → Metadata
//! filename → BookResolver → book
//! ```
//!
//! # Example Usage
//!
//! ```
//! use ssdtag_parser::{BookConfig, BookResolver, MetadataParser, ParserConfig};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let parser = MetadataParser::new(&ParserConfig::default())?;
//! let books = BookResolver::new(&BookConfig::default())?;
//!
//! let text = "FEDERATION HEAVY CRUISER\nSHIELD #1\nTYPE = CA\nPOINT VALUE = 125";
//! let mut metadata = parser.parse(text)?;
//! metadata.book = books.resolve("ssd_book_1_004.pdf");
//!
//! assert_eq!(metadata.name, "Federation Heavy Cruiser");
//! assert_eq!(metadata.bpv.as_deref(), Some("125"));
//! assert_eq!(metadata.book.as_deref(), Some("Commander's SSD Book #1"));
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod error;
mod config;
mod casing;
mod normalizer;
mod fields;
mod name;
mod parser;
mod book;


pub use error::{NameError, ParseError};
pub use config::{Correction, ParserConfig, Variant};
pub use casing::TitleCaser;
pub use normalizer::{Tier, TextNormalizer};
pub use fields::{extract_fields, find_bpv, find_reference, find_type};
pub use name::NameExtractor;
pub use parser::MetadataParser;
pub use book::{BookConfig, BookResolver, BookRule};
