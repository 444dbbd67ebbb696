//! ssdtag Processor
//!
//! Batch driver that keeps record sheet annotations in step with the
//! documents they describe.
//!
//! # Overview
//!
//! The processor walks a [`DocumentStore`] one document at a time:
//!
//! - **Describe**: documents with no annotation are parsed and given a fresh
//!   one (name, `Type`, `BPV`, `Ref`, `Book`)
//! - **Refresh**: annotated documents are parsed again and any missing
//!   fields are merged in without disturbing what a human wrote
//! - **Composites**: annotations that describe several units are reported
//!   for manual review and never edited
//!
//! Per-document failures never stop a batch. Every document gets a
//! [`DocumentOutcome`], and [`ProcessorMetrics`] keeps the tally.
//!
//! # Usage
//!
//! ```no_run
//! use ssdtag_processor::{DirectoryStore, PlainTextExtractor, Processor};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut store = DirectoryStore::open("ssds/")?;
//! let mut processor = Processor::default_config()?;
//!
//! processor.describe_new(&mut store, &PlainTextExtractor)?;
//! processor.refresh_existing(&mut store, &PlainTextExtractor)?;
//! for report in processor.find_composites(&store)? {
//!     println!("Multiple units in: {}", report.name);
//! }
//! println!("\n{}", processor.metrics().summary());
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration
//!
//! ```toml
//! [processor]
//! dry_run = false
//! max_documents = 50
//! view_link_template = "https://drive.google.com/file/d/{id}/view"
//! ```
//!
//! [`DocumentStore`]: ssdtag_domain::DocumentStore

#![warn(missing_docs)]

mod error;
mod config;
mod outcome;
mod metrics;
mod processor;
mod store;
mod extract;

pub use error::{ProcessorError, StoreError};
pub use config::ProcessorConfig;
pub use outcome::{DocumentOutcome, DocumentReport};
pub use metrics::ProcessorMetrics;
pub use processor::Processor;
pub use store::{DirectoryStore, MemoryStore, ANNOTATION_SUFFIX};
pub use extract::PlainTextExtractor;
