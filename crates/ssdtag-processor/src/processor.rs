//! Core batch processor

use crate::{DocumentOutcome, DocumentReport, ProcessorConfig, ProcessorError, ProcessorMetrics};
use ssdtag_annotation::{has_ambiguous_fields, render_annotation, AnnotationMerger, MergePolicy};
use ssdtag_domain::{DocumentStore, DocumentSummary, Metadata, TextExtractor};
use ssdtag_parser::{BookConfig, BookResolver, MetadataParser, ParseError, ParserConfig};
use std::fmt::Display;
use std::time::Instant;
use tracing::{debug, info, warn};

const COMPOSITE: &str = "composite annotation";

/// Batch driver that annotates documents in a store
///
/// Documents are handled one at a time. A failure on one document is
/// recorded as its [`DocumentOutcome`] and the batch moves on; only a store
/// that cannot list its documents aborts a batch.
///
/// # Examples
///
/// ```
/// use ssdtag_domain::DocumentStore;
/// use ssdtag_processor::{MemoryStore, PlainTextExtractor, Processor};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut store = MemoryStore::new();
/// store.insert(
///     "1",
///     "ssd_book_2_014.txt",
///     "GORN BATTLE CRUISER\nSHIELD #1\nTYPE = BC\nPOINT VALUE = 155",
///     None,
/// );
///
/// let mut processor = Processor::default_config()?;
/// processor.describe_new(&mut store, &PlainTextExtractor)?;
///
/// assert_eq!(
///     store.annotation("1"),
///     Some("Gorn Battle Cruiser\nType: BC\nBPV: 155\nBook: Commander's SSD Book #2")
/// );
/// println!("{}", processor.metrics().summary());
/// # Ok(())
/// # }
/// ```
pub struct Processor {
    parser: MetadataParser,
    books: BookResolver,
    merger: AnnotationMerger,
    config: ProcessorConfig,
    metrics: ProcessorMetrics,
}

impl Processor {
    /// Create a processor from its parts
    pub fn new(
        parser: MetadataParser,
        books: BookResolver,
        merger: AnnotationMerger,
        config: ProcessorConfig,
    ) -> Result<Self, ProcessorError> {
        config.validate().map_err(ProcessorError::Config)?;
        Ok(Self {
            parser,
            books,
            merger,
            config,
            metrics: ProcessorMetrics::new(),
        })
    }

    /// Compile a processor from configuration
    pub fn from_configs(
        parser: &ParserConfig,
        books: &BookConfig,
        policy: MergePolicy,
        config: ProcessorConfig,
    ) -> Result<Self, ProcessorError> {
        books.validate().map_err(ProcessorError::Config)?;
        let parser = MetadataParser::new(parser).map_err(|e| ProcessorError::Config(e.to_string()))?;
        let books = BookResolver::new(books).map_err(|e| ProcessorError::Config(e.to_string()))?;
        Self::new(parser, books, AnnotationMerger::new(policy), config)
    }

    /// Create a processor with default tables and configuration
    pub fn default_config() -> Result<Self, ProcessorError> {
        Self::from_configs(
            &ParserConfig::default(),
            &BookConfig::default(),
            MergePolicy::default(),
            ProcessorConfig::default(),
        )
    }

    /// Get a reference to the configuration
    pub fn config(&self) -> &ProcessorConfig {
        &self.config
    }

    /// Get a reference to the current metrics
    pub fn metrics(&self) -> &ProcessorMetrics {
        &self.metrics
    }

    /// Reset metrics counters
    pub fn reset_metrics(&mut self) {
        self.metrics.reset();
    }

    /// Parse document text, taking the book from the filename
    pub fn parse_document(&self, filename: &str, text: &str) -> Result<Metadata, ParseError> {
        let mut metadata = self.parser.parse(text)?;
        metadata.book = self.books.resolve(filename);
        Ok(metadata)
    }

    /// Best-effort annotation for a document whose name could not be found
    pub fn partial_preview(&self, filename: &str, error: &ParseError) -> Option<String> {
        let mut partial = error.partial()?.clone();
        partial.name.clear();
        partial.book = self.books.resolve(filename);
        Some(render_annotation(&partial))
    }

    /// Annotate every document that has no annotation yet
    ///
    /// Each document is parsed and, on success, given a fresh annotation.
    /// On parse failure the error and a partial preview are logged and the
    /// document is left alone.
    pub fn describe_new<S, E>(
        &mut self,
        store: &mut S,
        extractor: &E,
    ) -> Result<Vec<DocumentReport>, ProcessorError>
    where
        S: DocumentStore,
        S::Error: Display,
        E: TextExtractor,
        E::Error: Display,
    {
        let start = Instant::now();
        let documents = self.candidates(store, DocumentSummary::is_unannotated)?;
        info!(count = documents.len(), "Describing unannotated documents");

        let mut reports = Vec::with_capacity(documents.len());
        for document in documents {
            let report = self.describe_one(store, extractor, document);
            self.metrics.record(&report.outcome);
            reports.push(report);
        }

        self.finish_batch(start);
        Ok(reports)
    }

    /// Fill in missing fields of every annotated document
    ///
    /// Composite annotations are skipped without fetching the document.
    /// Existing values are kept unless the merge policy says otherwise, and
    /// nothing is written when the annotation is already complete.
    pub fn refresh_existing<S, E>(
        &mut self,
        store: &mut S,
        extractor: &E,
    ) -> Result<Vec<DocumentReport>, ProcessorError>
    where
        S: DocumentStore,
        S::Error: Display,
        E: TextExtractor,
        E::Error: Display,
    {
        let start = Instant::now();
        let documents = self.candidates(store, |d| !d.is_unannotated())?;
        info!(count = documents.len(), "Refreshing annotated documents");

        let mut reports = Vec::with_capacity(documents.len());
        for document in documents {
            let report = self.refresh_one(store, extractor, document);
            self.metrics.record(&report.outcome);
            reports.push(report);
        }

        self.finish_batch(start);
        Ok(reports)
    }

    /// Documents whose annotation describes several units
    ///
    /// Nothing is fetched or written; each report is a skip with a review
    /// link where one is available.
    pub fn find_composites<S>(&self, store: &S) -> Result<Vec<DocumentReport>, ProcessorError>
    where
        S: DocumentStore,
        S::Error: Display,
    {
        let documents = store
            .list_documents()
            .map_err(|e| ProcessorError::Store(e.to_string()))?;

        let reports: Vec<_> = documents
            .into_iter()
            .filter(|d| d.annotation.as_deref().is_some_and(has_ambiguous_fields))
            .map(|d| {
                let link = self.view_link(store, &d.id);
                info!(id = %d.id, link = link.as_deref().unwrap_or(&d.id), "Multiple units in annotation");
                DocumentReport {
                    id: d.id,
                    name: d.name,
                    outcome: DocumentOutcome::Skipped(COMPOSITE.to_string()),
                    annotation: d.annotation,
                    link,
                }
            })
            .collect();
        Ok(reports)
    }

    fn describe_one<S, E>(&self, store: &mut S, extractor: &E, document: DocumentSummary) -> DocumentReport
    where
        S: DocumentStore,
        S::Error: Display,
        E: TextExtractor,
        E::Error: Display,
    {
        let link = self.view_link(store, &document.id);
        let (outcome, annotation) = match self.read_text(store, extractor, &document.id) {
            Err(e) => (self.failed(&document, e.to_string()), None),
            Ok(text) => match self.parse_document(&document.name, &text) {
                Ok(metadata) => {
                    debug!(id = %document.id, ?metadata, "Parsed document");
                    let annotation = render_annotation(&metadata);
                    (self.write(store, &document, &annotation), Some(annotation))
                }
                Err(e) => {
                    let preview = self.partial_preview(&document.name, &e);
                    warn!(
                        name = %document.name,
                        link = link.as_deref().unwrap_or(&document.id),
                        preview = preview.as_deref().unwrap_or(""),
                        "Could not parse metadata: {}",
                        e
                    );
                    (DocumentOutcome::Failed(e.to_string()), preview)
                }
            },
        };

        DocumentReport {
            id: document.id,
            name: document.name,
            outcome,
            annotation,
            link,
        }
    }

    fn refresh_one<S, E>(&self, store: &mut S, extractor: &E, document: DocumentSummary) -> DocumentReport
    where
        S: DocumentStore,
        S::Error: Display,
        E: TextExtractor,
        E::Error: Display,
    {
        let link = self.view_link(store, &document.id);
        let existing = document.annotation.clone().unwrap_or_default();

        let (outcome, annotation) = if has_ambiguous_fields(&existing) {
            warn!(
                name = %document.name,
                link = link.as_deref().unwrap_or(&document.id),
                "Skipping composite annotation"
            );
            (DocumentOutcome::Skipped(COMPOSITE.to_string()), None)
        } else {
            match self.read_text(store, extractor, &document.id) {
                Err(e) => (self.failed(&document, e.to_string()), None),
                Ok(text) => match self.parse_document(&document.name, &text) {
                    Err(e) => (self.failed(&document, e.to_string()), None),
                    Ok(fresh) => match self.merger.merge(&existing, &fresh) {
                        Ok(None) => {
                            debug!(id = %document.id, "Annotation already complete");
                            (DocumentOutcome::Unchanged, None)
                        }
                        Ok(Some(updated)) => {
                            (self.write(store, &document, &updated), Some(updated))
                        }
                        Err(e) => (self.failed(&document, e.to_string()), None),
                    },
                },
            }
        };

        DocumentReport {
            id: document.id,
            name: document.name,
            outcome,
            annotation,
            link,
        }
    }

    /// List documents, keep those matching `filter`, and apply the batch cap
    fn candidates<S>(
        &self,
        store: &S,
        filter: impl Fn(&DocumentSummary) -> bool,
    ) -> Result<Vec<DocumentSummary>, ProcessorError>
    where
        S: DocumentStore,
        S::Error: Display,
    {
        let documents = store
            .list_documents()
            .map_err(|e| ProcessorError::Store(e.to_string()))?;
        let limit = self.config.max_documents.unwrap_or(usize::MAX);
        Ok(documents.into_iter().filter(|d| filter(d)).take(limit).collect())
    }

    fn read_text<S, E>(&self, store: &S, extractor: &E, id: &str) -> Result<String, ProcessorError>
    where
        S: DocumentStore,
        S::Error: Display,
        E: TextExtractor,
        E::Error: Display,
    {
        let bytes = store
            .fetch_content(id)
            .map_err(|e| ProcessorError::Store(e.to_string()))?;
        extractor
            .extract_text(&bytes)
            .map_err(|e| ProcessorError::Extract(e.to_string()))
    }

    fn write<S>(&self, store: &mut S, document: &DocumentSummary, annotation: &str) -> DocumentOutcome
    where
        S: DocumentStore,
        S::Error: Display,
    {
        if self.config.dry_run {
            info!(
                name = %document.name,
                "DRY RUN: Would write annotation:\n{}",
                annotation
            );
            return DocumentOutcome::Written;
        }

        match store.write_annotation(&document.id, annotation) {
            Ok(()) => {
                info!(name = %document.name, "Wrote annotation");
                DocumentOutcome::Written
            }
            Err(e) => self.failed(document, ProcessorError::Store(e.to_string()).to_string()),
        }
    }

    fn failed(&self, document: &DocumentSummary, reason: String) -> DocumentOutcome {
        warn!(name = %document.name, "Failed: {}", reason);
        DocumentOutcome::Failed(reason)
    }

    /// Review link: the configured template first, then the store's own
    fn view_link<S: DocumentStore>(&self, store: &S, id: &str) -> Option<String> {
        self.config.view_link(id).or_else(|| store.view_link(id))
    }

    fn finish_batch(&mut self, start: Instant) {
        self.metrics.record_batch(start.elapsed());
        info!(
            written = self.metrics.written,
            unchanged = self.metrics.unchanged,
            skipped = self.metrics.skipped,
            failed = self.metrics.failed,
            "Batch complete"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MemoryStore, PlainTextExtractor};

    const CRUISER: &str = "FEDERATION HEAVY CRUISER\nSHIELD #1\nTYPE = CA\nPOINT VALUE = 125\nREFERENCE = R2.4";

    #[test]
    fn test_processor_creation() {
        let processor = Processor::default_config().unwrap();
        assert_eq!(processor.metrics().batch_count, 0);
        assert!(!processor.config().dry_run);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = ProcessorConfig {
            max_documents: Some(0),
            ..Default::default()
        };
        let result = Processor::from_configs(
            &ParserConfig::default(),
            &BookConfig::default(),
            MergePolicy::default(),
            config,
        );
        assert!(matches!(result, Err(ProcessorError::Config(_))));
    }

    #[test]
    fn test_parse_document_adds_book() {
        let processor = Processor::default_config().unwrap();
        let metadata = processor
            .parse_document("ssd_book_1_004.txt", CRUISER)
            .unwrap();
        assert_eq!(metadata.name, "Federation Heavy Cruiser");
        assert_eq!(metadata.book.as_deref(), Some("Commander's SSD Book #1"));
    }

    #[test]
    fn test_partial_preview() {
        let processor = Processor::default_config().unwrap();
        let error = processor
            .parse_document("ssd_book_3_001.txt", "SMUDGED\nPOINT VALUE = 42")
            .unwrap_err();
        assert_eq!(
            processor.partial_preview("ssd_book_3_001.txt", &error).as_deref(),
            Some("BPV: 42\nBook: Commander's SSD Book #3")
        );
    }

    #[test]
    fn test_dry_run_writes_nothing() {
        let mut store = MemoryStore::new();
        store.insert("1", "ssd_book_1_004.txt", CRUISER, None);

        let mut processor = Processor::from_configs(
            &ParserConfig::default(),
            &BookConfig::default(),
            MergePolicy::default(),
            ProcessorConfig::preview(),
        )
        .unwrap();
        let reports = processor.describe_new(&mut store, &PlainTextExtractor).unwrap();

        assert_eq!(reports[0].outcome, DocumentOutcome::Written);
        assert!(reports[0].annotation.is_some());
        assert_eq!(store.write_count(), 0);
        assert_eq!(store.annotation("1"), None);
    }

    #[test]
    fn test_max_documents_caps_batch() {
        let mut store = MemoryStore::new();
        for i in 0..3 {
            store.insert(i.to_string(), format!("ssd_book_1_00{}.txt", i), CRUISER, None);
        }

        let mut processor = Processor::from_configs(
            &ParserConfig::default(),
            &BookConfig::default(),
            MergePolicy::default(),
            ProcessorConfig {
                max_documents: Some(2),
                ..Default::default()
            },
        )
        .unwrap();
        let reports = processor.describe_new(&mut store, &PlainTextExtractor).unwrap();

        assert_eq!(reports.len(), 2);
        assert_eq!(store.write_count(), 2);
        assert_eq!(processor.metrics().written, 2);
    }

    #[test]
    fn test_view_link_prefers_template() {
        let store = MemoryStore::new();
        let processor = Processor::from_configs(
            &ParserConfig::default(),
            &BookConfig::default(),
            MergePolicy::default(),
            ProcessorConfig {
                view_link_template: Some("https://drive.google.com/file/d/{id}/view".to_string()),
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(
            processor.view_link(&store, "abc").as_deref(),
            Some("https://drive.google.com/file/d/abc/view")
        );
    }
}
