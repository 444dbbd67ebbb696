//! Metrics collection for batch processing

use crate::DocumentOutcome;
use std::time::Duration;

/// Metrics collected across batches
///
/// Counts documents per outcome; survives between batches until reset.
#[derive(Debug, Clone, Default)]
pub struct ProcessorMetrics {
    /// Annotations written (or that would have been, in dry-run mode)
    pub written: usize,

    /// Documents whose annotation needed no change
    pub unchanged: usize,

    /// Documents deliberately left alone
    pub skipped: usize,

    /// Documents that failed
    pub failed: usize,

    /// Total batches completed
    pub batch_count: usize,

    /// Total runtime in milliseconds
    pub total_runtime_ms: u128,
}

impl ProcessorMetrics {
    /// Create new empty metrics
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the outcome of one document
    pub fn record(&mut self, outcome: &DocumentOutcome) {
        match outcome {
            DocumentOutcome::Written => self.written += 1,
            DocumentOutcome::Unchanged => self.unchanged += 1,
            DocumentOutcome::Skipped(_) => self.skipped += 1,
            DocumentOutcome::Failed(_) => self.failed += 1,
        }
    }

    /// Record a batch completion
    pub fn record_batch(&mut self, elapsed: Duration) {
        self.batch_count += 1;
        self.total_runtime_ms += elapsed.as_millis();
    }

    /// Get total documents seen across all batches
    pub fn total_documents(&self) -> usize {
        self.written + self.unchanged + self.skipped + self.failed
    }

    /// Reset all metrics
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Generate a summary report of metrics
    pub fn summary(&self) -> String {
        let lines = [
            "Processor Metrics Summary".to_string(),
            "=========================".to_string(),
            format!("Batches: {}", self.batch_count),
            format!("Total runtime: {}ms", self.total_runtime_ms),
            String::new(),
            format!("Documents: {}", self.total_documents()),
            format!("  Written: {}", self.written),
            format!("  Unchanged: {}", self.unchanged),
            format!("  Skipped: {}", self.skipped),
            format!("  Failed: {}", self.failed),
        ];
        lines.join("\n")
    }
}
