//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use ssdtag_annotation::render_annotation;
use ssdtag_domain::Metadata;
use ssdtag_processor::{DocumentOutcome, DocumentReport, ProcessorMetrics};
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Selected output format.
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Format parsed metadata.
    pub fn format_metadata(&self, metadata: &Metadata) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&metadata_json(metadata))?),
            OutputFormat::Table => Ok(self.metadata_table(metadata)),
            OutputFormat::Plain => Ok(render_annotation(metadata)),
        }
    }

    /// Format an annotation check: its metadata and whether it is composite.
    pub fn format_check(&self, metadata: &Metadata, composite: bool) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&serde_json::json!({
                "composite": composite,
                "metadata": metadata_json(metadata),
            }))?),
            OutputFormat::Table | OutputFormat::Plain => {
                let body = self.format_metadata(metadata)?;
                if composite {
                    Ok(format!(
                        "{}\n{}",
                        self.warning("Annotation describes several units; it will not be merged"),
                        body
                    ))
                } else {
                    Ok(body)
                }
            }
        }
    }

    /// Format the result of a merge.
    pub fn format_merge(&self, updated: Option<&str>) -> Result<String> {
        match (self.format, updated) {
            (OutputFormat::Json, _) => Ok(serde_json::to_string_pretty(&serde_json::json!({
                "changed": updated.is_some(),
                "annotation": updated,
            }))?),
            (_, Some(text)) => Ok(text.to_string()),
            (_, None) => Ok(self.info("Annotation already up to date")),
        }
    }

    /// Format per-document batch reports.
    pub fn format_reports(&self, reports: &[DocumentReport]) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let json: Vec<serde_json::Value> = reports
                    .iter()
                    .map(|r| {
                        serde_json::json!({
                            "id": r.id,
                            "name": r.name,
                            "outcome": r.outcome.as_str(),
                            "reason": r.outcome.reason(),
                            "annotation": r.annotation,
                            "link": r.link,
                        })
                    })
                    .collect();
                Ok(serde_json::to_string_pretty(&json)?)
            }
            OutputFormat::Table => Ok(self.reports_table(reports)),
            OutputFormat::Plain => Ok(reports
                .iter()
                .map(|r| format!("{}\t{}", r.name, r.outcome))
                .collect::<Vec<_>>()
                .join("\n")),
        }
    }

    /// Format batch metrics.
    pub fn format_metrics(&self, metrics: &ProcessorMetrics) -> String {
        let summary = format!(
            "{} written, {} unchanged, {} skipped, {} failed",
            metrics.written, metrics.unchanged, metrics.skipped, metrics.failed
        );
        if metrics.failed > 0 {
            self.warning(&summary)
        } else {
            self.success(&summary)
        }
    }

    fn metadata_table(&self, metadata: &Metadata) -> String {
        let mut builder = Builder::default();
        builder.push_record(["Field", "Value"]);
        builder.push_record(["Name", metadata.name.as_str()]);
        for (label, value) in metadata.fields() {
            builder.push_record([label.title(), value]);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));
        table.to_string()
    }

    fn reports_table(&self, reports: &[DocumentReport]) -> String {
        if reports.is_empty() {
            return self.colorize("No documents to process.", "yellow");
        }

        let mut builder = Builder::default();
        builder.push_record(["Document", "Outcome", "Detail"]);

        for report in reports {
            let outcome = self.colorize(report.outcome.as_str(), outcome_color(&report.outcome));
            let detail = match &report.outcome {
                DocumentOutcome::Skipped(reason) | DocumentOutcome::Failed(reason) => {
                    match &report.link {
                        Some(link) => format!("{} ({})", reason, link),
                        None => reason.clone(),
                    }
                }
                DocumentOutcome::Written | DocumentOutcome::Unchanged => String::new(),
            };
            builder.push_record([report.name.as_str(), outcome.as_str(), detail.as_str()]);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));
        table.to_string()
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            _ => text.to_string(),
        }
    }
}

fn outcome_color(outcome: &DocumentOutcome) -> &'static str {
    match outcome {
        DocumentOutcome::Written => "green",
        DocumentOutcome::Unchanged => "blue",
        DocumentOutcome::Skipped(_) => "yellow",
        DocumentOutcome::Failed(_) => "red",
    }
}

fn metadata_json(metadata: &Metadata) -> serde_json::Value {
    serde_json::json!({
        "name": metadata.name,
        "type": metadata.unit_type,
        "bpv": metadata.bpv,
        "reference": metadata.reference,
        "book": metadata.book,
    })
}
