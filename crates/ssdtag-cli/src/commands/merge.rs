//! Merge command implementation.

use super::{book_filename, parse_document, read_text};
use crate::cli::MergeArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use ssdtag_annotation::AnnotationMerger;
use std::fs;

/// Execute the merge command.
pub fn execute_merge(args: MergeArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let text = read_text(&args.text)?;
    let filename = book_filename(&args.text, args.filename.as_deref())?;
    let annotation = fs::read_to_string(&args.annotation)?;

    let fresh = parse_document(config, &filename, &text)?;
    let merger = AnnotationMerger::new(config.merge.clone());
    let updated = merger.merge(&annotation, &fresh)?;

    println!("{}", formatter.format_merge(updated.as_deref())?);

    if let Some(updated) = updated.filter(|_| args.write) {
        if config.processor.dry_run {
            tracing::info!("DRY RUN: Would rewrite {}", args.annotation.display());
        } else {
            fs::write(&args.annotation, updated)?;
            eprintln!(
                "{}",
                formatter.success(&format!("Updated {}", args.annotation.display()))
            );
        }
    }

    Ok(())
}
