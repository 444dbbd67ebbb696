//! Directory batch commands: describe, refresh and composites.

use crate::cli::DirArgs;
use crate::config::{Config, OutputFormat};
use crate::error::Result;
use crate::output::Formatter;
use ssdtag_processor::{DirectoryStore, PlainTextExtractor, Processor, ProcessorConfig};

/// Execute the describe command.
pub fn execute_describe(args: DirArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let mut store = DirectoryStore::open(&args.dir)?;
    let mut processor = build_processor(config, args.max_documents)?;

    let reports = processor.describe_new(&mut store, &PlainTextExtractor)?;
    println!("{}", formatter.format_reports(&reports)?);
    print_summary(&processor, formatter);
    Ok(())
}

/// Execute the refresh command.
pub fn execute_refresh(args: DirArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let mut store = DirectoryStore::open(&args.dir)?;
    let mut processor = build_processor(config, args.max_documents)?;

    let reports = processor.refresh_existing(&mut store, &PlainTextExtractor)?;
    println!("{}", formatter.format_reports(&reports)?);
    print_summary(&processor, formatter);
    Ok(())
}

/// Execute the composites command.
pub fn execute_composites(args: DirArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let store = DirectoryStore::open(&args.dir)?;
    let processor = build_processor(config, args.max_documents)?;

    let reports = processor.find_composites(&store)?;
    println!("{}", formatter.format_reports(&reports)?);
    Ok(())
}

fn build_processor(config: &Config, max_documents: Option<usize>) -> Result<Processor> {
    let processor_config = ProcessorConfig {
        max_documents: max_documents.or(config.processor.max_documents),
        ..config.processor.clone()
    };
    Ok(Processor::from_configs(
        &config.parser,
        &config.books,
        config.merge.clone(),
        processor_config,
    )?)
}

fn print_summary(processor: &Processor, formatter: &Formatter) {
    if formatter.format() == OutputFormat::Table {
        println!("{}", formatter.format_metrics(processor.metrics()));
        if processor.config().dry_run {
            println!("{}", formatter.info("Dry run: nothing was written"));
        }
    }
}
