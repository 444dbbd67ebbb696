//! Check command implementation.

use crate::cli::CheckArgs;
use crate::error::Result;
use crate::output::Formatter;
use ssdtag_annotation::{has_ambiguous_fields, parse_annotation};
use std::fs;

/// Execute the check command.
pub fn execute_check(args: CheckArgs, formatter: &Formatter) -> Result<()> {
    let annotation = fs::read_to_string(&args.file)?;
    let metadata = parse_annotation(&annotation);
    println!(
        "{}",
        formatter.format_check(&metadata, has_ambiguous_fields(&annotation))?
    );
    Ok(())
}
