//! Parse command implementation.

use super::{book_filename, parse_document, read_text};
use crate::cli::ParseArgs;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use ssdtag_annotation::render_annotation;

/// Execute the parse command.
///
/// On failure the fields that could still be read are shown as a partial
/// annotation before the error is returned.
pub fn execute_parse(args: ParseArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let text = read_text(&args.file)?;
    let filename = book_filename(&args.file, args.filename.as_deref())?;

    match parse_document(config, &filename, &text) {
        Ok(metadata) => {
            println!("{}", formatter.format_metadata(&metadata)?);
            Ok(())
        }
        Err(CliError::Parse(e)) => {
            if let Some(partial) = e.partial() {
                let mut partial = partial.clone();
                partial.book = ssdtag_parser::BookResolver::new(&config.books)?.resolve(&filename);
                eprintln!("{}", formatter.warning("Partial metadata:"));
                eprintln!("{}", render_annotation(&partial));
            }
            Err(CliError::Parse(e))
        }
        Err(e) => Err(e),
    }
}
