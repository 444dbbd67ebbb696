//! Command implementations.

pub mod batch;
pub mod check;
pub mod config;
pub mod merge;
pub mod parse;

pub use self::batch::{execute_composites, execute_describe, execute_refresh};
pub use self::check::execute_check;
pub use self::config::execute_config;
pub use self::merge::execute_merge;
pub use self::parse::execute_parse;

use crate::config::Config;
use crate::error::{CliError, Result};
use ssdtag_domain::{Metadata, TextExtractor};
use ssdtag_parser::{BookResolver, MetadataParser};
use ssdtag_processor::PlainTextExtractor;
use std::fs;
use std::path::Path;

/// Read a document's extracted text.
pub(crate) fn read_text(path: &Path) -> Result<String> {
    let bytes = fs::read(path)?;
    match PlainTextExtractor.extract_text(&bytes) {
        Ok(text) => Ok(text),
        Err(never) => match never {},
    }
}

/// Filename used for book lookup: the override, else the path's file name.
pub(crate) fn book_filename(path: &Path, filename: Option<&str>) -> Result<String> {
    match filename {
        Some(name) => Ok(name.to_string()),
        None => path
            .file_name()
            .and_then(|name| name.to_str())
            .map(str::to_string)
            .ok_or_else(|| {
                CliError::InvalidInput(format!("Cannot derive a filename from '{}'", path.display()))
            }),
    }
}

/// Parse text with the configured tables, taking the book from `filename`.
pub(crate) fn parse_document(config: &Config, filename: &str, text: &str) -> Result<Metadata> {
    let parser = MetadataParser::new(&config.parser)?;
    let books = BookResolver::new(&config.books)?;
    let mut metadata = parser.parse(text)?;
    metadata.book = books.resolve(filename);
    Ok(metadata)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_book_filename() {
        let path = Path::new("/ssds/ssd_book_1_004.txt");
        assert_eq!(book_filename(path, None).unwrap(), "ssd_book_1_004.txt");
        assert_eq!(
            book_filename(path, Some("module_j_ssd_book_1.pdf")).unwrap(),
            "module_j_ssd_book_1.pdf"
        );
        assert!(book_filename(Path::new("/"), None).is_err());
    }

    #[test]
    fn test_read_text_is_lossy() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("scan.txt");
        fs::write(&path, b"GORN\xffCA").unwrap();
        assert_eq!(read_text(&path).unwrap(), "GORN\u{fffd}CA");
    }

    #[test]
    fn test_parse_document_with_book() {
        let metadata = parse_document(
            &Config::default(),
            "ssd_book_2_014.txt",
            "GORN BATTLE CRUISER\nSHIELD #1\nTYPE = BC",
        )
        .unwrap();
        assert_eq!(metadata.name, "Gorn Battle Cruiser");
        assert_eq!(metadata.book.as_deref(), Some("Commander's SSD Book #2"));
    }
}
