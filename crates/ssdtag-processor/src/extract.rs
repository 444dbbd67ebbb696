//! Text extraction for documents that are already text

use ssdtag_domain::TextExtractor;
use std::convert::Infallible;

/// Decodes document bytes as UTF-8, replacing invalid sequences
///
/// Suitable for documents that were OCR'd ahead of time.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    type Error = Infallible;

    fn extract_text(&self, bytes: &[u8]) -> Result<String, Self::Error> {
        Ok(String::from_utf8_lossy(bytes).into_owned())
    }
}
