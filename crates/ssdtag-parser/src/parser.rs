//! Metadata parsing with tiered retry

use crate::config::ParserConfig;
use crate::error::ParseError;
use crate::fields::extract_fields;
use crate::name::NameExtractor;
use crate::normalizer::Tier;
use ssdtag_domain::Metadata;
use tracing::debug;

/// Parses document text into [`Metadata`]
///
/// Built once from a [`ParserConfig`] and reused for every document; parsing
/// holds no state between calls.
#[derive(Debug, Clone)]
pub struct MetadataParser {
    names: NameExtractor,
}

impl MetadataParser {
    /// Create a parser, compiling every table in `config`
    pub fn new(config: &ParserConfig) -> Result<Self, ParseError> {
        Ok(Self {
            names: NameExtractor::new(config)?,
        })
    }

    /// Create a parser with the default tables
    pub fn default_config() -> Result<Self, ParseError> {
        Self::new(&ParserConfig::default())
    }

    /// The name extractor used by this parser
    pub fn names(&self) -> &NameExtractor {
        &self.names
    }

    /// Parse document text
    ///
    /// Tries the normal correction tier, then the desperate tier. Fields are
    /// always read from the original text. `book` is never set here.
    ///
    /// # Errors
    ///
    /// When neither tier yields a name, the error from the first attempt is
    /// returned carrying whatever fields could be extracted.
    pub fn parse(&self, text: &str) -> Result<Metadata, ParseError> {
        let name = match self.names.find_name(text, Tier::Normal) {
            Ok(name) => name,
            Err(first) => {
                debug!(error = %first, "Normal tier failed, retrying at desperate tier");
                match self.names.find_name(text, Tier::Desperate) {
                    Ok(name) => name,
                    Err(second) => {
                        debug!(error = %second, "Desperate tier failed");
                        return Err(ParseError::from_name_error(first, extract_fields(text)));
                    }
                }
            }
        };

        let mut metadata = extract_fields(text);
        metadata.name = name;
        Ok(metadata)
    }
}
