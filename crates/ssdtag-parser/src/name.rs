//! Locating and bounding the unit name

use crate::casing::TitleCaser;
use crate::config::ParserConfig;
use crate::error::{NameError, ParseError};
use crate::normalizer::{TextNormalizer, Tier};
use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};
use tracing::debug;

static DOUBLE_SPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s{2}").unwrap());

/// Finds the unit name: first category anchor up to the nearest stop pattern
#[derive(Debug, Clone)]
pub struct NameExtractor {
    normalizer: TextNormalizer,
    anchor: Regex,
    stops: Vec<Regex>,
    caser: TitleCaser,
    max_length: usize,
}

impl NameExtractor {
    /// Compile the anchor and stop patterns of `config`
    pub fn new(config: &ParserConfig) -> Result<Self, ParseError> {
        config.validate().map_err(ParseError::Config)?;

        let caser = TitleCaser::new(&config.uppercase_words);

        // Canonical forms first, then the title-cased forms; acronyms only as caps.
        let mut alternatives: Vec<String> =
            config.categories.iter().map(|c| regex::escape(c)).collect();
        alternatives.extend(config.categories.iter().map(|c| {
            if config.acronym_categories.contains(c) {
                regex::escape(c)
            } else {
                regex::escape(&caser.title_case(c))
            }
        }));
        let anchor = Regex::new(&format!("({})", alternatives.join("|")))?;

        let stops = config
            .stop_patterns
            .iter()
            .map(|p| RegexBuilder::new(p).case_insensitive(true).build())
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            normalizer: TextNormalizer::new(config)?,
            anchor,
            stops,
            caser,
            max_length: config.max_name_length,
        })
    }

    /// Find the unit name in `text`, correcting OCR misreadings at `tier`
    pub fn find_name(&self, text: &str, tier: Tier) -> Result<String, NameError> {
        let corrected = self.normalizer.normalize(text, tier);

        let start = self
            .anchor
            .find(&corrected)
            .map(|m| m.start())
            .ok_or(NameError::NotFound)?;

        let search = &corrected[start..];
        let end = self.stop_index(search);

        let collapsed = DOUBLE_SPACE.replace_all(&search[..end], " ");
        let name = self.caser.title_case(collapsed.trim());

        let length = name.chars().count();
        if length > self.max_length {
            debug!(?tier, length, "Bounded name exceeds maximum length");
            return Err(NameError::TooLong {
                name,
                length,
                max: self.max_length,
            });
        }
        Ok(name)
    }

    /// Earliest start of any stop pattern, or the end of `text`
    fn stop_index(&self, text: &str) -> usize {
        self.stops
            .iter()
            .filter_map(|stop| stop.find(text).map(|m| m.start()))
            .min()
            .unwrap_or(text.len())
    }
}
