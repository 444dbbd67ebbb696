//! Correction of known OCR misreadings of category tokens

use crate::casing::TitleCaser;
use crate::config::{Correction, ParserConfig, Variant};
use crate::error::ParseError;
use regex::{NoExpand, Regex};

/// Escalation tier of OCR correction
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Tier {
    /// Conservative corrections only
    Normal,
    /// Conservative plus riskier corrections, used on retry
    Desperate,
}

impl Tier {
    /// Map a desperation level (0 = normal, anything higher = desperate)
    pub fn from_level(level: u8) -> Self {
        if level == 0 {
            Tier::Normal
        } else {
            Tier::Desperate
        }
    }
}

#[derive(Debug, Clone)]
enum Matcher {
    Literal(String),
    Pattern(Regex),
}

#[derive(Debug, Clone)]
struct Substitution {
    matcher: Matcher,
    replacement: String,
}

impl Substitution {
    fn apply(&self, text: String) -> String {
        match &self.matcher {
            Matcher::Literal(from) => {
                if text.contains(from.as_str()) {
                    text.replace(from.as_str(), &self.replacement)
                } else {
                    text
                }
            }
            Matcher::Pattern(regex) => regex
                .replace_all(&text, NoExpand(&self.replacement))
                .into_owned(),
        }
    }
}

/// Applies the correction tables to raw text
///
/// Pure: the same input and tier always produce the same output.
#[derive(Debug, Clone)]
pub struct TextNormalizer {
    normal: Vec<Substitution>,
    desperate: Vec<Substitution>,
}

impl TextNormalizer {
    /// Compile the correction tables of `config`
    pub fn new(config: &ParserConfig) -> Result<Self, ParseError> {
        let caser = TitleCaser::new(&config.uppercase_words);
        Ok(Self {
            normal: compile(&config.corrections, &caser)?,
            desperate: compile(&config.desperate_corrections, &caser)?,
        })
    }

    /// Correct `text` at the given tier
    ///
    /// The desperate tier applies the normal table first, then its own.
    pub fn normalize(&self, text: &str, tier: Tier) -> String {
        let extra: &[Substitution] = match tier {
            Tier::Normal => &[],
            Tier::Desperate => &self.desperate,
        };
        self.normal
            .iter()
            .chain(extra)
            .fold(text.to_string(), |acc, substitution| substitution.apply(acc))
    }
}

fn compile(table: &[Correction], caser: &TitleCaser) -> Result<Vec<Substitution>, ParseError> {
    let mut substitutions = Vec::new();
    for correction in table {
        let canonical = &correction.canonical;
        for variant in &correction.variants {
            match variant {
                Variant::Literal(from) => {
                    let forms = [
                        (from.to_uppercase(), canonical.to_uppercase()),
                        (from.to_lowercase(), canonical.to_lowercase()),
                        (caser.title_case(from), caser.title_case(canonical)),
                    ];
                    let mut seen = Vec::with_capacity(forms.len());
                    for (from, to) in forms {
                        if seen.contains(&from) {
                            continue;
                        }
                        seen.push(from.clone());
                        substitutions.push(Substitution {
                            matcher: Matcher::Literal(from),
                            replacement: to,
                        });
                    }
                }
                Variant::Pattern(pattern) => substitutions.push(Substitution {
                    matcher: Matcher::Pattern(Regex::new(pattern)?),
                    replacement: canonical.clone(),
                }),
            }
        }
    }
    Ok(substitutions)
}
