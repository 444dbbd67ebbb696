//! Source book derivation from document filenames
//!
//! Deliberately independent of text parsing: the book is a property of where
//! a record sheet was published, which only the filename records.

use crate::error::ParseError;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};

/// One filename pattern and the book label it produces
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookRule {
    /// Regular expression searched for in the filename
    pub pattern: String,

    /// Label, with `$1`, `$2`, ... replaced by the pattern's captures
    pub label: String,

    /// Uppercase captured text before substitution
    #[serde(default)]
    pub uppercase_captures: bool,
}

impl BookRule {
    fn new(pattern: &str, label: &str, uppercase_captures: bool) -> Self {
        Self {
            pattern: pattern.to_string(),
            label: label.to_string(),
            uppercase_captures,
        }
    }
}

/// Ordered filename→book table; the first matching rule wins
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookConfig {
    /// Rules, tried in order
    pub rules: Vec<BookRule>,
}

impl BookConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        for rule in &self.rules {
            Regex::new(&rule.pattern)
                .map_err(|e| format!("invalid book pattern '{}': {}", rule.pattern, e))?;
            if rule.label.trim().is_empty() {
                return Err(format!("empty label for book pattern '{}'", rule.pattern));
            }
            if rule.label.trim() != rule.label {
                return Err(format!(
                    "label for book pattern '{}' has surrounding whitespace",
                    rule.pattern
                ));
            }
        }
        Ok(())
    }
}

impl Default for BookConfig {
    fn default() -> Self {
        Self {
            rules: vec![
                BookRule::new(r"ssd_book_(\d+)_", "Commander's SSD Book #$1", false),
                BookRule::new(r"module_(\w+)_ssd_book", "Captain's Module $1 - SSD Book", true),
                BookRule::new(
                    r"captains_basic_set_ssd_book",
                    "Captain's Basic Set SSD Book",
                    false,
                ),
                BookRule::new(
                    r"captains_advanced_missions_ssd_book",
                    "Captain's Advanced Missions SSD Book",
                    false,
                ),
                BookRule::new(
                    r"captains_module_(\w+)_ssd_book",
                    "Captain's Module $1 SSD Book",
                    true,
                ),
                BookRule::new(
                    r"supplement_3_fast_patrol_ships",
                    "Supplement #3 Fast Patrol Ships",
                    false,
                ),
                BookRule::new(
                    r"ssd_sheets_commanders_volume_(\w+)_",
                    "SSD Sheets, Commander's Edition, Volume $1",
                    false,
                ),
            ],
        }
    }
}

#[derive(Debug, Clone)]
struct CompiledRule {
    pattern: Regex,
    label: String,
    uppercase_captures: bool,
}

impl CompiledRule {
    fn expand(&self, caps: &Captures) -> String {
        let mut label = self.label.clone();
        // Highest group first so `$1` never clobbers `$10`.
        for i in (1..caps.len()).rev() {
            let value = caps.get(i).map_or("", |m| m.as_str());
            let value = if self.uppercase_captures {
                value.to_uppercase()
            } else {
                value.to_string()
            };
            label = label.replace(&format!("${}", i), &value);
        }
        label
    }
}

/// Resolves the source book of a document from its filename
#[derive(Debug, Clone)]
pub struct BookResolver {
    rules: Vec<CompiledRule>,
}

impl BookResolver {
    /// Compile the rules of `config`
    pub fn new(config: &BookConfig) -> Result<Self, ParseError> {
        let rules = config
            .rules
            .iter()
            .map(|rule| {
                Ok(CompiledRule {
                    pattern: Regex::new(&rule.pattern)?,
                    label: rule.label.clone(),
                    uppercase_captures: rule.uppercase_captures,
                })
            })
            .collect::<Result<Vec<_>, ParseError>>()?;
        Ok(Self { rules })
    }

    /// Book label for `filename`, or `None` when no rule matches
    pub fn resolve(&self, filename: &str) -> Option<String> {
        self.rules.iter().find_map(|rule| {
            rule.pattern
                .captures(filename)
                .map(|caps| rule.expand(&caps))
        })
    }
}
