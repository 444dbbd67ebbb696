//! Configuration for the parser
//!
//! The correction tables, category names and stop patterns are data: they are
//! loaded (or defaulted) once, compiled when a [`MetadataParser`] is built, and
//! never mutated afterwards.
//!
//! [`MetadataParser`]: crate::MetadataParser

use regex::Regex;
use serde::{Deserialize, Serialize};

/// A known OCR misreading of a category token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// Exact text, corrected in each of its uppercase, lowercase and title-case forms
    Literal(String),
    /// Regular expression, matched as given
    Pattern(String),
}

/// Misread variants of one canonical category token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Correction {
    /// Correct token, e.g. `THOLIAN`
    pub canonical: String,

    /// Variants replaced by `canonical`, applied in order
    pub variants: Vec<Variant>,
}

impl Correction {
    fn new(canonical: &str, variants: Vec<Variant>) -> Self {
        Self {
            canonical: canonical.to_string(),
            variants,
        }
    }
}

fn lit(s: &str) -> Variant {
    Variant::Literal(s.to_string())
}

fn pat(s: &str) -> Variant {
    Variant::Pattern(s.to_string())
}

/// Configuration for the parser
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParserConfig {
    /// Category (faction) names used as name anchors, in canonical uppercase
    pub categories: Vec<String>,

    /// Categories matched only in their all-caps form
    #[serde(default)]
    pub acronym_categories: Vec<String>,

    /// Corrections applied on every attempt
    pub corrections: Vec<Correction>,

    /// Riskier corrections, added on the retry only
    #[serde(default)]
    pub desperate_corrections: Vec<Correction>,

    /// Case-insensitive patterns marking the start of content after the name
    pub stop_patterns: Vec<String>,

    /// Words kept fully uppercase when title-casing
    #[serde(default)]
    pub uppercase_words: Vec<String>,

    /// Longest plausible name, in characters
    pub max_name_length: usize,
}

impl ParserConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.categories.is_empty() {
            return Err("categories must not be empty".to_string());
        }
        if self.max_name_length == 0 {
            return Err("max_name_length must be greater than 0".to_string());
        }
        if let Some(acronym) = self
            .acronym_categories
            .iter()
            .find(|a| !self.categories.contains(a))
        {
            return Err(format!("acronym category '{}' is not a category", acronym));
        }
        for correction in self.corrections.iter().chain(&self.desperate_corrections) {
            if correction.canonical.is_empty() {
                return Err("correction canonical token must not be empty".to_string());
            }
            for variant in &correction.variants {
                match variant {
                    Variant::Literal(s) if s.is_empty() => {
                        return Err(format!(
                            "empty literal variant for '{}'",
                            correction.canonical
                        ));
                    }
                    Variant::Pattern(p) => {
                        Regex::new(p).map_err(|e| format!("invalid pattern '{}': {}", p, e))?;
                    }
                    Variant::Literal(_) => {}
                }
            }
        }
        for p in &self.stop_patterns {
            Regex::new(p).map_err(|e| format!("invalid stop pattern '{}': {}", p, e))?;
        }
        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}

impl Default for ParserConfig {
    /// Tables tuned against the Star Fleet Battles record sheet scans
    fn default() -> Self {
        let categories = [
            "FEDERATION",
            "GORN",
            "KZINTI",
            "THOLIAN",
            "LYRAN",
            "HYDRAN",
            "ROMULAN",
            "KLINGON",
            "WYN",
            "ORION",
            "ISC",
            "ANDROMEDAN",
        ];

        let corrections = vec![
            Correction::new(
                "THOLIAN",
                vec![
                    lit("THOLIFIN"),
                    lit("THOLIRN"),
                    pat(r"THOL\s+IAN"),
                    pat(r"THOLI\s+AN"),
                    lit("TIHOLIRN"),
                    lit("THOILIRN"),
                ],
            ),
            Correction::new("HYDRAN", vec![lit("HYDRFIN"), lit("HYDRRN"), lit("HYORRN")]),
            Correction::new(
                "ROMULAN",
                vec![
                    lit("ROMULRN"),
                    lit("ROMULFIN"),
                    lit("ROMIARN"),
                    lit("ROMUILAN"),
                    lit("REIMULFIN"),
                ],
            ),
            Correction::new(
                "ANDROMEDAN",
                vec![
                    lit("RNDROMEDRN"),
                    lit("RNOROMEORN"),
                    lit("ANDROMEOFIN"),
                    lit("ANDROMEDFIN"),
                    lit("ANDROMERN"),
                    lit("FINDROMEDFIN"),
                    lit("RNBROMEORN"),
                    lit("FINDROMEDAN"),
                    lit("FINDROMEOFIN"),
                    lit("ANDROMEIORN"),
                ],
            ),
            Correction::new(
                "LYRAN",
                vec![
                    lit("LYRRN"),
                    lit("LYRFIN"),
                    lit("LYFIFIN"),
                    lit("LYRF1N"),
                    lit("LYMAN"),
                ],
            ),
            Correction::new(
                "FEDERATION",
                vec![lit("FEDERFITION"), lit("FEDERRTION"), lit("FEDEFIRTION")],
            ),
            Correction::new("KLINGON", vec![lit("KILINGON")]),
            Correction::new("GORN", vec![lit("GOAN")]),
            Correction::new("KZINTI", vec![lit("KZINT1")]),
        ];

        let desperate_corrections = vec![
            Correction::new(
                "HYDRAN",
                vec![
                    lit("11-1YDRAN"),
                    lit("HYMAN"),
                    lit("I-IYDRRN"),
                    lit("HIYEIFIRN"),
                    lit("1-1YDRAN"),
                ],
            ),
            Correction::new("KLINGON", vec![pat(r"KL\s+I\s+NGON")]),
            Correction::new("THOLIAN", vec![pat(r"THOL\s+I\s+AN")]),
            Correction::new(
                "ISC",
                vec![pat(r"I\s+SC"), lit("(SC"), lit("1SC"), lit("!SC"), lit("ISIC")],
            ),
            Correction::new("GORN", vec![lit("BORN")]),
        ];

        // The earliest match of any pattern bounds the name.
        let stop_patterns = [
            r"SHIELD\s+(\d{1,2}|#\d)",
            r"BOARDING\s+PARTIES",
            r"PROBES",
            r"ADMINISTRATIVE\s+SHUTTLES",
            r"SHIELD",
            r"TRAC",
            r"BTTY",
            r"TRAN",
            r"PH\s*-\s*(1|I)",
            r"PH\s*-\s*(2|II)",
            r"PH\s*-\s*(3|III)",
            r"LAB",
            r"HULL",
            r"SENSOR",
            r"SCANNER",
            r"CREW\s+UNITS",
            r"HELLBORE",
            r"DATA\s+TABLE",
            r"FIGHTER\s+GROUP",
            r"IMPULSE",
            r"DAMAGE\s+CONTROL",
            r"APR",
            r"DRONE\s+RACK",
            r"#\d",
            r"PHASER",
            r"TURN\s+MODE",
            r"ANTI\s*-\s*DRONE",
            r"AMARILLO\s+DESIGN\s+BUREAU",
            r"WARP",
            r"Copyright\s+\d{4}",
            r"CREW",
            r"MOVEMENT\s+COST",
            r"\s+#\s+",
            r"\s+\*\s+",
            r"\s+\d\s+",
            r"BRIDGE",
            r"CNTR",
        ];

        Self {
            categories: categories.iter().map(|s| s.to_string()).collect(),
            acronym_categories: vec!["ISC".to_string()],
            corrections,
            desperate_corrections,
            stop_patterns: stop_patterns.iter().map(|s| s.to_string()).collect(),
            uppercase_words: vec!["ISC".to_string(), "PF".to_string()],
            max_name_length: 60,
        }
    }
}
