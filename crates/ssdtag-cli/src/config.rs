//! Configuration management for the CLI.
//!
//! One TOML file carries every library's configuration under its own table:
//!
//! ```toml
//! [settings]
//! color = true
//! format = "table"
//!
//! [processor]
//! dry_run = false
//! max_documents = 50
//!
//! [merge]
//! overwrite = ["book"]
//! ```
//!
//! Missing tables fall back to their defaults. A `[parser]` or `[books]`
//! table replaces the built-in tables as a whole.

use crate::error::{CliError, Result};
use serde::{Deserialize, Serialize};
use ssdtag_annotation::MergePolicy;
use ssdtag_parser::{BookConfig, ParserConfig};
use ssdtag_processor::ProcessorConfig;
use std::fs;
use std::path::{Path, PathBuf};

/// CLI configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Global settings
    #[serde(default)]
    pub settings: Settings,

    /// Batch processing
    #[serde(default)]
    pub processor: ProcessorConfig,

    /// Which existing values a merge may replace
    #[serde(default)]
    pub merge: MergePolicy,

    /// Filename to book rules
    #[serde(default)]
    pub books: BookConfig,

    /// Correction tables, categories and stop patterns
    #[serde(default)]
    pub parser: ParserConfig,
}

/// Global CLI settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Default output format
    #[serde(default = "default_format")]
    pub format: OutputFormat,
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Table format
    Table,
    /// JSON format
    Json,
    /// Plain annotation text
    Plain,
}

impl Config {
    /// Get the default configuration file path.
    pub fn path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
        Ok(home.join(".ssdtag").join("config.toml"))
    }

    /// Load configuration.
    ///
    /// An explicit path must exist. Without one, the default path is used
    /// when present and built-in defaults otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from(path),
            None => {
                let path = Self::path()?;
                if path.exists() {
                    Self::load_from(&path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Load configuration from a specific file.
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Validate every section.
    pub fn validate(&self) -> Result<()> {
        self.parser
            .validate()
            .map_err(|e| CliError::Config(format!("[parser] {}", e)))?;
        self.books
            .validate()
            .map_err(|e| CliError::Config(format!("[books] {}", e)))?;
        self.processor
            .validate()
            .map_err(|e| CliError::Config(format!("[processor] {}", e)))?;
        Ok(())
    }

    /// Serialize configuration to TOML.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| CliError::Config(format!("Failed to serialize config: {}", e)))
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color: true,
            format: OutputFormat::Table,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_format() -> OutputFormat {
    OutputFormat::Table
}

#[cfg(test)]
mod tests {
    use super::*;
    use ssdtag_domain::Label;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.settings.color);
        assert_eq!(config.settings.format, OutputFormat::Table);
        assert_eq!(config.merge.overwrite, vec![Label::Book]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_partial_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            r#"
            [settings]
            format = "json"

            [processor]
            dry_run = true

            [merge]
            overwrite = []
            "#,
        )
        .unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.settings.format, OutputFormat::Json);
        assert!(config.settings.color);
        assert!(config.processor.dry_run);
        assert!(config.merge.overwrite.is_empty());
        assert_eq!(config.parser, ParserConfig::default());
        assert_eq!(config.books, BookConfig::default());
    }

    #[test]
    fn test_explicit_path_must_exist() {
        let dir = TempDir::new().unwrap();
        let result = Config::load(Some(&dir.path().join("missing.toml")));
        assert!(matches!(result, Err(CliError::Io(_))));
    }

    #[test]
    fn test_invalid_toml() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[settings\ncolor = ").unwrap();
        assert!(matches!(Config::load(Some(&path)), Err(CliError::Toml(_))));
    }

    #[test]
    fn test_validate_reports_section() {
        let mut config = Config::default();
        config.processor.max_documents = Some(0);
        match config.validate() {
            Err(CliError::Config(msg)) => assert!(msg.starts_with("[processor]")),
            other => panic!("Expected config error, got {:?}", other),
        }
    }

    #[test]
    fn test_toml_roundtrip() {
        let config = Config::default();
        let toml_str = config.to_toml().unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, config);
    }
}
