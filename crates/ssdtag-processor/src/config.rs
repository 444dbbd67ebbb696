//! Configuration for batch processing

use serde::{Deserialize, Serialize};

/// Configuration for the [`Processor`](crate::Processor)
///
/// # Examples
///
/// ```
/// use ssdtag_processor::ProcessorConfig;
///
/// let config = ProcessorConfig::default();
/// assert!(!config.dry_run);
///
/// let config = ProcessorConfig::preview();
/// assert!(config.dry_run);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessorConfig {
    /// Log what would be written without writing anything
    /// Default: false
    #[serde(default)]
    pub dry_run: bool,

    /// Process at most this many candidate documents per batch
    /// Default: unlimited
    #[serde(default)]
    pub max_documents: Option<usize>,

    /// Review link for log lines, with `{id}` replaced by the document id
    /// Default: the store's own link, if any
    #[serde(default)]
    pub view_link_template: Option<String>,
}

impl ProcessorConfig {
    /// Dry-run configuration: every flow runs, nothing is written
    pub fn preview() -> Self {
        Self {
            dry_run: true,
            ..Self::default()
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.max_documents == Some(0) {
            return Err("max_documents must be greater than 0".to_string());
        }
        if let Some(template) = &self.view_link_template {
            if !template.contains("{id}") {
                return Err(format!(
                    "view_link_template '{}' has no {{id}} placeholder",
                    template
                ));
            }
        }
        Ok(())
    }

    /// Review link for a document, if a template is configured
    pub fn view_link(&self, id: &str) -> Option<String> {
        self.view_link_template
            .as_ref()
            .map(|template| template.replace("{id}", id))
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ProcessorConfig::default();
        assert!(!config.dry_run);
        assert_eq!(config.max_documents, None);
        assert_eq!(config.view_link_template, None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_max_documents_rejected() {
        let config = ProcessorConfig {
            max_documents: Some(0),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_view_link_template() {
        let config = ProcessorConfig {
            view_link_template: Some("https://drive.google.com/file/d/{id}/view".to_string()),
            ..Default::default()
        };
        assert!(config.validate().is_ok());
        assert_eq!(
            config.view_link("1Vix9").as_deref(),
            Some("https://drive.google.com/file/d/1Vix9/view")
        );

        let config = ProcessorConfig {
            view_link_template: Some("https://example.com/view".to_string()),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_toml_defaults() {
        let config = ProcessorConfig::from_toml("dry_run = true").unwrap();
        assert!(config.dry_run);
        assert_eq!(config.max_documents, None);
    }

    #[test]
    fn test_serde_roundtrip() {
        let config = ProcessorConfig {
            dry_run: true,
            max_documents: Some(25),
            view_link_template: Some("file:///ssds/{id}".to_string()),
        };
        let serialized = serde_json::to_string(&config).unwrap();
        let deserialized: ProcessorConfig = serde_json::from_str(&serialized).unwrap();
        assert_eq!(config, deserialized);

        let toml_str = config.to_toml().unwrap();
        assert_eq!(ProcessorConfig::from_toml(&toml_str).unwrap(), config);
    }
}
