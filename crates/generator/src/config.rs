//! Generator configuration

use crate::{GeneratorError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Where templates come from and where documents go
///
/// Every field has a default, so `{}` is a valid configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GeneratorConfig {
    /// Folder holding `{country}_{office}_{page}{ext}` background images
    pub template_root: PathBuf,
    pub output_dir: PathBuf,
    /// Tried in order, first decodable image wins
    pub extensions: Vec<String>,
    pub load_timeout_ms: u64,
    /// Pause between documents of a batch
    pub batch_delay_ms: u64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            template_root: PathBuf::from("templates"),
            output_dir: PathBuf::from("output"),
            extensions: [".jpg", ".JPG", ".png", ".jpeg"]
                .into_iter()
                .map(String::from)
                .collect(),
            load_timeout_ms: 10_000,
            batch_delay_ms: 500,
        }
    }
}

impl GeneratorConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| GeneratorError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        log::debug!("loading configuration from {}", path.display());
        Self::from_json(&json)
    }

    pub fn load_timeout(&self) -> Duration {
        Duration::from_millis(self.load_timeout_ms)
    }

    pub fn batch_delay(&self) -> Duration {
        Duration::from_millis(self.batch_delay_ms)
    }

    fn validate(&self) -> Result<()> {
        if self.extensions.is_empty() {
            return Err(GeneratorError::Config(
                "extensions must not be empty".to_string(),
            ));
        }
        if self.load_timeout_ms == 0 {
            return Err(GeneratorError::Config(
                "loadTimeoutMs must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_object_uses_defaults() {
        assert_eq!(
            GeneratorConfig::from_json("{}").unwrap(),
            GeneratorConfig::default()
        );
    }

    #[test]
    fn test_partial_override() {
        let config =
            GeneratorConfig::from_json(r#"{"templateRoot": "/srv/tkcv", "batchDelayMs": 0}"#)
                .unwrap();
        assert_eq!(config.template_root, PathBuf::from("/srv/tkcv"));
        assert_eq!(config.batch_delay(), Duration::ZERO);
        assert_eq!(config.load_timeout(), Duration::from_secs(10));
        assert_eq!(config.extensions, vec![".jpg", ".JPG", ".png", ".jpeg"]);
    }

    #[test]
    fn test_invalid_config() {
        assert!(matches!(
            GeneratorConfig::from_json("[1, 2]"),
            Err(GeneratorError::Config(_))
        ));
        assert!(matches!(
            GeneratorConfig::from_json(r#"{"extensions": []}"#),
            Err(GeneratorError::Config(msg)) if msg.contains("extensions")
        ));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        assert!(matches!(
            GeneratorConfig::from_file("/nonexistent/tkcv.json"),
            Err(GeneratorError::Io(_))
        ));
    }
}
