// Tue Oct 13 2026 - Alex

use crate::extraction::SourceEncoding;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error reading config: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub target_process: Option<String>,
    pub target_binary: Option<PathBuf>,
    pub encodings: Vec<SourceEncoding>,
    pub min_candidate_length: usize,
    pub window_before: usize,
    pub window_after: usize,
    pub max_region_size: u64,
    pub ui_map: Option<PathBuf>,
    pub broken_sample_limit: usize,
    pub broken_preview_chars: usize,
    pub mapping_preview_chars: usize,
    pub detail_preview_chars: usize,
    pub enable_progress_bars: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            target_process: None,
            target_binary: None,
            encodings: SourceEncoding::TEXT_ENCODINGS.to_vec(),
            min_candidate_length: 10,
            window_before: 50,
            window_after: 500,
            max_region_size: 0x1000_0000,
            ui_map: None,
            broken_sample_limit: 20,
            broken_preview_chars: 500,
            mapping_preview_chars: 200,
            detail_preview_chars: 300,
            enable_progress_bars: true,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: Config = serde_json::from_str(&content)?;
        config.validate()?;
        log::debug!("Loaded config from {}", path.as_ref().display());
        Ok(config)
    }

    pub fn with_progress_bars(mut self, enabled: bool) -> Self {
        self.enable_progress_bars = enabled;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.encodings.is_empty() {
            return Err(ConfigError::Invalid("at least one text encoding is required".to_string()));
        }
        if let Some(encoding) = self.encodings.iter().find(|e| !e.is_text()) {
            return Err(ConfigError::Invalid(format!("{} is not a text encoding", encoding)));
        }
        if self.min_candidate_length == 0 {
            return Err(ConfigError::Invalid("min_candidate_length must be greater than 0".to_string()));
        }
        if self.window_after == 0 {
            return Err(ConfigError::Invalid("window_after must be greater than 0".to_string()));
        }
        if self.max_region_size == 0 {
            return Err(ConfigError::Invalid("max_region_size must be greater than 0".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.encodings.len(), 4);
        assert_eq!(config.window_before, 50);
        assert_eq!(config.window_after, 500);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config: Config = serde_json::from_str(r#"{"window_after": 256, "encodings": ["UTF-8", "CP949"]}"#).unwrap();
        assert_eq!(config.window_after, 256);
        assert_eq!(config.window_before, 50);
        assert_eq!(config.encodings, vec![SourceEncoding::Utf8, SourceEncoding::Cp949]);
    }

    #[test]
    fn test_binary_is_rejected_as_text_encoding() {
        let mut config = Config::default();
        config.encodings.push(SourceEncoding::Binary);
        assert!(config.validate().is_err());
    }
}
