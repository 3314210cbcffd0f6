//! Configuration management for aicmd.
//!
//! Configuration is a JSON document at `~/.config/aicmd/config.json`,
//! created with defaults on first run and rewritten wholesale by the
//! setup flow.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, warn};

/// Environment variable consulted for the API key on first-ever config
/// creation. Never read again once the file exists.
pub const API_KEY_ENV: &str = "DEEPSEEK_API_KEY";

/// Main configuration structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// API key for the completion service.
    #[serde(default)]
    pub api_key: String,
    /// Model name sent with every request.
    #[serde(default = "default_model")]
    pub model: String,
    /// How many command suggestions to ask for.
    #[serde(default = "default_max_suggestions")]
    pub max_suggestions: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: default_model(),
            max_suggestions: default_max_suggestions(),
        }
    }
}

fn default_model() -> String {
    "deepseek-chat".to_string()
}

fn default_max_suggestions() -> u32 {
    5
}

impl Config {
    /// Get the config directory path.
    pub fn config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|p| p.join("aicmd"))
            .context("Could not determine config directory")
    }

    /// Get the config file path.
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.json"))
    }

    /// Get the interactive history file path.
    pub fn history_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("history.txt"))
    }

    /// Load configuration, creating the file with defaults if needed.
    ///
    /// A file that parses is returned as-is (missing fields fill with
    /// defaults); a file that does not parse is replaced with defaults.
    /// Either way the file exists on return.
    pub fn load_or_init() -> Result<Self> {
        let path = Self::config_path()?;
        if path.exists() {
            let contents = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {}", path.display()))?;
            match serde_json::from_str(&contents) {
                Ok(config) => {
                    debug!("Loaded config from {}", path.display());
                    return Ok(config);
                }
                Err(e) => {
                    warn!("Malformed config at {}: {}; rewriting defaults", path.display(), e);
                }
            }
        }

        let config = Self {
            api_key: std::env::var(API_KEY_ENV).unwrap_or_default(),
            ..Self::default()
        };
        config.save()?;
        Ok(config)
    }

    /// Save configuration to file, pretty-printed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(&path, contents)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.api_key.is_empty());
        assert_eq!(config.model, "deepseek-chat");
        assert_eq!(config.max_suggestions, 5);
    }

    #[test]
    fn test_config_round_trip() {
        let config = Config {
            api_key: "sk-test".to_string(),
            model: "deepseek-coder".to_string(),
            max_suggestions: 3,
        };
        let json = serde_json::to_string_pretty(&config).unwrap();
        let parsed: Config = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let json = r#"{ "api_key": "sk-test" }"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.api_key, "sk-test");
        assert_eq!(config.model, "deepseek-chat");
        assert_eq!(config.max_suggestions, 5);
    }
}
