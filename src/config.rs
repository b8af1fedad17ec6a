// Configuration module for reading Snake.toml
// This module provides OOP-style configuration management for the Battlesnake bot

use log::warn;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Main configuration structure containing all tunable parameters
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub appearance: AppearanceConfig,
    #[serde(default)]
    pub selection: SelectionConfig,
    pub debug: DebugConfig,
}

/// Appearance metadata served on GET /
/// See https://docs.battlesnake.com/references/personalization
#[derive(Debug, Deserialize, Clone)]
pub struct AppearanceConfig {
    pub author: String,
    pub color: String,
    pub head: String,
    pub tail: String,
}

/// Move selection settings
#[derive(Debug, Deserialize, Clone, Default)]
pub struct SelectionConfig {
    /// Fixed seed for the move RNG; seeded from OS entropy when absent
    pub seed: Option<u64>,
}

/// Debug configuration
#[derive(Debug, Deserialize, Clone)]
pub struct DebugConfig {
    pub enabled: bool,
    pub log_file_path: String,
}

impl Config {
    /// Loads configuration from a TOML file
    ///
    /// # Arguments
    /// * `path` - Path to the Snake.toml configuration file
    ///
    /// # Returns
    /// * `Result<Config, String>` - Parsed configuration or error message
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let contents = fs::read_to_string(path.as_ref())
            .map_err(|e| format!("Failed to read config file: {}", e))?;

        Self::from_toml_str(&contents)
    }

    /// Parses configuration from TOML text
    pub fn from_toml_str(contents: &str) -> Result<Self, String> {
        toml::from_str(contents).map_err(|e| format!("Failed to parse config file: {}", e))
    }

    /// Loads default configuration from Snake.toml in the project root
    pub fn load_default() -> Result<Self, String> {
        Self::from_file("Snake.toml")
    }

    /// Creates a configuration with hardcoded default values as fallback
    /// This should match the values in Snake.toml
    pub fn default_hardcoded() -> Self {
        Config {
            appearance: AppearanceConfig {
                author: "mpapale".to_string(),
                color: "#888888".to_string(),
                head: "default".to_string(),
                tail: "default".to_string(),
            },
            selection: SelectionConfig { seed: None },
            debug: DebugConfig {
                enabled: false,
                log_file_path: "battlesnake_debug.jsonl".to_string(),
            },
        }
    }

    /// Attempts to load from file, falls back to hardcoded defaults on error
    pub fn load_or_default() -> Self {
        Self::load_default().unwrap_or_else(|e| {
            warn!("Could not load Snake.toml ({}), using hardcoded defaults", e);
            Self::default_hardcoded()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_can_be_created() {
        let config = Config::default_hardcoded();
        assert_eq!(config.appearance.color, "#888888");
        assert!(config.selection.seed.is_none());
        assert!(!config.debug.enabled);
    }

    #[test]
    fn test_snake_toml_can_be_parsed() {
        // This test ensures Snake.toml is valid and can be parsed
        let result = Config::from_file("Snake.toml");
        assert!(
            result.is_ok(),
            "Failed to parse Snake.toml: {:?}",
            result.err()
        );
    }

    #[test]
    fn test_all_config_values_match_hardcoded_defaults() {
        let file_config = Config::from_file("Snake.toml")
            .expect("Snake.toml should be parseable");
        let hardcoded_config = Config::default_hardcoded();

        assert_eq!(file_config.appearance.author, hardcoded_config.appearance.author);
        assert_eq!(file_config.appearance.color, hardcoded_config.appearance.color);
        assert_eq!(file_config.appearance.head, hardcoded_config.appearance.head);
        assert_eq!(file_config.appearance.tail, hardcoded_config.appearance.tail);
        assert_eq!(file_config.selection.seed, hardcoded_config.selection.seed);
        assert_eq!(file_config.debug.enabled, hardcoded_config.debug.enabled);
        assert_eq!(
            file_config.debug.log_file_path,
            hardcoded_config.debug.log_file_path
        );
    }

    #[test]
    fn test_seed_is_read_when_present() {
        let config = Config::from_toml_str(
            r##"
            [appearance]
            author = "someone"
            color = "#123456"
            head = "beluga"
            tail = "bolt"

            [selection]
            seed = 1234

            [debug]
            enabled = true
            log_file_path = "turns.jsonl"
            "##,
        )
        .unwrap();

        assert_eq!(config.selection.seed, Some(1234));
        assert_eq!(config.appearance.head, "beluga");
        assert!(config.debug.enabled);
    }

    #[test]
    fn test_selection_section_is_optional() {
        let config = Config::from_toml_str(
            r##"
            [appearance]
            author = "someone"
            color = "#123456"
            head = "default"
            tail = "default"

            [debug]
            enabled = false
            log_file_path = "x.jsonl"
            "##,
        )
        .unwrap();

        assert!(config.selection.seed.is_none());
    }

    #[test]
    fn test_load_or_default_works() {
        let config = Config::load_or_default();
        assert!(!config.appearance.color.is_empty());
    }

    #[test]
    fn test_invalid_toml_returns_error() {
        assert!(Config::from_file("nonexistent.toml").is_err());
        assert!(Config::from_toml_str("[appearance]\ncolor = 3").is_err());
    }
}
