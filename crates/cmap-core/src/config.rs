//! CMAP Configuration Management
//!
//! Handles configuration from environment variables and TOML config files
//! with sensible defaults for local use.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::str::FromStr;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// Language model limits
    pub annotator: AnnotatorConfig,

    /// Coreference resolution
    pub coref: CorefConfig,

    /// Concept ranking and filtering
    pub ranking: RankingConfig,

    /// Graph layout
    pub layout: LayoutConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        // Annotator
        if let Some(max_length) = parse_env("CMAP_MAX_LENGTH")? {
            config.annotator.max_length = max_length;
        }

        // Coreference
        if let Some(enabled) = parse_env("CMAP_COREF_ENABLED")? {
            config.coref.enabled = enabled;
        }
        if let Some(distance) = parse_env("CMAP_COREF_MAX_DISTANCE")? {
            config.coref.max_sentence_distance = distance;
        }

        // Ranking
        if let Some(top_n) = parse_env("CMAP_TOP_N")? {
            config.ranking.top_n = top_n;
        }

        // Layout
        if let Some(scale) = parse_env("CMAP_LAYOUT_SCALE")? {
            config.layout.scale = scale;
        }
        if let Some(iterations) = parse_env("CMAP_LAYOUT_ITERATIONS")? {
            config.layout.iterations = iterations;
        }
        if let Some(seed) = parse_env("CMAP_LAYOUT_SEED")? {
            config.layout.seed = Some(seed);
        }

        // Logging
        if let Ok(level) = std::env::var("LOG_LEVEL") {
            config.logging.level = level;
        }
        if let Some(json) = parse_env("LOG_JSON")? {
            config.logging.json_format = json;
        }

        config.validate()?;
        Ok(config)
    }

    /// Load from a TOML file
    pub fn from_file(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let content = std::fs::read_to_string(&path).map_err(|e| ConfigError::FileReadError {
            path: path.clone(),
            source: e,
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path,
            message: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Merge with environment variables (env takes precedence)
    pub fn with_env_override(mut self) -> Result<Self, ConfigError> {
        let env_config = Self::from_env()?;
        let defaults = Self::default();

        // Only override if env values differ from defaults
        if env_config.annotator.max_length != defaults.annotator.max_length {
            self.annotator.max_length = env_config.annotator.max_length;
        }
        if env_config.coref.enabled != defaults.coref.enabled {
            self.coref.enabled = env_config.coref.enabled;
        }
        if env_config.coref.max_sentence_distance != defaults.coref.max_sentence_distance {
            self.coref.max_sentence_distance = env_config.coref.max_sentence_distance;
        }
        if env_config.ranking.top_n != defaults.ranking.top_n {
            self.ranking.top_n = env_config.ranking.top_n;
        }
        if env_config.layout.scale != defaults.layout.scale {
            self.layout.scale = env_config.layout.scale;
        }
        if env_config.layout.iterations != defaults.layout.iterations {
            self.layout.iterations = env_config.layout.iterations;
        }
        if env_config.layout.seed.is_some() {
            self.layout.seed = env_config.layout.seed;
        }
        if env_config.logging.level != defaults.logging.level {
            self.logging.level = env_config.logging.level;
        }
        if env_config.logging.json_format != defaults.logging.json_format {
            self.logging.json_format = env_config.logging.json_format;
        }

        Ok(self)
    }

    /// Reject values the pipeline cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.annotator.max_length == 0 {
            return Err(ConfigError::InvalidValue {
                key: "annotator.max_length".to_string(),
                value: "0".to_string(),
            });
        }
        if !(self.layout.scale.is_finite() && self.layout.scale > 0.0) {
            return Err(ConfigError::InvalidValue {
                key: "layout.scale".to_string(),
                value: self.layout.scale.to_string(),
            });
        }
        Ok(())
    }
}

fn parse_env<T: FromStr>(key: &str) -> Result<Option<T>, ConfigError> {
    match std::env::var(key) {
        Ok(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue {
                key: key.to_string(),
                value,
            }),
        Err(_) => Ok(None),
    }
}

/// Language model configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AnnotatorConfig {
    /// Maximum input length in characters
    pub max_length: usize,
}

impl Default for AnnotatorConfig {
    fn default() -> Self {
        Self {
            max_length: 1_000_000,
        }
    }
}

/// Coreference resolution configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CorefConfig {
    /// Rewrite pronouns before extraction
    pub enabled: bool,

    /// How many sentences back to look for an antecedent
    pub max_sentence_distance: usize,
}

impl Default for CorefConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_sentence_distance: 2,
        }
    }
}

/// Concept ranking configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RankingConfig {
    /// Number of top-ranked concepts kept when filtering the map
    pub top_n: usize,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self { top_n: 15 }
    }
}

/// Spring layout configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LayoutConfig {
    /// Largest absolute coordinate after rescaling
    pub scale: f64,

    /// Relaxation iterations
    pub iterations: usize,

    /// Fixed seed for the initial placement; `None` draws from entropy
    pub seed: Option<u64>,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            scale: 1000.0,
            iterations: 50,
            seed: None,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// JSON format for logs
    pub json_format: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json_format: false,
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    FileReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.ranking.top_n, 15);
        assert_eq!(config.layout.scale, 1000.0);
        assert_eq!(config.layout.seed, None);
        assert!(config.coref.enabled);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[layout]\nseed = 7\n\n[ranking]\ntop_n = 5").unwrap();

        let config = AppConfig::from_file(file.path()).unwrap();
        assert_eq!(config.layout.seed, Some(7));
        assert_eq!(config.layout.iterations, 50);
        assert_eq!(config.ranking.top_n, 5);
        assert_eq!(config.annotator.max_length, 1_000_000);
    }

    #[test]
    fn test_invalid_toml_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[layout]\nscale = \"wide\"").unwrap();

        let err = AppConfig::from_file(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { .. }));
    }

    #[test]
    fn test_missing_file() {
        let err = AppConfig::from_file("/nonexistent/cmap.toml").unwrap_err();
        assert!(matches!(err, ConfigError::FileReadError { .. }));
    }

    #[test]
    fn test_validate_rejects_zero_scale() {
        let mut config = AppConfig::default();
        config.layout.scale = 0.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { .. })
        ));
    }
}
