// Configuration Management
//
// This crate handles all configuration loading for the code assistant API.
// It provides:
// - Configuration structs and deserialization
// - YAML file loading with env-var fallback
// - Default configuration values and startup validation
//
// This keeps configuration concerns separate from domain logic.

use std::path::Path;
use thiserror::Error;

pub mod types;

pub use types::*;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read configuration file: {source}")]
    IoError {
        #[from]
        source: std::io::Error,
    },

    #[error("Failed to parse configuration: {source}")]
    ParseError {
        #[from]
        source: serde_yaml::Error,
    },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

impl AppConfig {
    /// Load configuration from a YAML file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: AppConfig = serde_yaml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from default file locations, falling back to
    /// environment variables when no file is present.
    pub fn load() -> Result<Self, ConfigError> {
        let config_paths = ["config/config.yaml", "config.yaml"];

        for path in &config_paths {
            if Path::new(path).exists() {
                return Self::load_from_file(path);
            }
        }

        let config = Self::from_env().map_err(ConfigError::Invalid)?;
        config.validate()?;
        Ok(config)
    }

    /// Cross-field validation applied after any loading path.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.ai.provider.as_str() {
            "openai" => {
                if self.ai.api_key.as_deref().unwrap_or("").is_empty() {
                    return Err(ConfigError::Invalid(
                        "api_key is required when ai.provider is 'openai'".to_string(),
                    ));
                }
            }
            "mock" => {}
            other => {
                return Err(ConfigError::Invalid(format!(
                    "ai.provider must be one of ['openai', 'mock'], got '{other}'"
                )));
            }
        }

        if self.limits.max_code_length == 0 {
            return Err(ConfigError::Invalid(
                "limits.max_code_length must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_from_yaml_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
server:
  host: "127.0.0.1"
  port: 8080
ai:
  provider: "openai"
  api_key: "sk-test"
  model: "gpt-4o-mini"
  timeout_secs: 10
  max_retries: 1
limits:
  max_code_length: 1000
logging:
  level: "debug"
"#
        )
        .unwrap();

        let config = AppConfig::load_from_file(file.path()).unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.ai.provider, "openai");
        assert_eq!(config.ai.model, "gpt-4o-mini");
        assert_eq!(config.ai.timeout_secs, 10);
        assert_eq!(config.limits.max_code_length, 1000);
        assert_eq!(config.logging.level, "debug");
        // Unset sections take defaults
        assert_eq!(config.ai.base_url, "https://api.openai.com/v1");
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_missing_sections_take_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "server:\n  port: 9000\n").unwrap();

        let config = AppConfig::load_from_file(file.path()).unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.ai.provider, "mock");
        assert_eq!(config.limits.max_code_length, 50000);
    }

    #[test]
    fn test_openai_provider_requires_api_key() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "ai:\n  provider: \"openai\"\n").unwrap();

        let err = AppConfig::load_from_file(file.path()).unwrap_err();
        assert!(err.to_string().contains("api_key"));
    }

    #[test]
    fn test_unknown_provider_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "ai:\n  provider: \"bedrock\"\n").unwrap();

        let err = AppConfig::load_from_file(file.path()).unwrap_err();
        assert!(err.to_string().contains("bedrock"));
    }

    #[test]
    fn test_malformed_yaml_is_a_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "server: [not a map").unwrap();

        let err = AppConfig::load_from_file(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { .. }));
    }
}
