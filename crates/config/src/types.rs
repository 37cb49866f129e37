use std::env;

use serde::Deserialize;

/// Top-level application configuration.
///
/// Built once at process start and passed by reference into every component
/// constructor; nothing reads configuration after startup.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub ai: AiConfig,
    pub limits: LimitsConfig,
    pub logging: LoggingConfig,
    pub cors: CorsConfig,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, String> {
        Ok(Self {
            server: ServerConfig::from_env()?,
            ai: AiConfig::from_env()?,
            limits: LimitsConfig::from_env()?,
            logging: LoggingConfig::from_env()?,
            cors: CorsConfig::from_env()?,
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

impl ServerConfig {
    /// Load from environment variables.
    pub fn from_env() -> Result<Self, String> {
        Ok(Self {
            host: env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("SERVER_PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .map_err(|_| "SERVER_PORT must be a valid port number")?,
        })
    }
}

/// AI provider configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AiConfig {
    /// Which provider to construct: "openai" or "mock".
    pub provider: String,
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    /// Outbound request timeout in seconds; each attempt is bounded by this.
    pub timeout_secs: u64,
    /// Extra attempts for retryable failures (timeout, 5xx). Zero disables retry.
    pub max_retries: u32,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            provider: "mock".to_string(),
            api_key: None,
            model: "gpt-4o-mini".to_string(),
            base_url: "https://api.openai.com/v1".to_string(),
            timeout_secs: 30,
            max_retries: 2,
        }
    }
}

impl AiConfig {
    /// Load from environment variables.
    pub fn from_env() -> Result<Self, String> {
        let defaults = Self::default();
        Ok(Self {
            provider: env::var("AI_PROVIDER").unwrap_or(defaults.provider),
            api_key: env::var("OPENAI_API_KEY").ok(),
            model: env::var("OPENAI_MODEL").unwrap_or(defaults.model),
            base_url: env::var("OPENAI_BASE_URL").unwrap_or(defaults.base_url),
            timeout_secs: env::var("AI_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.timeout_secs),
            max_retries: env::var("AI_MAX_RETRIES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.max_retries),
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Maximum accepted code size in characters.
    pub max_code_length: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_code_length: 50000,
        }
    }
}

impl LimitsConfig {
    /// Load from environment variables.
    pub fn from_env() -> Result<Self, String> {
        Ok(Self {
            max_code_length: env::var("MAX_CODE_LENGTH")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or_else(|| Self::default().max_code_length),
        })
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// "pretty" or "json".
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl LoggingConfig {
    /// Load from environment variables.
    pub fn from_env() -> Result<Self, String> {
        let defaults = Self::default();
        Ok(Self {
            level: env::var("LOG_LEVEL").unwrap_or(defaults.level),
            format: env::var("LOG_FORMAT").unwrap_or(defaults.format),
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec![
                "http://localhost:5173".to_string(),
                "http://127.0.0.1:5173".to_string(),
            ],
        }
    }
}

impl CorsConfig {
    /// Load from environment variables. Origins are comma-separated.
    pub fn from_env() -> Result<Self, String> {
        Ok(Self {
            allowed_origins: env::var("CORS_ALLOWED_ORIGINS")
                .map(|v| {
                    v.split(',')
                        .map(|s| s.trim().to_string())
                        .filter(|s| !s.is_empty())
                        .collect()
                })
                .unwrap_or_else(|_| Self::default().allowed_origins),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.ai.provider, "mock");
        assert_eq!(config.ai.model, "gpt-4o-mini");
        assert_eq!(config.ai.timeout_secs, 30);
        assert_eq!(config.ai.max_retries, 2);
        assert_eq!(config.limits.max_code_length, 50000);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.cors.allowed_origins.len(), 2);
    }
}
