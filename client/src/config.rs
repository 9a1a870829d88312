use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt as tracing_fmt;
use tracing_subscriber::prelude::*;
use url::Url;

use crate::gate::AcceptedStatuses;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("Failed to setup logging: {0}")]
    LoggingSetup(String),
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

fn default_log_level() -> String {
    "info".to_string()
}

const fn default_timeout_secs() -> u64 {
    5
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Logging {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub format: LogFormat,
}

impl Default for Logging {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Config {
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub accepted_statuses: AcceptedStatuses,
    #[serde(default)]
    pub logging: Logging,
}

impl Config {
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout_secs: default_timeout_secs(),
            token: None,
            accepted_statuses: AcceptedStatuses::default(),
            logging: Logging::default(),
        }
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(&path)?;
        let config: Self = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks what deserialization cannot: URL syntax, a non-zero timeout and a
    /// non-blank token.
    pub fn validate(&self) -> Result<(), ConfigError> {
        Url::parse(&self.base_url).map_err(|e| {
            ConfigError::Validation(format!("base_url '{}' is invalid: {e}", self.base_url))
        })?;
        if self.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "timeout_secs must be greater than zero".to_string(),
            ));
        }
        if matches!(&self.token, Some(token) if token.trim().is_empty()) {
            return Err(ConfigError::Validation(
                "token must not be empty when set".to_string(),
            ));
        }
        Ok(())
    }

    /// Installs the global subscriber. `RUST_LOG` takes precedence over the
    /// configured level.
    pub fn init_logger(&self) -> Result<(), ConfigError> {
        let env_filter = match EnvFilter::try_from_default_env() {
            Ok(filter) => filter,
            Err(_) => EnvFilter::try_new(&self.logging.level)
                .map_err(|e| ConfigError::LoggingSetup(e.to_string()))?,
        };

        let registry = tracing_subscriber::registry().with(env_filter);
        let result = match self.logging.format {
            LogFormat::Text => registry.with(tracing_fmt::layer()).try_init(),
            LogFormat::Json => registry.with(tracing_fmt::layer().json()).try_init(),
        };
        result.map_err(|e| ConfigError::LoggingSetup(e.to_string()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn load(content: &str) -> Result<Config, ConfigError> {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(content.as_bytes()).unwrap();
        Config::load(temp_file.path())
    }

    #[test]
    fn test_config_minimal() {
        let config = load(r#"base_url = "https://api.example""#).unwrap();

        assert_eq!(config, Config::new("https://api.example"));
        assert_eq!(config.timeout_secs, 5);
        assert!(config.token.is_none());
        assert_eq!(config.accepted_statuses, AcceptedStatuses::success());
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.format, LogFormat::Text);
    }

    #[test]
    fn test_config_full() {
        let config = load(
            r#"
base_url = "http://localhost:8080"
timeout_secs = 30
token = "secret"
accepted_statuses = [200, 201, 404]

[logging]
level = "debug"
format = "json"
"#,
        )
        .unwrap();

        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.token.as_deref(), Some("secret"));
        assert!(config.accepted_statuses.accepts(404));
        assert!(!config.accepted_statuses.accepts(202));
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn test_config_serialization_roundtrip() {
        let mut config = Config::new("https://api.example");
        config.accepted_statuses = AcceptedStatuses::from_codes([200, 204]).unwrap();

        let toml_string = toml::to_string(&config).unwrap();
        assert!(toml_string.contains("accepted_statuses = [200, 204]"));
        let deserialized: Config = toml::from_str(&toml_string).unwrap();
        assert_eq!(config, deserialized);
    }

    #[test]
    fn test_config_invalid_status_code() {
        let result = load(
            r#"
base_url = "https://api.example"
accepted_statuses = [200, 999]
"#,
        );
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_config_empty_status_set() {
        let result = load(
            r#"
base_url = "https://api.example"
accepted_statuses = []
"#,
        );
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_config_invalid_base_url() {
        let result = load(r#"base_url = "not a url""#);
        match result {
            Err(ConfigError::Validation(msg)) => assert!(msg.contains("base_url")),
            other => panic!("Expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_config_zero_timeout() {
        let result = load(
            r#"
base_url = "https://api.example"
timeout_secs = 0
"#,
        );
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_config_empty_token() {
        let mut config = Config::new("https://api.example");
        config.token = Some("  ".to_string());
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_init_logger_rejects_invalid_level() {
        if std::env::var_os("RUST_LOG").is_some() {
            return;
        }
        let mut config = Config::new("https://api.example");
        config.logging.level = "vetted=verbose".to_string();
        let result = config.init_logger();
        assert!(matches!(result, Err(ConfigError::LoggingSetup(_))));
    }

    #[test]
    fn test_config_missing_base_url() {
        let result = load("timeout_secs = 3");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_config_missing_file() {
        let result = Config::load("/nonexistent/vetted.toml");
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }
}
