//! Configuration schema definitions
//!
//! Defines the structure of configuration files using serde for serialization.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// HTTP server settings
    #[serde(default)]
    pub server: ServerConfig,

    /// Platform API connection
    #[serde(default)]
    pub platform: PlatformConfig,

    /// Observability backend used for logs
    #[serde(default)]
    pub observer: ObserverConfig,

    /// Fleet aggregation settings
    #[serde(default)]
    pub aggregation: AggregationConfig,

    /// Logger configuration
    #[serde(default)]
    pub logger: LoggerConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ServerConfig {
    /// Address the server listens on
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
}

/// Platform API configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PlatformConfig {
    /// Base URL of the platform API, e.g. http://localhost:8080/api/v1
    #[serde(default = "default_platform_url")]
    pub base_url: String,

    /// Name of the environment variable holding the bearer token
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_env: Option<String>,

    /// Request timeout (e.g. "30s", "500ms")
    #[serde(default = "default_platform_timeout")]
    pub timeout: String,

    /// Items requested per page
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

/// Observer (logs) configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ObserverConfig {
    /// Base URL of the observer API; logs are unavailable when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    /// Request timeout
    #[serde(default = "default_observer_timeout")]
    pub timeout: String,
}

/// Aggregation configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AggregationConfig {
    /// Per-component lookups in flight at once
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
}

/// Logger configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LoggerConfig {
    /// Default filter when RUST_LOG is not set
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Write logs to this file instead of stderr
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

// Default value functions
fn default_bind_address() -> String {
    "127.0.0.1:7007".to_string()
}

fn default_platform_url() -> String {
    "http://localhost:8080/api/v1".to_string()
}

fn default_platform_timeout() -> String {
    "30s".to_string()
}

fn default_page_size() -> u32 {
    100
}

fn default_observer_timeout() -> String {
    "10s".to_string()
}

fn default_batch_size() -> usize {
    crate::aggregate::DEFAULT_BATCH_SIZE
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
        }
    }
}

impl Default for PlatformConfig {
    fn default() -> Self {
        Self {
            base_url: default_platform_url(),
            token_env: None,
            timeout: default_platform_timeout(),
            page_size: default_page_size(),
        }
    }
}

impl Default for ObserverConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout: default_observer_timeout(),
        }
    }
}

impl Default for AggregationConfig {
    fn default() -> Self {
        Self {
            batch_size: default_batch_size(),
        }
    }
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let yaml = serde_yaml::to_string(&config).unwrap();
        assert!(yaml.contains("bindAddress"));
        assert!(yaml.contains("baseUrl"));
        assert!(yaml.contains("batchSize"));
        // Unset optional values are omitted
        assert!(!yaml.contains("tokenEnv"));
    }

    #[test]
    fn test_config_deserialization() {
        let yaml = r#"
platform:
  baseUrl: https://platform.example.com/api/v1
  tokenEnv: PLATFORM_TOKEN
observer:
  baseUrl: https://observer.example.com
aggregation:
  batchSize: 4
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.platform.base_url, "https://platform.example.com/api/v1");
        assert_eq!(config.platform.token_env.as_deref(), Some("PLATFORM_TOKEN"));
        assert_eq!(config.platform.page_size, 100);
        assert_eq!(
            config.observer.base_url.as_deref(),
            Some("https://observer.example.com")
        );
        assert_eq!(config.aggregation.batch_size, 4);
        assert_eq!(config.server.bind_address, "127.0.0.1:7007");
        assert_eq!(config.logger.level, "info");
    }
}
