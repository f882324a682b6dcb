//! Configuration system for portal-bff
//!
//! Layered YAML configuration: built-in defaults, a config file, then
//! environment overrides. Keys use dot notation for `config get`/`config set`.

mod defaults;
pub mod loader;
pub mod paths;
pub mod schema;

pub use loader::ConfigLoader;
pub use schema::{
    AggregationConfig, Config, LoggerConfig, ObserverConfig, PlatformConfig, ServerConfig,
};

use anyhow::{Context, Result};
use std::path::PathBuf;
use std::time::Duration;

/// Keys accepted by `get_config_value` and `set_config_value`
pub const CONFIG_KEYS: &[&str] = &[
    "server.bindAddress",
    "platform.baseUrl",
    "platform.tokenEnv",
    "platform.timeout",
    "platform.pageSize",
    "observer.baseUrl",
    "observer.timeout",
    "aggregation.batchSize",
    "logger.level",
    "logger.file",
];

/// Get a configuration value by key (dot notation)
pub fn get_config_value(config: &Config, key: &str) -> Result<String> {
    match key {
        "server.bindAddress" => Ok(config.server.bind_address.clone()),
        "platform.baseUrl" => Ok(config.platform.base_url.clone()),
        "platform.tokenEnv" => Ok(config.platform.token_env.clone().unwrap_or_default()),
        "platform.timeout" => Ok(config.platform.timeout.clone()),
        "platform.pageSize" => Ok(config.platform.page_size.to_string()),
        "observer.baseUrl" => Ok(config.observer.base_url.clone().unwrap_or_default()),
        "observer.timeout" => Ok(config.observer.timeout.clone()),
        "aggregation.batchSize" => Ok(config.aggregation.batch_size.to_string()),
        "logger.level" => Ok(config.logger.level.clone()),
        "logger.file" => Ok(config
            .logger
            .file
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_default()),
        _ => Err(anyhow::anyhow!("Unknown configuration key: {}", key)),
    }
}

/// Set a configuration value by key (dot notation)
///
/// An empty value clears optional keys.
pub fn set_config_value(config: &mut Config, key: &str, value: &str) -> Result<()> {
    match key {
        "server.bindAddress" => {
            config.server.bind_address = value.to_string();
        }
        "platform.baseUrl" => {
            url::Url::parse(value).context("platform.baseUrl must be an absolute URL")?;
            config.platform.base_url = value.to_string();
        }
        "platform.tokenEnv" => {
            config.platform.token_env = optional(value);
        }
        "platform.timeout" => {
            parse_duration(value).context("platform.timeout must be a duration like '30s'")?;
            config.platform.timeout = value.to_string();
        }
        "platform.pageSize" => {
            config.platform.page_size = value
                .parse()
                .context("platform.pageSize must be a number")?;
        }
        "observer.baseUrl" => {
            if !value.is_empty() {
                url::Url::parse(value).context("observer.baseUrl must be an absolute URL")?;
            }
            config.observer.base_url = optional(value);
        }
        "observer.timeout" => {
            parse_duration(value).context("observer.timeout must be a duration like '10s'")?;
            config.observer.timeout = value.to_string();
        }
        "aggregation.batchSize" => {
            config.aggregation.batch_size = value
                .parse()
                .context("aggregation.batchSize must be a number")?;
        }
        "logger.level" => {
            config.logger.level = value.to_string();
        }
        "logger.file" => {
            config.logger.file = optional(value).map(PathBuf::from);
        }
        _ => return Err(anyhow::anyhow!("Unknown configuration key: {}", key)),
    }

    Ok(())
}

fn optional(value: &str) -> Option<String> {
    Some(value.to_string()).filter(|v| !v.is_empty())
}

/// Parse duration string (e.g., "500ms", "30s", "1m", "2h")
pub fn parse_duration(s: &str) -> Result<Duration> {
    if let Some(ms) = s.strip_suffix("ms") {
        let ms: u64 = ms.parse().context("Invalid duration")?;
        Ok(Duration::from_millis(ms))
    } else if let Some(secs) = s.strip_suffix('s') {
        let secs: u64 = secs.parse().context("Invalid duration")?;
        Ok(Duration::from_secs(secs))
    } else if let Some(mins) = s.strip_suffix('m') {
        let mins: u64 = mins.parse().context("Invalid duration")?;
        Ok(Duration::from_secs(mins * 60))
    } else if let Some(hours) = s.strip_suffix('h') {
        let hours: u64 = hours.parse().context("Invalid duration")?;
        Ok(Duration::from_secs(hours * 3600))
    } else {
        anyhow::bail!("Invalid duration format: {}", s)
    }
}
