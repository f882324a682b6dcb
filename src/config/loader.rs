//! Configuration loading and validation
//!
//! Precedence order (highest to lowest):
//! 1. Environment variable overrides
//! 2. Config file (explicit `--config` path, or the root config)
//! 3. Built-in defaults

use super::{defaults, parse_duration, paths, schema::Config};
use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::path::Path;

pub const ENV_BIND: &str = "PORTAL_BFF_BIND";
pub const ENV_PLATFORM_URL: &str = "PORTAL_BFF_PLATFORM_URL";
pub const ENV_OBSERVER_URL: &str = "PORTAL_BFF_OBSERVER_URL";
pub const ENV_LOG_LEVEL: &str = "PORTAL_BFF_LOG_LEVEL";

/// Configuration loader
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with all layers merged
    ///
    /// An explicit file must exist. The root config is optional.
    pub fn load(config_file: Option<&Path>) -> Result<Config> {
        let config = match config_file {
            Some(path) => Self::load_file(path)?,
            None => {
                let root = paths::root_config_path();
                if root.exists() {
                    Self::load_file(&root)?
                } else {
                    Self::load_defaults()
                }
            }
        };

        Ok(Self::apply_env_overrides(config, |key| std::env::var(key).ok()))
    }

    /// Load configuration from a file
    pub fn load_file(path: &Path) -> Result<Config> {
        if !path.exists() {
            return Err(anyhow::anyhow!("Config file not found: {}", path.display()));
        }

        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = serde_yaml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Load and check a configuration file
    ///
    /// Fails on YAML syntax errors, wrong value types, unparsable URLs,
    /// addresses or durations, and a zero page size.
    pub fn validate(config_file: Option<&Path>) -> Result<Config> {
        let config = Self::load(config_file).context("Failed to load configuration")?;
        Self::check(&config)?;
        Ok(config)
    }

    /// Check values that serde cannot
    pub fn check(config: &Config) -> Result<()> {
        config
            .server
            .bind_address
            .parse::<SocketAddr>()
            .with_context(|| format!("Invalid server.bindAddress: {}", config.server.bind_address))?;

        url::Url::parse(&config.platform.base_url)
            .with_context(|| format!("Invalid platform.baseUrl: {}", config.platform.base_url))?;
        parse_duration(&config.platform.timeout).context("Invalid platform.timeout")?;
        if config.platform.page_size == 0 {
            anyhow::bail!("platform.pageSize must be greater than 0");
        }

        if let Some(base_url) = &config.observer.base_url {
            url::Url::parse(base_url)
                .with_context(|| format!("Invalid observer.baseUrl: {}", base_url))?;
        }
        parse_duration(&config.observer.timeout).context("Invalid observer.timeout")?;

        Ok(())
    }

    /// Load default configuration
    pub fn load_defaults() -> Config {
        defaults::default_config()
    }

    /// Apply environment variable overrides
    ///
    /// `lookup` resolves a variable name to its value.
    pub fn apply_env_overrides<F>(mut config: Config, lookup: F) -> Config
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(bind) = lookup(ENV_BIND) {
            config.server.bind_address = bind;
        }

        if let Some(url) = lookup(ENV_PLATFORM_URL) {
            config.platform.base_url = url;
        }

        // Empty value disables the observer
        if let Some(url) = lookup(ENV_OBSERVER_URL) {
            config.observer.base_url = Some(url).filter(|u| !u.is_empty());
        }

        if let Some(level) = lookup(ENV_LOG_LEVEL) {
            config.logger.level = level;
        }

        config
    }

    /// Save configuration to a file
    pub fn save(config: &Config, path: &Path) -> Result<()> {
        // Ensure directory exists
        if let Some(parent) = path.parent() {
            paths::ensure_dir(parent)?;
        }

        let yaml =
            serde_yaml::to_string(config).context("Failed to serialize configuration to YAML")?;

        std::fs::write(path, yaml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Save root configuration
    pub fn save_root(config: &Config) -> Result<()> {
        Self::save(config, &paths::root_config_path())
    }
}
