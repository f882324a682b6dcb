//! CLI command handlers

use anyhow::{Context, Result};
use clap::Subcommand;
use std::path::{Path, PathBuf};

use crate::config::{CONFIG_KEYS, ConfigLoader, paths};

/// Configuration management subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigSubcommand {
    /// Get configuration value
    Get {
        /// Configuration key (e.g., "platform.baseUrl", "aggregation.batchSize")
        key: Option<String>,
    },
    /// Set configuration value
    Set {
        /// Configuration key (e.g., "platform.baseUrl", "aggregation.batchSize")
        key: String,
        /// Configuration value (empty clears optional keys)
        value: String,
    },
    /// List all configuration
    List,
    /// List the keys accepted by get and set
    Keys,
    /// Show configuration file path
    Path,
    /// Validate configuration
    Validate,
}

/// File that `config set` writes to
fn target_path(config_file: Option<&Path>) -> PathBuf {
    config_file
        .map(Path::to_path_buf)
        .unwrap_or_else(paths::root_config_path)
}

/// Handle configuration subcommands
///
/// `config_file` is the `--config` override; the root config is used
/// otherwise.
pub fn handle_config_command(cmd: ConfigSubcommand, config_file: Option<&Path>) -> Result<()> {
    match cmd {
        ConfigSubcommand::Get { key } => {
            let config = ConfigLoader::load(config_file).context("Failed to load configuration")?;

            if let Some(key) = key {
                let value = crate::config::get_config_value(&config, &key)?;
                println!("{}", value);
            } else {
                let yaml =
                    serde_yaml::to_string(&config).context("Failed to serialize configuration")?;
                print!("{}", yaml);
            }
        }
        ConfigSubcommand::Set { key, value } => {
            let path = target_path(config_file);
            // Start from the file alone so env overrides are not persisted
            let mut config = if path.exists() {
                ConfigLoader::load_file(&path)?
            } else {
                ConfigLoader::load_defaults()
            };

            crate::config::set_config_value(&mut config, &key, &value)
                .with_context(|| format!("Failed to set {} = {}", key, value))?;

            ConfigLoader::save(&config, &path).context("Failed to save configuration")?;
            println!("Configuration saved to {}", path.display());
        }
        ConfigSubcommand::List => {
            let config = ConfigLoader::load(config_file).context("Failed to load configuration")?;
            let yaml =
                serde_yaml::to_string(&config).context("Failed to serialize configuration")?;
            print!("{}", yaml);
        }
        ConfigSubcommand::Keys => {
            for key in CONFIG_KEYS {
                println!("{}", key);
            }
        }
        ConfigSubcommand::Path => {
            println!("{}", target_path(config_file).display());
        }
        ConfigSubcommand::Validate => {
            ConfigLoader::validate(config_file).context("Configuration validation failed")?;
            println!("Configuration is valid");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_writes_explicit_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("nested").join("config.yaml");

        handle_config_command(
            ConfigSubcommand::Set {
                key: "aggregation.batchSize".to_string(),
                value: "4".to_string(),
            },
            Some(&path),
        )
        .unwrap();

        let config = ConfigLoader::load_file(&path).unwrap();
        assert_eq!(config.aggregation.batch_size, 4);

        handle_config_command(ConfigSubcommand::Validate, Some(&path)).unwrap();
    }

    #[test]
    fn test_set_rejects_unknown_key() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.yaml");
        let result = handle_config_command(
            ConfigSubcommand::Set {
                key: "ui.skin".to_string(),
                value: "dark".to_string(),
            },
            Some(&path),
        );
        assert!(result.is_err());
        assert!(!path.exists());
    }
}
