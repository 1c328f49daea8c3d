//! CLI configuration
//!
//! Precedence (lowest to highest):
//! 1. Programmatic defaults
//! 2. `balance.yaml` in the working directory, or the file given by `--config`
//! 3. Environment variables (`BALANCE_*`, e.g. `BALANCE_HINT_LIMIT`)

use anyhow::{Context, Result};
use balance_engine::session::SessionConfig;
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

const DEFAULT_CONFIG_FILE: &str = "balance.yaml";
const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("History path cannot be empty")]
    EmptyHistoryPath,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Default tracing filter when `RUST_LOG` is unset
    pub log_level: String,
    /// Where `play` writes and `analyze` reads the move history
    pub history_path: PathBuf,
    /// Game tunables, read from the top level (`hint_limit`)
    #[serde(flatten)]
    pub session: SessionConfig,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            log_level: "warn".to_string(),
            history_path: PathBuf::from("move_history.json"),
            session: SessionConfig::default(),
        }
    }
}

pub struct ConfigLoader;

impl ConfigLoader {
    pub fn load(path: Option<&Path>) -> Result<Config> {
        let file = path.unwrap_or_else(|| Path::new(DEFAULT_CONFIG_FILE));
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(file))
            .merge(Env::prefixed("BALANCE_").split("__"))
            .extract()
            .context("Failed to extract configuration from figment")?;

        Self::validate(&config)?;
        Ok(config)
    }

    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        if !LOG_LEVELS.contains(&config.log_level.to_lowercase().as_str()) {
            return Err(ConfigError::InvalidLogLevel(config.log_level.clone()));
        }
        if config.history_path.as_os_str().is_empty() {
            return Err(ConfigError::EmptyHistoryPath);
        }
        Ok(())
    }
}
