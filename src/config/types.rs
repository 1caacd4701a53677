//! Core configuration types and loading.

use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

use super::defaults::{default_network_name, default_server_name};
use super::limits::LimitsConfig;
use super::listen::ListenConfig;
use super::validation::{self, ValidationError};

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid configuration: {}", join_errors(.0))]
    Invalid(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Server configuration.
///
/// Every section is optional in the TOML file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Server information.
    #[serde(default)]
    pub server: ServerConfig,
    /// Network listen configuration.
    #[serde(default)]
    pub listen: ListenConfig,
    /// Protocol and queue limits.
    #[serde(default)]
    pub limits: LimitsConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Check the configuration, collecting every problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validation::validate(self).map_err(ConfigError::Invalid)
    }
}

/// Server identity configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Server name, the prefix of numeric replies (default: "localhost").
    #[serde(default = "default_server_name")]
    pub name: String,
    /// Network name shown in the welcome line (default: "IRC Network").
    #[serde(default = "default_network_name")]
    pub network: String,
    /// Connection password. The command-line password overrides it.
    #[serde(default)]
    pub password: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            name: default_server_name(),
            network: default_network_name(),
            password: String::new(),
        }
    }
}
