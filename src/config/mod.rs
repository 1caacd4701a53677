//! Configuration loading and management.
//!
//! This module is split into logical submodules:
//! - [`types`]: Core config struct definitions (Config, ServerConfig) and loading
//! - [`listen`]: Network listener configuration (ListenConfig)
//! - [`limits`]: Protocol and queue limits (LimitsConfig)
//! - [`defaults`]: serde default value functions
//! - [`validation`]: startup validation

mod defaults;
mod limits;
mod listen;
mod types;
mod validation;

pub use limits::LimitsConfig;
pub use listen::ListenConfig;
pub use types::{Config, ConfigError, ServerConfig};
pub use validation::{ValidationError, validate};
