//! Configuration validation.
//!
//! Validates configuration at startup to catch common errors early.

use super::Config;
use thiserror::Error;

/// Validation errors for configuration.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("server.name is required")]
    MissingServerName,
    #[error("a connection password is required")]
    MissingPassword,
    #[error("limits.channel_len must be at least 2, got {0}")]
    ChannelLenTooSmall(usize),
    #[error("limits.nick_len must be at least 1")]
    ZeroNickLen,
    #[error("limits.line_len must be positive")]
    ZeroLineLen,
    #[error("limits.sendq must be positive")]
    ZeroSendq,
}

/// Validate a configuration, returning all errors found.
pub fn validate(config: &Config) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.server.name.is_empty() {
        errors.push(ValidationError::MissingServerName);
    }
    if config.server.password.is_empty() {
        errors.push(ValidationError::MissingPassword);
    }

    let limits = &config.limits;
    if limits.channel_len < 2 {
        errors.push(ValidationError::ChannelLenTooSmall(limits.channel_len));
    }
    if limits.nick_len == 0 {
        errors.push(ValidationError::ZeroNickLen);
    }
    if limits.line_len == 0 {
        errors.push(ValidationError::ZeroLineLen);
    }
    if limits.sendq == 0 {
        errors.push(ValidationError::ZeroSendq);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
