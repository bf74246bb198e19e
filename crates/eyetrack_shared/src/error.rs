//! # Shared Error Types
//!
//! Errors raised while parsing identifiers or loading configuration.

use thiserror::Error;

/// A page identifier outside the six known pages.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown page identifier: {0:?}")]
pub struct ParsePageError(pub String);

/// Errors that can occur while loading a [`crate::UiConfig`].
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    /// The configuration file is not valid TOML for this schema.
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// The values parsed but break an ordering constraint.
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Result type for configuration loading.
pub type ConfigResult<T> = Result<T, ConfigError>;
