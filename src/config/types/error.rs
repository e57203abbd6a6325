//! Configuration error types.

use thiserror::Error;

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}
