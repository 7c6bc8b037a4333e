//! Common error types for swipe-core.

use thiserror::Error;

/// Errors raised while building or configuring a tracker.
#[derive(Debug, Error)]
pub enum SwipeError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Result type for tracker construction and configuration.
pub type SwipeResult<T> = Result<T, SwipeError>;

/// Errors raised while reading configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unsupported config format: {0}")]
    UnsupportedFormat(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;
