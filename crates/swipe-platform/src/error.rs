//! Common error types for swipe-platform.

use thiserror::Error;

/// Errors raised while loading a recorded device trace.
#[derive(Debug, Error)]
pub enum TraceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unsupported trace format: {0}")]
    UnsupportedFormat(String),
    #[error("event {index} at {at_ms}ms is earlier than the event before it")]
    OutOfOrder { index: usize, at_ms: u64 },
}

/// Result type for trace operations.
pub type TraceResult<T> = Result<T, TraceError>;
