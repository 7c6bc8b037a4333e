//! Tracker configuration and config file loading.

use crate::{ConfigError, ConfigResult, SwipeError, SwipeResult};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Default per-axis displacement a gesture must exceed to count as a swipe.
pub const DEFAULT_THRESHOLD: f64 = 5.0;

/// Configuration for a [`GestureTracker`](crate::GestureTracker).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// Minimum absolute delta per axis for a directional event.
    pub threshold: f64,
    /// Abandon gestures left open longer than this (milliseconds).
    /// `None` keeps a gesture open until its release arrives.
    pub gesture_timeout_ms: Option<u64>,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            gesture_timeout_ms: None,
        }
    }
}

impl TrackerConfig {
    pub fn with_threshold(threshold: f64) -> Self {
        Self { threshold, ..Self::default() }
    }

    pub fn gesture_timeout(&self) -> Option<Duration> {
        self.gesture_timeout_ms.map(Duration::from_millis)
    }

    /// Reject thresholds that would make classification meaningless.
    pub fn validate(&self) -> SwipeResult<()> {
        if !self.threshold.is_finite() || self.threshold < 0.0 {
            return Err(SwipeError::InvalidArgument(format!(
                "threshold must be a finite, non-negative number (got {})",
                self.threshold
            )));
        }
        if self.gesture_timeout_ms == Some(0) {
            return Err(SwipeError::InvalidArgument(
                "gesture_timeout_ms must be greater than zero".into(),
            ));
        }
        Ok(())
    }
}

/// Default location of the user config file.
pub fn default_config_path() -> PathBuf {
    let base = dirs_next::config_dir().unwrap_or_else(|| PathBuf::from("."));
    base.join("swipe").join("config.yaml")
}

pub fn parse_yaml<T: DeserializeOwned>(content: &str) -> ConfigResult<T> {
    Ok(serde_yaml::from_str(content)?)
}

pub fn parse_json<T: DeserializeOwned>(content: &str) -> ConfigResult<T> {
    Ok(serde_json::from_str(content)?)
}

/// Load a config file, picking the format from its extension.
pub fn load_file<T: DeserializeOwned>(path: impl AsRef<Path>) -> ConfigResult<T> {
    let path = path.as_ref();
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    let content = fs::read_to_string(path)?;
    let config = match ext.as_str() {
        "yaml" | "yml" => parse_yaml(&content)?,
        "json" => parse_json(&content)?,
        other => return Err(ConfigError::UnsupportedFormat(other.to_string())),
    };
    debug!(?path, "Loaded config file");
    Ok(config)
}

/// Load a config file, falling back to defaults when it is missing or invalid.
pub fn load_or_default<T: DeserializeOwned + Default>(path: impl AsRef<Path>) -> T {
    let path = path.as_ref();
    if !path.exists() {
        debug!(?path, "No config file found, using defaults");
        return T::default();
    }

    match load_file(path) {
        Ok(config) => {
            info!(?path, "Loaded config");
            config
        }
        Err(e) => {
            warn!(?path, "Failed to load config: {}, using defaults", e);
            T::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TrackerConfig::default();
        assert_eq!(config.threshold, 5.0);
        assert_eq!(config.gesture_timeout(), None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config: TrackerConfig = parse_yaml("gesture_timeout_ms: 1500\n").unwrap();
        assert_eq!(config.threshold, DEFAULT_THRESHOLD);
        assert_eq!(config.gesture_timeout(), Some(Duration::from_millis(1500)));
    }

    #[test]
    fn test_json_config() {
        let config: TrackerConfig = parse_json(r#"{"threshold": 12.5}"#).unwrap();
        assert_eq!(config.threshold, 12.5);
    }

    #[test]
    fn test_validate_rejects_bad_threshold() {
        assert!(TrackerConfig::with_threshold(-1.0).validate().is_err());
        assert!(TrackerConfig::with_threshold(f64::NAN).validate().is_err());
        assert!(TrackerConfig::with_threshold(0.0).validate().is_ok());

        let config = TrackerConfig { gesture_timeout_ms: Some(0), ..TrackerConfig::default() };
        assert!(matches!(config.validate(), Err(SwipeError::InvalidArgument(_))));
    }

    #[test]
    fn test_unsupported_extension() {
        let path = std::env::temp_dir().join("swipe-core-config-test.toml");
        fs::write(&path, "threshold = 3").unwrap();
        let result = load_file::<TrackerConfig>(&path);
        let _ = fs::remove_file(&path);
        assert!(matches!(result, Err(ConfigError::UnsupportedFormat(ext)) if ext == "toml"));
    }

    #[test]
    fn test_missing_file_falls_back() {
        let path = std::env::temp_dir().join("swipe-core-does-not-exist.yaml");
        let config: TrackerConfig = load_or_default(&path);
        assert_eq!(config, TrackerConfig::default());
    }

    #[test]
    fn test_default_path_ends_with_app_dir() {
        assert!(default_config_path().ends_with("swipe/config.yaml"));
    }
}
