use crate::error::{GraphError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default width of the trailing window, in seconds
pub const DEFAULT_WINDOW_SECONDS: i64 = 60;

/// Default `created_time` layout, e.g. `2016-03-29T06:04:39Z`
pub const DEFAULT_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Configuration for a rolling median stream
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StreamConfig {
    /// An event at `t` stays active while `max_time - t < window_seconds`
    pub window_seconds: i64,
    /// `chrono` format string used to decode `created_time`
    pub timestamp_format: String,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            window_seconds: DEFAULT_WINDOW_SECONDS,
            timestamp_format: DEFAULT_TIMESTAMP_FORMAT.to_string(),
        }
    }
}

impl StreamConfig {
    /// Load a configuration from a JSON file; absent keys keep their defaults
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let config: StreamConfig = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_window_seconds(mut self, window_seconds: i64) -> Self {
        self.window_seconds = window_seconds;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.window_seconds <= 0 {
            return Err(GraphError::config(format!(
                "window_seconds must be positive, got {}",
                self.window_seconds
            )));
        }
        if self.timestamp_format.is_empty() {
            return Err(GraphError::config("timestamp_format must not be empty"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = StreamConfig::default();
        assert_eq!(config.window_seconds, 60);
        assert_eq!(config.timestamp_format, "%Y-%m-%dT%H:%M:%SZ");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_non_positive_window() {
        let config = StreamConfig::default().with_window_seconds(0);
        assert!(matches!(config.validate(), Err(GraphError::Config(_))));
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"window_seconds": 120}}"#).unwrap();

        let config = StreamConfig::from_json_file(file.path()).unwrap();
        assert_eq!(config.window_seconds, 120);
        assert_eq!(config.timestamp_format, DEFAULT_TIMESTAMP_FORMAT);
    }

    #[test]
    fn test_invalid_json_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"window_seconds": -5}}"#).unwrap();

        assert!(StreamConfig::from_json_file(file.path()).is_err());
    }
}
