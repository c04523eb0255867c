//! Scan configuration.
//!
//! The polling interval bounds decode CPU cost on constrained hardware;
//! the try-harder flag trades decode thoroughness against frame rate.

use crate::decode::DecodeOptions;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Configuration for a scan session.
///
/// Fields omitted from a config file fall back to their defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Milliseconds between successive capture/decode attempts.
    pub poll_interval_ms: u64,
    /// Ask the decoder for more thorough (slower) decode attempts.
    pub try_harder: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: 250,
            try_harder: true,
        }
    }
}

impl ScanConfig {
    /// Returns the polling interval as a [`Duration`].
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// Projects the decode-effort settings for a concrete decoder.
    pub fn decode_options(&self) -> DecodeOptions {
        DecodeOptions {
            try_harder: self.try_harder,
        }
    }

    /// Validates the configuration parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.poll_interval_ms == 0 || self.poll_interval_ms > 10_000 {
            return Err(ConfigError::InvalidInterval);
        }
        Ok(())
    }
}

/// Configuration validation errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid polling interval (must be 1-10000 ms)")]
    InvalidInterval,
    #[error("failed to read config file: {0}")]
    FileReadError(String),
    #[error("failed to parse config file: {0}")]
    ParseError(String),
}

/// Full configuration file format.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FileConfig {
    #[serde(default)]
    pub scan: ScanConfig,
}

impl FileConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::FileReadError(e.to_string()))?;
        let config: FileConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        config.scan.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config_valid() {
        let config = ScanConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.poll_interval(), Duration::from_millis(250));
        assert!(config.try_harder);
    }

    #[test]
    fn test_zero_interval_invalid() {
        let config = ScanConfig {
            poll_interval_ms: 0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidInterval)
        ));
    }

    #[test]
    fn test_decode_options_projection() {
        let config = ScanConfig {
            try_harder: false,
            ..Default::default()
        };
        assert!(!config.decode_options().try_harder);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[scan]\npoll_interval_ms = 100\ntry_harder = false").unwrap();

        let config = FileConfig::from_file(file.path()).unwrap();
        assert_eq!(config.scan.poll_interval_ms, 100);
        assert!(!config.scan.try_harder);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[scan]\npoll_interval_ms = 100").unwrap();

        let config = FileConfig::from_file(file.path()).unwrap();
        assert_eq!(config.scan.poll_interval_ms, 100);
        assert!(config.scan.try_harder);
    }

    #[test]
    fn test_load_rejects_invalid_interval() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[scan]\npoll_interval_ms = 0").unwrap();

        assert!(matches!(
            FileConfig::from_file(file.path()),
            Err(ConfigError::InvalidInterval)
        ));
    }
}
