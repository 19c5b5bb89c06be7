//! Optional configuration file.
//!
//! Everything in the file has a default, so the searcher runs without one.
//! Credentials are never read from it; the signing key comes from the
//! command line or the environment.
//!
//! ```toml
//! [logging]
//! level = "debug"
//! format = "json"
//!
//! [relay]
//! request_timeout_secs = 10
//! event_buffer = 1024
//! ```

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use super::logging::LoggingConfig;
use crate::adapter::outbound::relay::options::RelayOptions;
use crate::error::{ConfigError, Result};

/// Relay connection tuning.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RelaySettings {
    /// How long to wait for the relay to answer a request.
    pub request_timeout_secs: u64,
    /// Capacity of the inbound event queue.
    pub event_buffer: usize,
}

impl Default for RelaySettings {
    fn default() -> Self {
        let options = RelayOptions::default();
        Self {
            request_timeout_secs: options.request_timeout.as_secs(),
            event_buffer: options.event_buffer,
        }
    }
}

impl RelaySettings {
    #[must_use]
    pub fn options(&self) -> RelayOptions {
        RelayOptions {
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            event_buffer: self.event_buffer,
        }
    }
}

/// Contents of the configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub logging: LoggingConfig,
    pub relay: RelaySettings,
}

impl FileConfig {
    /// Parse configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is malformed or validation fails.
    pub fn parse_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, the TOML content is
    /// malformed, or validation fails.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    fn validate(&self) -> Result<()> {
        if self.relay.request_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "request_timeout_secs",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if self.relay.event_buffer == 0 {
            return Err(ConfigError::InvalidValue {
                field: "event_buffer",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if !matches!(self.logging.format.as_str(), "pretty" | "json") {
            return Err(ConfigError::InvalidValue {
                field: "format",
                reason: format!("unknown log format '{}'", self.logging.format),
            }
            .into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn empty_file_uses_defaults() {
        let config = FileConfig::parse_toml("").unwrap();
        assert_eq!(config, FileConfig::default());
        assert_eq!(config.relay.options().request_timeout, Duration::from_secs(10));
        assert_eq!(config.relay.options().event_buffer, 1024);
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config = FileConfig::parse_toml(
            r#"
            [logging]
            format = "json"

            [relay]
            request_timeout_secs = 3
            "#,
        )
        .unwrap();
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.format, "json");
        assert_eq!(config.relay.request_timeout_secs, 3);
        assert_eq!(config.relay.event_buffer, 1024);
    }

    #[test]
    fn zero_timeout_rejected() {
        let err = FileConfig::parse_toml("[relay]\nrequest_timeout_secs = 0\n").unwrap_err();
        assert!(matches!(
            err,
            Error::Config(ConfigError::InvalidValue {
                field: "request_timeout_secs",
                ..
            })
        ));
    }

    #[test]
    fn unknown_log_format_rejected() {
        let err = FileConfig::parse_toml("[logging]\nformat = \"xml\"\n").unwrap_err();
        assert!(err.to_string().contains("unknown log format 'xml'"));
    }

    #[test]
    fn malformed_toml_is_parse_error() {
        let err = FileConfig::parse_toml("[relay\n").unwrap_err();
        assert!(matches!(err, Error::Config(ConfigError::Parse(_))));
    }
}
