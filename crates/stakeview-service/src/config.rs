//! Service configuration types

use serde::{Deserialize, Serialize};
use stakeview_core::error::{Result, StakeviewError};
use std::path::Path;

/// Complete service configuration
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Refresh loop settings
    #[serde(default)]
    pub refresh: RefreshConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl ServiceConfig {
    /// Load from an optional TOML file with environment overrides
    /// (`STAKEVIEW_REFRESH__INTERVAL_SECS=5`).
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = config::Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path));
        }

        builder
            .add_source(config::Environment::with_prefix("STAKEVIEW").separator("__"))
            .build()
            .and_then(|settings| settings.try_deserialize())
            .map_err(|e| StakeviewError::Config(e.to_string()))
    }
}

/// Refresh loop settings
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RefreshConfig {
    /// Poll cadence in seconds
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,

    /// Event channel capacity
    #[serde(default = "default_event_capacity")]
    pub event_capacity: usize,

    /// Address whose staking data is watched; protocol-only when unset
    #[serde(default)]
    pub watch_address: Option<String>,
}

fn default_interval_secs() -> u64 {
    10
}

fn default_event_capacity() -> usize {
    64
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            interval_secs: default_interval_secs(),
            event_capacity: default_event_capacity(),
            watch_address: None,
        }
    }
}

/// Logging configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Color output
    #[serde(default = "default_true")]
    pub color: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            color: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ServiceConfig::default();

        assert_eq!(config.refresh.interval_secs, 10);
        assert_eq!(config.refresh.event_capacity, 64);
        assert!(config.refresh.watch_address.is_none());
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: ServiceConfig = toml::from_str(
            r#"
            [refresh]
            interval_secs = 5
            watch_address = "0xabc"
            "#,
        )
        .unwrap();

        assert_eq!(config.refresh.interval_secs, 5);
        assert_eq!(config.refresh.watch_address.as_deref(), Some("0xabc"));
        assert_eq!(config.refresh.event_capacity, 64);
        assert_eq!(config.logging.level, "info");
    }
}
