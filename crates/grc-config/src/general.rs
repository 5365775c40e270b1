//! General application configuration.

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Levels accepted by `tracing_subscriber::EnvFilter` as a bare directive.
const LOG_LEVELS: &[&str] = &["error", "warn", "info", "debug", "trace", "off"];

fn default_log_level() -> String {
    "warn".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Default tracing level when `GRC_LOG` is not set.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

impl GeneralConfig {
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if LOG_LEVELS.contains(&self.log_level.to_ascii_lowercase().as_str()) {
            Ok(())
        } else {
            Err(ConfigError::InvalidValue {
                field: "general.log_level".into(),
                reason: format!("expected one of {}", LOG_LEVELS.join(", ")),
            })
        }
    }
}
