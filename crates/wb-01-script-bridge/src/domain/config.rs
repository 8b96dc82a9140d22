//! Bridge configuration.

use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

use super::error::ConfigError;

/// Default time a call waits for its reply.
pub const DEFAULT_CALL_TIMEOUT: Duration = Duration::from_secs(30);

/// Script-side bridge configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    /// How long a response-expecting call stays pending before it fails
    /// with a timeout
    #[serde(with = "humantime_serde")]
    pub call_timeout: Duration,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            call_timeout: DEFAULT_CALL_TIMEOUT,
        }
    }
}

impl BridgeConfig {
    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.call_timeout.is_zero() {
            return Err(ConfigError::InvalidTimeout(
                "call_timeout cannot be 0".into(),
            ));
        }
        Ok(())
    }

    /// Create configuration from environment variables.
    ///
    /// - `WB_CALL_TIMEOUT`: call timeout as human-readable text, e.g. `30s`,
    ///   `1m 30s` (default: 30s)
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Ok(raw) = env::var("WB_CALL_TIMEOUT") {
            config.call_timeout =
                humantime::parse_duration(&raw).map_err(|e| ConfigError::InvalidEnv {
                    var: "WB_CALL_TIMEOUT",
                    reason: e.to_string(),
                })?;
        }
        config.validate()?;
        Ok(config)
    }

    pub fn with_call_timeout(mut self, timeout: Duration) -> Self {
        self.call_timeout = timeout;
        self
    }
}
