//! Host runtime configuration.

use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;
use std::time::Duration;

use super::error::ConfigError;

pub const DEFAULT_WORKER_COUNT: usize = 4;
pub const DEFAULT_QUEUE_SIZE: usize = 100;
pub const DEFAULT_JOB_TIMEOUT: Duration = Duration::from_secs(30);

/// Worker pool sizing and per-job deadline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HostConfig {
    /// Number of worker tasks
    pub worker_count: usize,
    /// Jobs that can wait for a worker before submissions are refused
    pub queue_size: usize,
    /// How long a single host function may run
    #[serde(with = "humantime_serde")]
    pub job_timeout: Duration,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            worker_count: DEFAULT_WORKER_COUNT,
            queue_size: DEFAULT_QUEUE_SIZE,
            job_timeout: DEFAULT_JOB_TIMEOUT,
        }
    }
}

impl HostConfig {
    /// Replace zero sizes with the defaults.
    pub fn sanitized(mut self) -> Self {
        if self.worker_count == 0 {
            self.worker_count = DEFAULT_WORKER_COUNT;
        }
        if self.queue_size == 0 {
            self.queue_size = DEFAULT_QUEUE_SIZE;
        }
        self
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.job_timeout.is_zero() {
            return Err(ConfigError::InvalidTimeout("job_timeout cannot be 0".into()));
        }
        Ok(())
    }

    /// Create configuration from environment variables.
    ///
    /// - `WB_HOST_WORKERS`: worker count (default: 4)
    /// - `WB_HOST_QUEUE_SIZE`: queue capacity (default: 100)
    /// - `WB_HOST_JOB_TIMEOUT`: per-job deadline, e.g. `30s` (default: 30s)
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Some(workers) = parse_env::<usize>("WB_HOST_WORKERS")? {
            config.worker_count = workers;
        }
        if let Some(size) = parse_env::<usize>("WB_HOST_QUEUE_SIZE")? {
            config.queue_size = size;
        }
        if let Ok(raw) = env::var("WB_HOST_JOB_TIMEOUT") {
            config.job_timeout =
                humantime::parse_duration(&raw).map_err(|e| ConfigError::InvalidEnv {
                    var: "WB_HOST_JOB_TIMEOUT",
                    reason: e.to_string(),
                })?;
        }
        let config = config.sanitized();
        config.validate()?;
        Ok(config)
    }

    pub fn with_worker_count(mut self, count: usize) -> Self {
        self.worker_count = count;
        self
    }

    pub fn with_queue_size(mut self, size: usize) -> Self {
        self.queue_size = size;
        self
    }

    pub fn with_job_timeout(mut self, timeout: Duration) -> Self {
        self.job_timeout = timeout;
        self
    }
}

fn parse_env<T>(var: &'static str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(var) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|e: T::Err| ConfigError::InvalidEnv {
                var,
                reason: e.to_string(),
            }),
        Err(_) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = HostConfig::default();
        assert_eq!(config.worker_count, 4);
        assert_eq!(config.queue_size, 100);
        assert_eq!(config.job_timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_sanitized_replaces_zero_sizes() {
        let config = HostConfig::default()
            .with_worker_count(0)
            .with_queue_size(0)
            .sanitized();
        assert_eq!(config, HostConfig::default());
    }

    #[test]
    fn test_zero_job_timeout_rejected() {
        let config = HostConfig::default().with_job_timeout(Duration::ZERO);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidTimeout(_))
        ));
    }

    #[test]
    fn test_deserialize_partial() {
        let config: HostConfig =
            serde_json::from_str(r#"{"worker_count":2,"job_timeout":"1m"}"#).unwrap();
        assert_eq!(config.worker_count, 2);
        assert_eq!(config.queue_size, 100);
        assert_eq!(config.job_timeout, Duration::from_secs(60));
    }
}
