//! Runtime configuration.
//!
//! Values are read from environment variables, all of which are optional. [`Config::load`]
//! additionally loads a `.env` file when one is present.

pub mod endpoint;


use std::str::FromStr;

use crate::{error::config::ConfigError, poller::PollerConfig};

/// Comma separated list of API error codes that never raise a notification.
pub const SUPPRESSED_ERROR_CODES_VAR: &str = "CORPSYNC_SUPPRESSED_ERROR_CODES";
/// Milliseconds between two poll passes.
pub const POLL_INTERVAL_MS_VAR: &str = "CORPSYNC_POLL_INTERVAL_MS";
/// Maximum number of monitors polled at the same time.
pub const MAX_CONCURRENT_POLLS_VAR: &str = "CORPSYNC_MAX_CONCURRENT_POLLS";
/// Seconds to wait for the poll dispatcher to stop.
pub const SHUTDOWN_TIMEOUT_SECS_VAR: &str = "CORPSYNC_SHUTDOWN_TIMEOUT_SECS";

/// Top level configuration.
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub sync: SyncConfig,
    pub poller: PollerConfig,
}

/// Per character synchronization policy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncConfig {
    /// API error codes treated as benign; results carrying them are never notified.
    pub suppressed_error_codes: Vec<i32>,
}

impl SyncConfig {
    /// Returns whether errors with the given API code are suppressed.
    pub fn is_suppressed(&self, code: i32) -> bool {
        self.suppressed_error_codes.contains(&code)
    }
}

impl Config {
    /// Loads a `.env` file if present, then reads the configuration from the environment.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Self::from_env()
    }

    /// Reads the configuration from the environment, falling back to defaults for
    /// variables that are not set.
    ///
    /// # Returns
    /// - `Ok(Config)` - All present variables parsed successfully
    /// - `Err(ConfigError::InvalidEnvValue)` - A variable is set but cannot be parsed
    pub fn from_env() -> Result<Self, ConfigError> {
        let suppressed_error_codes = match std::env::var(SUPPRESSED_ERROR_CODES_VAR) {
            Ok(value) => parse_error_codes(SUPPRESSED_ERROR_CODES_VAR, &value)?,
            Err(_) => Vec::new(),
        };

        let defaults = PollerConfig::default();
        let poller = PollerConfig {
            poll_interval_ms: env_or(POLL_INTERVAL_MS_VAR, defaults.poll_interval_ms)?,
            max_concurrent_polls: env_or(MAX_CONCURRENT_POLLS_VAR, defaults.max_concurrent_polls)?,
            shutdown_timeout_seconds: env_or(
                SHUTDOWN_TIMEOUT_SECS_VAR,
                defaults.shutdown_timeout_seconds,
            )?,
        };

        if poller.max_concurrent_polls == 0 {
            return Err(ConfigError::InvalidEnvValue {
                var: MAX_CONCURRENT_POLLS_VAR.to_string(),
                reason: "must be at least 1".to_string(),
            });
        }

        Ok(Self {
            sync: SyncConfig {
                suppressed_error_codes,
            },
            poller,
        })
    }
}

/// Reads and parses an optional environment variable.
fn env_or<T>(var: &str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(var) {
        Ok(value) => parse_value(var, &value),
        Err(_) => Ok(default),
    }
}

fn parse_value<T>(var: &str, value: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvValue {
            var: var.to_string(),
            reason: format!("{:?}: {}", value, e),
        })
}

/// Parses a comma separated list of API error codes, ignoring empty entries.
pub(crate) fn parse_error_codes(var: &str, value: &str) -> Result<Vec<i32>, ConfigError> {
    value
        .split(',')
        .map(str::trim)
        .filter(|code| !code.is_empty())
        .map(|code| parse_value(var, code))
        .collect()
}
