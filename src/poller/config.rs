use std::time::Duration;

/// Configuration for the poller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollerConfig {
    /// How long to wait between two passes over the watched characters (milliseconds).
    pub poll_interval_ms: u64,

    /// Maximum number of monitors polled simultaneously.
    ///
    /// Keep this below the transport's rate limit; each poll holds one request slot.
    pub max_concurrent_polls: usize,

    /// Maximum time to wait for the dispatcher to shutdown (seconds).
    /// If the dispatcher doesn't stop within this time, a warning is logged.
    pub shutdown_timeout_seconds: u64,
}

impl PollerConfig {
    /// Create a new configuration with sensible defaults
    ///
    /// # Arguments
    /// * `max_concurrent_polls` - Maximum monitors polled at once
    pub fn new(max_concurrent_polls: usize) -> Self {
        Self {
            max_concurrent_polls: max_concurrent_polls.max(1),
            poll_interval_ms: 1000,      // 1 second between passes
            shutdown_timeout_seconds: 5, // 5 seconds to wait for dispatcher shutdown
        }
    }

    /// Get poll interval as Duration
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// Get shutdown timeout as Duration
    pub fn shutdown_timeout(&self) -> Duration {
        Duration::from_secs(self.shutdown_timeout_seconds)
    }
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self::new(8)
    }
}
