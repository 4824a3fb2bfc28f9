//! Query monitors and the per-character registry that holds them.
//!
//! A monitor is one recurring query against one [`Endpoint`]. Monitors are created once by
//! the coordinators and never recreated; the coordinators control whether a monitor is
//! polled by adding it to or removing it from the character's [`MonitorRegistry`].

mod query;
mod registry;
mod transport;


pub use query::QueryMonitor;
pub use registry::MonitorRegistry;
pub use transport::{QueryRequest, QueryTransport};

use std::{fmt, future::Future, pin::Pin};

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::model::{api::ApiError, endpoint::Endpoint};

/// Unique identifier of a monitor, used for registry membership.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MonitorId(Uuid);

impl MonitorId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for MonitorId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for MonitorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Type-erased view of a [`QueryMonitor`] as stored in a [`MonitorRegistry`].
pub trait Monitor: Send + Sync {
    fn id(&self) -> MonitorId;

    fn endpoint(&self) -> Endpoint;

    /// Disabled monitors are never polled and never fire their completion callbacks.
    fn is_enabled(&self) -> bool;

    fn set_enabled(&self, enabled: bool);

    /// When the last completion was delivered, if any.
    fn last_polled_at(&self) -> Option<DateTime<Utc>>;

    /// When the monitor is next due; `None` means it has never been polled and is due now.
    fn next_poll_at(&self) -> Option<DateTime<Utc>>;

    /// Error carried by the last delivered result, if it was an error.
    fn last_error(&self) -> Option<ApiError>;

    /// Fetches the endpoint through `transport` and completes the monitor with the result.
    ///
    /// Resolves to whether the completion was delivered (false when disabled).
    fn poll<'a>(
        &'a self,
        transport: &'a dyn QueryTransport,
        character_id: i64,
    ) -> Pin<Box<dyn Future<Output = bool> + Send + 'a>>;

    /// Whether the monitor should be polled at `now`.
    fn is_due(&self, now: DateTime<Utc>) -> bool {
        self.is_enabled() && self.next_poll_at().map_or(true, |next| next <= now)
    }
}
