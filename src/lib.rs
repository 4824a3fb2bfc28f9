//! Character and corporation data synchronization for EVE Online API pollers.
//!
//! A [`Character`](subject::Character) polls market orders and industry jobs from two
//! independent scopes: its own character-level endpoints and, when one of its API keys
//! grants corporation access, its corporation's endpoints. Both scopes are merged into a
//! single view once both have reported, or once one of them is known to never report.
//!
//! The crate owns the synchronization between the two scopes. Fetching data is delegated
//! to an injected [`QueryTransport`](monitor::QueryTransport) and driven either by the
//! bundled [`Poller`](poller::Poller) or by any caller that completes monitors directly.

pub mod config;
pub mod coordinator;
pub mod error;
pub mod model;
pub mod monitor;
pub mod notification;
pub mod notifier;
pub mod poller;
pub mod subject;

pub use error::Error;

#[cfg(test)]
pub(crate) mod test_util;
