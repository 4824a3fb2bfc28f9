//! Error types for the corpsync crate.
//!
//! API and transport failures are not Rust errors here: they travel inside
//! [`ApiResult`](crate::model::api::ApiResult) to the completion handlers, which decide
//! whether to notify. The types in this module cover failures of the crate's own
//! machinery, such as configuration loading or a
//! poll dispatcher that panicked.

pub mod config;

use thiserror::Error;

use crate::error::config::ConfigError;

/// Main error type for the corpsync crate.
///
/// Aggregates the domain-specific error types into a single type. `#[from]` conversions
/// allow `?` to lift a [`ConfigError`] into an [`Error`].
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error (invalid environment variables).
    #[error(transparent)]
    ConfigError(#[from] ConfigError),
    /// Internal error indicating a bug in corpsync's code.
    ///
    /// This error should never occur in normal operation and indicates a programming error
    /// that needs to be reported as a GitHub issue.
    #[error("Internal error with corpsync's code, please open a GitHub issue as this indicates a bug: {0:?}")]
    InternalError(String),
}
