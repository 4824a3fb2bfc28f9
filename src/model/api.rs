//! Results delivered by query monitors.

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Error reported by the API or the transport in place of a payload.
///
/// These are values, not failures of the crate: a monitor delivers them to its completion
/// callbacks like any other result.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The API answered with a non-success HTTP status.
    #[error("API returned HTTP {status}: {message}")]
    Http { status: u16, message: String },
    /// The API answered with an error document carrying an API error code.
    #[error("API error {code}: {message}")]
    Api { code: i32, message: String },
    /// The game database behind the API is temporarily out of service.
    #[error("EVE database is temporarily unavailable")]
    DatabaseUnavailable,
    /// The request never reached the API.
    #[error("Failed to reach the API: {0}")]
    Transport(String),
    /// The payload could not be decoded into the expected records.
    #[error("Failed to decode API payload: {0}")]
    Decode(String),
}

impl ApiError {
    /// API error code, if the API provided one.
    pub fn code(&self) -> Option<i32> {
        match self {
            ApiError::Api { code, .. } => Some(*code),
            _ => None,
        }
    }
}

/// Outcome of one poll cycle of a monitor.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResult<T> {
    outcome: Result<T, ApiError>,
    received_at: DateTime<Utc>,
}

impl<T> ApiResult<T> {
    pub fn success(payload: T) -> Self {
        Self {
            outcome: Ok(payload),
            received_at: Utc::now(),
        }
    }

    pub fn failure(error: ApiError) -> Self {
        Self {
            outcome: Err(error),
            received_at: Utc::now(),
        }
    }

    pub fn error(&self) -> Option<&ApiError> {
        self.outcome.as_ref().err()
    }

    pub fn payload(&self) -> Option<&T> {
        self.outcome.as_ref().ok()
    }

    pub fn received_at(&self) -> DateTime<Utc> {
        self.received_at
    }
}

impl<T> From<Result<T, ApiError>> for ApiResult<T> {
    fn from(outcome: Result<T, ApiError>) -> Self {
        Self {
            outcome,
            received_at: Utc::now(),
        }
    }
}
