use std::{future::Future, pin::Pin};

use crate::model::{api::ApiError, endpoint::Endpoint};

/// A single fetch issued by a monitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryRequest {
    pub endpoint: Endpoint,
    /// Character the query is issued on behalf of.
    pub character_id: i64,
}

/// Transport performing the actual API request.
///
/// Retries, rate limiting, and credential selection belong to the implementation. A
/// response is returned as raw JSON and decoded by the monitor.
pub trait QueryTransport: Send + Sync {
    fn fetch<'a>(
        &'a self,
        request: QueryRequest,
    ) -> Pin<Box<dyn Future<Output = Result<serde_json::Value, ApiError>> + Send + 'a>>;
}
