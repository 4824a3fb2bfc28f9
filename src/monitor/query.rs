use std::{
    future::Future,
    pin::Pin,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc, PoisonError, RwLock,
    },
};

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;

use crate::{
    model::{
        api::{ApiError, ApiResult},
        endpoint::Endpoint,
    },
    monitor::{Monitor, MonitorId, QueryRequest, QueryTransport},
};

type CompletionCallback<T> = Arc<dyn Fn(&ApiResult<T>) + Send + Sync>;

/// Recurring query against one endpoint, decoding its payload into `T`.
pub struct QueryMonitor<T> {
    id: MonitorId,
    endpoint: Endpoint,
    enabled: AtomicBool,
    callbacks: RwLock<Vec<CompletionCallback<T>>>,
    last_result: RwLock<Option<ApiResult<T>>>,
    next_poll_at: RwLock<Option<DateTime<Utc>>>,
}

impl<T> QueryMonitor<T>
where
    T: DeserializeOwned + Send + Sync + 'static,
{
    /// Creates an enabled monitor that has never been polled.
    pub fn new(endpoint: Endpoint) -> Self {
        Self {
            id: MonitorId::new(),
            endpoint,
            enabled: AtomicBool::new(true),
            callbacks: RwLock::new(Vec::new()),
            last_result: RwLock::new(None),
            next_poll_at: RwLock::new(None),
        }
    }

    /// Registers a callback invoked with every delivered result.
    pub fn on_completion<F>(&self, callback: F)
    where
        F: Fn(&ApiResult<T>) + Send + Sync + 'static,
    {
        self.callbacks
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Arc::new(callback));
    }

    /// Delivers the result of one poll cycle to every completion callback.
    ///
    /// The result becomes the monitor's last result and the next poll is scheduled one
    /// cache duration later. A disabled monitor drops the result.
    ///
    /// # Returns
    /// - `true` - Result delivered
    /// - `false` - Monitor is disabled, nothing was delivered
    pub fn complete(&self, result: ApiResult<T>) -> bool {
        if !self.is_enabled() {
            tracing::debug!(
                "Dropping {} result for disabled monitor {}",
                self.endpoint,
                self.id
            );
            return false;
        }

        // Callbacks run without holding the lock so they may register further callbacks
        let callbacks: Vec<CompletionCallback<T>> = self
            .callbacks
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();

        for callback in &callbacks {
            callback(&result);
        }

        *self
            .next_poll_at
            .write()
            .unwrap_or_else(PoisonError::into_inner) =
            Some(result.received_at() + self.endpoint.cache_duration());
        *self
            .last_result
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Some(result);

        true
    }

    /// Fetches the endpoint and completes the monitor with the decoded payload.
    ///
    /// Transport and decoding failures are delivered as error results.
    pub async fn fetch_and_complete(
        &self,
        transport: &dyn QueryTransport,
        character_id: i64,
    ) -> bool {
        let request = QueryRequest {
            endpoint: self.endpoint,
            character_id,
        };

        let outcome = match transport.fetch(request).await {
            Ok(value) => {
                serde_json::from_value::<T>(value).map_err(|e| ApiError::Decode(e.to_string()))
            }
            Err(e) => Err(e),
        };

        self.complete(ApiResult::from(outcome))
    }

    /// Clone of the last delivered result.
    pub fn last_result(&self) -> Option<ApiResult<T>>
    where
        T: Clone,
    {
        self.last_result
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl<T> Monitor for QueryMonitor<T>
where
    T: DeserializeOwned + Send + Sync + 'static,
{
    fn id(&self) -> MonitorId {
        self.id
    }

    fn endpoint(&self) -> Endpoint {
        self.endpoint
    }

    fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Acquire)
    }

    fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::Release);
    }

    fn last_polled_at(&self) -> Option<DateTime<Utc>> {
        self.last_result
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .map(ApiResult::received_at)
    }

    fn next_poll_at(&self) -> Option<DateTime<Utc>> {
        *self
            .next_poll_at
            .read()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn last_error(&self) -> Option<ApiError> {
        self.last_result
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .and_then(|result| result.error().cloned())
    }

    fn poll<'a>(
        &'a self,
        transport: &'a dyn QueryTransport,
        character_id: i64,
    ) -> Pin<Box<dyn Future<Output = bool> + Send + 'a>> {
        Box::pin(self.fetch_and_complete(transport, character_id))
    }
}
