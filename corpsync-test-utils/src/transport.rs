use std::{collections::HashMap, future::Future, pin::Pin, sync::Mutex};

use corpsync::{
    model::{api::ApiError, endpoint::Endpoint},
    monitor::{QueryRequest, QueryTransport},
};

/// Transport answering from canned responses and counting requests per endpoint.
///
/// Endpoints without a configured response answer with HTTP 404.
#[derive(Debug, Default)]
pub struct MockTransport {
    responses: Mutex<HashMap<Endpoint, Result<serde_json::Value, ApiError>>>,
    requests: Mutex<Vec<QueryRequest>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `endpoint` with `payload`.
    pub fn with_response(self, endpoint: Endpoint, payload: serde_json::Value) -> Self {
        self.responses.lock().unwrap().insert(endpoint, Ok(payload));
        self
    }

    /// Answer `endpoint` with `error`.
    pub fn with_error(self, endpoint: Endpoint, error: ApiError) -> Self {
        self.responses.lock().unwrap().insert(endpoint, Err(error));
        self
    }

    /// Every request received so far, in order.
    pub fn requests(&self) -> Vec<QueryRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Number of requests received for `endpoint`.
    pub fn request_count(&self, endpoint: Endpoint) -> usize {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.endpoint == endpoint)
            .count()
    }
}

impl QueryTransport for MockTransport {
    fn fetch<'a>(
        &'a self,
        request: QueryRequest,
    ) -> Pin<Box<dyn Future<Output = Result<serde_json::Value, ApiError>> + Send + 'a>> {
        self.requests.lock().unwrap().push(request);

        let response = self
            .responses
            .lock()
            .unwrap()
            .get(&request.endpoint)
            .cloned()
            .unwrap_or_else(|| {
                Err(ApiError::Http {
                    status: 404,
                    message: format!("No mock response for {}", request.endpoint),
                })
            });

        Box::pin(async move { response })
    }
}
