//! HTTP client abstraction for testability.

use serde_json::Value;

use super::types::{BoxFuture, ProviderError};

/// Trait for the JSON POST operation the generative backend needs.
///
/// This abstraction allows dependency injection and easier testing by
/// enabling mock HTTP clients in tests.
pub trait HttpClient: Send + Sync {
    /// Performs an HTTP POST with a JSON body, returning the parsed JSON
    /// response.
    fn post_json<'a>(
        &'a self,
        url: &'a str,
        body: &'a Value,
    ) -> BoxFuture<'a, Result<Value, ProviderError>>;
}

/// Real HTTP client implementation using reqwest.
pub struct ReqwestClient {
    client: reqwest::Client,
}

impl ReqwestClient {
    /// Creates a new client with default configuration.
    pub fn new() -> Result<Self, ProviderError> {
        Self::with_timeout(30)
    }

    /// Creates a new client with a custom request timeout.
    pub fn with_timeout(timeout_secs: u64) -> Result<Self, ProviderError> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| ProviderError::Http(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self { client })
    }
}

impl HttpClient for ReqwestClient {
    fn post_json<'a>(
        &'a self,
        url: &'a str,
        body: &'a Value,
    ) -> BoxFuture<'a, Result<Value, ProviderError>> {
        Box::pin(async move {
            let response = self
                .client
                .post(url)
                .json(body)
                .send()
                .await
                .map_err(|e| ProviderError::Http(format!("request failed: {}", e)))?;

            let status = response.status();
            if status.as_u16() == 429 {
                return Err(ProviderError::RateLimited);
            }
            if !status.is_success() {
                return Err(ProviderError::Http(format!("HTTP {} from {}", status, url)));
            }

            response
                .json::<Value>()
                .await
                .map_err(|e| ProviderError::InvalidResponse(format!("bad JSON body: {}", e)))
        })
    }
}

#[cfg(test)]
pub mod tests {
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use super::*;

    /// Mock HTTP client for testing: replays a scripted sequence of
    /// responses, one per call.
    pub struct MockHttpClient {
        responses: Mutex<VecDeque<Result<Value, ProviderError>>>,
    }

    impl MockHttpClient {
        pub fn new() -> Self {
            Self {
                responses: Mutex::new(VecDeque::new()),
            }
        }

        /// Queue the response for the next call.
        pub fn push(&self, response: Result<Value, ProviderError>) {
            self.responses.lock().unwrap().push_back(response);
        }
    }

    impl HttpClient for MockHttpClient {
        fn post_json<'a>(
            &'a self,
            _url: &'a str,
            _body: &'a Value,
        ) -> BoxFuture<'a, Result<Value, ProviderError>> {
            let next = self
                .responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(ProviderError::Http("no scripted response".to_string())));
            Box::pin(async move { next })
        }
    }

    #[tokio::test]
    async fn test_mock_client_replays_in_order() {
        let mock = MockHttpClient::new();
        mock.push(Ok(serde_json::json!({"n": 1})));
        mock.push(Err(ProviderError::RateLimited));

        let body = serde_json::json!({});
        assert_eq!(
            mock.post_json("http://example.com", &body).await.unwrap()["n"],
            1
        );
        assert_eq!(
            mock.post_json("http://example.com", &body).await,
            Err(ProviderError::RateLimited)
        );
    }

    #[tokio::test]
    async fn test_mock_client_errors_when_exhausted() {
        let mock = MockHttpClient::new();
        let body = serde_json::json!({});
        assert!(mock.post_json("http://example.com", &body).await.is_err());
    }
}
