//! Scripted transport for testing without API access.
//!
//! Responses are registered per URL and parameter list and served as if they came
//! from the Meteostat API. Every call is recorded so tests can assert on the exact
//! requests a query produced.

use super::error::TransportError;
use super::{QueryParam, Transport};
use reqwest::StatusCode;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio::sync::Mutex;

/// A request as seen by the [`MockTransport`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RecordedCall {
    pub url: String,
    pub params: Vec<(String, String)>,
}

impl RecordedCall {
    pub fn new(url: impl Into<String>, params: &[(&str, &str)]) -> Self {
        Self {
            url: url.into(),
            params: params
                .iter()
                .map(|(key, value)| (key.to_string(), value.to_string()))
                .collect(),
        }
    }

    fn from_request(url: &str, params: &[QueryParam]) -> Self {
        Self {
            url: url.to_string(),
            params: params
                .iter()
                .map(|(key, value)| (key.to_string(), value.clone()))
                .collect(),
        }
    }
}

#[derive(Debug, Clone)]
struct ScriptedResponse {
    body: Value,
    delay: Option<Duration>,
}

/// A [`Transport`] that serves registered JSON bodies.
///
/// Requests without a registered body fail with `404 Not Found`, unless a fallback
/// body was set.
#[derive(Debug, Default)]
pub struct MockTransport {
    routes: HashMap<RecordedCall, ScriptedResponse>,
    fallback: Option<Value>,
    failures_remaining: AtomicUsize,
    calls: Mutex<Vec<RecordedCall>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serves `body` for requests to `url` with exactly `params`, in that order.
    pub fn respond(self, url: impl Into<String>, params: &[(&str, &str)], body: Value) -> Self {
        self.respond_after(url, params, body, None)
    }

    /// Like [`MockTransport::respond`], but waits `delay` before answering.
    pub fn respond_after(
        mut self,
        url: impl Into<String>,
        params: &[(&str, &str)],
        body: Value,
        delay: Option<Duration>,
    ) -> Self {
        self.routes.insert(
            RecordedCall::new(url, params),
            ScriptedResponse { body, delay },
        );
        self
    }

    /// Serves `body` for any request without a registered route.
    pub fn fallback(mut self, body: Value) -> Self {
        self.fallback = Some(body);
        self
    }

    /// Makes the next `count` calls fail with `503 Service Unavailable`.
    pub fn fail_next(self, count: usize) -> Self {
        self.failures_remaining.store(count, Ordering::SeqCst);
        self
    }

    /// All calls received so far, in arrival order.
    pub async fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().await.clone()
    }

    pub async fn call_count(&self) -> usize {
        self.calls.lock().await.len()
    }

    fn take_failure(&self) -> bool {
        self.failures_remaining
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |remaining| {
                remaining.checked_sub(1)
            })
            .is_ok()
    }
}

impl Transport for MockTransport {
    async fn get(&self, url: &str, params: &[QueryParam]) -> Result<Value, TransportError> {
        let call = RecordedCall::from_request(url, params);
        self.calls.lock().await.push(call.clone());

        if self.take_failure() {
            return Err(TransportError::HttpStatus {
                url: url.to_string(),
                status: StatusCode::SERVICE_UNAVAILABLE,
            });
        }

        let scripted = match self.routes.get(&call) {
            Some(scripted) => scripted.clone(),
            None => match &self.fallback {
                Some(body) => ScriptedResponse {
                    body: body.clone(),
                    delay: None,
                },
                None => {
                    return Err(TransportError::HttpStatus {
                        url: url.to_string(),
                        status: StatusCode::NOT_FOUND,
                    })
                }
            },
        };

        if let Some(delay) = scripted.delay {
            tokio::time::sleep(delay).await;
        }
        Ok(scripted.body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn serves_registered_routes() {
        let transport = MockTransport::new().respond(
            "http://api/a",
            &[("station", "1")],
            json!({"data": []}),
        );

        let body = transport
            .get("http://api/a", &[("station", "1".to_string())])
            .await
            .unwrap();
        assert_eq!(body, json!({"data": []}));

        let missing = transport
            .get("http://api/a", &[("station", "2".to_string())])
            .await;
        assert_eq!(
            missing.unwrap_err().status(),
            Some(StatusCode::NOT_FOUND)
        );

        assert_eq!(
            transport.calls().await,
            [
                RecordedCall::new("http://api/a", &[("station", "1")]),
                RecordedCall::new("http://api/a", &[("station", "2")]),
            ]
        );
    }

    #[tokio::test]
    async fn injected_failures_come_first() {
        let transport = MockTransport::new().fallback(json!({})).fail_next(2);

        assert!(transport.get("http://api/a", &[]).await.is_err());
        assert!(transport.get("http://api/a", &[]).await.is_err());
        assert!(transport.get("http://api/a", &[]).await.is_ok());
        assert_eq!(transport.call_count().await, 3);
    }
}
