use crate::transport::error::TransportError;
use crate::transport::Transport;
use crate::weather_data::router::ApiRequest;
use log::{debug, error, warn};
use serde::de::DeserializeOwned;

/// Issues API requests through a [`Transport`], retrying failed attempts.
///
/// Every failure is retried the same way: immediately, with identical parameters,
/// until `max_retries` extra attempts have been spent. There is no backoff and no
/// distinction between retryable and permanent errors.
pub struct RetryingFetcher<T> {
    transport: T,
    api_root: String,
    max_retries: u32,
}

impl<T: Transport> RetryingFetcher<T> {
    /// `api_root` is the URL that request paths are appended to, e.g.
    /// `http://host/meteostat`.
    pub fn new(transport: T, api_root: impl Into<String>, max_retries: u32) -> Self {
        Self {
            transport,
            api_root: api_root.into(),
            max_retries,
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn url_for(&self, request: &ApiRequest) -> String {
        format!("{}{}", self.api_root, request.path)
    }

    /// Fetches `request` and decodes the body into `R`.
    ///
    /// A body that does not decode counts as a failed attempt, like a network or
    /// status error.
    ///
    /// # Errors
    ///
    /// Returns the error of the last attempt once the retry budget is exhausted.
    pub async fn fetch<R: DeserializeOwned>(&self, request: &ApiRequest) -> Result<R, TransportError> {
        let url = self.url_for(request);
        let mut retries_left = self.max_retries;

        loop {
            debug!("GET {} {:?}", url, request.params);
            match self.attempt(&url, request).await {
                Ok(body) => return Ok(body),
                Err(e) if retries_left > 0 => {
                    warn!(
                        "Request to {} failed, retrying ({} retries left): {}",
                        url, retries_left, e
                    );
                    retries_left -= 1;
                }
                Err(e) => {
                    error!(
                        "Request to {} failed after {} attempts: {}",
                        url,
                        self.max_retries + 1,
                        e
                    );
                    return Err(e);
                }
            }
        }
    }

    async fn attempt<R: DeserializeOwned>(
        &self,
        url: &str,
        request: &ApiRequest,
    ) -> Result<R, TransportError> {
        let body = self.transport.get(url, &request.params).await?;
        serde_json::from_value(body).map_err(|e| TransportError::ResponseShape(url.to_string(), e))
    }
}
