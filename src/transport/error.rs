use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("Network request failed for {0}")]
    NetworkRequest(String, #[source] reqwest::Error),

    #[error("HTTP request failed for {url} with status {status}")]
    HttpStatus {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("Failed to read response body from {0}")]
    ResponseBody(String, #[source] reqwest::Error),

    #[error("Unexpected response shape from {0}")]
    ResponseShape(String, #[source] serde_json::Error),

    #[error("Failed to build HTTP client")]
    ClientBuild(#[source] reqwest::Error),

    #[error("API key contains characters that are not allowed in a header")]
    InvalidApiKey,
}

impl TransportError {
    /// The HTTP status, when the server answered with one.
    pub fn status(&self) -> Option<reqwest::StatusCode> {
        match self {
            TransportError::HttpStatus { status, .. } => Some(*status),
            TransportError::NetworkRequest(_, e) | TransportError::ResponseBody(_, e) => e.status(),
            _ => None,
        }
    }
}
