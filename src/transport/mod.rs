//! The outbound HTTP seam.
//!
//! Everything that talks to the network goes through [`Transport`], so the query
//! logic can run against [`ReqwestTransport`] in production and against
//! [`mock::MockTransport`] in tests.

pub mod error;
pub mod mock;

use crate::settings::DatasourceSettings;
use error::TransportError;
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::Client;
use serde_json::Value;
use std::future::Future;

/// Header carrying the Meteostat API key.
pub const API_KEY_HEADER: &str = "x-api-key";

/// One query string parameter, e.g. `("station", "10637")`.
pub type QueryParam = (&'static str, String);

/// Performs GET requests and returns the decoded JSON body.
///
/// Implementations must be usable from concurrent requests; batch queries issue
/// one call per target at the same time.
pub trait Transport: Send + Sync {
    fn get(
        &self,
        url: &str,
        params: &[QueryParam],
    ) -> impl Future<Output = Result<Value, TransportError>> + Send;
}

/// [`Transport`] backed by a `reqwest` client.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Builds the client, attaching the API key header and timeout from `settings`.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::InvalidApiKey`] if the key is not a valid header
    /// value and [`TransportError::ClientBuild`] if `reqwest` cannot build the client.
    pub fn new(settings: &DatasourceSettings) -> Result<Self, TransportError> {
        let mut headers = HeaderMap::new();
        if let Some(api_key) = &settings.api_key {
            let mut value =
                HeaderValue::from_str(api_key).map_err(|_| TransportError::InvalidApiKey)?;
            value.set_sensitive(true);
            headers.insert(API_KEY_HEADER, value);
        }

        let mut builder = Client::builder().default_headers(headers);
        if let Some(timeout) = settings.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(TransportError::ClientBuild)?;

        Ok(Self { client })
    }

    /// Wraps an already configured client.
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

impl Transport for ReqwestTransport {
    async fn get(&self, url: &str, params: &[QueryParam]) -> Result<Value, TransportError> {
        let response = self
            .client
            .get(url)
            .query(params)
            .send()
            .await
            .map_err(|e| TransportError::NetworkRequest(url.to_string(), e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::HttpStatus {
                url: url.to_string(),
                status,
            });
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| TransportError::ResponseBody(url.to_string(), e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::sync::oneshot;

    /// Serves a single HTTP response and hands back the raw request head.
    async fn serve_once(status_line: &'static str, body: &'static str) -> (String, oneshot::Receiver<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap();
        let (sender, receiver) = oneshot::channel();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut head = Vec::new();
            let mut buffer = [0u8; 1024];
            while !head.windows(4).any(|window| window == b"\r\n\r\n") {
                let read = socket.read(&mut buffer).await.unwrap();
                if read == 0 {
                    break;
                }
                head.extend_from_slice(&buffer[..read]);
            }
            let response = format!(
                "{status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            let _ = sender.send(String::from_utf8_lossy(&head).to_string());
        });

        (format!("http://{address}"), receiver)
    }

    #[tokio::test]
    async fn sends_params_and_api_key() {
        let (base, request_head) = serve_once("HTTP/1.1 200 OK", r#"{"data": []}"#).await;
        let settings = DatasourceSettings::builder()
            .url(base)
            .api_key("abc123".to_string())
            .build();
        let transport = ReqwestTransport::new(&settings).unwrap();

        let body = transport
            .get(
                &format!("{}/v2/stations/hourly", settings.api_root()),
                &[
                    ("station", "10637".to_string()),
                    ("start", "2020-02-01".to_string()),
                    ("end", "2020-02-03".to_string()),
                ],
            )
            .await
            .unwrap();
        assert_eq!(body, json!({"data": []}));

        let head = request_head.await.unwrap().to_lowercase();
        assert!(head.starts_with(
            "get /meteostat/v2/stations/hourly?station=10637&start=2020-02-01&end=2020-02-03 http/1.1"
        ));
        assert!(head.contains("x-api-key: abc123"));
    }

    #[tokio::test]
    async fn error_status_is_reported() {
        let (base, _request_head) =
            serve_once("HTTP/1.1 503 Service Unavailable", r#"{"error": "busy"}"#).await;
        let transport = ReqwestTransport::with_client(Client::new());

        let result = transport.get(&format!("{base}/meteostat/v2/point/daily"), &[]).await;
        match result {
            Err(error) => assert_eq!(error.status(), Some(reqwest::StatusCode::SERVICE_UNAVAILABLE)),
            Ok(body) => panic!("expected an error, got {body}"),
        }
    }

    #[test]
    fn builds_client_with_api_key() {
        let settings = DatasourceSettings::builder()
            .url("http://localhost")
            .api_key("abc123".to_string())
            .build();
        assert!(ReqwestTransport::new(&settings).is_ok());
    }

    #[test]
    fn rejects_api_key_with_newline() {
        let settings = DatasourceSettings::builder()
            .url("http://localhost")
            .api_key("abc\n123".to_string())
            .build();
        assert!(matches!(
            ReqwestTransport::new(&settings),
            Err(TransportError::InvalidApiKey)
        ));
    }

    #[tokio::test]
    async fn unreachable_host_is_a_network_error() {
        let settings = DatasourceSettings::builder()
            .url("http://127.0.0.1:9")
            .timeout(std::time::Duration::from_secs(2))
            .build();
        let transport = ReqwestTransport::new(&settings).unwrap();

        let result = transport
            .get("http://127.0.0.1:9/meteostat/v2/stations/search", &[("query", "x".to_string())])
            .await;
        assert!(matches!(result, Err(TransportError::NetworkRequest(..))));
    }
}
