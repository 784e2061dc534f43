//! HTTP Fetch Port - reqwest-backed implementation of FetchPort.
//!
//! # Configuration
//!
//! ```ignore
//! let config = HttpFetchConfig::new("https://hacker-news.firebaseio.com/v0/item/8863.json")
//!     .with_timeout(Duration::from_secs(10));
//!
//! let port = HttpFetchPort::new(config)?;
//! let raw = port.fetch(&FetchParams::new()).await?;
//! ```
//!
//! GET requests carry params as a query string, POST requests as a JSON
//! body. The port never retries; a failed call surfaces once as a
//! `TransportError`.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::ports::{FetchParams, FetchPort, TransportError};

/// HTTP method used for every request the port sends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    #[default]
    #[serde(alias = "get")]
    Get,
    #[serde(alias = "post")]
    Post,
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HttpMethod::Get => write!(f, "GET"),
            HttpMethod::Post => write!(f, "POST"),
        }
    }
}

impl FromStr for HttpMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Ok(HttpMethod::Get),
            "POST" => Ok(HttpMethod::Post),
            other => Err(format!("unsupported HTTP method: {}", other)),
        }
    }
}

/// Configuration for the HTTP fetch port.
#[derive(Debug, Clone)]
pub struct HttpFetchConfig {
    /// Endpoint every request is sent to.
    pub base_url: String,
    pub method: HttpMethod,
    /// Request timeout (default: 30s).
    pub timeout: Duration,
    /// Optional bearer token for authenticated endpoints.
    bearer_token: Option<Secret<String>>,
}

impl HttpFetchConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            method: HttpMethod::Get,
            timeout: Duration::from_secs(30),
            bearer_token: None,
        }
    }

    pub fn with_method(mut self, method: HttpMethod) -> Self {
        self.method = method;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_bearer_token(mut self, token: impl Into<String>) -> Self {
        self.bearer_token = Some(Secret::new(token.into()));
        self
    }

    fn bearer_token(&self) -> Option<&str> {
        self.bearer_token.as_ref().map(|t| t.expose_secret().as_str())
    }
}

/// Fetch port that calls a single HTTP endpoint and returns its JSON body.
pub struct HttpFetchPort {
    config: HttpFetchConfig,
    client: Client,
}

impl HttpFetchPort {
    pub fn new(config: HttpFetchConfig) -> Result<Self, TransportError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| TransportError::network(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    pub fn config(&self) -> &HttpFetchConfig {
        &self.config
    }

    fn build_request(&self, params: &FetchParams) -> RequestBuilder {
        let request = match self.config.method {
            HttpMethod::Get => self
                .client
                .get(&self.config.base_url)
                .query(&params.query_pairs()),
            HttpMethod::Post => self
                .client
                .post(&self.config.base_url)
                .json(&params.as_json()),
        };

        match self.config.bearer_token() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    fn map_send_error(&self, e: reqwest::Error) -> TransportError {
        if e.is_timeout() {
            TransportError::Timeout {
                timeout_secs: self.config.timeout.as_secs(),
            }
        } else if e.is_connect() {
            TransportError::network(format!("connection failed: {}", e))
        } else {
            TransportError::network(e.to_string())
        }
    }

    async fn read_body(&self, response: Response) -> Result<Value, TransportError> {
        let status = response.status();
        let body = response.text().await.map_err(|e| self.map_send_error(e))?;

        if !status.is_success() {
            return Err(TransportError::status(status.as_u16(), &body));
        }

        serde_json::from_str(&body).map_err(|e| TransportError::InvalidBody(e.to_string()))
    }
}

#[async_trait]
impl FetchPort for HttpFetchPort {
    async fn fetch(&self, params: &FetchParams) -> Result<Value, TransportError> {
        tracing::debug!(
            method = %self.config.method,
            url = %self.config.base_url,
            params = params.len(),
            "sending fetch request"
        );

        let response = self
            .build_request(params)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        self.read_body(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::sync::oneshot;

    /// Serves one canned HTTP response and hands back the raw request text.
    async fn serve_once(status: u16, body: &'static str) -> (String, oneshot::Receiver<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (tx, rx) = oneshot::channel();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let _ = tx.send(read_request(&mut socket).await);

            let response = format!(
                "HTTP/1.1 {} X\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            let _ = socket.shutdown().await;
        });

        (format!("http://{}/item", addr), rx)
    }

    /// Reads headers plus a `Content-Length` body, however the client splits them.
    async fn read_request(socket: &mut tokio::net::TcpStream) -> String {
        let mut data = Vec::new();
        let mut buf = [0u8; 4096];
        loop {
            let n = socket.read(&mut buf).await.unwrap();
            if n == 0 {
                break;
            }
            data.extend_from_slice(&buf[..n]);

            let text = String::from_utf8_lossy(&data).to_string();
            if let Some(header_end) = text.find("\r\n\r\n") {
                let content_length = text[..header_end]
                    .lines()
                    .filter_map(|line| line.split_once(':'))
                    .find(|(name, _)| name.eq_ignore_ascii_case("content-length"))
                    .and_then(|(_, value)| value.trim().parse::<usize>().ok())
                    .unwrap_or(0);
                if data.len() >= header_end + 4 + content_length {
                    return text;
                }
            }
        }
        String::from_utf8_lossy(&data).to_string()
    }

    #[test]
    fn method_parses_case_insensitively() {
        assert_eq!("post".parse::<HttpMethod>(), Ok(HttpMethod::Post));
        assert_eq!("GET".parse::<HttpMethod>(), Ok(HttpMethod::Get));
        assert!("PATCH".parse::<HttpMethod>().is_err());
    }

    #[test]
    fn config_defaults_to_get_without_token() {
        let config = HttpFetchConfig::new("http://localhost");
        assert_eq!(config.method, HttpMethod::Get);
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert!(config.bearer_token().is_none());
    }

    #[test]
    fn config_debug_redacts_token() {
        let config = HttpFetchConfig::new("http://localhost").with_bearer_token("s3cret");
        assert!(!format!("{:?}", config).contains("s3cret"));
    }

    #[tokio::test]
    async fn get_returns_parsed_json_and_sends_query() {
        let (url, request) = serve_once(200, r#"{"id":8863}"#).await;
        let port = HttpFetchPort::new(HttpFetchConfig::new(url)).unwrap();

        let result = port
            .fetch(&FetchParams::new().with("print", "pretty"))
            .await;

        assert_eq!(result, Ok(json!({ "id": 8863 })));
        let request = request.await.unwrap();
        assert!(request.starts_with("GET /item?print=pretty"));
    }

    #[tokio::test]
    async fn post_sends_json_body_and_bearer_token() {
        let (url, request) = serve_once(200, "[]").await;
        let config = HttpFetchConfig::new(url)
            .with_method(HttpMethod::Post)
            .with_bearer_token("abc");
        let port = HttpFetchPort::new(config).unwrap();

        let result = port.fetch(&FetchParams::new().with("page", 2)).await;

        assert_eq!(result, Ok(json!([])));
        let request = request.await.unwrap();
        assert!(request.starts_with("POST /item"));
        assert!(request.to_lowercase().contains("authorization: bearer abc"));
        assert!(request.contains(r#"{"page":2}"#));
    }

    #[tokio::test]
    async fn non_success_status_is_status_error() {
        let (url, _request) = serve_once(500, "boom").await;
        let port = HttpFetchPort::new(HttpFetchConfig::new(url)).unwrap();

        let result = port.fetch(&FetchParams::new()).await;

        assert_eq!(
            result,
            Err(TransportError::Status {
                status: 500,
                body: "boom".to_string()
            })
        );
    }

    #[tokio::test]
    async fn non_json_body_is_invalid_body() {
        let (url, _request) = serve_once(200, "<html>").await;
        let port = HttpFetchPort::new(HttpFetchConfig::new(url)).unwrap();

        let result = port.fetch(&FetchParams::new()).await;

        assert!(matches!(result, Err(TransportError::InvalidBody(_))));
    }

    #[tokio::test]
    async fn refused_connection_is_network_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let port = HttpFetchPort::new(HttpFetchConfig::new(format!("http://{}/", addr))).unwrap();
        let result = port.fetch(&FetchParams::new()).await;

        assert!(matches!(result, Err(TransportError::Network(_))));
    }

    #[tokio::test]
    async fn slow_server_is_timeout() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (_socket, _) = listener.accept().await.unwrap();
            tokio::time::sleep(Duration::from_secs(5)).await;
        });

        let config = HttpFetchConfig::new(format!("http://{}/", addr))
            .with_timeout(Duration::from_millis(100));
        let port = HttpFetchPort::new(config).unwrap();
        let result = port.fetch(&FetchParams::new()).await;

        assert_eq!(result, Err(TransportError::Timeout { timeout_secs: 0 }));
    }
}
