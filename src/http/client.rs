//! HTTP client for API smoke testing
//!
//! Thin wrapper over `reqwest` that carries a base URL and default headers,
//! classifies transport failures, and records how long each response took.

use anyhow::{Context, Result};
use reqwest::{
    header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE},
    Client, Method, StatusCode,
};
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

use crate::utils::Timer;

/// HTTP client errors
#[derive(Error, Debug)]
pub enum HttpError {
    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Timeout after {0} seconds")]
    Timeout(u64),

    #[error("Connection refused to {0}")]
    ConnectionRefused(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("HTTP {status} {reason} for url ({url})")]
    Status {
        status: u16,
        reason: String,
        url: String,
    },

    #[error("Invalid JSON in response body: {0}")]
    Decode(String),
}

/// HTTP client bound to one API deployment
#[derive(Clone, Debug)]
pub struct HttpClient {
    client: Client,
    base_url: String,
    default_headers: HeaderMap,
    timeout_secs: u64,
}

impl HttpClient {
    /// Create a client for `base_url`; trailing slashes are stripped
    pub fn new(base_url: &str, timeout_secs: u64) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            default_headers: HeaderMap::new(),
            timeout_secs,
        })
    }

    /// Add default header
    pub fn default_header(mut self, key: impl AsRef<str>, value: impl AsRef<str>) -> Result<Self> {
        let header_name =
            HeaderName::from_bytes(key.as_ref().as_bytes()).context("Invalid header name")?;
        let header_value = HeaderValue::from_str(value.as_ref()).context("Invalid header value")?;
        self.default_headers.insert(header_name, header_value);
        Ok(self)
    }

    /// Send `Content-Type: application/json` on every request
    pub fn json_content(self) -> Result<Self> {
        self.default_header(CONTENT_TYPE, "application/json")
    }

    /// Send `Authorization: Bearer <token>` on every request
    pub fn bearer_auth(self, token: &str) -> Result<Self> {
        self.default_header(AUTHORIZATION, format!("Bearer {token}"))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build full URL
    fn build_url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            path.to_string()
        } else {
            format!("{}{}", self.base_url, path)
        }
    }

    /// Send HTTP request
    pub async fn send(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
        let url = self.build_url(&request.path);
        debug!("Sending {} request to {}", request.method, url);

        let mut req_builder = self
            .client
            .request(request.method.clone(), &url)
            .headers(self.default_headers.clone());

        if let Some(body) = request.body {
            req_builder = req_builder.body(body);
        }

        let timer = Timer::start(format!("{} {}", request.method, url));

        let response = req_builder.send().await.map_err(|e| {
            if e.is_timeout() {
                HttpError::Timeout(self.timeout_secs)
            } else if e.is_connect() {
                HttpError::ConnectionRefused(url.clone())
            } else if e.is_builder() {
                HttpError::InvalidUrl(url.clone())
            } else {
                HttpError::RequestFailed(e.to_string())
            }
        })?;

        let elapsed = timer.stop();
        let status = response.status();

        let body = response
            .text()
            .await
            .map_err(|e| HttpError::RequestFailed(e.to_string()))?;

        debug!(
            "Response: {} {} in {}ms",
            status.as_u16(),
            status.canonical_reason().unwrap_or(""),
            elapsed.as_millis()
        );

        Ok(HttpResponse {
            url,
            status,
            body,
            elapsed,
        })
    }

    /// Convenience method for GET request
    pub async fn get(&self, path: &str) -> Result<HttpResponse, HttpError> {
        self.send(HttpRequest::get(path)).await
    }

    /// POST a JSON-serializable payload
    pub async fn post_json<T: Serialize>(
        &self,
        path: &str,
        payload: &T,
    ) -> Result<HttpResponse, HttpError> {
        let body =
            serde_json::to_string(payload).map_err(|e| HttpError::RequestFailed(e.to_string()))?;
        self.send(HttpRequest::post(path).body(body)).await
    }
}

/// HTTP request builder
#[derive(Clone, Debug)]
pub struct HttpRequest {
    pub method: Method,
    pub path: String,
    pub body: Option<String>,
}

impl HttpRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            body: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }
}

/// HTTP response
#[derive(Clone, Debug)]
pub struct HttpResponse {
    pub url: String,
    pub status: StatusCode,
    pub body: String,
    /// Time until the response headers arrived
    pub elapsed: Duration,
}

impl HttpResponse {
    pub fn status_code(&self) -> u16 {
        self.status.as_u16()
    }

    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    pub fn response_time_secs(&self) -> f64 {
        self.elapsed.as_secs_f64()
    }

    /// Turn a non-2xx status into an error
    pub fn error_for_status(self) -> Result<Self, HttpError> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(HttpError::Status {
                status: self.status.as_u16(),
                reason: self.status.canonical_reason().unwrap_or("").to_string(),
                url: self.url,
            })
        }
    }

    /// Parse the body as JSON
    pub fn json(&self) -> Result<Value, HttpError> {
        serde_json::from_str(&self.body).map_err(|e| HttpError::Decode(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(status: u16, body: &str) -> HttpResponse {
        HttpResponse {
            url: "http://localhost:3000/api/public/status".to_string(),
            status: StatusCode::from_u16(status).unwrap(),
            body: body.to_string(),
            elapsed: Duration::from_millis(250),
        }
    }

    #[test]
    fn test_base_url_trailing_slash_stripped() {
        let client = HttpClient::new("http://localhost:3000/api/public//", 5).unwrap();
        assert_eq!(client.base_url(), "http://localhost:3000/api/public");
        assert_eq!(
            client.build_url("/status"),
            "http://localhost:3000/api/public/status"
        );
        assert_eq!(
            client.build_url("https://other.example.com/x"),
            "https://other.example.com/x"
        );
    }

    #[test]
    fn test_default_headers() {
        let client = HttpClient::new("http://localhost", 5)
            .unwrap()
            .json_content()
            .unwrap()
            .bearer_auth("sk-test")
            .unwrap();

        assert!(client.default_headers.contains_key("authorization"));
        assert!(client.default_headers.contains_key("content-type"));
        assert_eq!(
            client.default_headers.get(AUTHORIZATION).unwrap(),
            "Bearer sk-test"
        );
    }

    #[test]
    fn test_invalid_header_value_rejected() {
        let result = HttpClient::new("http://localhost", 5)
            .unwrap()
            .bearer_auth("bad\nkey");
        assert!(result.is_err());
    }

    #[test]
    fn test_http_request_builder() {
        let req = HttpRequest::post("/upload-image").body("{}");
        assert_eq!(req.method, Method::POST);
        assert_eq!(req.body.as_deref(), Some("{}"));
    }

    #[test]
    fn test_http_response() {
        let resp = response(200, r#"{"status":"ok"}"#);
        assert!(resp.is_success());
        assert_eq!(resp.response_time_secs(), 0.25);
        assert_eq!(resp.json().unwrap()["status"], "ok");
    }

    #[test]
    fn test_error_for_status() {
        let err = response(503, "").error_for_status().unwrap_err();
        assert_eq!(
            err.to_string(),
            "HTTP 503 Service Unavailable for url (http://localhost:3000/api/public/status)"
        );
        assert!(response(201, "").error_for_status().is_ok());
    }

    #[test]
    fn test_json_decode_error() {
        let err = response(200, "<html>").json().unwrap_err();
        assert!(matches!(err, HttpError::Decode(_)));
    }

    #[tokio::test]
    async fn test_connection_refused() {
        // Port 1 is reserved and nothing listens there
        let client = HttpClient::new("http://127.0.0.1:1", 5).unwrap();
        let err = client.get("/status").await.unwrap_err();
        assert!(matches!(
            err,
            HttpError::ConnectionRefused(_) | HttpError::RequestFailed(_)
        ));
    }
}
