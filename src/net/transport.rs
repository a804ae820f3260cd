//! HTTP transport seam shared by the service clients.
//!
//! Client-side (csr): real HTTP calls via `gloo-net`.
//! Native builds of this crate: an offline stub that fails every request,
//! since the UI's endpoints are only exercised in the browser. The CLI
//! supplies its own `reqwest` backend.
//!
//! ERROR HANDLING
//! ==============
//! A `TransportError` means the request never produced an HTTP response.
//! Any response, including 4xx/5xx, is returned as `Ok` so callers can
//! read the error body.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "transport_test.rs"]
mod transport_test;

use serde::de::DeserializeOwned;

/// Errors raised before an HTTP response was received.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    /// The request could not be sent or the connection failed.
    #[error("network request failed: {0}")]
    Network(String),

    /// The request body could not be encoded.
    #[error("request encode failed: {0}")]
    Encode(String),

    /// The response body could not be read.
    #[error("response read failed: {0}")]
    Read(String),

    /// No transport is available in this build.
    #[error("not available outside the browser")]
    Unavailable,
}

/// Supported request methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

/// An outgoing request with an optional JSON body and bearer token.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub body: Option<serde_json::Value>,
    pub bearer: Option<String>,
}

impl HttpRequest {
    pub fn get(url: impl Into<String>) -> Self {
        Self { method: HttpMethod::Get, url: url.into(), body: None, bearer: None }
    }

    pub fn post_json(url: impl Into<String>, body: serde_json::Value) -> Self {
        Self { method: HttpMethod::Post, url: url.into(), body: Some(body), bearer: None }
    }

    #[must_use]
    pub fn with_bearer(mut self, token: Option<String>) -> Self {
        self.bearer = token;
        self
    }
}

/// A received response with its body read to a string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Decode the body as JSON.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error if the body does not match `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_str(&self.body)
    }
}

/// Async HTTP capability. `?Send` so browser futures qualify.
#[async_trait::async_trait(?Send)]
pub trait HttpTransport {
    /// Send one request and read the whole response.
    ///
    /// # Errors
    ///
    /// Returns a [`TransportError`] if no response was received.
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

/// Transport for builds without a browser; every request fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineTransport;

#[async_trait::async_trait(?Send)]
impl HttpTransport for OfflineTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let _ = request;
        Err(TransportError::Unavailable)
    }
}

/// Browser `fetch` transport backed by `gloo-net`.
#[cfg(feature = "csr")]
#[derive(Debug, Clone, Copy, Default)]
pub struct GlooTransport;

#[cfg(feature = "csr")]
#[async_trait::async_trait(?Send)]
impl HttpTransport for GlooTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        use gloo_net::http::Request;

        let mut builder = match request.method {
            HttpMethod::Get => Request::get(&request.url),
            HttpMethod::Post => Request::post(&request.url),
        };
        if let Some(token) = request.bearer.as_deref() {
            builder = builder.header("Authorization", &bearer_header(token));
        }
        let resp = match request.body.as_ref() {
            Some(body) => builder
                .json(body)
                .map_err(|e| TransportError::Encode(e.to_string()))?
                .send()
                .await,
            None => builder.send().await,
        }
        .map_err(|e| TransportError::Network(e.to_string()))?;

        let status = resp.status();
        let content_type = resp.headers().get("content-type");
        let body = resp.text().await.map_err(|e| TransportError::Read(e.to_string()))?;
        Ok(HttpResponse { status, content_type, body })
    }
}

/// Format an `Authorization` header value for a bearer token.
pub fn bearer_header(token: &str) -> String {
    format!("Bearer {token}")
}
