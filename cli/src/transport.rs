//! `reqwest` backend for the shared HTTP transport seam.

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use shopfront::net::transport::{HttpMethod, HttpRequest, HttpResponse, HttpTransport, TransportError, bearer_header};

#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait(?Send)]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut builder = match request.method {
            HttpMethod::Get => self.client.get(&request.url),
            HttpMethod::Post => self.client.post(&request.url),
        };
        if let Some(token) = request.bearer.as_deref() {
            builder = builder.header(AUTHORIZATION, bearer_header(token));
        }
        if let Some(body) = request.body.as_ref() {
            builder = builder.json(body);
        }

        tracing::debug!(method = ?request.method, url = %request.url, "sending request");
        let response = builder.send().await.map_err(|e| TransportError::Network(e.to_string()))?;

        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);
        let body = response.text().await.map_err(|e| TransportError::Read(e.to_string()))?;
        tracing::debug!(status, "received response");
        Ok(HttpResponse { status, content_type, body })
    }
}
