//! Scripted transport for client tests.

use std::cell::RefCell;
use std::collections::VecDeque;

use super::transport::{HttpRequest, HttpResponse, HttpTransport, TransportError};

/// Replays queued outcomes in order and records every request it saw.
/// An exhausted queue answers with a network error.
#[derive(Default)]
pub(crate) struct StubTransport {
    outcomes: RefCell<VecDeque<Result<HttpResponse, TransportError>>>,
    requests: RefCell<Vec<HttpRequest>>,
}

impl StubTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn respond_json(self, status: u16, body: serde_json::Value) -> Self {
        self.respond(status, Some("application/json; charset=utf-8"), &body.to_string())
    }

    pub(crate) fn respond(self, status: u16, content_type: Option<&str>, body: &str) -> Self {
        self.outcomes.borrow_mut().push_back(Ok(HttpResponse {
            status,
            content_type: content_type.map(str::to_owned),
            body: body.to_owned(),
        }));
        self
    }

    pub(crate) fn fail(self, error: TransportError) -> Self {
        self.outcomes.borrow_mut().push_back(Err(error));
        self
    }

    pub(crate) fn requests(&self) -> Vec<HttpRequest> {
        self.requests.borrow().clone()
    }
}

#[async_trait::async_trait(?Send)]
impl HttpTransport for StubTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.requests.borrow_mut().push(request);
        self.outcomes
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::Network("no scripted response".to_owned())))
    }
}
