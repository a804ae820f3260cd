//! Product-service client: list and create.
//!
//! No retries and no partial results: any non-success listing is one
//! generic failure. A created product is returned as echoed by the server
//! so the caller can append it locally instead of re-listing.

#[cfg(test)]
#[path = "catalog_test.rs"]
mod catalog_test;

use super::transport::{HttpRequest, HttpTransport, TransportError};
use super::types::Product;
use crate::config::ApiConfig;
use crate::session::{KeyValueStore, SessionStore};
use crate::validate::{ProductDraft, ValidationError, validate_product};

/// Errors produced by [`CatalogClient`] operations. `Display` is user-facing.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CatalogError {
    /// The product draft failed local validation.
    #[error("{0}")]
    Invalid(#[from] ValidationError),

    /// Listing answered with a non-success status.
    #[error("Network response was not ok")]
    ListFailed { status: u16 },

    /// Creation answered with a non-success status other than 401.
    #[error("Failed to add product")]
    CreateFailed { status: u16 },

    /// A protected call was refused; the session is no longer valid.
    #[error("Session expired, please log in again")]
    Unauthorized,

    /// The request never produced a response.
    #[error("Network request failed")]
    Transport(#[from] TransportError),

    /// A success response body did not match the expected shape.
    #[error("unexpected response from product service: {0}")]
    Decode(String),
}

/// Client for the product service.
pub struct CatalogClient<T, S> {
    transport: T,
    session: SessionStore<S>,
    config: ApiConfig,
}

impl<T, S> CatalogClient<T, S>
where
    T: HttpTransport,
    S: KeyValueStore,
{
    pub fn new(transport: T, session: SessionStore<S>, config: ApiConfig) -> Self {
        Self { transport, session, config }
    }

    /// Fetch every product.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::ListFailed`] for any non-success status,
    /// [`CatalogError::Transport`], or [`CatalogError::Decode`].
    pub async fn list_products(&self) -> Result<Vec<Product>, CatalogError> {
        let request = HttpRequest::get(self.config.catalog_url("/products/all"));
        let resp = self.transport.send(request).await.map_err(|e| {
            log::error!("product list request failed: {e}");
            CatalogError::Transport(e)
        })?;
        if !resp.is_success() {
            log::warn!("product list failed: status {}", resp.status);
            return Err(CatalogError::ListFailed { status: resp.status });
        }
        resp.json().map_err(|e| CatalogError::Decode(e.to_string()))
    }

    /// Validate a draft, coerce its price, and create the product.
    ///
    /// The session token, when present, is sent as a bearer credential.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Invalid`] without a request when the draft
    /// fails validation, [`CatalogError::Unauthorized`] on 401,
    /// [`CatalogError::CreateFailed`] for other non-success statuses,
    /// [`CatalogError::Transport`], or [`CatalogError::Decode`].
    pub async fn create_product(&self, draft: &ProductDraft) -> Result<Product, CatalogError> {
        let new_product = validate_product(draft)?;
        let body = serde_json::to_value(&new_product).map_err(|e| CatalogError::Decode(e.to_string()))?;
        let token = self.session.get_token().filter(|token| !token.is_empty());
        let request = HttpRequest::post_json(self.config.catalog_url("/products/private"), body).with_bearer(token);

        let resp = self.transport.send(request).await.map_err(|e| {
            log::error!("product create request failed: {e}");
            CatalogError::Transport(e)
        })?;
        match resp.status {
            401 => {
                log::warn!("product create refused: session rejected");
                Err(CatalogError::Unauthorized)
            }
            status if !resp.is_success() => {
                log::warn!("product create failed: status {status}");
                Err(CatalogError::CreateFailed { status })
            }
            _ => resp.json().map_err(|e| CatalogError::Decode(e.to_string())),
        }
    }
}
