//! Identity-service client: login, registration, user directory, logout.
//!
//! ERROR HANDLING
//! ==============
//! Three kinds of failure reach callers, all terminal for the current
//! action: local validation (`Invalid`, `InvalidRegistration`, never sent),
//! transport (`Transport`, shown as a generic message and logged), and
//! payload shape (`MissingToken`, `Decode`), where the request succeeded
//! but the body lacked what the operation needs.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use super::transport::{HttpRequest, HttpResponse, HttpTransport, TransportError};
use super::types::{CUSTOMER_ROLE, Credentials, LoginResponse, NewUser, User, error_message};
use crate::config::ApiConfig;
use crate::session::{KeyValueStore, SessionStore, StorageError};
use crate::validate::{RegistrationForm, ValidationError, validate_login, validate_registration};

const LOGIN_FALLBACK_MESSAGE: &str = "Invalid login credentials";
const REGISTER_FALLBACK_MESSAGE: &str = "Something went wrong";

/// Errors produced by [`AuthClient`] operations. `Display` is user-facing.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AuthError {
    /// Login input failed local validation.
    #[error("{0}")]
    Invalid(#[from] ValidationError),

    /// Registration input failed one or more local rules.
    #[error("{}", join_messages(.0))]
    InvalidRegistration(Vec<ValidationError>),

    /// The service answered with a non-success status.
    #[error("{message}")]
    Rejected { status: u16, message: String },

    /// Login succeeded at the transport level but carried no token.
    #[error("Invalid login credentials")]
    MissingToken,

    /// The request never produced a response.
    #[error("Something went wrong. Please try again later.")]
    Transport(#[from] TransportError),

    /// A success response body did not match the expected shape.
    #[error("unexpected response from identity service: {0}")]
    Decode(String),

    /// The session could not be persisted or cleared.
    #[error("could not save session: {0}")]
    Storage(#[from] StorageError),
}

fn join_messages(errors: &[ValidationError]) -> String {
    errors.iter().map(ToString::to_string).collect::<Vec<_>>().join("\n")
}

/// Build the error for a non-success response, preferring the server's
/// `message` over `fallback`.
fn rejection(resp: &HttpResponse, fallback: &str) -> AuthError {
    let message = error_message(&resp.body).unwrap_or_else(|| fallback.to_owned());
    log::warn!("identity service rejected request: status {} ({message})", resp.status);
    AuthError::Rejected { status: resp.status, message }
}

fn transport_failure(e: TransportError) -> AuthError {
    log::error!("identity service request failed: {e}");
    AuthError::Transport(e)
}

/// Client for the identity service.
pub struct AuthClient<T, S> {
    transport: T,
    session: SessionStore<S>,
    config: ApiConfig,
}

impl<T, S> AuthClient<T, S>
where
    T: HttpTransport,
    S: KeyValueStore,
{
    pub fn new(transport: T, session: SessionStore<S>, config: ApiConfig) -> Self {
        Self { transport, session, config }
    }

    pub fn session(&self) -> &SessionStore<S> {
        &self.session
    }

    /// Log in and persist the returned token.
    ///
    /// The token is returned only once it has been stored.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Invalid`] without a request when validation
    /// fails, [`AuthError::Rejected`] for non-success statuses,
    /// [`AuthError::MissingToken`] when the body has no `access_token`, and
    /// [`AuthError::Storage`] when the token cannot be saved.
    pub async fn login(&self, credentials: &Credentials) -> Result<String, AuthError> {
        validate_login(&credentials.email, &credentials.password)?;

        let body = serde_json::to_value(credentials).map_err(|e| AuthError::Decode(e.to_string()))?;
        let request = HttpRequest::post_json(self.config.identity_url("/auth/login"), body);
        let resp = self.transport.send(request).await.map_err(transport_failure)?;
        if !resp.is_success() {
            return Err(rejection(&resp, LOGIN_FALLBACK_MESSAGE));
        }

        let parsed: LoginResponse = resp.json().unwrap_or_else(|e| {
            log::warn!("login response body not decodable: {e}");
            LoginResponse::default()
        });
        let token = parsed
            .access_token
            .filter(|token| !token.is_empty())
            .ok_or(AuthError::MissingToken)?;

        self.session.set_token(&token)?;
        log::info!("login succeeded for {}", credentials.email);
        Ok(token)
    }

    /// Register a new customer account.
    ///
    /// On success the created user is appended to the cached directory when
    /// one exists.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidRegistration`] with every failed rule and
    /// no registration request, [`AuthError::Rejected`] for non-success
    /// statuses, and [`AuthError::Decode`] for an unexpected body.
    pub async fn register(&self, form: &RegistrationForm) -> Result<User, AuthError> {
        validate_registration(form, &self.transport)
            .await
            .into_result()
            .map_err(AuthError::InvalidRegistration)?;

        let form = form.trimmed();
        let new_user = NewUser {
            email: form.email,
            password: form.password,
            name: form.name,
            avatar: form.avatar,
            role: CUSTOMER_ROLE.to_owned(),
        };
        let body = serde_json::to_value(&new_user).map_err(|e| AuthError::Decode(e.to_string()))?;
        let request = HttpRequest::post_json(self.config.identity_url("/users/"), body);
        let resp = self.transport.send(request).await.map_err(transport_failure)?;
        if !resp.is_success() {
            return Err(rejection(&resp, REGISTER_FALLBACK_MESSAGE));
        }

        let user: User = resp.json().map_err(|e| AuthError::Decode(e.to_string()))?;
        if let Some(mut users) = self.session.get_cached_users() {
            users.push(user.clone());
            if let Err(e) = self.session.set_cached_users(&users) {
                log::warn!("could not update user cache after registration: {e}");
            }
        }
        log::info!("registered user {}", user.id);
        Ok(user)
    }

    /// The user directory, served from the local cache when present.
    ///
    /// # Errors
    ///
    /// On a cache miss, returns the same errors as [`Self::refresh_users`].
    pub async fn users(&self) -> Result<Vec<User>, AuthError> {
        if let Some(users) = self.session.get_cached_users() {
            return Ok(users);
        }
        log::debug!("user cache miss, fetching directory");
        self.refresh_users().await
    }

    /// Fetch the user directory and overwrite the cache.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Rejected`], [`AuthError::Transport`],
    /// [`AuthError::Decode`], or [`AuthError::Storage`].
    pub async fn refresh_users(&self) -> Result<Vec<User>, AuthError> {
        let request = HttpRequest::get(self.config.identity_url("/users/"));
        let resp = self.transport.send(request).await.map_err(transport_failure)?;
        if !resp.is_success() {
            return Err(rejection(&resp, REGISTER_FALLBACK_MESSAGE));
        }
        let users: Vec<User> = resp.json().map_err(|e| AuthError::Decode(e.to_string()))?;
        self.session.set_cached_users(&users)?;
        Ok(users)
    }

    /// End the local session.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Storage`] if the token cannot be removed.
    pub fn logout(&self) -> Result<(), AuthError> {
        self.session.clear_token()?;
        log::info!("session cleared");
        Ok(())
    }
}
