//! Session token and user-directory cache persistence.
//!
//! SYSTEM CONTEXT
//! ==============
//! The auth client writes the token after a successful login, the route
//! guard reads it once at start-up, and the register flow uses the cached
//! user list as a read-through cache. Storage is a capability so tests and
//! the CLI can swap `localStorage` for memory or a file.
//!
//! TRADE-OFFS
//! ==========
//! Tokens never expire locally and are never re-checked against the
//! identity service; a stale token is only discovered when a protected
//! call answers 401.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::net::types::User;

pub const TOKEN_KEY: &str = "token";
pub const USERS_KEY: &str = "users";

/// Errors raised by key-value storage backends.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StorageError {
    /// No storage backend is reachable (e.g. `localStorage` disabled).
    #[error("storage unavailable")]
    Unavailable,

    /// The backend refused the write.
    #[error("storage write failed: {0}")]
    Write(String),

    /// A value could not be serialized for storage.
    #[error("storage encode failed: {0}")]
    Encode(String),
}

/// Durable string key-value storage.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the backend rejects the write.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove `key`. Removing an absent key succeeds.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the backend rejects the removal.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// In-memory storage for tests and non-browser builds.
///
/// Clones share the same map, so a test can keep a handle and inspect what
/// a client wrote.
#[derive(Clone, Debug, Default)]
pub struct MemoryStorage {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.lock().map_err(|_| StorageError::Unavailable)?;
        entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.lock().map_err(|_| StorageError::Unavailable)?;
        entries.remove(key);
        Ok(())
    }
}

/// Browser `localStorage`, resolved on every call.
#[cfg(feature = "csr")]
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserStorage;

#[cfg(feature = "csr")]
fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

#[cfg(feature = "csr")]
impl KeyValueStore for BrowserStorage {
    fn get(&self, key: &str) -> Option<String> {
        local_storage()?.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let storage = local_storage().ok_or(StorageError::Unavailable)?;
        storage
            .set_item(key, value)
            .map_err(|e| StorageError::Write(format!("{e:?}")))
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let storage = local_storage().ok_or(StorageError::Unavailable)?;
        storage
            .remove_item(key)
            .map_err(|e| StorageError::Write(format!("{e:?}")))
    }
}

/// Storage used by the UI: `localStorage` in the browser, memory elsewhere.
#[cfg(feature = "csr")]
pub type DefaultStorage = BrowserStorage;
/// Storage used by the UI: `localStorage` in the browser, memory elsewhere.
#[cfg(not(feature = "csr"))]
pub type DefaultStorage = MemoryStorage;

/// Typed view over the two persisted session keys.
#[derive(Clone, Debug, Default)]
pub struct SessionStore<S> {
    storage: S,
}

impl<S: KeyValueStore> SessionStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// The stored token, exactly as written.
    pub fn get_token(&self) -> Option<String> {
        self.storage.get(TOKEN_KEY)
    }

    /// Overwrite the single token slot.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the write fails.
    pub fn set_token(&self, token: &str) -> Result<(), StorageError> {
        self.storage.set(TOKEN_KEY, token)
    }

    /// Drop the token, leaving the user cache in place.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the removal fails.
    pub fn clear_token(&self) -> Result<(), StorageError> {
        self.storage.remove(TOKEN_KEY)
    }

    /// A non-empty stored token means the session is authenticated.
    pub fn is_authenticated(&self) -> bool {
        self.get_token().is_some_and(|token| !token.is_empty())
    }

    /// The cached user directory. An undecodable entry reads as a miss.
    pub fn get_cached_users(&self) -> Option<Vec<User>> {
        let raw = self.storage.get(USERS_KEY)?;
        match serde_json::from_str(&raw) {
            Ok(users) => Some(users),
            Err(e) => {
                log::warn!("ignoring corrupt user cache: {e}");
                None
            }
        }
    }

    /// Replace the cached user directory.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if encoding or the write fails.
    pub fn set_cached_users(&self, users: &[User]) -> Result<(), StorageError> {
        let raw = serde_json::to_string(users).map_err(|e| StorageError::Encode(e.to_string()))?;
        self.storage.set(USERS_KEY, &raw)
    }

    /// Remove both the token and the user cache.
    ///
    /// # Errors
    ///
    /// Returns the first [`StorageError`] raised by either removal.
    pub fn clear(&self) -> Result<(), StorageError> {
        self.storage.remove(TOKEN_KEY)?;
        self.storage.remove(USERS_KEY)
    }
}
