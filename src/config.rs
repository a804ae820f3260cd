//! API endpoint configuration.
//!
//! Both services are externally owned; only their base URLs vary between
//! deployments. Values come from a key lookup so the browser build can feed
//! compile-time overrides and the CLI can feed runtime flags.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

pub const DEFAULT_IDENTITY_URL: &str = "https://api.escuelajs.co/api/v1";
pub const DEFAULT_CATALOG_URL: &str = "https://auth-rg69.onrender.com/api";

pub const IDENTITY_URL_VAR: &str = "SHOPFRONT_IDENTITY_URL";
pub const CATALOG_URL_VAR: &str = "SHOPFRONT_CATALOG_URL";

/// Errors produced while building an [`ApiConfig`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A base URL is not an absolute `http(s)` URL.
    #[error("invalid base URL for {key}: {value}")]
    InvalidUrl { key: &'static str, value: String },
}

/// Base URLs of the identity and catalog services, without trailing slashes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub identity_base_url: String,
    pub catalog_base_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            identity_base_url: DEFAULT_IDENTITY_URL.to_owned(),
            catalog_base_url: DEFAULT_CATALOG_URL.to_owned(),
        }
    }
}

impl ApiConfig {
    /// Build a config from explicit base URLs.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidUrl`] if either URL is not `http(s)`.
    pub fn new(identity_base_url: &str, catalog_base_url: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            identity_base_url: normalize_base_url(IDENTITY_URL_VAR, identity_base_url)?,
            catalog_base_url: normalize_base_url(CATALOG_URL_VAR, catalog_base_url)?,
        })
    }

    /// Build a config from a key lookup.
    ///
    /// Optional:
    /// - `SHOPFRONT_IDENTITY_URL`: identity service base URL
    /// - `SHOPFRONT_CATALOG_URL`: product service base URL
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidUrl`] if a supplied URL is not `http(s)`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let identity = lookup(IDENTITY_URL_VAR).unwrap_or_else(|| DEFAULT_IDENTITY_URL.to_owned());
        let catalog = lookup(CATALOG_URL_VAR).unwrap_or_else(|| DEFAULT_CATALOG_URL.to_owned());
        Self::new(&identity, &catalog)
    }

    /// Build a config from process environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidUrl`] if a supplied URL is not `http(s)`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from values baked in at compile time.
    ///
    /// Browser builds have no process environment, so overrides are read
    /// with `option_env!` when the bundle is built.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidUrl`] if a baked-in URL is not `http(s)`.
    pub fn from_build_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| match key {
            IDENTITY_URL_VAR => option_env!("SHOPFRONT_IDENTITY_URL").map(str::to_owned),
            CATALOG_URL_VAR => option_env!("SHOPFRONT_CATALOG_URL").map(str::to_owned),
            _ => None,
        })
    }

    #[must_use]
    pub fn identity_url(&self, path: &str) -> String {
        format!("{}{path}", self.identity_base_url)
    }

    #[must_use]
    pub fn catalog_url(&self, path: &str) -> String {
        format!("{}{path}", self.catalog_base_url)
    }
}

fn normalize_base_url(key: &'static str, raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    let has_host = trimmed
        .strip_prefix("https://")
        .or_else(|| trimmed.strip_prefix("http://"))
        .is_some_and(|rest| !rest.is_empty());
    if !has_host {
        return Err(ConfigError::InvalidUrl { key, value: raw.to_owned() });
    }
    Ok(trimmed.to_owned())
}
