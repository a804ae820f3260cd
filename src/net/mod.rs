//! Networking modules for the identity and catalog REST services.
//!
//! SYSTEM CONTEXT
//! ==============
//! `transport` defines the HTTP seam and its browser/offline backends,
//! `auth` and `catalog` implement the two service clients, and `types`
//! defines the wire schema shared by both.

pub mod auth;
pub mod catalog;
pub mod transport;
pub mod types;

#[cfg(test)]
pub(crate) mod stub;

/// Transport used by the UI: `gloo-net` in the browser, offline elsewhere.
#[cfg(feature = "csr")]
pub type DefaultTransport = transport::GlooTransport;
/// Transport used by the UI: `gloo-net` in the browser, offline elsewhere.
#[cfg(not(feature = "csr"))]
pub type DefaultTransport = transport::OfflineTransport;
