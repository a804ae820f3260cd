//! # shopfront
//!
//! Leptos + WASM storefront client: login, registration, and a product
//! catalog over two external REST services.
//!
//! The crate is split so the logic that matters can be tested natively:
//! `validate` (credential and product-draft checks), `session` (token and
//! user-cache persistence over an injectable key-value store), `net` (the
//! identity and catalog clients over an injectable HTTP transport), and
//! `state` (auth phase, submission guard, catalog list). `app`, `pages`,
//! and `components` render those pieces in the browser.
//!
//! Browser-only code is gated behind the `csr` feature. Without it the
//! crate builds natively with in-memory storage and an offline transport.

pub mod app;
pub mod components;
pub mod config;
pub mod net;
pub mod pages;
pub mod session;
pub mod state;
pub mod util;
pub mod validate;

/// Browser entry point: installs logging and mounts the root component.
#[cfg(feature = "csr")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Debug).is_err() {
        leptos::logging::warn!("console logger already installed");
    }
    leptos::mount::mount_to_body(app::App);
}
