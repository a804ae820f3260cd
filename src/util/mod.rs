//! Utility helpers shared across UI modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Utility modules keep routing policy out of page and component code so it
//! can be tested without a browser.

pub mod route_guard;
