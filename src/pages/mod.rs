//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns route-scoped orchestration and delegates rendering details
//! to `components`.

pub mod home;
pub mod login;
pub mod not_found;
pub mod register;

/// `type` attribute for a password input with a visibility toggle.
pub(crate) fn password_input_type(visible: bool) -> &'static str {
    if visible { "text" } else { "password" }
}
