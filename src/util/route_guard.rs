//! Route classification and unauthenticated redirect.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every navigation is checked against the current auth phase. Only the
//! login and register routes are reachable without a session; everything
//! else, including unmatched paths, bounces to `/login`.

#[cfg(test)]
#[path = "route_guard_test.rs"]
mod route_guard_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;

use crate::state::auth::{AuthPhase, AuthState};

pub const LOGIN_PATH: &str = "/login";
pub const REGISTER_PATH: &str = "/register";
pub const HOME_PATH: &str = "/";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppRoute {
    Login,
    Register,
    Home,
    NotFound,
}

impl AppRoute {
    pub fn from_path(path: &str) -> Self {
        let trimmed = path.trim_end_matches('/');
        match trimmed {
            "" => Self::Home,
            LOGIN_PATH => Self::Login,
            REGISTER_PATH => Self::Register,
            _ => Self::NotFound,
        }
    }

    pub fn is_public(self) -> bool {
        matches!(self, Self::Login | Self::Register)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    RedirectToLogin,
    /// The stored session has not been read yet.
    Pending,
}

pub fn guard_decision(phase: AuthPhase, path: &str) -> GuardDecision {
    if AppRoute::from_path(path).is_public() {
        return GuardDecision::Allow;
    }
    match phase {
        AuthPhase::Unknown => GuardDecision::Pending,
        AuthPhase::Authenticated => GuardDecision::Allow,
        AuthPhase::Unauthenticated => GuardDecision::RedirectToLogin,
    }
}

/// Redirect to `/login` whenever the current path is protected and no
/// session is present. Re-evaluated on every path or auth change.
pub fn install_route_guard<F>(auth: RwSignal<AuthState>, pathname: Memo<String>, navigate: F)
where
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    Effect::new(move || {
        let phase = auth.get().phase;
        let path = pathname.get();
        if guard_decision(phase, &path) == GuardDecision::RedirectToLogin {
            log::debug!("route guard: redirecting {path} to {LOGIN_PATH}");
            navigate(LOGIN_PATH, NavigateOptions { replace: true, ..NavigateOptions::default() });
        }
    });
}
