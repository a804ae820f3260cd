//! Auth-session state for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! Used by the route guard and the protected views to decide whether to
//! render or redirect. The phase is restored once from the session store
//! at start-up and afterwards only moves on login, logout, or a refused
//! protected call.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

/// Where the session stands.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AuthPhase {
    /// The stored session has not been read yet.
    #[default]
    Unknown,
    Unauthenticated,
    Authenticated,
}

/// Authentication state provided to the component tree via context.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AuthState {
    pub phase: AuthPhase,
}

impl AuthState {
    /// Derive the start-up phase from the stored token.
    pub fn restore(token: Option<&str>) -> Self {
        let phase = match token {
            Some(token) if !token.is_empty() => AuthPhase::Authenticated,
            _ => AuthPhase::Unauthenticated,
        };
        Self { phase }
    }

    /// A token has been issued and persisted.
    pub fn login_succeeded(&mut self) {
        self.phase = AuthPhase::Authenticated;
    }

    /// The session ended, by logout or a refused protected call.
    pub fn logged_out(&mut self) {
        self.phase = AuthPhase::Unauthenticated;
    }

    pub fn is_authenticated(&self) -> bool {
        self.phase == AuthPhase::Authenticated
    }

    pub fn is_resolved(&self) -> bool {
        self.phase != AuthPhase::Unknown
    }
}
