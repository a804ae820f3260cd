//! Submission guard for form handlers.
//!
//! Each submit handler owns one `SubmitPhase`. A second submission while the
//! first request is in flight is refused here rather than relying on the
//! disabled button alone.

#[cfg(test)]
#[path = "form_test.rs"]
mod form_test;

use leptos::prelude::*;

/// A submission is already in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("a submission is already in progress")]
pub struct AlreadySubmitting;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SubmitPhase {
    #[default]
    Idle,
    Submitting,
}

impl SubmitPhase {
    /// Move to `Submitting`.
    ///
    /// # Errors
    ///
    /// Returns [`AlreadySubmitting`] if a submission is in flight.
    pub fn begin(&mut self) -> Result<(), AlreadySubmitting> {
        match self {
            Self::Idle => {
                *self = Self::Submitting;
                Ok(())
            }
            Self::Submitting => Err(AlreadySubmitting),
        }
    }

    /// Return to `Idle` once the request has settled.
    pub fn finish(&mut self) {
        *self = Self::Idle;
    }

    pub fn is_busy(self) -> bool {
        self == Self::Submitting
    }

    /// Pick the button label for the current phase.
    pub fn label(self, idle: &'static str, busy: &'static str) -> &'static str {
        if self.is_busy() { busy } else { idle }
    }
}

/// Start a submission held in a signal, returning `false` if one is
/// already in flight.
pub fn begin_submit(phase: RwSignal<SubmitPhase>) -> bool {
    matches!(phase.try_update(SubmitPhase::begin), Some(Ok(())))
}
