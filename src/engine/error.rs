//! Errors raised while changing state or running a tick.

use crate::core::{CallbackError, State};
use thiserror::Error;

/// Errors that can occur during transitions and ticks.
///
/// None of these are retried or recovered by the engine. After any of them
/// the machine is still in a valid state: either the transition completed
/// before the failure or it never started.
#[derive(Debug, Error)]
pub enum MachineError<S: State> {
    /// No transition is registered for the requested pair.
    #[error("Unknown transition from {from:?} to {to:?}")]
    UnknownTransition { from: S, to: S },

    /// The transition action failed; the machine stayed in `from`.
    #[error("Action for transition from {from:?} to {to:?} failed: {source}")]
    ActionFailed {
        from: S,
        to: S,
        #[source]
        source: CallbackError,
    },

    /// A guard for `target` failed while being evaluated.
    #[error("Guard for auto-transition to {target:?} failed: {source}")]
    GuardFailed {
        target: S,
        #[source]
        source: CallbackError,
    },

    /// The per-tick handler of `state` failed.
    #[error("Handler for state {state:?} failed: {source}")]
    HandlerFailed {
        state: S,
        #[source]
        source: CallbackError,
    },
}

impl<S: State> MachineError<S> {
    /// Whether the error points at a wiring mistake in the actor rather than
    /// at a failing collaborator.
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::UnknownTransition { .. })
    }
}
