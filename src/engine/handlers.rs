//! Per-state tick handlers.

use crate::core::{CallbackResult, State, Time};
use crate::engine::error::MachineError;
use std::collections::HashMap;
use std::fmt;
use tracing::trace;

/// Callback run on every tick while its state is current.
pub type Handler = Box<dyn FnMut(Time) -> CallbackResult>;

/// At most one handler per state; registering again replaces it.
pub struct StateHandlerRegistry<S: State> {
    handlers: HashMap<S, Handler>,
}

impl<S: State> StateHandlerRegistry<S> {
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// Returns `true` if an earlier handler for `state` was replaced.
    pub fn insert(&mut self, state: S, handler: Handler) -> bool {
        self.handlers.insert(state, handler).is_some()
    }

    pub fn contains(&self, state: &S) -> bool {
        self.handlers.contains_key(state)
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Run the handler for `state`, if one is registered.
    ///
    /// Returns whether a handler ran.
    pub fn dispatch(&mut self, state: &S, now: Time) -> Result<bool, MachineError<S>> {
        let Some(handler) = self.handlers.get_mut(state) else {
            return Ok(false);
        };

        trace!(?state, now, "dispatching state handler");
        handler(now).map_err(|source| MachineError::HandlerFailed {
            state: state.clone(),
            source,
        })?;
        Ok(true)
    }
}

impl<S: State> Default for StateHandlerRegistry<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: State> fmt::Debug for StateHandlerRegistry<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.handlers.keys()).finish()
    }
}
