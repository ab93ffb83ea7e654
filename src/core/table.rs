//! Table of permitted transitions.

use super::callback::CallbackResult;
use super::state::State;
use std::collections::HashMap;
use std::fmt;

/// Side effect run when a specific transition is taken.
///
/// Actions run before the machine moves, so the machine still reports the
/// source state while the action executes. Returning an error cancels the
/// transition.
pub type Action = Box<dyn FnMut() -> CallbackResult>;

/// Permitted transitions keyed by `(from, to)`.
///
/// At most one entry exists per pair. Inserting an existing pair replaces
/// its action.
pub struct TransitionTable<S: State> {
    entries: HashMap<(S, S), Option<Action>>,
}

impl<S: State> TransitionTable<S> {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Insert or replace the transition `from -> to`.
    ///
    /// Returns `true` if an earlier registration for the pair was replaced.
    pub fn insert(&mut self, from: S, to: S, action: Option<Action>) -> bool {
        self.entries.insert((from, to), action).is_some()
    }

    /// Check whether `from -> to` is permitted.
    pub fn contains(&self, from: &S, to: &S) -> bool {
        self.entries.contains_key(&(from.clone(), to.clone()))
    }

    /// Look up the slot for `from -> to`.
    ///
    /// The outer `Option` is the registration, the inner one the action.
    pub fn get_mut(&mut self, from: &S, to: &S) -> Option<&mut Option<Action>> {
        self.entries.get_mut(&(from.clone(), to.clone()))
    }

    /// States reachable from `from` in one step, in no particular order.
    pub fn targets_from<'a>(&'a self, from: &'a S) -> impl Iterator<Item = &'a S> + 'a {
        self.entries
            .keys()
            .filter(move |(source, _)| source == from)
            .map(|(_, target)| target)
    }

    /// Check whether any registered transition ends in `to`.
    pub fn is_destination(&self, to: &S) -> bool {
        self.entries.keys().any(|(_, target)| target == to)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<S: State> Default for TransitionTable<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: State> fmt::Debug for TransitionTable<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.entries.iter().map(|((from, to), action)| {
                (from, to, if action.is_some() { "action" } else { "-" })
            }))
            .finish()
    }
}
