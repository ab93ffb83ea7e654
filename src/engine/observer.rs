//! State change subscribers.

use crate::core::State;
use std::fmt;

/// Callback told about every completed transition as `(old, new)`.
pub type Observer<S> = Box<dyn FnMut(&S, &S)>;

/// Handle returned by `subscribe`, used to unsubscribe later.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

/// Ordered list of observers.
///
/// Observers are notified synchronously in subscription order. Nothing is
/// isolated: if one panics, the panic unwinds out of `notify` and later
/// observers are not called.
pub(crate) struct Observers<S: State> {
    next_id: u64,
    entries: Vec<(SubscriptionId, Observer<S>)>,
}

impl<S: State> Observers<S> {
    pub fn new() -> Self {
        Self {
            next_id: 0,
            entries: Vec::new(),
        }
    }

    pub fn subscribe(&mut self, observer: Observer<S>) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, observer));
        id
    }

    /// Returns `false` if the id was unknown or already removed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(existing, _)| *existing != id);
        self.entries.len() != before
    }

    pub fn notify(&mut self, old: &S, new: &S) {
        for (_, observer) in &mut self.entries {
            observer(old, new);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

impl<S: State> fmt::Debug for Observers<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observers")
            .field("count", &self.entries.len())
            .finish()
    }
}
