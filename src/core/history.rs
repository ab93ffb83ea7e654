//! State transition history tracking.
//!
//! Keeps the most recent transitions of a machine in a bounded buffer so
//! that actor code and tests can ask how a machine arrived where it is.

use super::callback::Time;
use super::state::State;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// What initiated a transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Trigger {
    /// Requested by a collaborator through `change_state`.
    Explicit,
    /// Selected by a guard during a tick.
    Auto,
}

/// Record of a single completed transition.
///
/// # Example
///
/// ```rust
/// use tickstate::core::{StateTransition, Trigger};
///
/// let transition = StateTransition {
///     from: "jumping",
///     to: "falling",
///     trigger: Trigger::Auto,
///     at: Some(2.0),
/// };
/// assert_eq!(transition.at, Some(2.0));
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StateTransition<S> {
    /// The state being transitioned from
    pub from: S,
    /// The state being transitioned to
    pub to: S,
    /// Whether a collaborator or a guard asked for it
    pub trigger: Trigger,
    /// Tick time for automatic transitions; explicit requests carry no time
    pub at: Option<Time>,
}

/// Bounded, ordered history of transitions.
///
/// Once `capacity` transitions are stored the oldest one is dropped for
/// each new record. A capacity of zero disables recording entirely.
///
/// # Example
///
/// ```rust
/// use tickstate::core::{StateHistory, StateTransition, Trigger};
///
/// let mut history = StateHistory::with_capacity(8);
/// history.record(StateTransition {
///     from: "idle",
///     to: "walking",
///     trigger: Trigger::Explicit,
///     at: None,
/// });
/// history.record(StateTransition {
///     from: "walking",
///     to: "idle",
///     trigger: Trigger::Explicit,
///     at: None,
/// });
///
/// assert_eq!(history.get_path(), vec![&"idle", &"walking", &"idle"]);
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(
    from = "HistoryData<S>",
    bound(deserialize = "S: Deserialize<'de>")
)]
pub struct StateHistory<S> {
    capacity: usize,
    transitions: VecDeque<StateTransition<S>>,
}

/// Wire form of [`StateHistory`], trimmed to its capacity on load.
#[derive(Deserialize)]
struct HistoryData<S> {
    capacity: usize,
    transitions: VecDeque<StateTransition<S>>,
}

impl<S> From<HistoryData<S>> for StateHistory<S> {
    /// Keeps only the newest `capacity` transitions.
    fn from(data: HistoryData<S>) -> Self {
        let HistoryData {
            capacity,
            mut transitions,
        } = data;
        let excess = transitions.len().saturating_sub(capacity);
        transitions.drain(..excess);
        Self {
            capacity,
            transitions,
        }
    }
}

impl<S: State> Default for StateHistory<S> {
    fn default() -> Self {
        Self::disabled()
    }
}

impl<S: State> StateHistory<S> {
    /// History that keeps at most `capacity` transitions.
    ///
    /// Storage grows on demand, so a large capacity costs nothing up front.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            transitions: VecDeque::new(),
        }
    }

    /// History that records nothing.
    pub fn disabled() -> Self {
        Self::with_capacity(0)
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_enabled(&self) -> bool {
        self.capacity > 0
    }

    /// Append a transition, evicting the oldest one when full.
    pub fn record(&mut self, transition: StateTransition<S>) {
        if self.capacity == 0 {
            return;
        }
        while self.transitions.len() >= self.capacity {
            self.transitions.pop_front();
        }
        self.transitions.push_back(transition);
    }

    /// Get the path of states traversed.
    ///
    /// Starts at the source of the oldest retained transition, followed by
    /// the destination of each transition in order. Empty if nothing has
    /// been recorded.
    pub fn get_path(&self) -> Vec<&S> {
        let Some(first) = self.transitions.front() else {
            return Vec::new();
        };

        std::iter::once(&first.from)
            .chain(self.transitions.iter().map(|t| &t.to))
            .collect()
    }

    /// Retained transitions, oldest first.
    pub fn transitions(&self) -> impl ExactSizeIterator<Item = &StateTransition<S>> {
        self.transitions.iter()
    }

    pub fn last(&self) -> Option<&StateTransition<S>> {
        self.transitions.back()
    }

    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }

    pub fn clear(&mut self) {
        self.transitions.clear();
    }
}
