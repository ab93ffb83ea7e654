//! Builder for constructing state machines.

use crate::builder::error::BuildError;
use crate::config::MachineConfig;
use crate::core::{Action, CallbackResult, Guard, State, Time};
use crate::engine::{AutoStateMachine, Handler, Observer};

/// Builder for constructing state machines with a fluent API.
///
/// Collects the whole actor wiring up front and checks it once in
/// [`build`](Self::build), instead of discovering a dead auto-transition
/// on the first tick its guard happens to hold.
///
/// # Example
///
/// ```rust
/// use tickstate::builder::StateMachineBuilder;
/// use tickstate::state_enum;
///
/// state_enum! {
///     enum Arrow {
///         Default,
///         Preparation,
///         Ready,
///     }
/// }
///
/// let mut machine = StateMachineBuilder::new()
///     .initial(Arrow::Default)
///     .transition(Arrow::Default, Arrow::Preparation)
///     .transition(Arrow::Preparation, Arrow::Ready)
///     .transition(Arrow::Preparation, Arrow::Default)
///     .transition(Arrow::Ready, Arrow::Default)
///     .auto_transition(Arrow::Ready, |now| now >= 0.5)
///     .build()
///     .unwrap();
///
/// machine.change_state(Arrow::Preparation).unwrap();
/// machine.tick(0.5).unwrap();
/// assert_eq!(machine.current_state(), &Arrow::Ready);
/// ```
pub struct StateMachineBuilder<S: State> {
    initial: Option<S>,
    config: MachineConfig,
    transitions: Vec<(S, S, Option<Action>)>,
    auto: Vec<(S, Vec<Guard>)>,
    handlers: Vec<(S, Handler)>,
    observers: Vec<Observer<S>>,
}

impl<S: State> StateMachineBuilder<S> {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            initial: None,
            config: MachineConfig::default(),
            transitions: Vec::new(),
            auto: Vec::new(),
            handlers: Vec::new(),
            observers: Vec::new(),
        }
    }

    /// Set the initial state (required).
    pub fn initial(mut self, state: S) -> Self {
        self.initial = Some(state);
        self
    }

    /// Replace the whole configuration.
    pub fn config(mut self, config: MachineConfig) -> Self {
        self.config = config;
        self
    }

    pub fn logging(mut self, enabled: bool) -> Self {
        self.config.log_transitions = enabled;
        self
    }

    pub fn history(mut self, capacity: usize) -> Self {
        self.config.history_capacity = capacity;
        self
    }

    /// Permit `from -> to` without an action.
    pub fn transition(mut self, from: S, to: S) -> Self {
        self.transitions.push((from, to, None));
        self
    }

    /// Permit `from -> to` with an action.
    pub fn transition_with<F>(mut self, from: S, to: S, action: F) -> Self
    where
        F: FnMut() -> CallbackResult + 'static,
    {
        self.transitions.push((from, to, Some(Box::new(action))));
        self
    }

    /// Add an automatic transition guarded by a single predicate.
    pub fn auto_transition<F>(mut self, to_state: S, guard: F) -> Self
    where
        F: FnMut(Time) -> bool + 'static,
    {
        self.auto.push((to_state, vec![Guard::new(guard)]));
        self
    }

    /// Add an automatic transition guarded by several predicates, OR-ed.
    pub fn auto_transitions<I>(mut self, to_state: S, guards: I) -> Self
    where
        I: IntoIterator<Item = Guard>,
    {
        self.auto.push((to_state, guards.into_iter().collect()));
        self
    }

    /// Add a per-tick handler for `state`.
    pub fn handler<F>(mut self, state: S, handler: F) -> Self
    where
        F: FnMut(Time) -> CallbackResult + 'static,
    {
        self.handlers.push((state, Box::new(handler)));
        self
    }

    /// Subscribe an observer before the machine exists.
    pub fn observer<F>(mut self, observer: F) -> Self
    where
        F: FnMut(&S, &S) + 'static,
    {
        self.observers.push(Box::new(observer));
        self
    }

    /// Build the state machine.
    ///
    /// Registrations are applied in the order they were made, so later
    /// registrations for the same key replace earlier ones exactly as they
    /// would on the machine itself.
    pub fn build(self) -> Result<AutoStateMachine<S>, BuildError> {
        let initial = self.initial.ok_or(BuildError::MissingInitialState)?;

        if self.transitions.is_empty() {
            return Err(BuildError::NoTransitions);
        }

        let mut machine = AutoStateMachine::with_config(initial, self.config);

        for (from, to, action) in self.transitions {
            match action {
                Some(action) => machine.add_transition_with(from, to, action),
                None => machine.add_transition(from, to),
            }
        }

        for (target, guards) in self.auto {
            if !machine.machine().transitions().is_destination(&target) {
                return Err(BuildError::UnreachableAutoTarget {
                    target: format!("{target:?}"),
                });
            }
            machine.add_auto_transitions(target, guards);
        }

        for (state, handler) in self.handlers {
            machine.add_state_handler(state, handler);
        }

        for observer in self.observers {
            machine.subscribe(observer);
        }

        Ok(machine)
    }
}

impl<S: State> Default for StateMachineBuilder<S> {
    fn default() -> Self {
        Self::new()
    }
}
