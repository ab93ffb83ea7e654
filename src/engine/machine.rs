//! State machine with validated, explicitly requested transitions.

use crate::config::MachineConfig;
use crate::core::{
    CallbackResult, State, StateHistory, StateTransition, Time, TransitionTable, Trigger,
};
use crate::engine::error::MachineError;
use crate::engine::observer::{Observers, SubscriptionId};
use std::fmt;
use tracing::info;

/// State machine that only moves along registered transitions.
///
/// Each actor owns one machine, fills it during initialisation and then
/// asks it to change state as input and physics demand. A request for a
/// pair that was never registered is refused with
/// [`MachineError::UnknownTransition`] and leaves the machine untouched.
///
/// # Example
///
/// ```rust
/// use tickstate::{MachineError, StateMachine};
///
/// #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
/// enum Motion {
///     Idle,
///     Walking,
///     Jumping,
/// }
///
/// let mut machine = StateMachine::new(Motion::Idle);
/// machine.add_transition(Motion::Idle, Motion::Walking);
/// machine.add_transition(Motion::Walking, Motion::Idle);
/// machine.add_transition(Motion::Idle, Motion::Jumping);
///
/// machine.change_state(Motion::Walking).unwrap();
/// assert_eq!(machine.current_state(), &Motion::Walking);
///
/// let err = machine.change_state(Motion::Jumping).unwrap_err();
/// assert!(matches!(err, MachineError::UnknownTransition { .. }));
/// assert_eq!(machine.current_state(), &Motion::Walking);
/// ```
pub struct StateMachine<S: State> {
    current: S,
    transitions: TransitionTable<S>,
    observers: Observers<S>,
    history: StateHistory<S>,
    log_transitions: bool,
}

impl<S: State> StateMachine<S> {
    /// Create a machine in `initial` with default configuration.
    pub fn new(initial: S) -> Self {
        Self::with_config(initial, MachineConfig::default())
    }

    /// Create a machine in `initial` using `config`.
    pub fn with_config(initial: S, config: MachineConfig) -> Self {
        Self {
            current: initial,
            transitions: TransitionTable::new(),
            observers: Observers::new(),
            history: StateHistory::with_capacity(config.history_capacity),
            log_transitions: config.log_transitions,
        }
    }

    /// Turn transition logging on or off.
    pub fn with_logging(mut self, enabled: bool) -> Self {
        self.log_transitions = enabled;
        self
    }

    /// Permit `from -> to` without an action.
    ///
    /// Registering a pair again replaces the earlier registration.
    pub fn add_transition(&mut self, from: S, to: S) {
        self.transitions.insert(from, to, None);
    }

    /// Permit `from -> to` and run `action` whenever it is taken.
    ///
    /// The action runs before the machine moves, so [`current_state`]
    /// still reports `from` while it executes. If it returns an error the
    /// transition is cancelled. Registering a pair again replaces the
    /// earlier action.
    ///
    /// [`current_state`]: Self::current_state
    pub fn add_transition_with<F>(&mut self, from: S, to: S, action: F)
    where
        F: FnMut() -> CallbackResult + 'static,
    {
        self.transitions.insert(from, to, Some(Box::new(action)));
    }

    /// Move to `target` along a registered transition.
    ///
    /// On success the action (if any) has run, the current state is
    /// `target` and every observer has been told about the change exactly
    /// once. On error nothing has changed and no observer was called.
    ///
    /// Actions and observers must not call back into this machine.
    pub fn change_state(&mut self, target: S) -> Result<(), MachineError<S>> {
        self.transition_to(target, Trigger::Explicit, None)
    }

    pub(crate) fn transition_to(
        &mut self,
        target: S,
        trigger: Trigger,
        at: Option<Time>,
    ) -> Result<(), MachineError<S>> {
        let Some(slot) = self.transitions.get_mut(&self.current, &target) else {
            return Err(MachineError::UnknownTransition {
                from: self.current.clone(),
                to: target,
            });
        };

        if let Some(action) = slot {
            action().map_err(|source| MachineError::ActionFailed {
                from: self.current.clone(),
                to: target.clone(),
                source,
            })?;
        }

        let old = std::mem::replace(&mut self.current, target);

        if self.log_transitions {
            info!(from = ?old, to = ?self.current, ?trigger, "state changed");
        }

        if self.history.is_enabled() {
            self.history.record(StateTransition {
                from: old.clone(),
                to: self.current.clone(),
                trigger,
                at,
            });
        }

        self.observers.notify(&old, &self.current);
        Ok(())
    }

    /// Get current state (pure)
    pub fn current_state(&self) -> &S {
        &self.current
    }

    /// Check whether `from -> to` is registered (pure)
    pub fn has_transition(&self, from: &S, to: &S) -> bool {
        self.transitions.contains(from, to)
    }

    /// States reachable from `from` in one transition, in no particular order.
    pub fn transitions_from<'a>(&'a self, from: &'a S) -> impl Iterator<Item = &'a S> + 'a {
        self.transitions.targets_from(from)
    }

    pub(crate) fn transitions(&self) -> &TransitionTable<S> {
        &self.transitions
    }

    /// Recent transitions, if history is enabled in the configuration.
    pub fn history(&self) -> &StateHistory<S> {
        &self.history
    }

    pub fn is_logging(&self) -> bool {
        self.log_transitions
    }

    /// Register `observer` to be called with `(old, new)` after every
    /// completed transition.
    ///
    /// Observers run in subscription order. A panicking observer unwinds
    /// straight out of `change_state`; the ones after it are skipped.
    pub fn subscribe<F>(&mut self, observer: F) -> SubscriptionId
    where
        F: FnMut(&S, &S) + 'static,
    {
        self.observers.subscribe(Box::new(observer))
    }

    /// Remove an observer. Returns `false` if it was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }
}

impl<S: State> fmt::Debug for StateMachine<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateMachine")
            .field("current", &self.current)
            .field("transitions", &self.transitions)
            .field("observers", &self.observers)
            .field("log_transitions", &self.log_transitions)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};
    use std::panic::{catch_unwind, AssertUnwindSafe};
    use std::rc::Rc;

    #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
    enum Motion {
        Idle,
        Walking,
        Jumping,
    }

    fn locomotion() -> StateMachine<Motion> {
        let mut machine = StateMachine::new(Motion::Idle);
        machine.add_transition(Motion::Idle, Motion::Walking);
        machine.add_transition(Motion::Walking, Motion::Idle);
        machine.add_transition(Motion::Idle, Motion::Jumping);
        machine.add_transition(Motion::Jumping, Motion::Idle);
        machine
    }

    fn record_changes(machine: &mut StateMachine<Motion>) -> Rc<RefCell<Vec<(Motion, Motion)>>> {
        let changes = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&changes);
        machine.subscribe(move |old: &Motion, new: &Motion| sink.borrow_mut().push((*old, *new)));
        changes
    }

    #[test]
    fn starts_in_initial_state() {
        let machine = StateMachine::new(Motion::Jumping);
        assert_eq!(machine.current_state(), &Motion::Jumping);
        assert!(!machine.is_logging());
    }

    #[test]
    fn registered_transition_notifies_once() {
        let mut machine = locomotion();
        let changes = record_changes(&mut machine);

        machine.change_state(Motion::Walking).unwrap();

        assert_eq!(machine.current_state(), &Motion::Walking);
        assert_eq!(*changes.borrow(), vec![(Motion::Idle, Motion::Walking)]);
    }

    #[test]
    fn unknown_transition_changes_nothing() {
        let mut machine = locomotion();
        let changes = record_changes(&mut machine);
        machine.change_state(Motion::Walking).unwrap();

        let err = machine.change_state(Motion::Jumping).unwrap_err();

        assert!(matches!(
            err,
            MachineError::UnknownTransition {
                from: Motion::Walking,
                to: Motion::Jumping
            }
        ));
        assert_eq!(machine.current_state(), &Motion::Walking);
        assert_eq!(changes.borrow().len(), 1);
    }

    #[test]
    fn self_transition_needs_registration() {
        let mut machine = locomotion();
        assert!(machine.change_state(Motion::Idle).is_err());

        machine.add_transition(Motion::Idle, Motion::Idle);
        let changes = record_changes(&mut machine);
        machine.change_state(Motion::Idle).unwrap();

        assert_eq!(*changes.borrow(), vec![(Motion::Idle, Motion::Idle)]);
    }

    #[test]
    fn action_runs_before_state_changes() {
        let mut machine = StateMachine::new(Motion::Idle);
        let seen_by_observer = Rc::new(Cell::new(false));
        let action_ran = Rc::new(Cell::new(false));

        let ran = Rc::clone(&action_ran);
        machine.add_transition_with(Motion::Idle, Motion::Walking, move || {
            ran.set(true);
            Ok(())
        });

        let ran = Rc::clone(&action_ran);
        let seen = Rc::clone(&seen_by_observer);
        machine.subscribe(move |_: &Motion, _: &Motion| seen.set(ran.get()));

        machine.change_state(Motion::Walking).unwrap();

        assert!(action_ran.get());
        assert!(seen_by_observer.get());
    }

    #[test]
    fn reregistered_action_replaces_previous() {
        let mut machine = StateMachine::new(Motion::Idle);
        let log = Rc::new(RefCell::new(Vec::new()));

        let first = Rc::clone(&log);
        machine.add_transition_with(Motion::Idle, Motion::Walking, move || {
            first.borrow_mut().push("action1");
            Ok(())
        });
        let second = Rc::clone(&log);
        machine.add_transition_with(Motion::Idle, Motion::Walking, move || {
            second.borrow_mut().push("action2");
            Ok(())
        });

        machine.change_state(Motion::Walking).unwrap();

        assert_eq!(*log.borrow(), vec!["action2"]);
    }

    #[test]
    fn failing_action_keeps_source_state() {
        let mut machine = locomotion();
        machine.add_transition_with(Motion::Idle, Motion::Walking, || {
            Err("no ground under feet".into())
        });
        let changes = record_changes(&mut machine);

        let err = machine.change_state(Motion::Walking).unwrap_err();

        match err {
            MachineError::ActionFailed { from, to, source } => {
                assert_eq!(from, Motion::Idle);
                assert_eq!(to, Motion::Walking);
                assert_eq!(source.to_string(), "no ground under feet");
            }
            other => panic!("Expected ActionFailed, got {other:?}"),
        }
        assert_eq!(machine.current_state(), &Motion::Idle);
        assert!(changes.borrow().is_empty());
    }

    #[test]
    fn panicking_action_keeps_source_state() {
        let mut machine = StateMachine::new(Motion::Idle);
        machine.add_transition_with(Motion::Idle, Motion::Walking, || panic!("action blew up"));

        let result = catch_unwind(AssertUnwindSafe(|| machine.change_state(Motion::Walking)));

        assert!(result.is_err());
        assert_eq!(machine.current_state(), &Motion::Idle);
    }

    #[test]
    fn unsubscribed_observer_is_not_called() {
        let mut machine = locomotion();
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        let id = machine.subscribe(move |_: &Motion, _: &Motion| counter.set(counter.get() + 1));

        machine.change_state(Motion::Walking).unwrap();
        assert!(machine.unsubscribe(id));
        machine.change_state(Motion::Idle).unwrap();

        assert_eq!(calls.get(), 1);
        assert_eq!(machine.observer_count(), 0);
    }

    #[test]
    fn history_records_explicit_transitions() {
        let config = MachineConfig::default().with_history(4);
        let mut machine = StateMachine::with_config(Motion::Idle, config);
        machine.add_transition(Motion::Idle, Motion::Walking);
        machine.add_transition(Motion::Walking, Motion::Idle);

        machine.change_state(Motion::Walking).unwrap();
        machine.change_state(Motion::Idle).unwrap();

        let history = machine.history();
        assert_eq!(
            history.get_path(),
            vec![&Motion::Idle, &Motion::Walking, &Motion::Idle]
        );
        assert!(history
            .transitions()
            .all(|t| t.trigger == Trigger::Explicit && t.at.is_none()));
    }

    #[test]
    fn history_disabled_by_default() {
        let mut machine = locomotion();
        machine.change_state(Motion::Walking).unwrap();
        assert!(machine.history().is_empty());
    }

    #[test]
    fn introspection_reports_table() {
        let machine = locomotion();

        assert!(machine.has_transition(&Motion::Idle, &Motion::Jumping));
        assert!(!machine.has_transition(&Motion::Walking, &Motion::Jumping));
        assert_eq!(machine.transitions_from(&Motion::Idle).count(), 2);
    }

    #[test]
    fn logging_does_not_change_behavior() {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();

        let mut machine = locomotion().with_logging(true);
        assert!(machine.is_logging());
        machine.change_state(Motion::Walking).unwrap();
        assert_eq!(machine.current_state(), &Motion::Walking);
    }

    #[test]
    fn panicking_observer_after_commit_skips_later_observers() {
        let mut machine = locomotion();
        machine.subscribe(|_: &Motion, _: &Motion| panic!("observer failed"));
        let later = record_changes(&mut machine);

        let result = catch_unwind(AssertUnwindSafe(|| machine.change_state(Motion::Walking)));

        assert!(result.is_err());
        assert_eq!(machine.current_state(), &Motion::Walking);
        assert!(later.borrow().is_empty());
    }

    #[test]
    fn huge_history_capacity_from_config_is_accepted() {
        let config =
            MachineConfig::from_json(r#"{ "history_capacity": 18446744073709551615 }"#).unwrap();
        let mut machine = StateMachine::with_config(Motion::Idle, config);
        machine.add_transition(Motion::Idle, Motion::Walking);

        machine.change_state(Motion::Walking).unwrap();

        assert_eq!(machine.history().capacity(), usize::MAX);
        assert_eq!(machine.history().len(), 1);
    }
}
