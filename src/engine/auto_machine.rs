//! Tick-driven state machine with automatic transitions and state handlers.

use crate::config::MachineConfig;
use crate::core::{CallbackResult, Guard, State, StateHistory, Time};
use crate::engine::auto::AutoTransitionRegistry;
use crate::engine::error::MachineError;
use crate::engine::handlers::StateHandlerRegistry;
use crate::engine::machine::StateMachine;
use crate::engine::observer::SubscriptionId;
use std::fmt;

/// What happened during one call to [`AutoStateMachine::tick`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TickOutcome<S> {
    /// The `(from, to)` pair taken by an automatic transition, if one fired.
    pub transitioned: Option<(S, S)>,
    /// Whether a state handler ran.
    pub handled: bool,
}

/// State machine advanced by an external fixed-timestep loop.
///
/// Every call to [`tick`](Self::tick) is one simulation step:
///
/// 1. Automatic transitions are evaluated in registration order and at most
///    one of them is taken.
/// 2. The handler of the state that is current *after* step 1 runs.
///
/// An error in step 1 aborts the tick before any handler runs. Explicit
/// transitions are still available through
/// [`change_state`](Self::change_state), typically from input callbacks.
///
/// Guards, actions and handlers usually share actor state through
/// `Rc<RefCell<_>>`. They may mutate that state freely, but must not call
/// back into the machine that is running them.
///
/// # Example
///
/// ```rust
/// use std::cell::Cell;
/// use std::rc::Rc;
/// use tickstate::AutoStateMachine;
///
/// #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
/// enum Airborne {
///     Jumping,
///     Falling,
/// }
///
/// let velocity_y = Rc::new(Cell::new(2.0_f32));
///
/// let mut machine = AutoStateMachine::new(Airborne::Jumping);
/// machine.add_transition(Airborne::Jumping, Airborne::Falling);
///
/// let vy = Rc::clone(&velocity_y);
/// machine.add_auto_transition(Airborne::Falling, move |_| vy.get() < 0.0);
///
/// machine.tick(1.0).unwrap();
/// assert_eq!(machine.current_state(), &Airborne::Jumping);
///
/// velocity_y.set(-1.0);
/// let outcome = machine.tick(2.0).unwrap();
/// assert_eq!(outcome.transitioned, Some((Airborne::Jumping, Airborne::Falling)));
/// assert_eq!(machine.current_state(), &Airborne::Falling);
/// ```
pub struct AutoStateMachine<S: State> {
    machine: StateMachine<S>,
    auto: AutoTransitionRegistry<S>,
    handlers: StateHandlerRegistry<S>,
}

impl<S: State> AutoStateMachine<S> {
    /// Create a machine in `initial` with default configuration.
    pub fn new(initial: S) -> Self {
        Self::with_config(initial, MachineConfig::default())
    }

    /// Create a machine in `initial` using `config`.
    pub fn with_config(initial: S, config: MachineConfig) -> Self {
        Self::from_machine(StateMachine::with_config(initial, config))
    }

    /// Extend an existing machine with automatic transitions and handlers.
    pub fn from_machine(machine: StateMachine<S>) -> Self {
        Self {
            machine,
            auto: AutoTransitionRegistry::new(),
            handlers: StateHandlerRegistry::new(),
        }
    }

    /// Turn transition logging on or off.
    pub fn with_logging(mut self, enabled: bool) -> Self {
        self.machine = self.machine.with_logging(enabled);
        self
    }

    /// See [`StateMachine::add_transition`].
    pub fn add_transition(&mut self, from: S, to: S) {
        self.machine.add_transition(from, to);
    }

    /// See [`StateMachine::add_transition_with`].
    pub fn add_transition_with<F>(&mut self, from: S, to: S, action: F)
    where
        F: FnMut() -> CallbackResult + 'static,
    {
        self.machine.add_transition_with(from, to, action);
    }

    /// Enter `to_state` automatically on the first tick where `guard` holds.
    ///
    /// Replaces any guards previously registered for `to_state`. Only the
    /// first registration of a target decides its priority.
    pub fn add_auto_transition<F>(&mut self, to_state: S, guard: F)
    where
        F: FnMut(Time) -> bool + 'static,
    {
        self.auto.insert(to_state, vec![Guard::new(guard)]);
    }

    /// Enter `to_state` automatically on the first tick where any of
    /// `guards` holds.
    ///
    /// Guards are checked in order and evaluation stops at the first one
    /// that holds. An empty list never fires. Use [`Guard::try_new`] here
    /// for guards that can fail.
    pub fn add_auto_transitions<I>(&mut self, to_state: S, guards: I)
    where
        I: IntoIterator<Item = Guard>,
    {
        self.auto.insert(to_state, guards.into_iter().collect());
    }

    /// Run `handler` on every tick that ends with `state` current.
    ///
    /// Replaces any handler previously registered for `state`.
    pub fn add_state_handler<F>(&mut self, state: S, handler: F)
    where
        F: FnMut(Time) -> CallbackResult + 'static,
    {
        self.handlers.insert(state, Box::new(handler));
    }

    /// Advance the machine by one simulation step at time `now`.
    ///
    /// `now` must not decrease between calls. There is no catch-up: a
    /// driver that skipped steps calls `tick` once per step it wants to run.
    pub fn tick(&mut self, now: Time) -> Result<TickOutcome<S>, MachineError<S>> {
        let transitioned = self.auto.evaluate(now, &mut self.machine)?;
        let handled = self.handlers.dispatch(self.machine.current_state(), now)?;

        Ok(TickOutcome {
            transitioned,
            handled,
        })
    }

    /// See [`StateMachine::change_state`].
    pub fn change_state(&mut self, target: S) -> Result<(), MachineError<S>> {
        self.machine.change_state(target)
    }

    /// Get current state (pure)
    pub fn current_state(&self) -> &S {
        self.machine.current_state()
    }

    pub fn has_transition(&self, from: &S, to: &S) -> bool {
        self.machine.has_transition(from, to)
    }

    pub fn has_handler(&self, state: &S) -> bool {
        self.handlers.contains(state)
    }

    /// Auto-transition targets in evaluation order.
    pub fn auto_targets(&self) -> impl Iterator<Item = &S> {
        self.auto.targets()
    }

    pub fn history(&self) -> &StateHistory<S> {
        self.machine.history()
    }

    /// See [`StateMachine::subscribe`].
    pub fn subscribe<F>(&mut self, observer: F) -> SubscriptionId
    where
        F: FnMut(&S, &S) + 'static,
    {
        self.machine.subscribe(observer)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.machine.unsubscribe(id)
    }

    /// The underlying explicit-transition machine.
    pub fn machine(&self) -> &StateMachine<S> {
        &self.machine
    }
}

impl<S: State> fmt::Debug for AutoStateMachine<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AutoStateMachine")
            .field("machine", &self.machine)
            .field("auto", &self.auto)
            .field("handlers", &self.handlers)
            .finish()
    }
}
