//! Automatic, guard-driven transitions.

use crate::core::{CallbackResult, Guard, State, Time, Trigger};
use crate::engine::error::MachineError;
use crate::engine::machine::StateMachine;
use tracing::trace;

/// Guards that move the machine to `target` when any of them holds.
#[derive(Debug)]
pub struct AutoTransitionRule<S> {
    target: S,
    guards: Vec<Guard>,
}

impl<S: State> AutoTransitionRule<S> {
    pub fn target(&self) -> &S {
        &self.target
    }

    pub fn guard_count(&self) -> usize {
        self.guards.len()
    }

    /// OR over the guards, in registration order, stopping at the first
    /// one that holds. No guards means the rule never fires.
    fn fires(&mut self, now: Time) -> CallbackResult<bool> {
        for guard in &mut self.guards {
            if guard.check(now)? {
                return Ok(true);
            }
        }
        Ok(false)
    }
}

/// Ordered set of automatic transition rules.
///
/// Rules are checked in the order their targets were first registered, and
/// the first rule that fires wins the tick. Registering guards for a target
/// that already has a rule replaces that rule's guards but keeps its place
/// in the order.
#[derive(Debug)]
pub struct AutoTransitionRegistry<S: State> {
    rules: Vec<AutoTransitionRule<S>>,
}

impl<S: State> AutoTransitionRegistry<S> {
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Set the guards for `target`, replacing any earlier ones.
    pub fn insert(&mut self, target: S, guards: Vec<Guard>) {
        match self.rules.iter_mut().find(|rule| rule.target == target) {
            Some(rule) => rule.guards = guards,
            None => self.rules.push(AutoTransitionRule { target, guards }),
        }
    }

    /// Targets in evaluation order.
    pub fn targets(&self) -> impl Iterator<Item = &S> {
        self.rules.iter().map(|rule| &rule.target)
    }

    pub fn rules(&self) -> &[AutoTransitionRule<S>] {
        &self.rules
    }

    pub fn contains(&self, target: &S) -> bool {
        self.rules.iter().any(|rule| &rule.target == target)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Fire at most one automatic transition for the tick at `now`.
    ///
    /// Returns the `(from, to)` pair that was taken, if any. A guard that
    /// fires towards a target with no registered transition from the
    /// current state is a wiring mistake and surfaces as
    /// [`MachineError::UnknownTransition`].
    pub fn evaluate(
        &mut self,
        now: Time,
        machine: &mut StateMachine<S>,
    ) -> Result<Option<(S, S)>, MachineError<S>> {
        for (index, rule) in self.rules.iter_mut().enumerate() {
            let fired = rule
                .fires(now)
                .map_err(|source| MachineError::GuardFailed {
                    target: rule.target.clone(),
                    source,
                })?;

            if !fired {
                continue;
            }

            trace!(to = ?rule.target, rule = index, now, "auto-transition selected");

            let from = machine.current_state().clone();
            machine.transition_to(rule.target.clone(), Trigger::Auto, Some(now))?;
            return Ok(Some((from, rule.target.clone())));
        }

        Ok(None)
    }
}

impl<S: State> Default for AutoTransitionRegistry<S> {
    fn default() -> Self {
        Self::new()
    }
}
