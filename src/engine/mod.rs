//! State machine engines.
//!
//! Two layers, the second built on the first:
//!
//! - [`StateMachine`]: explicit, validated transitions with optional
//!   actions and change observers
//! - [`AutoStateMachine`]: adds guard-driven automatic transitions and
//!   per-state handlers, advanced by calling `tick(now)` once per
//!   simulation step
//!
//! Both are single-threaded and synchronous. Every callback runs to
//! completion on the caller's thread, and errors propagate to the caller
//! without retry.

mod auto;
mod auto_machine;
mod error;
mod handlers;
mod machine;
mod observer;

pub use auto::{AutoTransitionRegistry, AutoTransitionRule};
pub use auto_machine::{AutoStateMachine, TickOutcome};
pub use error::MachineError;
pub use handlers::{Handler, StateHandlerRegistry};
pub use machine::StateMachine;
pub use observer::{Observer, SubscriptionId};
