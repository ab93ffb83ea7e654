//! Tickstate: a tick-driven finite state machine engine for game actors
//!
//! Every actor in a game (the player, each enemy, projectiles, menus) owns
//! one machine. The actor registers its states, the transitions it permits
//! and what should happen on them during initialisation, then drives the
//! machine from its fixed-timestep update.
//!
//! # Core Concepts
//!
//! - **State**: Any `Clone + Eq + Hash + Debug` identifier, usually an enum
//! - **Transitions**: Explicitly permitted `(from, to)` pairs with optional
//!   actions; anything else is refused
//! - **Guards**: Predicates over tick time that trigger automatic transitions
//! - **Handlers**: Per-state callbacks run once per tick
//! - **Observers**: Subscribers told about every completed transition
//!
//! # Tick contract
//!
//! [`AutoStateMachine::tick`] first evaluates automatic transitions in
//! registration order and takes at most one, then runs the handler of the
//! state that is current afterwards. Errors are never swallowed: a refused
//! transition, a failing action, guard or handler aborts the call and is
//! returned to the driver, which decides whether it is fatal.
//!
//! # Example
//!
//! ```rust
//! use std::cell::Cell;
//! use std::rc::Rc;
//! use tickstate::{state_enum, AutoStateMachine};
//!
//! state_enum! {
//!     enum Motion {
//!         Idle,
//!         Walking,
//!         Jumping,
//!         Falling,
//!     }
//! }
//!
//! let velocity_y = Rc::new(Cell::new(0.0_f32));
//! let mut machine = AutoStateMachine::new(Motion::Idle);
//!
//! machine.add_transition(Motion::Idle, Motion::Walking);
//! machine.add_transition(Motion::Walking, Motion::Idle);
//! machine.add_transition(Motion::Idle, Motion::Jumping);
//! machine.add_transition(Motion::Jumping, Motion::Falling);
//! machine.add_transition(Motion::Falling, Motion::Idle);
//!
//! let vy = Rc::clone(&velocity_y);
//! machine.add_auto_transition(Motion::Falling, move |_| vy.get() < 0.0);
//!
//! machine.change_state(Motion::Jumping).unwrap();
//! velocity_y.set(-3.0);
//! machine.tick(0.02).unwrap();
//!
//! assert_eq!(machine.current_state(), &Motion::Falling);
//! ```

pub mod builder;
pub mod config;
pub mod core;
pub mod engine;

// Re-export commonly used types
pub use config::{ConfigError, MachineConfig};
pub use core::{CallbackError, CallbackResult, Guard, State, StateHistory, Time, Trigger};
pub use engine::{AutoStateMachine, MachineError, StateMachine, SubscriptionId, TickOutcome};
