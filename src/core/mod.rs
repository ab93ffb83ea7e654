//! Core state machine types.
//!
//! This module contains the building blocks the engines are made of:
//! - State identifiers via the `State` trait
//! - The table of permitted transitions and their actions
//! - Guard predicates over tick time
//! - Bounded transition history

mod callback;
mod guard;
mod history;
mod state;
mod table;

pub use callback::{CallbackError, CallbackResult, Time};
pub use guard::Guard;
pub use history::{StateHistory, StateTransition, Trigger};
pub use state::State;
pub use table::{Action, TransitionTable};
