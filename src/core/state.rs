//! State identifier trait.
//!
//! The engine never inspects states beyond equality and hashing, so any
//! small identifier type works: a closed enum, an integer id, or an
//! interned string.

use std::fmt::Debug;
use std::hash::Hash;

/// Trait for state machine states.
///
/// States are opaque identifiers. The engine compares them, hashes them as
/// table keys and prints them in logs and errors; nothing else.
///
/// The trait is implemented for every type meeting the bounds, so there is
/// nothing to write by hand. Use [`state_enum!`](crate::state_enum) to
/// declare a closed set of states with the right derives.
///
/// # Example
///
/// ```rust
/// use tickstate::core::State;
///
/// #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
/// enum DoorState {
///     Open,
///     Closed,
/// }
///
/// fn assert_state<S: State>() {}
/// assert_state::<DoorState>();
/// assert_state::<u8>();
/// assert_state::<&'static str>();
/// ```
pub trait State: Clone + Eq + Hash + Debug + 'static {}

impl<T> State for T where T: Clone + Eq + Hash + Debug + 'static {}
