//! Shared callback vocabulary.

/// Simulation time handed to guards and handlers, in seconds.
///
/// The driver supplies it once per tick and it must never decrease between
/// calls on the same machine.
pub type Time = f32;

/// Error a collaborator callback may return.
///
/// Boxed so that actors can surface whatever error type they already use.
pub type CallbackError = Box<dyn std::error::Error + Send + Sync>;

/// Result of a fallible collaborator callback.
pub type CallbackResult<T = ()> = Result<T, CallbackError>;
