//! Guard predicates for automatic transitions.
//!
//! A guard looks at the tick time (and whatever external state it closed
//! over) and answers whether its target state should be entered now.

use super::callback::{CallbackResult, Time};
use std::fmt;

/// Predicate over tick time that can trigger an automatic transition.
///
/// Guards are expected to be read-only with respect to the machine, but they
/// may read or write collaborator state they captured, such as a physics
/// body or a cooldown timer. The engine only fixes when and in what order
/// they run.
///
/// # Example
///
/// ```rust
/// use tickstate::core::Guard;
///
/// let mut after_two_seconds = Guard::new(|now| now >= 2.0);
///
/// assert!(!after_two_seconds.check(1.0).unwrap());
/// assert!(after_two_seconds.check(2.5).unwrap());
/// ```
pub struct Guard {
    predicate: Box<dyn FnMut(Time) -> CallbackResult<bool>>,
}

impl Guard {
    /// Create a guard from an infallible predicate.
    pub fn new<F>(mut predicate: F) -> Self
    where
        F: FnMut(Time) -> bool + 'static,
    {
        Guard {
            predicate: Box::new(move |now| Ok(predicate(now))),
        }
    }

    /// Create a guard whose predicate can fail.
    ///
    /// An error aborts the tick that evaluated it.
    ///
    /// ```rust
    /// use tickstate::core::Guard;
    ///
    /// let mut guard = Guard::try_new(|now| {
    ///     if now.is_nan() {
    ///         return Err("time went NaN".into());
    ///     }
    ///     Ok(now > 1.0)
    /// });
    ///
    /// assert!(guard.check(f32::NAN).is_err());
    /// assert!(guard.check(3.0).unwrap());
    /// ```
    pub fn try_new<F>(predicate: F) -> Self
    where
        F: FnMut(Time) -> CallbackResult<bool> + 'static,
    {
        Guard {
            predicate: Box::new(predicate),
        }
    }

    /// Evaluate the guard for the tick at `now`.
    pub fn check(&mut self, now: Time) -> CallbackResult<bool> {
        (self.predicate)(now)
    }
}

impl<F> From<F> for Guard
where
    F: FnMut(Time) -> bool + 'static,
{
    fn from(predicate: F) -> Self {
        Guard::new(predicate)
    }
}

impl fmt::Debug for Guard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Guard").finish_non_exhaustive()
    }
}
