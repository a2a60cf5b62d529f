//! Guard predicates for controlling state transitions.
//!
//! Guards are boolean functions that determine whether a transition can
//! execute. They are expected to be free of side effects; the machine does not
//! roll back anything a rejecting guard did.

use super::payload::Payload;
use crate::machine::Context;
use std::fmt;
use std::sync::Arc;

type Predicate<S, E, P> = dyn Fn(&E, &Context<S, E, P>, &S, &P) -> bool + Send + Sync;

/// Predicate `(event, context, candidate target, payload) -> bool`.
///
/// A guard is either attached to one transition edge or registered on a target
/// state, where it is consulted for every transition entering that state.
///
/// # Example
///
/// ```rust
/// use fsmkit::core::{BasicPayload, Guard};
/// use fsmkit::machine::Context;
/// use fsmkit::state_enum;
///
/// state_enum! {
///     enum Door {
///         Closed,
///         Opened,
///     }
/// }
///
/// let ctx: Context<Door, &'static str> = Context::new(Door::Closed);
/// let guard = Guard::payload_ok();
///
/// assert!(guard.check(&"open", &ctx, &Door::Opened, &BasicPayload::default()));
/// assert!(!guard.check(&"open", &ctx, &Door::Opened, &BasicPayload::rejected()));
/// ```
pub struct Guard<S, E, P> {
    predicate: Arc<Predicate<S, E, P>>,
}

impl<S, E, P> Guard<S, E, P> {
    /// Create a guard from a predicate function.
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&E, &Context<S, E, P>, &S, &P) -> bool + Send + Sync + 'static,
    {
        Guard {
            predicate: Arc::new(predicate),
        }
    }

    /// Evaluate the guard for a pending transition into `to`.
    pub fn check(&self, event: &E, ctx: &Context<S, E, P>, to: &S, payload: &P) -> bool {
        (self.predicate)(event, ctx, to, payload)
    }
}

impl<S, E, P: Payload> Guard<S, E, P> {
    /// Guard that accepts exactly when the payload's `ok` flag is set.
    pub fn payload_ok() -> Self {
        Self::new(|_, _, _, payload: &P| payload.ok())
    }
}

impl<S, E, P> Clone for Guard<S, E, P> {
    fn clone(&self) -> Self {
        Self {
            predicate: Arc::clone(&self.predicate),
        }
    }
}

impl<S, E, P> fmt::Debug for Guard<S, E, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Guard(..)")
    }
}
