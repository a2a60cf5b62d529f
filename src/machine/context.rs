//! Execution context: the live current state and the target-state guards.

use super::lock::{LockPolicy, NoLock, StepGuard};
use crate::core::{BasicPayload, Guard, State};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::fmt;

/// Mutable session data of one machine instance.
///
/// Guards and actions receive a shared reference to the context, so they can
/// inspect the current state or the registered guards.
///
/// # Example
///
/// ```rust
/// use fsmkit::core::Guard;
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
/// let mut ctx: Context<Door, &'static str> = Context::new(Door::Closed);
/// ctx.add_guard(Door::Opened, Guard::payload_ok());
///
/// assert_eq!(ctx.current(), Door::Closed);
/// assert_eq!(ctx.guard_count(&Door::Opened), 1);
/// ```
pub struct Context<S, E, P = BasicPayload> {
    current: RwLock<S>,
    guards: HashMap<S, Vec<Guard<S, E, P>>>,
    lock: Box<dyn LockPolicy>,
}

impl<S: State, E, P> Context<S, E, P> {
    /// Context without locking.
    pub fn new(initial: S) -> Self {
        Self::with_lock(initial, Box::new(NoLock))
    }

    pub fn with_lock(initial: S, lock: Box<dyn LockPolicy>) -> Self {
        Self {
            current: RwLock::new(initial),
            guards: HashMap::new(),
            lock,
        }
    }

    /// Set the current state, optionally dropping every registered guard.
    pub fn reset(&mut self, state: S, clear_guards: bool) {
        *self.current.get_mut() = state;
        if clear_guards {
            self.guards.clear();
        }
    }

    /// Snapshot of the current state, read under the lock policy.
    pub fn current(&self) -> S {
        let _guard = self.lock.lock();
        self.current.read().clone()
    }

    /// Replace the current state under the lock policy, returning the state
    /// it replaced.
    pub(crate) fn set_current(&self, state: S) -> S {
        let _guard = self.lock.lock();
        std::mem::replace(&mut *self.current.write(), state)
    }

    /// Read the current state without taking the policy lock; the caller
    /// already holds it.
    pub(crate) fn current_unlocked(&self) -> S {
        self.current.read().clone()
    }

    pub(crate) fn lock(&self) -> StepGuard<'_> {
        self.lock.lock()
    }

    pub fn lock_policy(&self) -> &dyn LockPolicy {
        self.lock.as_ref()
    }

    /// Register a guard consulted for every transition into `state`.
    ///
    /// Guards run in the order they were added.
    pub fn add_guard(&mut self, state: S, guard: Guard<S, E, P>) {
        self.guards.entry(state).or_default().push(guard);
    }

    /// Run the guards registered for `to`, stopping at the first rejection.
    ///
    /// Returns true when no guard is registered for `to`.
    pub fn verify(&self, to: &S, event: &E, payload: &P) -> bool {
        match self.guards.get(to) {
            None => true,
            Some(guards) => guards.iter().all(|g| g.check(event, self, to, payload)),
        }
    }

    pub fn guard_count(&self, state: &S) -> usize {
        self.guards.get(state).map_or(0, Vec::len)
    }

    /// States that have at least one guard registered.
    pub fn guarded_states(&self) -> impl Iterator<Item = &S> + '_ {
        self.guards.keys()
    }
}

impl<S: State, E, P> fmt::Debug for Context<S, E, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("current", &*self.current.read())
            .field("guarded_states", &self.guards.len())
            .field("lock", &self.lock.kind())
            .finish()
    }
}
