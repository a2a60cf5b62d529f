//! Entry and exit actions.

use crate::machine::Context;
use std::fmt;
use std::sync::Arc;

type Hook<S, E, P> = dyn Fn(&E, &Context<S, E, P>, &S, &P) + Send + Sync;

/// Nullable `(event, context, state, payload)` hook.
///
/// An empty action is a no-op when invoked. The `state` argument depends on
/// where the action is attached:
///
/// - edge exit action: the state being left
/// - edge entry action: the state being entered
/// - state exit action: the state being transitioned to
/// - state entry action: the state being transitioned from
pub struct Action<S, E, P> {
    hook: Option<Arc<Hook<S, E, P>>>,
}

impl<S, E, P> Action<S, E, P> {
    pub fn new<F>(hook: F) -> Self
    where
        F: Fn(&E, &Context<S, E, P>, &S, &P) + Send + Sync + 'static,
    {
        Self {
            hook: Some(Arc::new(hook)),
        }
    }

    /// An action that does nothing.
    pub fn none() -> Self {
        Self { hook: None }
    }

    pub fn is_set(&self) -> bool {
        self.hook.is_some()
    }

    /// Invoke the hook, if any.
    pub fn call(&self, event: &E, ctx: &Context<S, E, P>, state: &S, payload: &P) {
        if let Some(hook) = &self.hook {
            hook(event, ctx, state, payload);
        }
    }
}

impl<S, E, P> Default for Action<S, E, P> {
    fn default() -> Self {
        Self::none()
    }
}

impl<S, E, P> Clone for Action<S, E, P> {
    fn clone(&self) -> Self {
        Self {
            hook: self.hook.clone(),
        }
    }
}

impl<S, E, P> fmt::Debug for Action<S, E, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_set() {
            f.write_str("Action(..)")
        } else {
            f.write_str("Action(none)")
        }
    }
}

/// Entry/exit actions attached to a state, fired for every transition that
/// enters or leaves it.
#[derive(Debug)]
pub struct StateActions<S, E, P> {
    pub entry: Action<S, E, P>,
    pub exit: Action<S, E, P>,
}

impl<S, E, P> StateActions<S, E, P> {
    pub fn new(entry: Action<S, E, P>, exit: Action<S, E, P>) -> Self {
        Self { entry, exit }
    }

    /// True when at least one of the actions is set.
    pub fn is_set(&self) -> bool {
        self.entry.is_set() || self.exit.is_set()
    }
}

impl<S, E, P> Default for StateActions<S, E, P> {
    fn default() -> Self {
        Self::new(Action::none(), Action::none())
    }
}

impl<S, E, P> Clone for StateActions<S, E, P> {
    fn clone(&self) -> Self {
        Self {
            entry: self.entry.clone(),
            exit: self.exit.clone(),
        }
    }
}
