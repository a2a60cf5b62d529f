//! Transition table entries.

use super::context::Context;
use crate::core::{Action, Guard, State};
use std::collections::HashMap;

/// One concrete alternative for a (source state, event) pair.
pub struct TransitionItem<S, E, P> {
    pub guard: Option<Guard<S, E, P>>,
    pub to: S,
    pub entry_action: Action<S, E, P>,
    pub exit_action: Action<S, E, P>,
}

impl<S: State, E, P> TransitionItem<S, E, P> {
    /// Unguarded item without actions.
    pub fn new(to: S) -> Self {
        Self {
            guard: None,
            to,
            entry_action: Action::none(),
            exit_action: Action::none(),
        }
    }

    /// Guard this edge; it sees the edge's target state.
    pub fn with_guard(mut self, guard: Guard<S, E, P>) -> Self {
        self.guard = Some(guard);
        self
    }

    /// Action run after the state changes, given the target state.
    pub fn with_entry_action(mut self, action: Action<S, E, P>) -> Self {
        self.entry_action = action;
        self
    }

    /// Action run before the state changes, given the source state.
    pub fn with_exit_action(mut self, action: Action<S, E, P>) -> Self {
        self.exit_action = action;
        self
    }

    /// Evaluate the edge guard; an item without a guard always accepts.
    pub fn accepts(&self, event: &E, ctx: &Context<S, E, P>, payload: &P) -> bool {
        self.guard
            .as_ref()
            .is_none_or(|g| g.check(event, ctx, &self.to, payload))
    }
}

impl<S: Clone, E, P> Clone for TransitionItem<S, E, P> {
    fn clone(&self) -> Self {
        Self {
            guard: self.guard.clone(),
            to: self.to.clone(),
            entry_action: self.entry_action.clone(),
            exit_action: self.exit_action.clone(),
        }
    }
}

impl<S: std::fmt::Debug, E, P> std::fmt::Debug for TransitionItem<S, E, P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransitionItem")
            .field("to", &self.to)
            .field("guarded", &self.guard.is_some())
            .field("entry_action", &self.entry_action)
            .field("exit_action", &self.exit_action)
            .finish()
    }
}

/// Outgoing transitions of one source state, keyed by event name.
pub struct Transition<S, E, P> {
    items: HashMap<String, Vec<TransitionItem<S, E, P>>>,
}

impl<S: State, E, P> Transition<S, E, P> {
    /// An entry with no alternatives.
    pub fn new() -> Self {
        Self {
            items: HashMap::new(),
        }
    }

    /// Append an alternative for `event`. Earlier alternatives take priority.
    pub fn add(&mut self, event: impl Into<String>, item: TransitionItem<S, E, P>) {
        self.items.entry(event.into()).or_default().push(item);
    }

    /// First alternative for `event` whose edge guard accepts.
    pub fn get(
        &self,
        event_name: &str,
        event: &E,
        ctx: &Context<S, E, P>,
        payload: &P,
    ) -> Option<&TransitionItem<S, E, P>> {
        self.items
            .get(event_name)?
            .iter()
            .find(|item| item.accepts(event, ctx, payload))
    }

    /// All alternatives registered for `event_name`, in priority order.
    pub fn candidates(&self, event_name: &str) -> &[TransitionItem<S, E, P>] {
        self.items.get(event_name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Event names with registered alternatives, in no particular order.
    pub fn events(&self) -> impl Iterator<Item = &str> + '_ {
        self.items.keys().map(String::as_str)
    }

    /// Every target state reachable through this entry.
    pub fn targets(&self) -> impl Iterator<Item = &S> + '_ {
        self.items.values().flatten().map(|item| &item.to)
    }

    /// True when no alternative is registered for any event.
    pub fn is_empty(&self) -> bool {
        self.items.values().all(Vec::is_empty)
    }
}

impl<S: State, E, P> Default for Transition<S, E, P> {
    fn default() -> Self {
        Self::new()
    }
}
