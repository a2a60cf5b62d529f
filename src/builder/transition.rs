//! Builder for registering transitions.

use crate::builder::error::BuildError;
use crate::core::{Action, Event, EventName, Guard, Payload, State};
use crate::machine::{Context, Machine, TransitionItem};

/// Fluent registration of one transition alternative on a machine.
pub struct TransitionBuilder<'m, S: State, E: Event, P: Payload> {
    owner: &'m mut Machine<S, E, P>,
    from: Option<S>,
    event: Option<EventName>,
    to: Option<S>,
    guard: Option<Guard<S, E, P>>,
    entry: Action<S, E, P>,
    exit: Action<S, E, P>,
}

impl<'m, S: State, E: Event, P: Payload> TransitionBuilder<'m, S, E, P> {
    pub fn new(owner: &'m mut Machine<S, E, P>) -> Self {
        Self {
            owner,
            from: None,
            event: None,
            to: None,
            guard: None,
            entry: Action::none(),
            exit: Action::none(),
        }
    }

    /// Set source, event and target in one call.
    pub fn set(self, from: S, event: impl Into<EventName>, to: S) -> Self {
        self.from(from).on(event).to(to)
    }

    /// Set the source state (required).
    pub fn from(mut self, state: S) -> Self {
        self.from = Some(state);
        self
    }

    /// Set the triggering event by name (required).
    pub fn on(mut self, event: impl Into<EventName>) -> Self {
        self.event = Some(event.into());
        self
    }

    /// Set the triggering event from an event value.
    pub fn on_event(mut self, event: &E) -> Self {
        self.event = Some(EventName::from_event(event));
        self
    }

    /// Set the triggering event from an event type's short name.
    pub fn on_type<T: ?Sized>(mut self) -> Self {
        self.event = Some(EventName::of::<T>());
        self
    }

    /// Set the target state (required).
    pub fn to(mut self, state: S) -> Self {
        self.to = Some(state);
        self
    }

    /// Guard for this edge only. It sees the edge's target state.
    pub fn guard<F>(self, predicate: F) -> Self
    where
        F: Fn(&E, &Context<S, E, P>, &S, &P) -> bool + Send + Sync + 'static,
    {
        self.with_guard(Guard::new(predicate))
    }

    pub fn with_guard(mut self, guard: Guard<S, E, P>) -> Self {
        self.guard = Some(guard);
        self
    }

    /// Action fired after the state changes; receives the target state.
    pub fn entry_action<F>(mut self, action: F) -> Self
    where
        F: Fn(&E, &Context<S, E, P>, &S, &P) + Send + Sync + 'static,
    {
        self.entry = Action::new(action);
        self
    }

    /// Action fired before the state changes; receives the source state.
    pub fn exit_action<F>(mut self, action: F) -> Self
    where
        F: Fn(&E, &Context<S, E, P>, &S, &P) + Send + Sync + 'static,
    {
        self.exit = Action::new(action);
        self
    }

    /// Register the transition and return the machine for chaining.
    pub fn build(self) -> Result<&'m mut Machine<S, E, P>, BuildError> {
        let from = self.from.ok_or(BuildError::MissingFromState)?;
        let event = self.event.ok_or(BuildError::MissingEvent)?;
        let to = self.to.ok_or(BuildError::MissingToState)?;

        let mut item = TransitionItem::new(to)
            .with_entry_action(self.entry)
            .with_exit_action(self.exit);
        item.guard = self.guard;

        Ok(self.owner.add_transition(from, event, item))
    }
}
