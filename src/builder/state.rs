//! Builder for registering states.

use crate::builder::error::BuildError;
use crate::core::{Action, Event, Guard, Payload, State, StateActions};
use crate::machine::{Context, Machine};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Role {
    Initial,
    Terminated,
    Error,
}

/// Fluent registration of one state on a machine.
///
/// `as_initial`, `as_terminated` and `as_error` are mutually exclusive; the
/// last one called wins.
///
/// # Example
///
/// ```rust
/// use fsmkit::core::{BasicPayload, Payload};
/// use fsmkit::machine::Machine;
/// use fsmkit::state_enum;
///
/// state_enum! {
///     enum Door {
///         Initial,
///         Opened,
///         Terminated,
///     }
/// }
///
/// let mut m: Machine<Door, &'static str> = Machine::new(Door::Initial);
/// m.state().set(Door::Terminated).as_terminated().build().unwrap();
/// m.state()
///     .set(Door::Opened)
///     .guard(|_, _, _, p: &BasicPayload| p.ok())
///     .entry_action(|_, _, _, _| println!("opened"))
///     .build()
///     .unwrap();
///
/// assert_eq!(m.terminated(), Some(&Door::Terminated));
/// assert_eq!(m.context().guard_count(&Door::Opened), 1);
/// ```
pub struct StateBuilder<'m, S: State, E: Event, P: Payload> {
    owner: &'m mut Machine<S, E, P>,
    state: Option<S>,
    role: Option<Role>,
    guards: Vec<Guard<S, E, P>>,
    entry: Action<S, E, P>,
    exit: Action<S, E, P>,
}

impl<'m, S: State, E: Event, P: Payload> StateBuilder<'m, S, E, P> {
    pub fn new(owner: &'m mut Machine<S, E, P>) -> Self {
        Self {
            owner,
            state: None,
            role: None,
            guards: Vec::new(),
            entry: Action::none(),
            exit: Action::none(),
        }
    }

    /// Set the state being registered (required).
    pub fn set(mut self, state: S) -> Self {
        self.state = Some(state);
        self
    }

    pub fn as_initial(mut self) -> Self {
        self.role = Some(Role::Initial);
        self
    }

    pub fn as_terminated(mut self) -> Self {
        self.role = Some(Role::Terminated);
        self
    }

    pub fn as_error(mut self) -> Self {
        self.role = Some(Role::Error);
        self
    }

    /// Add a guard consulted for every transition into this state.
    pub fn guard<F>(self, predicate: F) -> Self
    where
        F: Fn(&E, &Context<S, E, P>, &S, &P) -> bool + Send + Sync + 'static,
    {
        self.with_guard(Guard::new(predicate))
    }

    pub fn with_guard(mut self, guard: Guard<S, E, P>) -> Self {
        self.guards.push(guard);
        self
    }

    /// Action fired when any transition enters this state. Its state argument
    /// is the state being left.
    pub fn entry_action<F>(mut self, action: F) -> Self
    where
        F: Fn(&E, &Context<S, E, P>, &S, &P) + Send + Sync + 'static,
    {
        self.entry = Action::new(action);
        self
    }

    /// Action fired when any transition leaves this state. Its state argument
    /// is the state being entered.
    pub fn exit_action<F>(mut self, action: F) -> Self
    where
        F: Fn(&E, &Context<S, E, P>, &S, &P) + Send + Sync + 'static,
    {
        self.exit = Action::new(action);
        self
    }

    /// Register the state and return the machine for chaining.
    pub fn build(self) -> Result<&'m mut Machine<S, E, P>, BuildError> {
        let state = self.state.ok_or(BuildError::MissingState)?;
        let owner = self.owner;

        match self.role {
            Some(Role::Initial) => {
                owner.set_initial(state.clone());
            }
            Some(Role::Terminated) => {
                owner.set_terminated(state.clone());
            }
            Some(Role::Error) => {
                owner.set_error(state.clone());
            }
            None => {}
        }
        for guard in self.guards {
            owner.add_guard(state.clone(), guard);
        }
        owner.add_state(state, StateActions::new(self.entry, self.exit));

        Ok(owner)
    }
}
