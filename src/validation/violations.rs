//! Problems found in a machine definition.

use thiserror::Error;

/// A definition problem reported by [`Machine::validate`](crate::machine::Machine::validate).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DefinitionError {
    #[error("No transitions defined. Add at least one transition")]
    NoTransitions,

    #[error("Initial state '{state}' has no outgoing transitions")]
    InitialHasNoExit { state: String },

    #[error("Terminated state '{state}' has outgoing transitions on: {events:?}")]
    ExitFromTerminated { state: String, events: Vec<String> },

    #[error("Guards registered for '{state}', but no transition targets it")]
    UnreachableGuardedState { state: String },
}
