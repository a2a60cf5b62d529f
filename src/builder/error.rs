//! Build errors for state and transition builders.

use thiserror::Error;

/// Errors that can occur when finishing a builder.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    #[error("State not specified. Call .set(state) before .build()")]
    MissingState,

    #[error("Transition source state not specified. Call .from(state) or .set(from, event, to)")]
    MissingFromState,

    #[error("Transition event not specified. Call .on(event) or .set(from, event, to)")]
    MissingEvent,

    #[error("Transition target state not specified. Call .to(state) or .set(from, event, to)")]
    MissingToState,
}
