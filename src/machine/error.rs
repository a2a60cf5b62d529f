//! Step failure reasons and errors.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Why a step was rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Reason {
    /// Reserved; no step path produces it.
    Unknown,

    /// An event-matching transition was found, but a guard registered on its
    /// target state rejected it.
    FailureGuard,

    /// No transition from the current state matches the event, or every
    /// matching edge guard rejected it.
    StateNotFound,
}

impl fmt::Display for Reason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Reason::Unknown => "Unknown",
            Reason::FailureGuard => "FailureGuard",
            Reason::StateNotFound => "StateNotFound",
        })
    }
}

/// A rejected step, as returned by the `try_step_*` methods.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("{reason}: event '{event}' rejected in state '{from}'")]
pub struct StepError {
    pub reason: Reason,
    /// Name of the state the machine stayed in.
    pub from: String,
    /// Name of the rejected event.
    pub event: String,
}
