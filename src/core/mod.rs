//! Core state machine vocabulary.
//!
//! This module contains the building blocks the engine is assembled from:
//! - States via the `State` trait
//! - Events via the `Event` trait, keyed by stable identifiers
//! - Payloads carrying a guard approval flag
//! - Guard predicates and nullable entry/exit actions
//! - History of committed transitions

mod action;
mod event;
mod guard;
mod history;
pub mod ident;
mod payload;
mod state;

pub use action::{Action, StateActions};
pub use event::{Event, EventName};
pub use guard::Guard;
pub use history::{StateHistory, StateTransition};
pub use payload::{BasicPayload, Payload};
pub use state::State;
