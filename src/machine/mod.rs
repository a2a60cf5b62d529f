//! The state machine engine.
//!
//! # Key Concepts
//!
//! - **Context**: owns the live current state and the target-state guards
//! - **Transition table**: per source state, per event name, an ordered list
//!   of guarded alternatives
//! - **Machine**: registration plus the step algorithm
//! - **Lock policy**: chosen at construction, serialises concurrent steps

mod context;
mod engine;
mod error;
mod lock;
mod options;
mod transition;

pub use context::Context;
pub use engine::{Machine, OnError, OnTransition};
pub use error::{Reason, StepError};
pub use lock::{LockKind, LockPolicy, MutexLock, NoLock, StepGuard};
pub use options::MachineOptions;
pub use transition::{Transition, TransitionItem};
