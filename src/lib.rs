//! fsmkit: a declarative finite state machine library
//!
//! A machine is a table of `(from, event) -> to` transitions, registered up
//! front and then driven by events. Each step selects the first transition
//! alternative whose guard accepts, checks the target state's guards, runs
//! the exit and entry actions and moves the current state.
//!
//! # Core Concepts
//!
//! - **State**: Type-safe state representation via the `State` trait
//! - **Event**: Anything with a name; the name selects the transition
//! - **Guards**: Predicates on edges and on target states
//! - **Actions**: Entry and exit hooks on edges and on states
//! - **History**: Optional record of committed transitions
//!
//! # Example
//!
//! ```rust
//! use fsmkit::{event_enum, state_enum, Machine, Reason};
//!
//! state_enum! {
//!     enum Door {
//!         Initial,
//!         Closed,
//!         Opened,
//!         Terminated,
//!     }
//!     final: [Terminated]
//! }
//!
//! event_enum! {
//!     enum DoorEvent {
//!         Begin,
//!         Open,
//!         Close,
//!         End,
//!     }
//! }
//!
//! let mut m: Machine<Door, DoorEvent> = Machine::new(Door::Initial);
//! m.state().set(Door::Terminated).as_terminated().build()?;
//! m.transition().set(Door::Initial, "Begin", Door::Closed).build()?;
//! m.transition().set(Door::Closed, "Open", Door::Opened).build()?;
//! m.transition().set(Door::Opened, "Close", Door::Closed).build()?;
//! m.transition().set(Door::Closed, "End", Door::Terminated).build()?;
//!
//! assert!(m.step_by(&DoorEvent::Begin));
//! let err = m.try_step_by(&DoorEvent::Close).unwrap_err();
//! assert_eq!(err.reason, Reason::StateNotFound);
//!
//! m.feed([DoorEvent::Open, DoorEvent::Close, DoorEvent::End]);
//! assert!(m.is_terminated());
//! # Ok::<(), fsmkit::builder::BuildError>(())
//! ```

pub mod builder;
pub mod checkpoint;
pub mod core;
pub mod machine;
pub mod validation;

// Re-export commonly used types
pub use core::{BasicPayload, Event, EventName, Guard, Payload, State, StateHistory};
pub use machine::{Machine, MachineOptions, Reason, StepError, TransitionItem};
