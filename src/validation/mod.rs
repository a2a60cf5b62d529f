//! Definition validation that accumulates every problem.
//!
//! A machine definition is checked as a whole with Stillwater's `Validation`
//! rather than `Result`, so one call reports everything that looks wrong:
//!
//! ```rust
//! use fsmkit::machine::{Machine, TransitionItem};
//! use fsmkit::state_enum;
//! use stillwater::validation::Validation;
//!
//! state_enum! {
//!     enum Door {
//!         Initial,
//!         Closed,
//!         Terminated,
//!     }
//! }
//!
//! let mut m: Machine<Door, &'static str> = Machine::new(Door::Initial);
//! m.set_terminated(Door::Terminated);
//! m.add_transition(Door::Closed, "end", TransitionItem::new(Door::Terminated))
//!     .add_transition(Door::Terminated, "again", TransitionItem::new(Door::Closed));
//!
//! match m.validate() {
//!     Validation::Failure(errors) => assert_eq!(errors.len(), 2),
//!     Validation::Success(_) => panic!("definition should be rejected"),
//! }
//! ```

pub mod rules;
pub mod violations;

pub use rules::DefinitionReport;
pub use violations::DefinitionError;
