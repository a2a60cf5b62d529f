//! Builder API for ergonomic state machine construction.
//!
//! Builders borrow the machine mutably, collect one state or transition, and
//! register it on `build()`, returning the machine so calls can be chained:
//!
//! ```
//! use fsmkit::machine::Machine;
//! use fsmkit::state_enum;
//!
//! state_enum! {
//!     enum Light {
//!         Red,
//!         Green,
//!     }
//! }
//!
//! let mut m: Machine<Light, &'static str> = Machine::new(Light::Red);
//! m.transition()
//!     .set(Light::Red, "go", Light::Green)
//!     .build()?
//!     .transition()
//!     .set(Light::Green, "stop", Light::Red)
//!     .build()?;
//!
//! assert_eq!(m.feed(["go", "stop", "go"]), 3);
//! # Ok::<(), fsmkit::builder::BuildError>(())
//! ```

pub mod error;
pub mod macros;
pub mod state;
pub mod transition;

pub use error::BuildError;
pub use state::StateBuilder;
pub use transition::TransitionBuilder;
