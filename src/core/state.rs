//! Core State trait for state machine states.
//!
//! A state is an opaque value; its identity is the value itself. The machine
//! uses states as hash-map keys for its transition table, state actions and
//! guard registry.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::hash::Hash;

/// Trait for state machine states.
///
/// # Required Traits
///
/// - `Clone`: the machine hands out snapshots of the current state
/// - `Eq` + `Hash`: states key the transition table and registries
/// - `Debug`: states must be debuggable for diagnostics
/// - `Serialize` + `Deserialize`: history and checkpoints are serializable
///
/// Use [`state_enum!`](crate::state_enum) to derive all of this for plain enums.
///
/// # Example
///
/// ```rust
/// use fsmkit::core::State;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
/// enum Door {
///     Initial,
///     Closed,
///     Opened,
///     Terminated,
/// }
///
/// impl State for Door {
///     fn name(&self) -> &str {
///         match self {
///             Self::Initial => "Initial",
///             Self::Closed => "Closed",
///             Self::Opened => "Opened",
///             Self::Terminated => "Terminated",
///         }
///     }
///
///     fn is_final(&self) -> bool {
///         matches!(self, Self::Terminated)
///     }
/// }
/// ```
pub trait State:
    Clone + Eq + Hash + Debug + Serialize + for<'de> Deserialize<'de> + Send + Sync + 'static
{
    /// Get the state's name for display/logging.
    fn name(&self) -> &str;

    /// Check if this is a final (terminal) state.
    ///
    /// This is a domain hint only; the machine's own terminated role is set
    /// through registration.
    fn is_final(&self) -> bool {
        false
    }

    /// Check if this is an error state.
    fn is_error(&self) -> bool {
        false
    }
}
