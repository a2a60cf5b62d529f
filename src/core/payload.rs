//! Payloads carried alongside events.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Debug, Display};

/// Auxiliary data passed with an event.
///
/// Guards typically consult [`Payload::ok`] to approve or reject the pending
/// transition. Implement the trait on your own type to carry richer data.
pub trait Payload: Debug + Send + Sync {
    /// Approval flag consulted by guards.
    fn ok(&self) -> bool {
        true
    }

    /// Stringification hook for diagnostics.
    fn describe(&self) -> String {
        format!("{self:?}")
    }
}

/// Default payload: a single approval flag, `true` unless stated otherwise.
///
/// # Example
///
/// ```rust
/// use fsmkit::core::{BasicPayload, Payload};
///
/// assert!(BasicPayload::default().ok());
/// assert!(!BasicPayload::rejected().ok());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BasicPayload {
    pub ok: bool,
}

impl BasicPayload {
    pub fn new(ok: bool) -> Self {
        Self { ok }
    }

    pub fn rejected() -> Self {
        Self { ok: false }
    }
}

impl Default for BasicPayload {
    fn default() -> Self {
        Self { ok: true }
    }
}

impl Payload for BasicPayload {
    fn ok(&self) -> bool {
        self.ok
    }

    fn describe(&self) -> String {
        self.to_string()
    }
}

impl Display for BasicPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "payload(ok={})", self.ok)
    }
}
