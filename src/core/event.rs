//! Events and their dispatch identifiers.

use super::ident::short_type_name;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt::{self, Debug, Display};

/// A trigger presented to a machine to request a transition.
///
/// The machine never inspects event types at runtime; it dispatches on
/// [`Event::name`]. The default name is the type name with its module path
/// stripped, so one struct per event kind needs no extra code. Enums of events
/// (see [`event_enum!`](crate::event_enum)) return one name per variant.
///
/// # Example
///
/// ```rust
/// use fsmkit::core::Event;
///
/// #[derive(Debug)]
/// struct Begin {
///     val: i32,
/// }
///
/// impl Event for Begin {}
///
/// let ev = Begin { val: 9 };
/// assert_eq!(ev.name(), "Begin");
/// assert_eq!(ev.val, 9);
/// ```
pub trait Event: Debug + Send + Sync {
    /// Stable identifier used as the dispatch key.
    fn name(&self) -> &str {
        short_type_name::<Self>()
    }

    /// Human-readable description for diagnostics.
    fn describe(&self) -> String {
        self.name().to_owned()
    }
}

impl Event for &'static str {
    fn name(&self) -> &str {
        self
    }
}

impl Event for String {
    fn name(&self) -> &str {
        self.as_str()
    }
}

/// Registration-side event identifier.
///
/// Transitions are registered under an `EventName` and looked up with
/// [`Event::name`]; both sides must agree on the string.
///
/// # Example
///
/// ```rust
/// use fsmkit::core::{Event, EventName};
///
/// #[derive(Debug)]
/// struct Open;
/// impl Event for Open {}
///
/// assert_eq!(EventName::of::<Open>(), EventName::from("Open"));
/// assert_eq!(EventName::from_event(&Open).as_str(), Open.name());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EventName(String);

impl EventName {
    /// Name derived from a type, stripped of its module path.
    pub fn of<T: ?Sized>() -> Self {
        Self(short_type_name::<T>().to_owned())
    }

    /// Name an event value dispatches under.
    pub fn from_event<E: Event + ?Sized>(event: &E) -> Self {
        Self(event.name().to_owned())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl From<&str> for EventName {
    fn from(name: &str) -> Self {
        Self(name.to_owned())
    }
}

impl From<String> for EventName {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl AsRef<str> for EventName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for EventName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl Display for EventName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
