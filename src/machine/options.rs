//! Construction-time machine configuration.

use super::lock::LockKind;
use serde::{Deserialize, Serialize};

/// Options fixed when a machine is constructed.
///
/// Every field has a default, so hosts can deserialize partial configuration:
///
/// ```rust
/// use fsmkit::machine::{LockKind, MachineOptions};
///
/// let options: MachineOptions =
///     serde_json::from_str(r#"{ "lock": "mutex", "history_limit": 32 }"#).unwrap();
///
/// assert_eq!(options.lock, LockKind::Mutex);
/// assert!(options.record_history);
/// assert_eq!(options.history_limit, Some(32));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MachineOptions {
    /// Lock policy guarding the current state.
    pub lock: LockKind,

    /// Record committed transitions in the machine's history.
    ///
    /// On by default. Each committed step then takes the history mutex and
    /// reads the system clock; turn it off for hot single-threaded loops that
    /// never look at the history or take checkpoints.
    pub record_history: bool,

    /// Keep at most this many transitions; `None` keeps all of them.
    pub history_limit: Option<usize>,
}

impl Default for MachineOptions {
    fn default() -> Self {
        Self {
            lock: LockKind::None,
            record_history: true,
            history_limit: Some(1024),
        }
    }
}

impl MachineOptions {
    /// Defaults with the mutex lock policy.
    pub fn synchronized() -> Self {
        Self {
            lock: LockKind::Mutex,
            ..Self::default()
        }
    }

    pub fn lock(mut self, lock: LockKind) -> Self {
        self.lock = lock;
        self
    }

    pub fn record_history(mut self, record: bool) -> Self {
        self.record_history = record;
        self
    }

    pub fn history_limit(mut self, limit: Option<usize>) -> Self {
        self.history_limit = limit;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_single_threaded_with_history() {
        let options = MachineOptions::default();
        assert_eq!(options.lock, LockKind::None);
        assert!(options.record_history);
        assert_eq!(options.history_limit, Some(1024));
    }

    #[test]
    fn empty_config_uses_defaults() {
        let options: MachineOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(options, MachineOptions::default());
    }

    #[test]
    fn setters_override_fields() {
        let options = MachineOptions::synchronized()
            .record_history(false)
            .history_limit(None);
        assert_eq!(options.lock, LockKind::Mutex);
        assert!(!options.record_history);
        assert_eq!(options.history_limit, None);
    }
}
