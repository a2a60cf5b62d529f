//! State transition history tracking.

use super::state::State;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::time::Duration;

/// Record of a single committed state transition.
///
/// # Example
///
/// ```rust
/// use fsmkit::core::StateTransition;
/// use fsmkit::state_enum;
/// use chrono::Utc;
///
/// state_enum! {
///     enum Door {
///         Closed,
///         Opened,
///     }
/// }
///
/// let transition = StateTransition {
///     from: Door::Closed,
///     to: Door::Opened,
///     event: "open".to_string(),
///     timestamp: Utc::now(),
/// };
/// assert_eq!(transition.event, "open");
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct StateTransition<S: State> {
    /// The state being transitioned from
    pub from: S,
    /// The state being transitioned to
    pub to: S,
    /// Name of the event that triggered the transition
    pub event: String,
    /// When the transition was committed
    pub timestamp: DateTime<Utc>,
}

/// Ordered history of state transitions, optionally bounded.
///
/// When a limit is set, recording beyond it drops the oldest entries.
///
/// # Example
///
/// ```rust
/// use fsmkit::core::{StateHistory, StateTransition};
/// use fsmkit::state_enum;
/// use chrono::Utc;
///
/// state_enum! {
///     enum Phase {
///         One,
///         Two,
///         Three,
///     }
/// }
///
/// let mut history = StateHistory::new();
/// history.record(StateTransition {
///     from: Phase::One,
///     to: Phase::Two,
///     event: "next".to_string(),
///     timestamp: Utc::now(),
/// });
/// history.record(StateTransition {
///     from: Phase::Two,
///     to: Phase::Three,
///     event: "next".to_string(),
///     timestamp: Utc::now(),
/// });
///
/// assert_eq!(history.get_path(), vec![&Phase::One, &Phase::Two, &Phase::Three]);
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct StateHistory<S: State> {
    transitions: VecDeque<StateTransition<S>>,
    limit: Option<usize>,
}

impl<S: State> Default for StateHistory<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: State> StateHistory<S> {
    /// Create a new, unbounded, empty history.
    pub fn new() -> Self {
        Self {
            transitions: VecDeque::new(),
            limit: None,
        }
    }

    /// Create a history that keeps at most `limit` transitions.
    pub fn bounded(limit: usize) -> Self {
        Self {
            transitions: VecDeque::with_capacity(limit.min(64)),
            limit: Some(limit),
        }
    }

    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    /// Append a transition, evicting the oldest one when over the limit.
    pub fn record(&mut self, transition: StateTransition<S>) {
        if self.limit == Some(0) {
            return;
        }
        self.transitions.push_back(transition);
        if let Some(limit) = self.limit {
            while self.transitions.len() > limit {
                self.transitions.pop_front();
            }
        }
    }

    pub fn clear(&mut self) {
        self.transitions.clear();
    }

    /// Get the path of states traversed.
    ///
    /// Returns the `from` state of the oldest retained transition, then the
    /// `to` state of each transition.
    pub fn get_path(&self) -> Vec<&S> {
        let mut path = Vec::with_capacity(self.transitions.len() + 1);
        if let Some(first) = self.transitions.front() {
            path.push(&first.from);
        }
        for transition in &self.transitions {
            path.push(&transition.to);
        }
        path
    }

    /// Calculate total duration from first to last retained transition.
    pub fn duration(&self) -> Option<Duration> {
        if let (Some(first), Some(last)) = (self.transitions.front(), self.transitions.back()) {
            let duration = last.timestamp.signed_duration_since(first.timestamp);
            duration.to_std().ok()
        } else {
            None
        }
    }

    pub fn last(&self) -> Option<&StateTransition<S>> {
        self.transitions.back()
    }

    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }

    /// Iterate over the retained transitions, oldest first.
    pub fn transitions(&self) -> impl Iterator<Item = &StateTransition<S>> + '_ {
        self.transitions.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state_enum;

    state_enum! {
        enum TestState {
            Initial,
            Closed,
            Opened,
            Terminated,
        }
        final: [Terminated]
    }

    fn step(from: TestState, to: TestState, event: &str) -> StateTransition<TestState> {
        StateTransition {
            from,
            to,
            event: event.to_string(),
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn new_history_is_empty() {
        let history: StateHistory<TestState> = StateHistory::new();
        assert!(history.is_empty());
        assert!(history.get_path().is_empty());
        assert!(history.duration().is_none());
        assert!(history.last().is_none());
    }

    #[test]
    fn get_path_returns_state_sequence() {
        let mut history = StateHistory::new();
        history.record(step(TestState::Initial, TestState::Closed, "Begin"));
        history.record(step(TestState::Closed, TestState::Opened, "Open"));

        let path = history.get_path();
        assert_eq!(
            path,
            vec![&TestState::Initial, &TestState::Closed, &TestState::Opened]
        );
        assert_eq!(history.last().map(|t| t.event.as_str()), Some("Open"));
    }

    #[test]
    fn bounded_history_evicts_oldest() {
        let mut history = StateHistory::bounded(2);
        history.record(step(TestState::Initial, TestState::Closed, "Begin"));
        history.record(step(TestState::Closed, TestState::Opened, "Open"));
        history.record(step(TestState::Opened, TestState::Closed, "Close"));

        assert_eq!(history.len(), 2);
        assert_eq!(
            history.get_path(),
            vec![&TestState::Closed, &TestState::Opened, &TestState::Closed]
        );
    }

    #[test]
    fn zero_limit_records_nothing() {
        let mut history = StateHistory::bounded(0);
        history.record(step(TestState::Initial, TestState::Closed, "Begin"));
        assert!(history.is_empty());
    }

    #[test]
    fn duration_calculates_elapsed_time() {
        let mut history = StateHistory::new();
        history.record(step(TestState::Initial, TestState::Closed, "Begin"));

        std::thread::sleep(std::time::Duration::from_millis(10));

        history.record(step(TestState::Closed, TestState::Terminated, "End"));

        let duration = history.duration();
        assert!(duration.is_some());
        assert!(duration.unwrap() >= std::time::Duration::from_millis(10));
    }

    #[test]
    fn history_serializes_correctly() {
        let mut history = StateHistory::bounded(8);
        history.record(step(TestState::Initial, TestState::Closed, "Begin"));

        let json = serde_json::to_string(&history).unwrap();
        let deserialized: StateHistory<TestState> = serde_json::from_str(&json).unwrap();

        assert_eq!(deserialized.len(), 1);
        assert_eq!(deserialized.limit(), Some(8));
        assert_eq!(deserialized.last(), history.last());
    }
}
