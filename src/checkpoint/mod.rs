//! Checkpoint and restore of a machine's runtime state.
//!
//! A checkpoint captures where a machine is, not how it is defined: states,
//! transitions, guards and actions are code and must be registered again
//! before a checkpoint is restored onto the machine.

use crate::core::{Event, Payload, State, StateHistory};
use crate::machine::Machine;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

pub mod error;

pub use error::CheckpointError;

/// Version identifier for checkpoint format
pub const CHECKPOINT_VERSION: u32 = 1;

/// Serializable snapshot of a machine's runtime state.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct Checkpoint<S: State> {
    /// Checkpoint format version
    pub version: u32,

    /// Unique checkpoint identifier
    pub id: String,

    /// When checkpoint was created
    pub timestamp: DateTime<Utc>,

    /// Initial state of the machine
    pub initial_state: S,

    /// Current state of the machine
    pub current_state: S,

    /// Recorded transitions, when the machine records history
    pub history: Option<StateHistory<S>>,
}

impl<S: State> Checkpoint<S> {
    pub fn to_json(&self) -> Result<String, CheckpointError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| CheckpointError::SerializationFailed(e.to_string()))
    }

    pub fn from_json(json: &str) -> Result<Self, CheckpointError> {
        let checkpoint: Self = serde_json::from_str(json)
            .map_err(|e| CheckpointError::DeserializationFailed(e.to_string()))?;
        checkpoint.check_version()?;
        Ok(checkpoint)
    }

    /// Compact binary encoding.
    pub fn to_bytes(&self) -> Result<Vec<u8>, CheckpointError> {
        bincode::serialize(self).map_err(|e| CheckpointError::SerializationFailed(e.to_string()))
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CheckpointError> {
        let checkpoint: Self = bincode::deserialize(bytes)
            .map_err(|e| CheckpointError::DeserializationFailed(e.to_string()))?;
        checkpoint.check_version()?;
        Ok(checkpoint)
    }

    fn check_version(&self) -> Result<(), CheckpointError> {
        if self.version != CHECKPOINT_VERSION {
            return Err(CheckpointError::UnsupportedVersion {
                found: self.version,
                supported: CHECKPOINT_VERSION,
            });
        }
        Ok(())
    }
}

impl<S: State, E: Event, P: Payload> Machine<S, E, P> {
    /// Snapshot the current state and recorded history.
    pub fn checkpoint(&self) -> Checkpoint<S> {
        Checkpoint {
            version: CHECKPOINT_VERSION,
            id: Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            initial_state: self.initial().clone(),
            current_state: self.current(),
            history: self.history(),
        }
    }

    /// Move this machine to the state captured in `checkpoint`.
    ///
    /// The checkpoint must come from a machine with the same initial state.
    /// Registered guards are kept. Recorded history is replaced when both
    /// the checkpoint and this machine carry one.
    pub fn restore(&mut self, checkpoint: &Checkpoint<S>) -> Result<&mut Self, CheckpointError> {
        checkpoint.check_version()?;

        if checkpoint.initial_state != *self.initial() {
            return Err(CheckpointError::InitialStateMismatch {
                checkpoint: Self::state_to_string(&checkpoint.initial_state),
                machine: Self::state_to_string(self.initial()),
            });
        }

        self.context_mut().reset(checkpoint.current_state.clone(), false);
        if let Some(history) = &checkpoint.history {
            self.replace_history(history.clone());
        }

        debug!(
            id = %checkpoint.id,
            current = %Self::state_to_string(&checkpoint.current_state),
            "checkpoint restored"
        );
        Ok(self)
    }
}
