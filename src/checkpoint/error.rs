//! Checkpoint error types.

use thiserror::Error;

/// Errors from encoding, decoding or restoring a checkpoint.
#[derive(Debug, Error)]
pub enum CheckpointError {
    #[error("Serialization failed: {0}")]
    SerializationFailed(String),

    #[error("Deserialization failed: {0}")]
    DeserializationFailed(String),

    #[error("Unsupported checkpoint version {found}, supported: {supported}")]
    UnsupportedVersion { found: u32, supported: u32 },

    /// The checkpoint was taken from a machine with another initial state.
    #[error("Checkpoint starts in '{checkpoint}' but the machine starts in '{machine}'")]
    InitialStateMismatch { checkpoint: String, machine: String },
}
