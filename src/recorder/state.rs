//! Recording state machine
//!
//! The recorder is either idle or driving one capture process; start and
//! stop are only valid from the matching state.

use serde::{Deserialize, Serialize};

/// Current state of a [`Recorder`](crate::Recorder)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordingState {
    /// No capture process is running
    Idle,
    /// A capture process has been spawned
    Recording,
}

impl Default for RecordingState {
    fn default() -> Self {
        Self::Idle
    }
}
