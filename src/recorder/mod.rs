//! Recorder module
//!
//! - RecordingState: the Idle/Recording state machine
//! - Recorder: the facade coordinating the option set and the external
//!   capture process

pub mod facade;
pub mod state;

pub use facade::{Recorder, DEFAULT_SETTLE_DELAY};
pub use state::RecordingState;
