//! Programmatic screen recording through a bundled FFmpeg binary.
//!
//! The [`Recorder`] facade assembles an FFmpeg command line from an
//! ordered option set, spawns the bundled platform binary as a child
//! process and later kills it, returning the path of the captured `.flv`
//! file. All capture and encoding work happens inside the external
//! binary.
//!
//! Coordination with the capture process is deliberately simple: a fixed
//! settle delay after start and before stop, and a forced kill. There is
//! no readiness handshake and no graceful encoder shutdown, so the
//! produced file may lack a proper trailer.
//!
//! ```no_run
//! use screen_recorder::Recorder;
//!
//! # fn main() -> screen_recorder::RecorderResult<()> {
//! let mut recorder = Recorder::new();
//! recorder.set_screen_size(1920, 1080)?;
//! recorder.start_recording(Some("demo"))?;
//! // ... exercise whatever is being captured ...
//! recorder.stop_recording()?;
//! println!("saved {}", recorder.video_path().display());
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod options;
pub mod platform;
pub mod recorder;

pub use error::{RecorderError, RecorderResult};
pub use options::CaptureOptions;
pub use platform::{root_path, Platform};
pub use recorder::{Recorder, RecordingState, DEFAULT_SETTLE_DELAY};
