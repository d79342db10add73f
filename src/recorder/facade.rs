//! Recorder facade
//!
//! Wraps one external FFmpeg process plus the option set driving it. The
//! external binary does all capture and encoding work; the facade only
//! assembles the command line, spawns the process, and later kills it.

use crate::error::{RecorderError, RecorderResult};
use crate::options::{CaptureOptions, VIDEO_SIZE_FLAG};
use crate::platform::Platform;
use crate::recorder::state::RecordingState;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};
use std::time::Duration;

/// Settle delay applied after spawning and before killing the capture
/// process when the caller does not pick one.
pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_secs(2);

const OUTPUT_EXTENSION: &str = "flv";

/// Facade over an external screen-capture process.
///
/// Construction picks the bundled binary for the host platform, installs
/// the default capture options and a temp-directory output path. Options
/// can then be adjusted, and [`start_recording`](Self::start_recording) /
/// [`stop_recording`](Self::stop_recording) drive the capture process.
pub struct Recorder {
    platform: Platform,
    binary: PathBuf,
    options: CaptureOptions,
    command: Vec<String>,
    output_path: PathBuf,
    process: Option<Child>,
}

impl Recorder {
    /// Create a recorder for the host platform with default options.
    ///
    /// The bundled binary path is only selected here; it is validated by
    /// [`set_binary`](Self::set_binary) or when the capture process is
    /// spawned.
    pub fn new() -> Self {
        let platform = Platform::detect();
        let mut recorder = Self {
            platform,
            binary: platform.binary_path(),
            options: CaptureOptions::default(),
            command: Vec::new(),
            output_path: default_output_path(),
            process: None,
        };
        recorder.rebuild_command();
        recorder
    }

    /// Merge option overrides into the current set and rebuild the
    /// command line. Existing flags keep their position and take the new
    /// value; new flags are appended.
    pub fn set_options<K, V>(&mut self, overrides: impl IntoIterator<Item = (K, V)>)
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.options.merge(overrides);
        self.rebuild_command();
    }

    /// Set the captured region to `width`x`height` pixels.
    pub fn set_screen_size(&mut self, width: u32, height: u32) -> RecorderResult<()> {
        if width == 0 || height == 0 {
            return Err(RecorderError::InvalidArgument(format!(
                "capture size must be non-zero, got {}x{}",
                width, height
            )));
        }
        self.set_options([(VIDEO_SIZE_FLAG, format!("{}x{}", width, height))]);
        Ok(())
    }

    /// Capture the full screen by dropping the size flag so the external
    /// binary falls back to the whole desktop.
    pub fn set_full_screen(&mut self) {
        self.options.remove(VIDEO_SIZE_FLAG);
        self.rebuild_command();
    }

    /// Point the recorder at a different capture binary.
    ///
    /// The path is trimmed and must name an existing executable file;
    /// the binary is then probed with `-version` and rejected if it does
    /// not answer with a version banner.
    pub fn set_binary(&mut self, path: impl AsRef<str>) -> RecorderResult<()> {
        let trimmed = path.as_ref().trim();
        if trimmed.is_empty() || !is_runnable(Path::new(trimmed)) {
            return Err(RecorderError::BinaryNotFound(trimmed.to_string()));
        }
        let binary = PathBuf::from(trimmed);
        validate_binary(&binary)?;
        self.binary = binary;
        self.rebuild_command();
        Ok(())
    }

    /// Start the capture process.
    ///
    /// Waits [`DEFAULT_SETTLE_DELAY`] after spawning; see
    /// [`start_recording_with_delay`](Self::start_recording_with_delay).
    pub fn start_recording(&mut self, path: Option<&str>) -> RecorderResult<&Path> {
        self.start_recording_with_delay(path, DEFAULT_SETTLE_DELAY)
    }

    /// Start the capture process, blocking for `settle` afterwards so
    /// the external binary can open the capture device. There is no
    /// readiness handshake with the encoder.
    ///
    /// `path` overrides the output location; `.flv` is appended unless
    /// the path already carries it. `None` keeps the current output
    /// path. A pre-existing file at the output path is deleted
    /// best-effort. Fails with [`RecorderError::AlreadyRecording`] if a
    /// capture process is live.
    pub fn start_recording_with_delay(
        &mut self,
        path: Option<&str>,
        settle: Duration,
    ) -> RecorderResult<&Path> {
        if self.process.is_some() {
            return Err(RecorderError::AlreadyRecording);
        }

        if let Some(path) = path {
            self.output_path = with_output_extension(path);
        }
        let _ = std::fs::remove_file(&self.output_path);

        self.rebuild_command();
        self.command
            .push(self.output_path.to_string_lossy().into_owned());

        tracing::info!("Starting recording to: {}", self.output_path.display());
        tracing::debug!("Capture command: {:?}", self.command);

        let child = Command::new(&self.command[0])
            .args(&self.command[1..])
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()?;
        self.process = Some(child);

        std::thread::sleep(settle);
        Ok(&self.output_path)
    }

    /// Stop the capture process.
    ///
    /// Waits [`DEFAULT_SETTLE_DELAY`] first; see
    /// [`stop_recording_with_delay`](Self::stop_recording_with_delay).
    pub fn stop_recording(&mut self) -> RecorderResult<()> {
        self.stop_recording_with_delay(DEFAULT_SETTLE_DELAY)
    }

    /// Stop the capture process, blocking for `settle` first so the
    /// encoder can drain. The process is then killed outright — no
    /// graceful shutdown is negotiated, so the produced file may lack a
    /// proper trailer.
    ///
    /// Fails with [`RecorderError::ProcessNotRunning`] if no process was
    /// started or the capture process already exited on its own.
    pub fn stop_recording_with_delay(&mut self, settle: Duration) -> RecorderResult<()> {
        std::thread::sleep(settle);

        let mut child = self
            .process
            .take()
            .ok_or(RecorderError::ProcessNotRunning)?;

        if child.try_wait()?.is_some() {
            // the capture process died on its own, nothing left to stop
            return Err(RecorderError::ProcessNotRunning);
        }

        child.kill()?;
        let _ = child.wait();

        tracing::info!("Recording stopped: {}", self.output_path.display());
        Ok(())
    }

    /// Path of the output file, whether or not recording ever started.
    pub fn video_path(&self) -> &Path {
        &self.output_path
    }

    /// The capture binary currently in use.
    pub fn binary(&self) -> &Path {
        &self.binary
    }

    /// The last built command line: binary, flag/value tokens, and the
    /// output path once a recording was started.
    pub fn command(&self) -> &[String] {
        &self.command
    }

    /// The current option set.
    pub fn options(&self) -> &CaptureOptions {
        &self.options
    }

    /// The platform the recorder resolved at construction.
    pub fn platform(&self) -> Platform {
        self.platform
    }

    pub fn state(&self) -> RecordingState {
        if self.process.is_some() {
            RecordingState::Recording
        } else {
            RecordingState::Idle
        }
    }

    fn rebuild_command(&mut self) {
        let mut command = Vec::with_capacity(self.options.len() * 2 + 2);
        command.push(self.binary.to_string_lossy().into_owned());
        command.extend(self.options.command_args());
        self.command = command;
    }
}

impl Default for Recorder {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Recorder {
    fn drop(&mut self) {
        if let Some(child) = self.process.as_mut() {
            let _ = child.kill();
        }
    }
}

/// A binary is worth probing if it is a file the OS will run.
fn is_runnable(path: &Path) -> bool {
    let Ok(metadata) = std::fs::metadata(path) else {
        return false;
    };
    if !metadata.is_file() {
        return false;
    }
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        metadata.permissions().mode() & 0o111 != 0
    }
    #[cfg(not(unix))]
    {
        true
    }
}

/// Probe a capture binary with `-version` and check that it answers with
/// a version banner. This is the only correctness check performed; codec
/// availability and capture permissions are not validated.
fn validate_binary(binary: &Path) -> RecorderResult<()> {
    let output = Command::new(binary)
        .arg("-version")
        .stdin(Stdio::null())
        .output()
        .map_err(|e| {
            RecorderError::BinaryValidationFailed(format!(
                "failed to launch {}: {}",
                binary.display(),
                e
            ))
        })?;

    let stdout = String::from_utf8_lossy(&output.stdout);
    if !stdout.contains("version") {
        return Err(RecorderError::BinaryValidationFailed(format!(
            "{} did not report a version",
            binary.display()
        )));
    }

    tracing::debug!(
        "Validated capture binary {}: {}",
        binary.display(),
        stdout.lines().next().unwrap_or_default()
    );
    Ok(())
}

/// Temp-directory output path keyed by the current wall-clock time.
fn default_output_path() -> PathBuf {
    let stamp = chrono::Utc::now().format("%Y%m%d%H%M%S%3f");
    std::env::temp_dir().join(format!("capture-{}.{}", stamp, OUTPUT_EXTENSION))
}

/// Append the output extension unless the path already carries it.
fn with_output_extension(path: &str) -> PathBuf {
    let path = Path::new(path.trim());
    match path.extension() {
        Some(ext) if ext.eq_ignore_ascii_case(OUTPUT_EXTENSION) => path.to_path_buf(),
        _ => {
            let mut raw = path.as_os_str().to_os_string();
            raw.push(".");
            raw.push(OUTPUT_EXTENSION);
            PathBuf::from(raw)
        }
    }
}
