//! Host platform detection and bundled binary selection

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Operating systems the bundled FFmpeg builds target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Windows,
    Linux,
    MacOS,
}

impl Platform {
    /// Detect the host platform.
    ///
    /// OS reports other than windows/macos/linux fall back to `Linux`,
    /// the portable build.
    pub fn detect() -> Self {
        Self::from_os_name(std::env::consts::OS)
    }

    pub fn from_os_name(os: &str) -> Self {
        match os {
            "windows" => Platform::Windows,
            "macos" => Platform::MacOS,
            _ => Platform::Linux,
        }
    }

    /// File name of the bundled FFmpeg build for this platform.
    pub fn binary_name(&self) -> &'static str {
        match self {
            Platform::Windows => "ffmpegWindows.exe",
            // TODO: ship a native macOS build; until then macOS reuses
            // the Linux executable.
            Platform::MacOS => "ffmpegLinux",
            Platform::Linux => "ffmpegLinux",
        }
    }

    /// Full path of the bundled FFmpeg build under `<root>/bin/`.
    pub fn binary_path(&self) -> PathBuf {
        root_path().join("bin").join(self.binary_name())
    }
}

/// Root directory of the crate, under which `bin/` holds the bundled
/// executables.
pub fn root_path() -> &'static Path {
    Path::new(env!("CARGO_MANIFEST_DIR"))
}
