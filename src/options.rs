//! Capture option set and command-line assembly
//!
//! FFmpeg flag ordering is significant (input flags must precede `-i`),
//! so the option set preserves insertion order and renders to the
//! command line in that order.

use serde::{Deserialize, Serialize};

/// Flag controlling the captured region size.
pub const VIDEO_SIZE_FLAG: &str = "-video_size";

/// Ordered set of FFmpeg flags and values.
///
/// Each entry is a `(flag, value)` pair. An empty value renders as a
/// bare switch (e.g. `-y`); an empty flag renders the value token alone.
/// Merging overrides an existing flag in place, keeping its original
/// position, and appends unknown flags at the end.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptureOptions {
    entries: Vec<(String, String)>,
}

impl Default for CaptureOptions {
    /// Screen-grab defaults: full desktop input via `gdigrab`, 60 fps,
    /// 1080x768 region at the top-left corner, h264 at 8000k, overwrite
    /// without asking.
    fn default() -> Self {
        Self {
            entries: vec![
                ("-f".into(), "gdigrab".into()),
                ("-show_region".into(), "1".into()),
                ("-draw_mouse".into(), "1".into()),
                ("-framerate".into(), "60".into()),
                (VIDEO_SIZE_FLAG.into(), "1080x768".into()),
                ("-offset_x".into(), "0".into()),
                ("-offset_y".into(), "0".into()),
                ("-i".into(), "desktop".into()),
                ("-b:v".into(), "8000k".into()),
                ("-vcodec".into(), "h264".into()),
                ("-y".into(), String::new()),
            ],
        }
    }
}

impl CaptureOptions {
    /// Create an option set with no entries.
    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Merge `overrides` into the set. A flag already present keeps its
    /// position and takes the new value; new flags are appended in the
    /// order given.
    pub fn merge<K, V>(&mut self, overrides: impl IntoIterator<Item = (K, V)>)
    where
        K: Into<String>,
        V: Into<String>,
    {
        for (flag, value) in overrides {
            self.set(flag.into(), value.into());
        }
    }

    /// Set a single flag, overriding in place or appending.
    pub fn set(&mut self, flag: String, value: String) {
        match self.entries.iter_mut().find(|(f, _)| *f == flag) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((flag, value)),
        }
    }

    /// Remove a flag entirely. Returns whether it was present.
    pub fn remove(&mut self, flag: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(f, _)| f != flag);
        self.entries.len() != before
    }

    /// Look up the value of a flag.
    pub fn get(&self, flag: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(f, _)| f == flag)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains(&self, flag: &str) -> bool {
        self.entries.iter().any(|(f, _)| f == flag)
    }

    /// Iterate entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(f, v)| (f.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Render the set to command-line tokens. Empty flag or value tokens
    /// are skipped, so `("-y", "")` yields the single token `-y`.
    pub fn command_args(&self) -> Vec<String> {
        let mut args = Vec::with_capacity(self.entries.len() * 2);
        for (flag, value) in &self.entries {
            if !flag.is_empty() {
                args.push(flag.trim().to_string());
            }
            if !value.is_empty() {
                args.push(value.trim().to_string());
            }
        }
        args
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_args_order() {
        let opts = CaptureOptions::default();
        let args = opts.command_args();

        assert_eq!(args[0], "-f");
        assert_eq!(args[1], "gdigrab");
        assert_eq!(args[6], "-framerate");
        assert_eq!(args[7], "60");
        assert_eq!(args[14], "-i");
        assert_eq!(args[15], "desktop");
        // -y is a bare switch and must be the final token
        assert_eq!(args.last().unwrap(), "-y");
        assert_eq!(args.len(), 21);
    }

    #[test]
    fn test_merge_overrides_in_place() {
        let mut opts = CaptureOptions::default();
        opts.merge([("-framerate", "30")]);

        let args = opts.command_args();
        assert_eq!(args[6], "-framerate");
        assert_eq!(args[7], "30");
        assert_eq!(opts.len(), 11);
    }

    #[test]
    fn test_merge_appends_new_flags() {
        let mut opts = CaptureOptions::default();
        opts.merge([("-t", "10")]);

        let args = opts.command_args();
        assert_eq!(&args[args.len() - 2..], ["-t", "10"]);
        assert_eq!(opts.get("-t"), Some("10"));
    }

    #[test]
    fn test_last_merge_wins() {
        let mut opts = CaptureOptions::default();
        opts.merge([("-b:v", "4000k")]);
        opts.merge([("-b:v", "12000k")]);

        assert_eq!(opts.get("-b:v"), Some("12000k"));
        assert_eq!(opts.len(), 11);
    }

    #[test]
    fn test_remove_drops_entry() {
        let mut opts = CaptureOptions::default();
        assert!(opts.remove(VIDEO_SIZE_FLAG));
        assert!(!opts.contains(VIDEO_SIZE_FLAG));
        assert!(!opts.remove(VIDEO_SIZE_FLAG));
        assert!(!opts.command_args().contains(&VIDEO_SIZE_FLAG.to_string()));
    }

    #[test]
    fn test_value_only_entry_renders_alone() {
        let mut opts = CaptureOptions::empty();
        opts.set(String::new(), "extra.flv".into());

        assert_eq!(opts.command_args(), ["extra.flv"]);
    }

    #[test]
    fn test_serialization_preserves_order() {
        let mut opts = CaptureOptions::empty();
        opts.merge([("-f", "gdigrab"), ("-i", "desktop")]);

        let json = serde_json::to_string(&opts).unwrap();
        let back: CaptureOptions = serde_json::from_str(&json).unwrap();
        assert_eq!(back, opts);
        assert!(json.find("-f").unwrap() < json.find("-i").unwrap());
    }
}
