//! Naming convention for a demo's files.
//!
//! ```text
//! <root>/
//! ├── inputs/<demo>.mp4                 source recording
//! └── outputs/
//!     ├── interim/<demo>.json           demo log dump
//!     ├── <demo>-rail-kills.csv         event table
//!     ├── <demo>-clips/                 temporary clips
//!     └── <demo>-highlight.mp4          final reel
//! ```

use std::path::{Path, PathBuf};

use fragreel_common::error::{FragreelError, FragreelResult};

/// Paths derived from a demo identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemoPaths {
    /// Demo identifier the paths were derived from.
    pub name: String,
    pub log: PathBuf,
    pub event_table: PathBuf,
    pub video: PathBuf,
    pub clips_dir: PathBuf,
    pub highlight: PathBuf,
}

impl DemoPaths {
    pub fn new(root: impl AsRef<Path>, demo: &str) -> Self {
        let root = root.as_ref();
        let outputs = root.join("outputs");
        Self {
            name: demo.to_string(),
            log: outputs.join("interim").join(format!("{demo}.json")),
            event_table: outputs.join(format!("{demo}-rail-kills.csv")),
            video: root.join("inputs").join(format!("{demo}.mp4")),
            clips_dir: outputs.join(format!("{demo}-clips")),
            highlight: outputs.join(format!("{demo}-highlight.mp4")),
        }
    }

    /// Inputs needed to cut clips: the source video, then the event table.
    pub fn require_clip_inputs(&self) -> FragreelResult<()> {
        require_file(&self.video)?;
        require_file(&self.event_table)
    }
}

/// Fail with `MissingInput` unless `path` exists.
pub fn require_file(path: &Path) -> FragreelResult<()> {
    if path.exists() {
        Ok(())
    } else {
        Err(FragreelError::missing_input(path))
    }
}
