//! Public and internal types for the streamsieve API and pipeline.

use std::path::PathBuf;

use crate::utils::config::{DefaultArgs, Timeouts, ToolPaths};

/// One playlist entry. Created once by the parser and never mutated afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Entry {
    /// Position in parse order; defines output order.
    pub index: usize,
    pub name: String,
    pub uri: String,
    /// Verbatim source lines (one for `name,uri` and bare URIs, two for `#EXTINF` pairs).
    pub raw_lines: Vec<String>,
}

/// Outcome of validating one [`Entry`]. `index` matches the entry it was produced for.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidationResult {
    pub index: usize,
    pub passed: bool,
    pub diagnostic: String,
}

/// Parsed playlist: optional `#EXTM3U` header plus entries in file order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PlaylistDocument {
    pub header: Option<String>,
    pub entries: Vec<Entry>,
}

/// Validation depth.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Mode {
    /// Probe only.
    #[default]
    Basic,
    /// Probe, then capture a frame and look for an error screen.
    Thorough,
}

impl Mode {
    pub fn from_thorough(thorough: bool) -> Self {
        if thorough { Mode::Thorough } else { Mode::Basic }
    }

    pub fn is_thorough(self) -> bool {
        matches!(self, Mode::Thorough)
    }
}

/// Failure of an external capability call (probe, capture, analysis).
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CapabilityError {
    #[error("Timeout")]
    TimedOut,
    /// The tool ran but failed; carries its raw diagnostic text.
    #[error("{0}")]
    Failed(String),
    /// The tool could not be started or its output could not be read.
    #[error("Error: {0}")]
    Launch(String),
}

/// Full options (CLI and lib).
#[derive(Clone, Debug)]
pub struct Opts {
    pub mode: Mode,
    /// Keep captured frames under a name derived from the URI instead of a throwaway name.
    pub keep_artifacts: bool,
    /// Where captured frames are written.
    pub artifact_dir: PathBuf,
    /// Size of the worker pool (at least 1).
    pub workers: usize,
    /// Whether the edge heuristic is available. Resolved once at startup.
    pub edge_detection: bool,
    pub timeouts: Timeouts,
    pub tools: ToolPaths,
    /// Show a progress bar instead of per-entry lines.
    pub progress: bool,
    pub verbose: bool,
    /// Validate and report, but leave the playlist untouched.
    pub dry_run: bool,
}

impl Default for Opts {
    fn default() -> Self {
        Self {
            mode: Mode::Basic,
            keep_artifacts: false,
            artifact_dir: PathBuf::from(DefaultArgs::OUTPUT_DIR),
            workers: DefaultArgs::WORKERS,
            edge_detection: cfg!(feature = "edge-detect"),
            timeouts: Timeouts::default(),
            tools: ToolPaths::default(),
            progress: false,
            verbose: false,
            dry_run: false,
        }
    }
}

/// Result of checking a whole playlist file.
#[derive(Clone, Debug, Default)]
pub struct RunSummary {
    pub total: usize,
    pub working: usize,
    /// One per entry, in entry order.
    pub results: Vec<ValidationResult>,
    /// True when the playlist file was rewritten.
    pub rewritten: bool,
}
