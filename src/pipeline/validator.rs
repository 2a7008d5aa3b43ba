//! Two-phase decision for one entry.
//!
//! Phase 1 probes the URI. In thorough mode a reachable entry then goes through phase 2: grab a
//! frame, score it for an error screen. Each step either ends the evaluation or hands over to the
//! next, so every path ends in exactly one [`Outcome`].

use log::debug;
use std::path::{Path, PathBuf};

use crate::capabilities::Capabilities;
use crate::engine::tools::artifact_path;
use crate::utils::config::{EdgeConsts, Timeouts};
use crate::{CapabilityError, Entry, Mode, Opts, ValidationResult};

/// Everything the validator needs besides the capabilities. Resolved once per run.
#[derive(Clone, Debug)]
pub struct ValidatorConfig {
    pub mode: Mode,
    pub keep_artifacts: bool,
    pub artifact_dir: PathBuf,
    /// Edge heuristic available in this build/run.
    pub edge_detection: bool,
    pub timeouts: Timeouts,
}

impl From<&Opts> for ValidatorConfig {
    fn from(o: &Opts) -> Self {
        ValidatorConfig {
            mode: o.mode,
            keep_artifacts: o.keep_artifacts,
            artifact_dir: o.artifact_dir.clone(),
            edge_detection: o.edge_detection,
            timeouts: o.timeouts,
        }
    }
}

/// Why a frame could not be captured, from the capture tool's diagnostic text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CaptureFailure {
    AudioOnly,
    NoVideoStream,
    Generic,
    TimedOut,
    Launch(String),
}

impl std::fmt::Display for CaptureFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CaptureFailure::AudioOnly => write!(f, "Audio-only stream (no video)"),
            CaptureFailure::NoVideoStream => write!(f, "No valid video stream"),
            CaptureFailure::Generic => write!(f, "Frame capture failed"),
            CaptureFailure::TimedOut => write!(f, "Timeout"),
            CaptureFailure::Launch(e) => write!(f, "Error: {e}"),
        }
    }
}

/// Classify a capture error. Matching is on ffmpeg's wording, which is not a stable interface:
/// anything unrecognized falls through to [`CaptureFailure::Generic`].
pub fn classify_capture_failure(err: &CapabilityError) -> CaptureFailure {
    match err {
        CapabilityError::TimedOut => CaptureFailure::TimedOut,
        CapabilityError::Launch(e) => CaptureFailure::Launch(e.clone()),
        CapabilityError::Failed(text) => {
            let text = text.to_lowercase();
            if text.contains("does not contain any stream") || text.contains("unspecified size") {
                CaptureFailure::AudioOnly
            } else if text.contains("invalid argument") {
                CaptureFailure::NoVideoStream
            } else {
                CaptureFailure::Generic
            }
        }
    }
}

/// Terminal state of one evaluation.
#[derive(Clone, Debug, PartialEq)]
pub enum Outcome {
    ProbeFailed(CapabilityError),
    /// Basic mode: probe passed, nothing more to do.
    Reachable { streams: String },
    CaptureFailed(CaptureFailure),
    ErrorScreen { score: f64 },
    CleanFrame { score: f64 },
    /// Edge heuristic not available; frame capture alone counts as a pass.
    DetectionSkipped,
    /// Edge heuristic errored on the frame; treated as a pass.
    DetectionFailed(String),
}

impl Outcome {
    pub fn passed(&self) -> bool {
        matches!(
            self,
            Outcome::Reachable { .. }
                | Outcome::CleanFrame { .. }
                | Outcome::DetectionSkipped
                | Outcome::DetectionFailed(_)
        )
    }

    pub fn diagnostic(&self) -> String {
        match self {
            Outcome::ProbeFailed(e) => e.to_string(),
            Outcome::Reachable { streams } => format!("Streams: {streams}"),
            Outcome::CaptureFailed(f) => format!("Could not capture frame: {f}"),
            Outcome::ErrorScreen { score } => {
                format!("Text detected in center (likely error screen, edge score: {score:.1})")
            }
            Outcome::CleanFrame { score } => {
                format!("No text detected (video content, edge score: {score:.1})")
            }
            Outcome::DetectionSkipped => {
                "Frame captured (edge detection unavailable, skipping text detection)".to_string()
            }
            Outcome::DetectionFailed(e) => {
                format!("Frame captured but text detection failed: {e}")
            }
        }
    }
}

/// Removes a throwaway frame when dropped, whichever way the evaluation ends.
struct ArtifactGuard<'a> {
    path: &'a Path,
    keep: bool,
}

impl Drop for ArtifactGuard<'_> {
    fn drop(&mut self) {
        if !self.keep && self.path.exists() {
            let _ = std::fs::remove_file(self.path);
        }
    }
}

/// Validates single entries against the injected capabilities. Shared by all workers.
pub struct StreamValidator<'a> {
    config: ValidatorConfig,
    caps: &'a Capabilities,
}

impl<'a> StreamValidator<'a> {
    pub fn new(config: ValidatorConfig, caps: &'a Capabilities) -> Self {
        Self { config, caps }
    }

    /// Run both phases as configured and return the entry's result.
    pub fn validate(&self, entry: &Entry) -> ValidationResult {
        let outcome = self.evaluate(&entry.uri);
        debug!("{} -> {:?}", entry.uri, outcome);
        ValidationResult {
            index: entry.index,
            passed: outcome.passed(),
            diagnostic: outcome.diagnostic(),
        }
    }

    /// Terminal outcome for `uri`.
    pub fn evaluate(&self, uri: &str) -> Outcome {
        let streams = match self.caps.prober.probe(uri, self.config.timeouts.probe) {
            Ok(s) if !s.trim().is_empty() => s,
            Ok(_) => {
                return Outcome::ProbeFailed(CapabilityError::Failed(
                    "no streams reported".to_string(),
                ));
            }
            Err(e) => return Outcome::ProbeFailed(e),
        };
        match self.config.mode {
            Mode::Basic => Outcome::Reachable { streams },
            Mode::Thorough => self.verify_frame(uri),
        }
    }

    fn verify_frame(&self, uri: &str) -> Outcome {
        let path = artifact_path(&self.config.artifact_dir, uri, self.config.keep_artifacts);
        let _guard = ArtifactGuard {
            path: &path,
            keep: self.config.keep_artifacts,
        };

        if let Err(e) = self.caps.capturer.capture(
            uri,
            self.config.timeouts.capture_offset,
            &path,
            self.config.timeouts.capture,
        ) {
            return Outcome::CaptureFailed(classify_capture_failure(&e));
        }

        if !self.config.edge_detection {
            return Outcome::DetectionSkipped;
        }
        match self.caps.analyzer.analyze(&path) {
            Ok(score) if score > EdgeConsts::ERROR_SCREEN_THRESHOLD => {
                Outcome::ErrorScreen { score }
            }
            Ok(score) => Outcome::CleanFrame { score },
            Err(e) => Outcome::DetectionFailed(e.to_string()),
        }
    }
}
