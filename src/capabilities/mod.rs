//! External capabilities the validator depends on: probe, frame capture, frame analysis.
//!
//! Each is a trait so the validator can run against deterministic fakes in tests; the system
//! implementations shell out to ffprobe/ffmpeg and score frames with the `image` crate.

pub mod edge;
pub mod ffmpeg;
pub mod ffprobe;
pub mod process;

use anyhow::Result;
use std::path::Path;
use std::time::Duration;

use crate::{CapabilityError, Opts};

pub use edge::EdgeAnalyzer;
pub use ffmpeg::FfmpegCapturer;
pub use ffprobe::FfprobeProber;

/// Checks that a URI yields at least one decodable stream.
pub trait Prober: Send + Sync {
    /// On success returns a short description of the streams found (e.g. `video, audio`).
    fn probe(&self, uri: &str, timeout: Duration) -> Result<String, CapabilityError>;
}

/// Grabs one still frame from a stream.
pub trait FrameCapturer: Send + Sync {
    /// Write a frame taken `offset` into the stream to `output_path`.
    /// On failure, [`CapabilityError::Failed`] carries the tool's raw diagnostic text.
    fn capture(
        &self,
        uri: &str,
        offset: Duration,
        output_path: &Path,
        timeout: Duration,
    ) -> Result<(), CapabilityError>;
}

/// Scores a captured frame. Higher means more edge content in the centre.
pub trait FrameAnalyzer: Send + Sync {
    fn analyze(&self, image_path: &Path) -> Result<f64>;
}

/// The three capabilities, bundled for the validator.
pub struct Capabilities {
    pub prober: Box<dyn Prober>,
    pub capturer: Box<dyn FrameCapturer>,
    pub analyzer: Box<dyn FrameAnalyzer>,
}

impl Capabilities {
    /// ffprobe/ffmpeg from `opts.tools`, edge analysis from this build.
    pub fn system(opts: &Opts) -> Self {
        Self {
            prober: Box::new(FfprobeProber::new(&opts.tools.ffprobe)),
            capturer: Box::new(FfmpegCapturer::new(&opts.tools.ffmpeg)),
            analyzer: Box::new(EdgeAnalyzer),
        }
    }
}
