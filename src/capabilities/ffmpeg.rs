//! Single-frame capture backed by `ffmpeg`.

use log::debug;
use std::path::Path;
use std::process::Command;
use std::time::Duration;

use super::FrameCapturer;
use super::process::run_with_timeout;
use crate::CapabilityError;

/// Runs `ffmpeg -ss <offset> -i <uri> -vframes 1` writing a JPEG.
pub struct FfmpegCapturer {
    ffmpeg_command: String,
}

impl FfmpegCapturer {
    pub fn new(ffmpeg_command: impl Into<String>) -> Self {
        Self {
            ffmpeg_command: ffmpeg_command.into(),
        }
    }
}

fn is_non_empty_file(path: &Path) -> bool {
    std::fs::metadata(path)
        .map(|m| m.is_file() && m.len() > 0)
        .unwrap_or(false)
}

impl FrameCapturer for FfmpegCapturer {
    fn capture(
        &self,
        uri: &str,
        offset: Duration,
        output_path: &Path,
        timeout: Duration,
    ) -> Result<(), CapabilityError> {
        // A stale frame from an earlier run must not count as a capture.
        if output_path.exists() {
            let _ = std::fs::remove_file(output_path);
        }
        debug!("Capturing frame at {}s: {}", offset.as_secs(), uri);

        let mut cmd = Command::new(&self.ffmpeg_command);
        cmd.arg("-y")
            .arg("-ss")
            .arg(offset.as_secs().to_string())
            .arg("-i")
            .arg(uri)
            .args(["-vframes", "1", "-q:v", "2"])
            .arg(output_path);
        let output = run_with_timeout(cmd, timeout)?;

        if is_non_empty_file(output_path) {
            Ok(())
        } else {
            Err(CapabilityError::Failed(output.stderr))
        }
    }
}
