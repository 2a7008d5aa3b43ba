//! Reachability probe backed by `ffprobe`.

use log::debug;
use serde::Deserialize;
use std::process::Command;
use std::time::Duration;

use super::Prober;
use super::process::run_with_timeout;
use crate::CapabilityError;

#[derive(Debug, Default, Deserialize)]
struct ProbeOutput {
    #[serde(default)]
    streams: Vec<ProbeStream>,
}

#[derive(Debug, Deserialize)]
struct ProbeStream {
    #[serde(default)]
    codec_type: Option<String>,
}

/// Codec types listed in ffprobe's JSON output, e.g. `["video", "audio"]`.
/// Returns None when the output is not valid JSON.
pub fn stream_kinds(json: &str) -> Option<Vec<String>> {
    let parsed: ProbeOutput = serde_json::from_str(json).ok()?;
    Some(
        parsed
            .streams
            .into_iter()
            .map(|s| s.codec_type.unwrap_or_else(|| "unknown".to_string()))
            .collect(),
    )
}

/// Runs `ffprobe -show_entries stream=codec_type` against the URI.
pub struct FfprobeProber {
    ffprobe_command: String,
}

impl FfprobeProber {
    pub fn new(ffprobe_command: impl Into<String>) -> Self {
        Self {
            ffprobe_command: ffprobe_command.into(),
        }
    }
}

impl Prober for FfprobeProber {
    fn probe(&self, uri: &str, timeout: Duration) -> Result<String, CapabilityError> {
        debug!("Probing input stream: {}", uri);
        let mut cmd = Command::new(&self.ffprobe_command);
        cmd.args([
            "-v",
            "error",
            "-show_entries",
            "stream=codec_type",
            "-print_format",
            "json",
            "-i",
            uri,
        ]);
        let output = run_with_timeout(cmd, timeout)?;

        let kinds = stream_kinds(&output.stdout).unwrap_or_default();
        if output.status.success() && !kinds.is_empty() {
            return Ok(kinds.join(", "));
        }
        let stderr = output.stderr.trim();
        if !stderr.is_empty() {
            Err(CapabilityError::Failed(stderr.to_string()))
        } else if output.status.success() {
            Err(CapabilityError::Failed("no streams reported".to_string()))
        } else {
            Err(CapabilityError::Failed(format!(
                "ffprobe exited with {}",
                output.status
            )))
        }
    }
}
