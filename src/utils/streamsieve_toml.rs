//! Load `.streamsieve.toml` from a directory (CLI only). Lib callers build [`Opts`] themselves.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::utils::config::PackagePaths;
use crate::{Mode, Opts};

#[derive(Debug, Deserialize)]
pub(crate) struct StreamsieveToml {
    #[serde(default)]
    settings: CheckSection,
}

#[derive(Debug, Default, Deserialize)]
struct CheckSection {
    workers: Option<usize>,
    thorough: Option<bool>,
    keep_artifacts: Option<bool>,
    output_dir: Option<String>,
    progress: Option<bool>,
    /// Seconds.
    probe_timeout: Option<u64>,
    /// Seconds.
    capture_timeout: Option<u64>,
    /// Seconds into the stream.
    capture_offset: Option<u64>,
    ffprobe: Option<String>,
    ffmpeg: Option<String>,
}

/// Load the config file from `dir` if present. Returns None if missing or unreadable. CLI only.
pub(crate) fn load_streamsieve_toml(dir: &Path) -> Option<StreamsieveToml> {
    let path = dir.join(PackagePaths::get().config_filename());
    let s = std::fs::read_to_string(&path).ok()?;
    parse_streamsieve_toml(&s)
        .map_err(|e| log::warn!("{}: {}", path.display(), e))
        .ok()
}

pub(crate) fn parse_streamsieve_toml(s: &str) -> Result<StreamsieveToml, toml::de::Error> {
    toml::from_str(s)
}

/// Overwrite opts field from file when present.
macro_rules! apply_file_opt {
    ($sec:expr, $opts:expr, $sec_field:ident => $opts_field:ident) => {
        if let Some(v) = $sec.$sec_field {
            $opts.$opts_field = v;
        }
    };
}

/// Apply file config to opts (only fields present in the file). Call before applying env and CLI.
pub(crate) fn apply_file_to_opts(file: &StreamsieveToml, opts: &mut Opts) {
    let sec = &file.settings;
    if let Some(w) = sec.workers {
        opts.workers = w.max(1);
    }
    if let Some(t) = sec.thorough {
        opts.mode = Mode::from_thorough(t);
    }
    apply_file_opt!(sec, opts, keep_artifacts => keep_artifacts);
    if let Some(ref d) = sec.output_dir {
        opts.artifact_dir = PathBuf::from(d);
    }
    apply_file_opt!(sec, opts, progress => progress);
    if let Some(secs) = sec.probe_timeout {
        opts.timeouts.probe = Duration::from_secs(secs);
    }
    if let Some(secs) = sec.capture_timeout {
        opts.timeouts.capture = Duration::from_secs(secs);
    }
    if let Some(secs) = sec.capture_offset {
        opts.timeouts.capture_offset = Duration::from_secs(secs);
    }
    if let Some(ref p) = sec.ffprobe {
        opts.tools.ffprobe = p.clone();
    }
    if let Some(ref p) = sec.ffmpeg {
        opts.tools.ffmpeg = p.clone();
    }
}
