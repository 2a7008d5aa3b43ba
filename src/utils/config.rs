//! Application configuration constants.
//! Tuning and thresholds in one place.

use std::sync::OnceLock;
use std::time::Duration;

// ---- Package / paths (from CARGO_PKG_NAME, cached) ----

/// Package-derived names: built once from `CARGO_PKG_NAME`, then cached.
pub struct PackagePaths {
    config_filename: String,
    env_prefix: String,
}

static PACKAGE_PATHS: OnceLock<PackagePaths> = OnceLock::new();

impl PackagePaths {
    /// Build and cache names from `CARGO_PKG_NAME`. Called once on first use.
    pub fn get() -> &'static PackagePaths {
        PACKAGE_PATHS.get_or_init(|| {
            let pkg = env!("CARGO_PKG_NAME");
            PackagePaths {
                config_filename: format!(".{pkg}.toml"),
                env_prefix: pkg.to_uppercase(),
            }
        })
    }

    /// Name of the optional per-directory config file (e.g. `.streamsieve.toml`).
    pub fn config_filename(&self) -> &str {
        &self.config_filename
    }

    /// Environment variable name for `key`, e.g. `STREAMSIEVE_FFPROBE`.
    pub fn env_var(&self, key: &str) -> String {
        format!("{}_{}", self.env_prefix, key.to_uppercase())
    }
}

// ---- CLI defaults ----

pub struct DefaultArgs;

impl DefaultArgs {
    pub const WORKERS: usize = 1;
    pub const OUTPUT_DIR: &'static str = "captured_images";
}

// ---- External tools ----

/// Binaries used for probing and capture. Overridable via config file or env.
#[derive(Clone, Debug)]
pub struct ToolPaths {
    pub ffprobe: String,
    pub ffmpeg: String,
}

impl Default for ToolPaths {
    fn default() -> Self {
        Self {
            ffprobe: "ffprobe".to_string(),
            ffmpeg: "ffmpeg".to_string(),
        }
    }
}

// ---- Timeouts ----

/// Per-call deadlines for the external tools, plus the capture seek offset.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Timeouts {
    pub probe: Duration,
    pub capture: Duration,
    /// How far into the stream the frame is grabbed.
    pub capture_offset: Duration,
}

impl Timeouts {
    pub const PROBE_SECS: u64 = 10;
    pub const CAPTURE_SECS: u64 = 30;
    pub const CAPTURE_OFFSET_SECS: u64 = 20;
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            probe: Duration::from_secs(Self::PROBE_SECS),
            capture: Duration::from_secs(Self::CAPTURE_SECS),
            capture_offset: Duration::from_secs(Self::CAPTURE_OFFSET_SECS),
        }
    }
}

/// Poll interval while waiting on a child process with a deadline.
pub const PROCESS_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Extra time granted to drain pipes after a child exits close to its deadline.
pub const PIPE_DRAIN_GRACE: Duration = Duration::from_millis(250);

// ---- Edge heuristic ----

/// Error-screen detection tuning.
pub struct EdgeConsts;

impl EdgeConsts {
    /// Mean edge response above this means text in the centre (likely an error screen).
    pub const ERROR_SCREEN_THRESHOLD: f64 = 10.0;
    /// Crop starts this far down (fraction of height). Skips channel logos and tickers.
    pub const CROP_TOP: f64 = 0.25;
    /// Crop ends here (fraction of height). Everything below is subtitle territory.
    pub const CROP_BOTTOM: f64 = 0.65;
}

// ---- Artifacts ----

/// Naming for captured frame files.
pub struct ArtifactConsts;

impl ArtifactConsts {
    /// Max length of the sanitized URI part of a kept artifact name.
    pub const SAFE_NAME_MAX_LEN: usize = 50;
    /// Hex digits of the URI hash appended to kept names; keeps truncated names distinct.
    pub const URI_HASH_HEX_LEN: usize = 12;
    pub const KEPT_PREFIX: &'static str = "capture_";
    pub const TEMP_PREFIX: &'static str = "temp_capture_";
    pub const EXTENSION: &'static str = "jpg";
}

// ---- Playlist ----

/// Line markers and placeholder names used by the playlist parser.
pub struct PlaylistConsts;

impl PlaylistConsts {
    pub const HEADER_MARKER: &'static str = "#EXTM3U";
    pub const EXTINF_MARKER: &'static str = "#EXTINF";
    pub const COMMENT_MARKER: char = '#';
    /// Prefixes that mark a bare line as a stream URI (`http` also covers `https`).
    pub const URI_PREFIXES: [&'static str; 3] = ["http", "rtmp", "rtsp"];
    pub const EXTINF_DEFAULT_NAME: &'static str = "M3U Channel";
    pub const BARE_DEFAULT_NAME: &'static str = "Unknown Channel";
    pub const SINGLE_URL_NAME: &'static str = "Single URL";
}
