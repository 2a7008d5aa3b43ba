//! Tool path overrides: env var → `.env` in the working directory.

use log::debug;
use std::path::Path;

use crate::Opts;
use crate::utils::config::PackagePaths;

fn try_env_then_dotenv(dir: &Path, key: &str) -> Option<String> {
    let var = PackagePaths::get().env_var(key);
    let read = || {
        std::env::var(&var)
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
    };
    if let Some(s) = read() {
        return Some(s);
    }
    let env_path = dir.join(".env");
    if env_path.is_file() {
        let _ = dotenvy::from_path(&env_path);
        return read();
    }
    None
}

/// Apply `STREAMSIEVE_FFPROBE` / `STREAMSIEVE_FFMPEG` to opts when set.
pub fn apply_env_to_opts(dir: &Path, opts: &mut Opts) {
    if let Some(p) = try_env_then_dotenv(dir, "ffprobe") {
        debug!("ffprobe from environment: {}", p);
        opts.tools.ffprobe = p;
    }
    if let Some(p) = try_env_then_dotenv(dir, "ffmpeg") {
        debug!("ffmpeg from environment: {}", p);
        opts.tools.ffmpeg = p;
    }
}
