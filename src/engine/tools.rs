//! Path and naming utilities

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::utils::config::ArtifactConsts;

/// Filesystem-safe stem from a URI: drop the scheme, replace non-alphanumerics with `_`,
/// cap the length. Stable across runs so kept frames overwrite their predecessor.
pub fn sanitize_uri(uri: &str) -> String {
    let rest = uri.rsplit("://").next().unwrap_or(uri);
    rest.chars()
        .map(|c| if c.is_alphanumeric() { c } else { '_' })
        .take(ArtifactConsts::SAFE_NAME_MAX_LEN)
        .collect()
}

/// Short blake3 hex digest of the full URI.
pub fn uri_hash(uri: &str) -> String {
    let hex = blake3::hash(uri.as_bytes()).to_hex();
    hex[..ArtifactConsts::URI_HASH_HEX_LEN].to_string()
}

/// Where the frame for `uri` is written. Kept frames get a name derived from the URI
/// (readable stem plus a hash of the whole URI, so long URIs sharing a prefix stay apart);
/// throwaway frames get a random one so concurrent workers never collide.
pub fn artifact_path(dir: &Path, uri: &str, keep: bool) -> PathBuf {
    let stem = if keep {
        format!(
            "{}{}_{}",
            ArtifactConsts::KEPT_PREFIX,
            sanitize_uri(uri),
            uri_hash(uri)
        )
    } else {
        format!(
            "{}{}",
            ArtifactConsts::TEMP_PREFIX,
            uuid::Uuid::new_v4().simple()
        )
    };
    dir.join(format!("{stem}.{}", ArtifactConsts::EXTENSION))
}

/// Create the artifact directory (and parents) before any worker starts.
pub fn prepare_artifact_dir(dir: &Path) -> Result<()> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("create artifact directory {}", dir.display()))
}
