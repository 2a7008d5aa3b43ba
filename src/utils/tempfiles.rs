use anyhow::{Context, Result};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Sibling temp path used while rewriting `path` (e.g. `list.m3u` -> `list.m3u.tmp`).
pub fn temp_path_for(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| env!("CARGO_PKG_NAME").to_string());
    path.parent()
        .unwrap_or(Path::new("."))
        .join(format!("{name}.tmp"))
}

/// Write `contents` to a temp sibling, then rename over `final_path`.
/// On permission denied for the temp file, falls back to writing `final_path` directly.
/// A failed write or rename removes the temp file before returning the error.
pub fn write_atomic(final_path: &Path, contents: &[u8]) -> Result<()> {
    let temp_path = temp_path_for(final_path);
    match fs::File::create(&temp_path) {
        Ok(mut f) => {
            let written = f
                .write_all(contents)
                .and_then(|_| f.sync_all())
                .with_context(|| format!("write temp playlist {}", temp_path.display()));
            drop(f);
            let res = written.and_then(|_| rename_temp_to_final(&temp_path, final_path));
            if res.is_err() {
                let _ = fs::remove_file(&temp_path);
            }
            res
        }
        Err(e) if e.kind() == std::io::ErrorKind::PermissionDenied => fs::write(final_path, contents)
            .with_context(|| format!("write playlist {}", final_path.display())),
        Err(e) => Err(e).with_context(|| format!("create temp playlist {}", temp_path.display())),
    }
}

pub fn rename_temp_to_final(temp_path: &Path, final_path: &Path) -> Result<()> {
    fs::rename(temp_path, final_path).with_context(|| {
        format!(
            "atomic rename temp playlist to final path ({} -> {})",
            temp_path.display(),
            final_path.display()
        )
    })
}
