//! Playlist reconstruction from the entries that passed.

use anyhow::{Result, bail};
use std::path::Path;

use crate::utils::write_atomic;
use crate::{Entry, ValidationResult};

/// Select entries whose result passed, in entry order.
/// `results` must hold exactly one result per entry, indexed like `entries`.
pub fn passing_entries<'a>(entries: &'a [Entry], results: &[ValidationResult]) -> Vec<&'a Entry> {
    entries
        .iter()
        .zip(results)
        .filter(|(entry, result)| entry.index == result.index && result.passed)
        .map(|(entry, _)| entry)
        .collect()
}

/// Render header and whole raw-line groups, one line per `\n`.
pub fn render(header: Option<&str>, passing: &[&Entry]) -> String {
    let mut out = String::new();
    if let Some(h) = header {
        out.push_str(h);
        out.push('\n');
    }
    for entry in passing {
        for line in &entry.raw_lines {
            out.push_str(line);
            out.push('\n');
        }
    }
    out
}

/// Overwrite `path` with the header and the raw lines of `passing`, in ascending entry order.
pub fn rewrite(path: &Path, header: Option<&str>, passing: &[&Entry]) -> Result<()> {
    if passing.windows(2).any(|w| w[0].index >= w[1].index) {
        bail!("entries passed to rewrite are not in playlist order");
    }
    write_atomic(path, render(header, passing).as_bytes())
}
