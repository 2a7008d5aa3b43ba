//! Run orchestration: read → parse → schedule validations → rewrite.

use anyhow::{Context, Result};
use log::{debug, info, warn};
use std::path::Path;

use crate::capabilities::Capabilities;
use crate::engine::progress::Reporter;
use crate::engine::tools::prepare_artifact_dir;
use crate::pipeline::scheduler;
use crate::pipeline::validator::{StreamValidator, ValidatorConfig};
use crate::playlist::{self, passing_entries, rewrite};
use crate::{Entry, Opts, RunSummary, ValidationResult};

/// Run-level setup that must succeed before any stream is touched.
fn prepare_run(opts: &Opts) -> Result<()> {
    if opts.mode.is_thorough() {
        if !opts.edge_detection {
            warn!("Edge detection unavailable. Error-screen detection will be skipped.");
        }
        prepare_artifact_dir(&opts.artifact_dir)?;
    }
    Ok(())
}

/// Validate `entries` with the configured worker pool, reporting as results arrive.
pub fn validate_entries(
    entries: &[Entry],
    opts: &Opts,
    caps: &Capabilities,
) -> Vec<ValidationResult> {
    let validator = StreamValidator::new(ValidatorConfig::from(opts), caps);
    let mut reporter = Reporter::new(opts.progress, entries.len());
    let results = scheduler::run(
        entries,
        opts.workers,
        &|entry: &Entry| validator.validate(entry),
        |completed| reporter.report(&completed),
    );
    reporter.finish();
    results
}

/// Check every entry of the playlist at `path` and, unless `opts.dry_run`, overwrite it with
/// the header and the entries that passed.
pub fn check_playlist(path: &Path, opts: &Opts, caps: &Capabilities) -> Result<RunSummary> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("read playlist {}", path.display()))?;
    let doc = playlist::parse(&text);
    prepare_run(opts)?;

    info!(
        "Testing {} URLs{} with {} workers...",
        doc.entries.len(),
        if opts.mode.is_thorough() {
            " (Thorough Mode)"
        } else {
            ""
        },
        opts.workers
    );
    let results = validate_entries(&doc.entries, opts, caps);

    let passing = passing_entries(&doc.entries, &results);
    let working = passing.len();
    let rewritten = if opts.dry_run {
        false
    } else {
        debug!("Updating {}...", path.display());
        rewrite(path, doc.header.as_deref(), &passing)?;
        true
    };

    Ok(RunSummary {
        total: doc.entries.len(),
        working,
        results,
        rewritten,
    })
}

/// Check a single URI. Nothing is written besides kept frames.
pub fn check_url(uri: &str, opts: &Opts, caps: &Capabilities) -> Result<ValidationResult> {
    prepare_run(opts)?;
    let entry = playlist::single_url_entry(uri);
    let mut results = validate_entries(std::slice::from_ref(&entry), opts, caps);
    results
        .pop()
        .context("no validation result for single URL")
}
