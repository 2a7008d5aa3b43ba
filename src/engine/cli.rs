//! CLI command handler: check a playlist file (rewritten in place) or a single URL.

use anyhow::{Result, bail};
use log::{info, warn};
use std::path::Path;

use crate::capabilities::{Capabilities, EdgeAnalyzer};
use crate::engine::arg_parser::Cli;
use crate::utils::streamsieve_toml::{apply_file_to_opts, load_streamsieve_toml};
use crate::utils::{Colors, apply_env_to_opts, setup_logging};
use crate::{Mode, Opts, check_playlist, check_url};

/// Overwrite opts field from CLI when the flag was given.
macro_rules! apply_cli_opt {
    ($cli:expr, $opts:expr, $cli_field:ident => $opts_field:ident) => {
        if let Some(v) = $cli.$cli_field {
            $opts.$opts_field = v;
        }
    };
}

/// Defaults → `.streamsieve.toml` → env → CLI. Edge detection availability comes from the build.
fn setup_opts(cli: &Cli, cwd: &Path) -> Opts {
    let mut opts = Opts {
        edge_detection: EdgeAnalyzer::AVAILABLE,
        ..Opts::default()
    };
    if let Some(file) = load_streamsieve_toml(cwd) {
        apply_file_to_opts(&file, &mut opts);
    }
    apply_env_to_opts(cwd, &mut opts);

    if let Some(t) = cli.thorough {
        opts.mode = Mode::from_thorough(t);
    }
    apply_cli_opt!(cli, opts, keep_frames => keep_artifacts);
    if let Some(w) = cli.workers {
        opts.workers = w as usize;
    }
    if let Some(ref d) = cli.output_dir {
        opts.artifact_dir = d.clone();
    }
    apply_cli_opt!(cli, opts, progress => progress);
    apply_cli_opt!(cli, opts, verbose => verbose);
    opts.dry_run = cli.dry_run;
    opts
}

/// Run a check for `--file` or `--url`. Errors (missing input, unreadable file, unwritable
/// artifact dir) abort before any stream is touched.
pub fn handle_run(cli: &Cli) -> Result<()> {
    setup_logging(cli.verbose.unwrap_or(false));
    let cwd = std::env::current_dir().unwrap_or_else(|_| ".".into());
    let opts = setup_opts(cli, &cwd);
    log::debug!("{} CONFIG:{:#?}", env!("CARGO_PKG_NAME").to_uppercase(), opts);

    if opts.keep_artifacts && !opts.mode.is_thorough() {
        warn!("--keep-frames has no effect without --thorough");
    }

    let caps = Capabilities::system(&opts);
    match (&cli.file, &cli.url) {
        (Some(path), _) => {
            if !path.is_file() {
                bail!("File '{}' not found.", path.display());
            }
            let summary = check_playlist(path, &opts, &caps)?;
            info!("Original count: {}", summary.total);
            info!("Working count:  {}", summary.working);
            if summary.rewritten {
                info!(
                    "{}",
                    Colors::colorize(
                        Colors::PASSED,
                        &format!("✅ {} overwritten with working links.", path.display())
                    )
                );
            } else if opts.dry_run {
                warn!("DRY RUN: {} was not modified.", path.display());
            }
        }
        (None, Some(url)) => {
            let result = check_url(url, &opts, &caps)?;
            if !result.passed {
                log::debug!("{} did not pass: {}", url, result.diagnostic);
            }
        }
        (None, None) => bail!("Please provide either --file or --url."),
    }
    Ok(())
}
