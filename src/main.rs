//! Streamsieve CLI: check a playlist (rewritten in place) or a single URL.

use anyhow::Result;
use clap::Parser;
use std::time::Instant;
use streamsieve::engine::arg_parser::Cli;
use streamsieve::engine::handle_run;

fn main() -> Result<()> {
    let start_time = Instant::now();
    let cli = Cli::parse();
    handle_run(&cli)?;
    log::debug!("Total time: {:?}", start_time.elapsed());
    Ok(())
}
