use clap::Parser;
use std::path::PathBuf;

/// Check IPTV playlist entries and keep only the working ones.
#[derive(Clone, Debug, Parser)]
#[command(name = "streamsieve", version)]
#[command(
    about = "Test stream URLs with ffprobe. With --file, the playlist is overwritten with only the working entries."
)]
pub struct Cli {
    /// Playlist file to check and rewrite in place.
    #[arg(long, short = 'f', value_name = "PATH", conflicts_with = "url")]
    pub file: Option<PathBuf>,

    /// A single URL to test. Nothing is written.
    #[arg(long, short = 'u', value_name = "URL")]
    pub url: Option<String>,

    /// Second-level validation: capture a frame and reject error screens (slower).
    #[arg(long, short = 't', num_args = 0..=1, default_missing_value = "true", value_parser = clap::value_parser!(bool))]
    pub thorough: Option<bool>,

    /// Keep captured frames (only with --thorough).
    #[arg(long, short = 'k', num_args = 0..=1, default_missing_value = "true", value_parser = clap::value_parser!(bool))]
    pub keep_frames: Option<bool>,

    /// Number of parallel workers. Default: 1.
    #[arg(long, short = 'w', value_parser = clap::value_parser!(u32).range(1..))]
    pub workers: Option<u32>,

    /// Directory for captured frames. Default: captured_images.
    #[arg(long, short = 'o', value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Show a progress bar instead of one block per entry.
    #[arg(long, short = 'p', num_args = 0..=1, default_missing_value = "true", value_parser = clap::value_parser!(bool))]
    pub progress: Option<bool>,

    /// Verbose output.
    #[arg(long, short = 'v', num_args = 0..=1, default_missing_value = "true", value_parser = clap::value_parser!(bool))]
    pub verbose: Option<bool>,

    /// Check and report, but do not rewrite the playlist.
    #[arg(long)]
    pub dry_run: bool,
}
