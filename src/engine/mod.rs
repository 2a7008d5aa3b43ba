//! Engine: CLI surface, run handlers, progress and path helpers.

pub mod arg_parser;
pub mod cli;
pub mod progress;
pub mod tools;

// Re-export commonly used functions
pub use arg_parser::Cli;
pub use cli::handle_run;
pub use progress::Reporter;
pub use tools::{artifact_path, prepare_artifact_dir, sanitize_uri};
