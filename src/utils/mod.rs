pub mod config;
pub mod env;
pub mod logger;
pub mod streamsieve_toml;
pub mod tempfiles;

pub use config::*;
pub use env::apply_env_to_opts;
pub use logger::{Colors, setup_logging};
pub use tempfiles::{temp_path_for, write_atomic};
