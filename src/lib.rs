//! Streamsieve: concurrent IPTV playlist checker.
//!
//! Entries are probed for reachability (and, in thorough mode, checked for an error screen in a
//! captured frame) by a bounded worker pool; the playlist is then rewritten with only the entries
//! that passed, in their original order and with their original lines.

pub mod capabilities;
pub mod engine;
pub mod pipeline;
pub mod playlist;
pub mod types;
pub mod utils;

/// Re-export types for API
pub use types::*;

pub use capabilities::Capabilities;
pub use pipeline::{check_playlist, check_url};

/// Result alias used by public streamsieve API
pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, Error>;
