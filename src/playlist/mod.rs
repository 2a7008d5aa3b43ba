//! Playlist parsing and rewriting.

pub mod parser;
pub mod writer;

pub use parser::{is_header, is_stream_uri, parse, single_url_entry};
pub use writer::{passing_entries, render, rewrite};
