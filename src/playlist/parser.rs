//! Playlist parsing: raw text → ordered entries, keeping the source lines for the rewrite.
//!
//! Three line shapes are recognized, tried in this order on each line:
//! 1. `#EXTINF...,Name` directive followed by a URI line (two raw lines).
//! 2. `Name,URI` on one line.
//! 3. A bare URI (`http`, `rtmp`, `rtsp` prefixes).
//!
//! Everything else (blank lines, other comments) is skipped. A leading `#EXTM3U` line is kept
//! aside as the header.

use crate::utils::config::PlaylistConsts;
use crate::{Entry, PlaylistDocument};

/// True if `line` (already trimmed) looks like a stream URI.
pub fn is_stream_uri(line: &str) -> bool {
    PlaylistConsts::URI_PREFIXES
        .iter()
        .any(|p| line.starts_with(p))
}

/// True if `line` is a playlist header (`#EXTM3U ...`).
pub fn is_header(line: &str) -> bool {
    line.trim_start().starts_with(PlaylistConsts::HEADER_MARKER)
}

/// Display name from an `#EXTINF` line: text after the last comma, or the default name.
fn extinf_name(directive: &str) -> String {
    directive
        .rsplit_once(',')
        .map(|(_, name)| name.trim())
        .filter(|name| !name.is_empty())
        .unwrap_or(PlaylistConsts::EXTINF_DEFAULT_NAME)
        .to_string()
}

/// Parse playlist text. Single forward pass; the only lookahead is the URI line after `#EXTINF`.
pub fn parse(text: &str) -> PlaylistDocument {
    let lines: Vec<&str> = text.lines().collect();
    let mut entries: Vec<Entry> = Vec::new();

    let mut header = None;
    let mut i = 0;
    if let Some(first) = lines.first()
        && is_header(first)
    {
        header = Some(first.trim_end().to_string());
        i = 1;
    }

    let mut push = |name: String, uri: String, raw_lines: Vec<String>| {
        let index = entries.len();
        entries.push(Entry {
            index,
            name,
            uri,
            raw_lines,
        });
    };

    while i < lines.len() {
        let line = lines[i].trim();
        if line.is_empty() {
            i += 1;
            continue;
        }

        if line.starts_with(PlaylistConsts::EXTINF_MARKER) {
            let directive = lines[i].trim_end();
            // The line after a directive is consumed whether or not it is a usable URI.
            if let Some(next) = lines.get(i + 1) {
                let uri = next.trim();
                if !uri.is_empty() && !uri.starts_with(PlaylistConsts::COMMENT_MARKER) {
                    push(
                        extinf_name(directive),
                        uri.to_string(),
                        vec![directive.to_string(), uri.to_string()],
                    );
                }
            }
            i += 2;
            continue;
        }

        if !line.starts_with(PlaylistConsts::COMMENT_MARKER)
            && let Some((name, uri)) = line.split_once(',')
        {
            push(
                name.trim().to_string(),
                uri.trim().to_string(),
                vec![line.to_string()],
            );
            i += 1;
            continue;
        }

        if is_stream_uri(line) {
            push(
                PlaylistConsts::BARE_DEFAULT_NAME.to_string(),
                line.to_string(),
                vec![line.to_string()],
            );
        }
        i += 1;
    }

    PlaylistDocument { header, entries }
}

/// Entry for a single URI given on the command line (no playlist file).
pub fn single_url_entry(uri: &str) -> Entry {
    let uri = uri.trim();
    Entry {
        index: 0,
        name: PlaylistConsts::SINGLE_URL_NAME.to_string(),
        uri: uri.to_string(),
        raw_lines: vec![uri.to_string()],
    }
}
