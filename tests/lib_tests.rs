use streamsieve::capabilities::edge::center_crop;
use streamsieve::capabilities::ffprobe::stream_kinds;
use streamsieve::engine::progress::format_result_line;
use streamsieve::engine::{Reporter, artifact_path, sanitize_uri};
use streamsieve::pipeline::Completed;
use streamsieve::pipeline::{CaptureFailure, classify_capture_failure};
use streamsieve::playlist::{is_header, is_stream_uri, parse, passing_entries, render, rewrite};
use streamsieve::utils::write_atomic;
use streamsieve::{CapabilityError, Entry, ValidationResult};
use std::path::Path;

fn passed(index: usize, ok: bool) -> ValidationResult {
    ValidationResult {
        index,
        passed: ok,
        diagnostic: String::new(),
    }
}

// --- parse: line shapes ---

#[test]
fn test_parse_extinf_pair() {
    let doc = parse("#EXTM3U\n#EXTINF:-1 tvg-name=\"BBC\",BBC One\nhttp://a/b.m3u8\n");
    assert_eq!(doc.header.as_deref(), Some("#EXTM3U"));
    assert_eq!(doc.entries.len(), 1);
    let e = &doc.entries[0];
    assert_eq!(e.index, 0);
    assert_eq!(e.name, "BBC One");
    assert_eq!(e.uri, "http://a/b.m3u8");
    assert_eq!(
        e.raw_lines,
        vec!["#EXTINF:-1 tvg-name=\"BBC\",BBC One", "http://a/b.m3u8"]
    );
}

#[test]
fn test_parse_extinf_name_after_last_comma() {
    let doc = parse("#EXTINF:-1 group-title=\"a,b\",  Sports 1 \nrtmp://x/y\n");
    assert_eq!(doc.entries[0].name, "Sports 1");
}

#[test]
fn test_parse_extinf_without_comma_uses_default_name() {
    let doc = parse("#EXTINF:-1\nhttp://x/y\n");
    assert_eq!(doc.entries[0].name, "M3U Channel");
}

#[test]
fn test_parse_orphaned_extinf_dropped() {
    // Directive followed by a comment, a blank line, another directive, and end of input.
    let text = "#EXTINF:-1,A\n#comment\n#EXTINF:-1,B\n\n#EXTINF:-1,C\n#EXTINF:-1,D\nhttp://d\n#EXTINF:-1,E";
    let doc = parse(text);
    // The line after each directive is consumed; D's directive is swallowed by C.
    assert_eq!(doc.entries.len(), 1);
    assert_eq!(doc.entries[0].uri, "http://d");
    assert_eq!(doc.entries[0].name, "Unknown Channel");
}

#[test]
fn test_parse_name_uri_pair() {
    let doc = parse("News, http://x/y \n");
    assert_eq!(doc.header, None);
    let e = &doc.entries[0];
    assert_eq!(e.name, "News");
    assert_eq!(e.uri, "http://x/y");
    assert_eq!(e.raw_lines, vec!["News, http://x/y"]);
}

#[test]
fn test_parse_name_uri_splits_on_first_comma() {
    let doc = parse("News,http://x/y?a=1,2\n");
    assert_eq!(doc.entries[0].name, "News");
    assert_eq!(doc.entries[0].uri, "http://x/y?a=1,2");
}

#[test]
fn test_parse_bare_uris() {
    let doc = parse("http://a\nhttps://b\nrtmp://c\nrtsp://d\nudp://e\nnot a url\n");
    let uris: Vec<&str> = doc.entries.iter().map(|e| e.uri.as_str()).collect();
    assert_eq!(uris, vec!["http://a", "https://b", "rtmp://c", "rtsp://d"]);
    assert!(doc.entries.iter().all(|e| e.name == "Unknown Channel"));
}

#[test]
fn test_parse_skips_blank_and_comments() {
    let doc = parse("\n   \n# just a comment, with a comma\n#EXTVLCOPT:foo\n");
    assert!(doc.entries.is_empty());
    assert_eq!(doc.header, None);
}

#[test]
fn test_parse_indices_follow_file_order() {
    let text = "#EXTM3U\nA,http://a\n#EXTINF:-1,B\nhttp://b\nhttp://c\n";
    let doc = parse(text);
    let idx: Vec<usize> = doc.entries.iter().map(|e| e.index).collect();
    assert_eq!(idx, vec![0, 1, 2]);
    let names: Vec<&str> = doc.entries.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["A", "B", "Unknown Channel"]);
}

#[test]
fn test_parse_header_only_on_first_line() {
    let doc = parse("http://a\n#EXTM3U\n");
    assert_eq!(doc.header, None);
    assert_eq!(doc.entries.len(), 1);
}

#[test]
fn test_parse_crlf_line_endings() {
    let doc = parse("#EXTM3U\r\n#EXTINF:-1,A\r\nhttp://a\r\n");
    assert_eq!(doc.header.as_deref(), Some("#EXTM3U"));
    assert_eq!(doc.entries[0].raw_lines, vec!["#EXTINF:-1,A", "http://a"]);
}

#[test]
fn test_is_header_and_is_stream_uri() {
    assert!(is_header("#EXTM3U url-tvg=\"x\""));
    assert!(!is_header("#EXTINF:-1,A"));
    assert!(is_stream_uri("rtsp://cam/1"));
    assert!(!is_stream_uri("ftp://x"));
}

// --- writer ---

#[test]
fn test_render_skips_failed_groups_whole() {
    let doc = parse("#EXTM3U\n#EXTINF:-1,A\nhttp://a\nB,http://b\n#EXTINF:-1,C\nhttp://c\n");
    let results = vec![passed(0, false), passed(1, true), passed(2, true)];
    let passing = passing_entries(&doc.entries, &results);
    assert_eq!(
        render(doc.header.as_deref(), &passing),
        "#EXTM3U\nB,http://b\n#EXTINF:-1,C\nhttp://c\n"
    );
}

#[test]
fn test_render_nothing_passing_keeps_header() {
    let doc = parse("#EXTM3U\nhttp://a\n");
    let passing = passing_entries(&doc.entries, &[passed(0, false)]);
    assert_eq!(render(doc.header.as_deref(), &passing), "#EXTM3U\n");
    let doc = parse("http://a\n");
    let passing = passing_entries(&doc.entries, &[passed(0, false)]);
    assert_eq!(render(doc.header.as_deref(), &passing), "");
}

#[test]
fn test_rewrite_clean_playlist_is_identical() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("list.m3u");
    let original = "#EXTM3U\n#EXTINF:-1 tvg-id=\"x\",X\nhttp://x\nY,http://y\nrtmp://z\n";
    std::fs::write(&path, original).unwrap();

    let doc = parse(original);
    let results: Vec<_> = doc.entries.iter().map(|e| passed(e.index, true)).collect();
    let passing = passing_entries(&doc.entries, &results);
    rewrite(&path, doc.header.as_deref(), &passing).unwrap();

    assert_eq!(std::fs::read_to_string(&path).unwrap(), original);
    assert!(!dir.path().join("list.m3u.tmp").exists());
}

#[test]
fn test_rewrite_rejects_out_of_order_entries() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("list.m3u");
    std::fs::write(&path, "keep me\n").unwrap();
    let doc = parse("http://a\nhttp://b\n");
    let reversed = vec![&doc.entries[1], &doc.entries[0]];
    assert!(rewrite(&path, None, &reversed).is_err());
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "keep me\n");
}

#[test]
fn test_write_atomic_failed_rename_removes_temp() {
    let dir = tempfile::tempdir().unwrap();
    // A non-empty directory cannot be replaced by a file.
    let target = dir.path().join("list.m3u");
    std::fs::create_dir(&target).unwrap();
    std::fs::write(target.join("keep"), "x").unwrap();
    assert!(write_atomic(&target, b"#EXTM3U\n").is_err());
    assert!(!dir.path().join("list.m3u.tmp").exists());
    assert!(target.is_dir());
}

#[test]
fn test_write_atomic_replaces_file() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("list.m3u");
    std::fs::write(&target, "old").unwrap();
    write_atomic(&target, b"new").unwrap();
    assert_eq!(std::fs::read_to_string(&target).unwrap(), "new");
    assert!(!dir.path().join("list.m3u.tmp").exists());
}

// --- progress reporting ---

#[test]
fn test_format_result_line_carries_diagnostic() {
    let ok = format_result_line(true, "Video stream detected");
    let bad = format_result_line(false, "Timeout");
    assert!(ok.contains("Passed:") && ok.ends_with("Video stream detected"));
    assert!(bad.contains("Failed:") && bad.ends_with("Timeout"));
}

#[test]
fn test_reporter_bar_only_when_requested_and_non_empty() {
    assert!(!Reporter::new(false, 3).has_bar());
    assert!(!Reporter::new(true, 0).has_bar());

    let mut reporter = Reporter::new(true, 2);
    assert!(reporter.has_bar());
    let entry = Entry {
        index: 0,
        name: "a".into(),
        uri: "http://a".into(),
        raw_lines: vec!["http://a".into()],
    };
    let result = ValidationResult {
        index: 0,
        passed: true,
        diagnostic: "Video stream detected".into(),
    };
    for done in 1..=2 {
        reporter.report(&Completed {
            done,
            total: 2,
            entry: &entry,
            result: &result,
        });
    }
    reporter.finish();
}

// --- artifact naming ---

#[test]
fn test_sanitize_uri_strips_scheme_and_symbols() {
    assert_eq!(sanitize_uri("http://host:80/live/a.m3u8"), "host_80_live_a_m3u8");
}

#[test]
fn test_sanitize_uri_truncates() {
    let long = format!("http://{}", "a".repeat(200));
    assert_eq!(sanitize_uri(&long).chars().count(), 50);
}

#[test]
fn test_artifact_path_kept_is_deterministic() {
    let dir = Path::new("frames");
    let a = artifact_path(dir, "http://x/y", true);
    let b = artifact_path(dir, "http://x/y", true);
    assert_eq!(a, b);
    let name = a.file_name().unwrap().to_string_lossy().into_owned();
    assert!(name.starts_with("capture_x_y_"));
    assert!(name.ends_with(".jpg"));
    assert_eq!(a.parent(), Some(dir));
}

#[test]
fn test_artifact_path_kept_distinguishes_shared_prefix() {
    let dir = Path::new("/frames");
    let a = "http://provider.example.com:8080/live/username/password/12345.ts";
    let b = "http://provider.example.com:8080/live/username/password/12346.ts";
    assert_eq!(sanitize_uri(a), sanitize_uri(b));
    assert_ne!(artifact_path(dir, a, true), artifact_path(dir, b, true));
}

#[test]
fn test_artifact_path_temp_is_unique() {
    let dir = Path::new("frames");
    let a = artifact_path(dir, "http://x/y", false);
    let b = artifact_path(dir, "http://x/y", false);
    assert_ne!(a, b);
    let name = a.file_name().unwrap().to_string_lossy().into_owned();
    assert!(name.starts_with("temp_capture_"));
    assert!(name.ends_with(".jpg"));
}

// --- capture failure classification ---

#[test]
fn test_classify_audio_only() {
    let e = CapabilityError::Failed("Output file #0 does not contain any stream".into());
    assert_eq!(classify_capture_failure(&e), CaptureFailure::AudioOnly);
    let e = CapabilityError::Failed("Could not find codec parameters (Unspecified size)".into());
    assert_eq!(classify_capture_failure(&e), CaptureFailure::AudioOnly);
}

#[test]
fn test_classify_priority_audio_over_invalid_argument() {
    let e = CapabilityError::Failed("unspecified size ... Invalid argument".into());
    assert_eq!(classify_capture_failure(&e), CaptureFailure::AudioOnly);
}

#[test]
fn test_classify_invalid_argument_and_fallback() {
    let e = CapabilityError::Failed("Error opening output: Invalid argument".into());
    assert_eq!(classify_capture_failure(&e), CaptureFailure::NoVideoStream);
    let e = CapabilityError::Failed("Server returned 404 Not Found".into());
    assert_eq!(classify_capture_failure(&e), CaptureFailure::Generic);
    assert_eq!(
        classify_capture_failure(&CapabilityError::TimedOut),
        CaptureFailure::TimedOut
    );
}

// --- ffprobe output ---

#[test]
fn test_stream_kinds_from_json() {
    let json = r#"{"programs":[],"streams":[{"codec_type":"video"},{"codec_type":"audio"}]}"#;
    assert_eq!(stream_kinds(json).unwrap(), vec!["video", "audio"]);
    assert_eq!(stream_kinds("{}").unwrap(), Vec::<String>::new());
    assert!(stream_kinds("garbage").is_none());
}

// --- edge heuristic ---

#[test]
fn test_center_crop_bounds() {
    assert_eq!(center_crop(1920, 1080), (480, 270, 1440, 702));
    assert_eq!(center_crop(100, 100), (25, 25, 75, 65));
}

#[cfg(feature = "edge-detect")]
mod edge {
    use image::{GrayImage, Luma};
    use streamsieve::capabilities::FrameAnalyzer;
    use streamsieve::capabilities::edge::{EdgeAnalyzer, center_edge_score};

    #[test]
    fn test_flat_frame_scores_low() {
        // Flat black: interior responses are 0, border pass-through is 0.
        let img = GrayImage::from_pixel(320, 240, Luma([0]));
        assert_eq!(center_edge_score(&img).unwrap(), 0.0);
    }

    #[test]
    fn test_text_like_frame_scores_high() {
        // Thin bright strokes on black in the centre band, like rendered text.
        let mut img = GrayImage::from_pixel(320, 240, Luma([0]));
        for y in 70..150 {
            for x in 90..230 {
                if x % 4 == 0 || y % 6 == 0 {
                    img.put_pixel(x, y, Luma([255]));
                }
            }
        }
        assert!(center_edge_score(&img).unwrap() > 10.0);
    }

    #[test]
    fn test_subtitles_below_crop_ignored() {
        let mut img = GrayImage::from_pixel(320, 240, Luma([0]));
        for y in 200..230 {
            for x in 40..280 {
                if x % 3 == 0 {
                    img.put_pixel(x, y, Luma([255]));
                }
            }
        }
        assert_eq!(center_edge_score(&img).unwrap(), 0.0);
    }

    #[test]
    fn test_tiny_frame_is_error() {
        let img = GrayImage::from_pixel(2, 2, Luma([0]));
        assert!(center_edge_score(&img).is_err());
    }

    #[test]
    fn test_analyzer_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("f.png");
        GrayImage::from_pixel(64, 48, Luma([0])).save(&path).unwrap();
        assert_eq!(EdgeAnalyzer.analyze(&path).unwrap(), 0.0);
        assert!(EdgeAnalyzer.analyze(&dir.path().join("missing.png")).is_err());
    }
}
