use std::cell::Cell;

use chrono::NaiveDate;
use yt_archive::db::schema::{TRANSCRIPTION_TABLE, VIDEO_INFO_TABLE};
use yt_archive::db::Database;
use yt_archive::pipeline::{Artifact, TranscriptPipeline};
use yt_archive::provider::{TranscriptProvider, VideoInfoProvider, VideoReference};
use yt_archive::sink::Sink;
use yt_archive::transcript::{parse_segments, CaptionFormat, Segment, Transcript};
use yt_archive::{ArchiveError, Result};

struct StubInfo {
    title: &'static str,
    fail: bool,
    calls: Cell<usize>,
}

impl StubInfo {
    fn new(title: &'static str) -> Self {
        Self {
            title,
            fail: false,
            calls: Cell::new(0),
        }
    }
}

impl VideoInfoProvider for StubInfo {
    fn resolve(&self, url: &str) -> Result<VideoReference> {
        self.calls.set(self.calls.get() + 1);
        if self.fail {
            return Err(ArchiveError::MetadataUnavailable {
                url: url.to_string(),
                reason: "Private video".to_string(),
            });
        }
        Ok(VideoReference {
            url: "http://x".to_string(),
            id: "vid123".to_string(),
            title: self.title.to_string(),
            publish_date: NaiveDate::from_ymd_opt(2023, 10, 16),
            description: "stub".to_string(),
            tags: vec!["test".to_string()],
            duration_seconds: 2,
        })
    }
}

struct StubCaptions {
    segments: Option<Vec<Segment>>,
}

impl StubCaptions {
    fn hi_there() -> Self {
        Self {
            segments: Some(vec![Segment::new("hi", 0.0, 1.0), Segment::new("there", 1.0, 1.0)]),
        }
    }
}

impl TranscriptProvider for StubCaptions {
    fn fetch(&self, video_id: &str) -> Result<Transcript> {
        match &self.segments {
            Some(segments) => Ok(Transcript {
                video_id: video_id.to_string(),
                segments: segments.clone(),
            }),
            None => Err(ArchiveError::TranscriptUnavailable {
                video_id: video_id.to_string(),
            }),
        }
    }
}

const URL: &str = "https://www.youtube.com/watch?v=vid123";

#[test]
fn test_file_sink_writes_header_and_text() {
    let dir = tempfile::tempdir().unwrap();
    let info = StubInfo::new("Test Video");
    let captions = StubCaptions::hi_there();
    let sink = Sink::File {
        dir: dir.path().to_path_buf(),
    };

    let report = TranscriptPipeline::new(&info, &captions, sink, CaptionFormat::PlainText)
        .run(URL)
        .unwrap();

    let path = dir.path().join("Test_Video.txt");
    let content = std::fs::read_to_string(&path).unwrap();
    assert_eq!(content, "Video Title: Test Video\nVideo URL: http://x\n\nhi\nthere");
    assert_eq!(report.segments, 2);
    assert!(matches!(report.artifact, Artifact::File { bytes, .. } if bytes == content.len()));
}

#[test]
fn test_file_sink_appends_on_rerun() {
    let dir = tempfile::tempdir().unwrap();
    let info = StubInfo::new("Test Video");
    let captions = StubCaptions::hi_there();

    for _ in 0..2 {
        let sink = Sink::File {
            dir: dir.path().to_path_buf(),
        };
        TranscriptPipeline::new(&info, &captions, sink, CaptionFormat::PlainText)
            .run(URL)
            .unwrap();
    }

    let content = std::fs::read_to_string(dir.path().join("Test_Video.txt")).unwrap();
    let once = "Video Title: Test Video\nVideo URL: http://x\n\nhi\nthere";
    assert_eq!(content, format!("{once}{once}"));
}

#[test]
fn test_title_is_normalized_for_file_and_header() {
    let dir = tempfile::tempdir().unwrap();
    let info = StubInfo::new("Rust: Ownership, Explained!");
    let captions = StubCaptions::hi_there();
    let sink = Sink::File {
        dir: dir.path().to_path_buf(),
    };

    TranscriptPipeline::new(&info, &captions, sink, CaptionFormat::PlainText)
        .run(URL)
        .unwrap();

    let content =
        std::fs::read_to_string(dir.path().join("Rust_Ownership_Explained.txt")).unwrap();
    assert!(content.starts_with("Video Title: Rust Ownership Explained\n"));
}

#[test]
fn test_json_file_sink_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let info = StubInfo::new("Test Video");
    let captions = StubCaptions::hi_there();
    let sink = Sink::File {
        dir: dir.path().to_path_buf(),
    };

    TranscriptPipeline::new(&info, &captions, sink, CaptionFormat::Json)
        .run(URL)
        .unwrap();

    assert!(!dir.path().join("Test_Video.json").exists());
    let content = std::fs::read_to_string(dir.path().join("Test_Video.json.txt")).unwrap();
    let body = content.split_once("\n\n").unwrap().1;
    assert_eq!(parse_segments(body).unwrap(), captions.segments.unwrap());
}

#[test]
fn test_symbol_only_title_falls_back_to_video_id() {
    let dir = tempfile::tempdir().unwrap();
    let info = StubInfo::new("🎉!!");
    let captions = StubCaptions::hi_there();
    let sink = Sink::File {
        dir: dir.path().to_path_buf(),
    };

    TranscriptPipeline::new(&info, &captions, sink, CaptionFormat::PlainText)
        .run(URL)
        .unwrap();

    assert!(!dir.path().join(".txt").exists());
    let content = std::fs::read_to_string(dir.path().join("vid123.txt")).unwrap();
    assert!(content.ends_with("\n\nhi\nthere"));
}

#[test]
fn test_database_sink_inserts_video_and_parts() {
    let db = Database::open_in_memory().unwrap();
    let info = StubInfo::new("Test Video");
    let captions = StubCaptions {
        segments: Some(
            (0..5)
                .map(|i| Segment::new(format!("line {i}"), i as f64, 1.0))
                .collect(),
        ),
    };
    let sink = Sink::Database {
        db: &db,
        segments_per_part: 2,
    };

    let report = TranscriptPipeline::new(&info, &captions, sink, CaptionFormat::PlainText)
        .run(URL)
        .unwrap();

    assert!(matches!(
        report.artifact,
        Artifact::Database {
            video_rows: 1,
            transcript_rows: 3
        }
    ));
    assert_eq!(db.row_count(VIDEO_INFO_TABLE).unwrap(), 1);
    assert_eq!(db.row_count(TRANSCRIPTION_TABLE).unwrap(), 3);

    let (date, title, tags): (String, String, String) = db
        .conn
        .query_row(
            "SELECT date_posted, title, tags FROM video_info WHERE id = 'vid123'",
            [],
            |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?)),
        )
        .unwrap();
    assert_eq!(date, "16-10-2023");
    assert_eq!(title, "Test Video");
    assert_eq!(tags, "[\"test\"]");

    let parts = db.transcription_parts("vid123").unwrap();
    let numbers: Vec<i64> = parts.iter().map(|(n, _)| *n).collect();
    assert_eq!(numbers, vec![1, 2, 3]);
    let all: Vec<Segment> = parts
        .iter()
        .flat_map(|(_, json)| parse_segments(json).unwrap())
        .collect();
    assert_eq!(all, captions.segments.unwrap());
}

#[test]
fn test_invalid_url_stops_before_provider() {
    let dir = tempfile::tempdir().unwrap();
    let info = StubInfo::new("Test Video");
    let captions = StubCaptions::hi_there();
    let sink = Sink::File {
        dir: dir.path().to_path_buf(),
    };

    let err = TranscriptPipeline::new(&info, &captions, sink, CaptionFormat::PlainText)
        .run("https://example.com/video")
        .unwrap_err();

    assert!(matches!(err, ArchiveError::InvalidUrl { .. }));
    assert_eq!(info.calls.get(), 0);
}

#[test]
fn test_metadata_failure_aborts() {
    let dir = tempfile::tempdir().unwrap();
    let info = StubInfo {
        fail: true,
        ..StubInfo::new("Test Video")
    };
    let captions = StubCaptions::hi_there();
    let sink = Sink::File {
        dir: dir.path().to_path_buf(),
    };

    let err = TranscriptPipeline::new(&info, &captions, sink, CaptionFormat::PlainText)
        .run(URL)
        .unwrap_err();

    assert!(matches!(err, ArchiveError::MetadataUnavailable { .. }));
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn test_missing_transcript_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let info = StubInfo::new("Test Video");
    let captions = StubCaptions { segments: None };
    let sink = Sink::File {
        dir: dir.path().to_path_buf(),
    };

    let err = TranscriptPipeline::new(&info, &captions, sink, CaptionFormat::PlainText)
        .run(URL)
        .unwrap_err();

    assert!(matches!(err, ArchiveError::TranscriptUnavailable { ref video_id } if video_id == "vid123"));
    assert_eq!(err.kind(), "NotFoundError");
    assert!(!dir.path().join("Test_Video.txt").exists());
}

#[test]
fn test_empty_transcript_fails_for_both_sinks() {
    let dir = tempfile::tempdir().unwrap();
    let db = Database::open_in_memory().unwrap();
    let info = StubInfo::new("Test Video");
    let captions = StubCaptions {
        segments: Some(Vec::new()),
    };

    let file_sink = Sink::File {
        dir: dir.path().to_path_buf(),
    };
    let err = TranscriptPipeline::new(&info, &captions, file_sink, CaptionFormat::PlainText)
        .run(URL)
        .unwrap_err();
    assert!(matches!(err, ArchiveError::EmptyTranscript { .. }));

    let db_sink = Sink::Database {
        db: &db,
        segments_per_part: 100,
    };
    let err = TranscriptPipeline::new(&info, &captions, db_sink, CaptionFormat::Json)
        .run(URL)
        .unwrap_err();
    assert!(matches!(err, ArchiveError::EmptyTranscript { ref video_id } if video_id == "vid123"));
    assert_eq!(err.kind(), "EmptyTranscript");
    assert_eq!(db.row_count(VIDEO_INFO_TABLE).unwrap(), 0);
}
