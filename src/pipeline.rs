use rusqlite::types::Value;
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;
use tracing::{error, info};

use crate::db::{models, schema, Database};
use crate::error::{ArchiveError, Result};
use crate::normalize::{normalize, to_filename};
use crate::provider::{validate_url, TranscriptProvider, VideoInfoProvider, VideoReference};
use crate::sink::file::{append_text, header};
use crate::sink::Sink;
use crate::transcript::{self, CaptionFormat};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    AwaitingUrl,
    ResolvingMetadata,
    FetchingTranscript,
    Formatting,
    Persisting,
    Done,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::AwaitingUrl => "awaiting-url",
            Stage::ResolvingMetadata => "resolving-metadata",
            Stage::FetchingTranscript => "fetching-transcript",
            Stage::Formatting => "formatting",
            Stage::Persisting => "persisting",
            Stage::Done => "done",
        };
        f.write_str(name)
    }
}

/// What a successful run wrote.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "sink", rename_all = "snake_case")]
pub enum Artifact {
    File { path: PathBuf, bytes: usize },
    Database { video_rows: usize, transcript_rows: usize },
}

#[derive(Debug, Clone, Serialize)]
pub struct PipelineReport {
    pub video: VideoReference,
    pub segments: usize,
    pub artifact: Artifact,
}

enum Formatted<'a> {
    Text {
        path: PathBuf,
        content: String,
    },
    Rows {
        db: &'a Database,
        video: Vec<Value>,
        parts: Vec<Vec<Value>>,
    },
}

/// URL → metadata → captions → formatted artifact → sink.
pub struct TranscriptPipeline<'a> {
    info: &'a dyn VideoInfoProvider,
    captions: &'a dyn TranscriptProvider,
    sink: Sink<'a>,
    format: CaptionFormat,
}

impl<'a> TranscriptPipeline<'a> {
    pub fn new(
        info: &'a dyn VideoInfoProvider,
        captions: &'a dyn TranscriptProvider,
        sink: Sink<'a>,
        format: CaptionFormat,
    ) -> Self {
        Self {
            info,
            captions,
            sink,
            format,
        }
    }

    /// Run every stage for one video. The first failure aborts the run;
    /// whatever earlier stages wrote stays in place.
    pub fn run(&self, url: &str) -> Result<PipelineReport> {
        let url = step(Stage::AwaitingUrl, || validate_url(url))?;
        let video = step(Stage::ResolvingMetadata, || self.info.resolve(url))?;
        let transcript = step(Stage::FetchingTranscript, || self.captions.fetch(&video.id))?;

        let formatted = step(Stage::Formatting, || match &self.sink {
            Sink::File { dir } => {
                let title = normalize(&video.title);
                let stem = if title.trim().is_empty() {
                    video.id.as_str()
                } else {
                    title.as_str()
                };
                let body = transcript::format(&transcript, self.format)?;
                Ok(Formatted::Text {
                    path: dir.join(to_filename(stem, self.format.file_extension())),
                    content: header(&title, &video.url) + &body,
                })
            }
            Sink::Database {
                db,
                segments_per_part,
            } => {
                if transcript.segments.is_empty() {
                    return Err(ArchiveError::EmptyTranscript {
                        video_id: transcript.video_id.clone(),
                    });
                }
                Ok(Formatted::Rows {
                    db: *db,
                    video: models::video_info_row(&video)?,
                    parts: models::transcription_rows(
                        &video.id,
                        &transcript.segments,
                        *segments_per_part,
                    )?,
                })
            }
        })?;

        let artifact = step(Stage::Persisting, || persist(formatted))?;

        info!(stage = %Stage::Done, "Archived {} ({})", video.title, video.id);
        Ok(PipelineReport {
            segments: transcript.segments.len(),
            video,
            artifact,
        })
    }
}

fn persist(formatted: Formatted<'_>) -> Result<Artifact> {
    match formatted {
        Formatted::Text { path, content } => {
            append_text(&path, &content)?;
            info!("Wrote {} bytes to {}", content.len(), path.display());
            Ok(Artifact::File {
                path,
                bytes: content.len(),
            })
        }
        Formatted::Rows { db, video, parts } => {
            let video_table = schema::video_info();
            let parts_table = schema::transcription_data();

            db.insert_row(&video_table.name, &video, video_table.arity())?;
            for part in &parts {
                db.insert_row(&parts_table.name, part, parts_table.arity())?;
            }
            Ok(Artifact::Database {
                video_rows: 1,
                transcript_rows: parts.len(),
            })
        }
    }
}

fn step<T>(stage: Stage, f: impl FnOnce() -> Result<T>) -> Result<T> {
    f().map_err(|e| {
        error!(stage = %stage, kind = e.kind(), "{e}");
        e
    })
}
