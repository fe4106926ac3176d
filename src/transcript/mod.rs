use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::{ArchiveError, Result};

/// One timed caption line as returned by the transcript provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub text: String,
    pub start: f64,
    pub duration: f64,
}

impl Segment {
    pub fn new(text: impl Into<String>, start: f64, duration: f64) -> Self {
        Self {
            text: text.into(),
            start,
            duration,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Transcript {
    pub video_id: String,
    pub segments: Vec<Segment>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptionFormat {
    PlainText,
    Json,
}

impl CaptionFormat {
    /// Extension for a transcript file. Files always start with a text
    /// header, so JSON bodies are not given a bare `.json` name.
    pub fn file_extension(&self) -> &'static str {
        match self {
            CaptionFormat::PlainText => "txt",
            CaptionFormat::Json => "json.txt",
        }
    }
}

impl FromStr for CaptionFormat {
    type Err = ArchiveError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "text" | "txt" | "plain" => Ok(CaptionFormat::PlainText),
            "json" => Ok(CaptionFormat::Json),
            _ => Err(ArchiveError::UnsupportedFormat(s.to_string())),
        }
    }
}

/// Render a transcript in the requested format.
///
/// Plain text puts one caption line per output line. JSON keeps the segment
/// list exactly as the provider ordered it.
pub fn format(transcript: &Transcript, target: CaptionFormat) -> Result<String> {
    format_segments(&transcript.video_id, &transcript.segments, target)
}

pub(crate) fn format_segments(
    video_id: &str,
    segments: &[Segment],
    target: CaptionFormat,
) -> Result<String> {
    if segments.is_empty() {
        return Err(ArchiveError::EmptyTranscript {
            video_id: video_id.to_string(),
        });
    }

    match target {
        CaptionFormat::PlainText => Ok(segments
            .iter()
            .map(|s| s.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")),
        CaptionFormat::Json => Ok(serde_json::to_string(segments)?),
    }
}

/// Parse the JSON form produced by [`format`] back into segments.
pub fn parse_segments(json: &str) -> Result<Vec<Segment>> {
    Ok(serde_json::from_str(json)?)
}
