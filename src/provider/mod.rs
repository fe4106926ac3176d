pub mod ytdlp;

use chrono::NaiveDate;
use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::error::{ArchiveError, Result};
use crate::transcript::Transcript;

/// Substrings that mark a URL as pointing at YouTube.
const URL_MARKERS: &[&str] = &["youtube", "youtu.be"];

/// A video resolved from a user-supplied URL.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VideoReference {
    pub url: String,
    pub id: String,
    pub title: String,
    pub publish_date: Option<NaiveDate>,
    pub description: String,
    pub tags: Vec<String>,
    pub duration_seconds: i64,
}

/// Resolves a video URL to its id, title and publish date.
pub trait VideoInfoProvider {
    fn resolve(&self, url: &str) -> Result<VideoReference>;
}

/// Fetches caption segments for a video id.
pub trait TranscriptProvider {
    /// Fails with `TranscriptUnavailable` when the video has no captions and
    /// with `Provider` when the provider itself could not be reached.
    fn fetch(&self, video_id: &str) -> Result<Transcript>;
}

/// Saves a video stream to disk.
pub trait VideoDownloader {
    /// Download `url`. Without `dest` the file is named after the video title.
    fn download(&self, url: &str, dest: Option<&Path>) -> Result<PathBuf>;
}

/// Accept only URLs that look like YouTube links.
pub fn validate_url(url: &str) -> Result<&str> {
    let url = url.trim();
    if URL_MARKERS.iter().any(|m| url.contains(m)) {
        Ok(url)
    } else {
        Err(ArchiveError::InvalidUrl {
            url: url.to_string(),
        })
    }
}
