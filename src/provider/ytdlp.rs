use chrono::NaiveDate;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tracing::{debug, info};

use crate::config::ProviderConfig;
use crate::error::{ArchiveError, Result};
use crate::normalize::to_filename;
use crate::provider::{TranscriptProvider, VideoDownloader, VideoInfoProvider, VideoReference};
use crate::transcript::{Segment, Transcript};

const WATCH_URL: &str = "https://www.youtube.com/watch?v=";

/// Video provider backed by the `yt-dlp` command-line tool.
pub struct YtDlp {
    binary: String,
    timeout_secs: u64,
    language: String,
}

impl YtDlp {
    pub fn new(config: &ProviderConfig) -> Self {
        Self {
            binary: config.yt_dlp.clone(),
            timeout_secs: config.timeout_secs,
            language: config.language.clone(),
        }
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new(&self.binary);
        cmd.arg("--no-warnings")
            .arg("--socket-timeout")
            .arg(self.timeout_secs.to_string());
        cmd
    }

    fn run(&self, mut cmd: Command) -> Result<Output> {
        debug!("Running {:?}", cmd);
        cmd.output().map_err(|e| ArchiveError::Provider {
            reason: format!("Failed to run {}: {e}", self.binary),
        })
    }
}

/// Subset of `yt-dlp --dump-single-json` we care about.
#[derive(Debug, Deserialize)]
struct InfoJson {
    id: String,
    title: Option<String>,
    upload_date: Option<String>,
    description: Option<String>,
    tags: Option<Vec<String>>,
    duration: Option<f64>,
}

/// Build a [`VideoReference`] from yt-dlp's info JSON.
pub fn parse_info_json(url: &str, json: &str) -> Result<VideoReference> {
    let info: InfoJson = serde_json::from_str(json)?;
    Ok(VideoReference {
        url: url.to_string(),
        id: info.id,
        title: info.title.unwrap_or_else(|| "Untitled".to_string()),
        // upload_date is YYYYMMDD
        publish_date: info
            .upload_date
            .and_then(|d| NaiveDate::parse_from_str(&d, "%Y%m%d").ok()),
        description: info.description.unwrap_or_default(),
        tags: info.tags.unwrap_or_default(),
        duration_seconds: info.duration.map(|d| d.round() as i64).unwrap_or(0),
    })
}

#[derive(Debug, Deserialize)]
struct Json3 {
    #[serde(default)]
    events: Vec<Json3Event>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Json3Event {
    #[serde(default)]
    t_start_ms: u64,
    #[serde(default)]
    d_duration_ms: u64,
    segs: Option<Vec<Json3Seg>>,
}

#[derive(Debug, Deserialize)]
struct Json3Seg {
    #[serde(default)]
    utf8: String,
}

/// Convert YouTube's json3 caption track into ordered segments.
///
/// Events without text (window setup, bare line breaks in auto captions) are
/// dropped.
pub fn parse_json3(json: &str) -> Result<Vec<Segment>> {
    let track: Json3 = serde_json::from_str(json)?;
    let segments = track
        .events
        .into_iter()
        .filter_map(|ev| {
            let text: String = ev.segs?.into_iter().map(|s| s.utf8).collect();
            let text = text.trim();
            if text.is_empty() {
                return None;
            }
            Some(Segment {
                text: text.to_string(),
                start: ev.t_start_ms as f64 / 1000.0,
                duration: ev.d_duration_ms as f64 / 1000.0,
            })
        })
        .collect();
    Ok(segments)
}

fn stderr_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).trim().to_string()
}

impl VideoInfoProvider for YtDlp {
    fn resolve(&self, url: &str) -> Result<VideoReference> {
        let mut cmd = self.command();
        cmd.arg("--dump-single-json").arg("--skip-download").arg(url);
        let output = self.run(cmd).map_err(|e| ArchiveError::MetadataUnavailable {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

        if !output.status.success() {
            return Err(ArchiveError::MetadataUnavailable {
                url: url.to_string(),
                reason: stderr_of(&output),
            });
        }

        parse_info_json(url, &String::from_utf8_lossy(&output.stdout)).map_err(|e| {
            ArchiveError::MetadataUnavailable {
                url: url.to_string(),
                reason: e.to_string(),
            }
        })
    }
}

impl TranscriptProvider for YtDlp {
    fn fetch(&self, video_id: &str) -> Result<Transcript> {
        let workdir = tempfile::tempdir()?;
        let template = workdir.path().join("%(id)s");

        let mut cmd = self.command();
        cmd.arg("--skip-download")
            .arg("--write-subs")
            .arg("--write-auto-subs")
            .arg("--sub-langs")
            .arg(&self.language)
            .arg("--sub-format")
            .arg("json3")
            .arg("-o")
            .arg(&template)
            .arg(format!("{WATCH_URL}{video_id}"));
        let output = self.run(cmd)?;

        if !output.status.success() {
            return Err(ArchiveError::Provider {
                reason: stderr_of(&output),
            });
        }

        let track = std::fs::read_dir(workdir.path())?
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .find(|p| p.extension().and_then(|e| e.to_str()) == Some("json3"))
            .ok_or_else(|| ArchiveError::TranscriptUnavailable {
                video_id: video_id.to_string(),
            })?;

        let segments = parse_json3(&std::fs::read_to_string(&track)?)?;
        info!("Fetched {} caption segments for {video_id}", segments.len());

        Ok(Transcript {
            video_id: video_id.to_string(),
            segments,
        })
    }
}

impl VideoDownloader for YtDlp {
    fn download(&self, url: &str, dest: Option<&Path>) -> Result<PathBuf> {
        let target = match dest {
            Some(path) => path.to_path_buf(),
            None => PathBuf::from(to_filename(&self.resolve(url)?.title, "mp4")),
        };

        let mut cmd = self.command();
        cmd.arg("-f")
            .arg("best[ext=mp4]/best")
            .arg("--no-part")
            .arg("-o")
            .arg(&target)
            .arg(url);
        let output = self.run(cmd)?;

        if !output.status.success() {
            return Err(ArchiveError::DownloadFailed {
                url: url.to_string(),
                reason: stderr_of(&output),
            });
        }
        if !target.exists() {
            return Err(ArchiveError::DownloadFailed {
                url: url.to_string(),
                reason: format!("{} was not created", target.display()),
            });
        }

        info!("Downloaded {url} to {}", target.display());
        Ok(target)
    }
}
