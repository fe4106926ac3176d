use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ArchiveError {
    #[error("Not a recognized YouTube URL: {url}")]
    InvalidUrl { url: String },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("No valid input after {attempts} attempts")]
    AttemptsExhausted { attempts: u32 },

    #[error("Could not resolve video info for {url}: {reason}")]
    MetadataUnavailable { url: String, reason: String },

    #[error("No transcript available for video {video_id}")]
    TranscriptUnavailable { video_id: String },

    #[error("Provider failed: {reason}")]
    Provider { reason: String },

    #[error("Download failed for {url}: {reason}")]
    DownloadFailed { url: String, reason: String },

    #[error("Unsupported format: {0}. Use: text, json")]
    UnsupportedFormat(String),

    #[error("Transcript for video {video_id} has no segments")]
    EmptyTranscript { video_id: String },

    #[error("Table {table} has no columns")]
    EmptySchema { table: String },

    #[error("Invalid SQL identifier: {0:?}")]
    InvalidIdentifier(String),

    #[error("Row for {table} has {actual} values, expected {expected}")]
    ArityMismatch {
        table: String,
        expected: usize,
        actual: usize,
    },

    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),
}

impl ArchiveError {
    /// Coarse error category, used when logging a failed pipeline stage.
    pub fn kind(&self) -> &'static str {
        match self {
            ArchiveError::InvalidUrl { .. }
            | ArchiveError::InvalidInput(_)
            | ArchiveError::AttemptsExhausted { .. } => "InputValidationError",
            ArchiveError::MetadataUnavailable { .. }
            | ArchiveError::Provider { .. }
            | ArchiveError::DownloadFailed { .. } => "ProviderError",
            ArchiveError::TranscriptUnavailable { .. } | ArchiveError::FileNotFound(_) => {
                "NotFoundError"
            }
            ArchiveError::UnsupportedFormat(_) => "UnsupportedFormat",
            ArchiveError::EmptyTranscript { .. } => "EmptyTranscript",
            ArchiveError::EmptySchema { .. }
            | ArchiveError::InvalidIdentifier(_)
            | ArchiveError::ArityMismatch { .. }
            | ArchiveError::Db(_) => "DbError",
            ArchiveError::Io(_) => "IOError",
            ArchiveError::Json(_) => "SerializationError",
            ArchiveError::Config(_) => "ConfigError",
        }
    }
}

pub type Result<T> = std::result::Result<T, ArchiveError>;
