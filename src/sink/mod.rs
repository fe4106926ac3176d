pub mod file;

use std::path::PathBuf;
use std::str::FromStr;

use crate::db::Database;
use crate::error::{ArchiveError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SinkKind {
    File,
    Database,
}

impl FromStr for SinkKind {
    type Err = ArchiveError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "file" | "txt" => Ok(SinkKind::File),
            "db" | "database" | "sqlite" => Ok(SinkKind::Database),
            other => Err(ArchiveError::Config(format!(
                "Unknown sink: {other}. Use: file, db"
            ))),
        }
    }
}

/// Where the pipeline persists a transcript.
pub enum Sink<'a> {
    /// Append to `<dir>/<normalized title>.<ext>`.
    File { dir: PathBuf },
    /// Insert into `video_info` and `transcription_data`.
    Database {
        db: &'a Database,
        segments_per_part: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sink_kind_from_str() {
        assert_eq!("file".parse::<SinkKind>().unwrap(), SinkKind::File);
        assert_eq!("DB".parse::<SinkKind>().unwrap(), SinkKind::Database);
        assert!(matches!("s3".parse::<SinkKind>(), Err(ArchiveError::Config(_))));
    }
}
