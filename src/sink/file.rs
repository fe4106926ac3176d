use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use crate::error::Result;

/// Append `content` to the file at `path`, creating it if needed.
pub fn append_text(path: &Path, content: &str) -> Result<()> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    file.write_all(content.as_bytes())?;
    file.flush()?;
    Ok(())
}

/// Two-line header written ahead of a transcript.
pub fn header(title: &str, url: &str) -> String {
    format!("Video Title: {title}\nVideo URL: {url}\n\n")
}
