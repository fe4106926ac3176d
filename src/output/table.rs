use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::pipeline::{Artifact, PipelineReport};

/// Clock-style video length: `0:42`, `3:32`, `1:02:05`.
pub fn format_duration(seconds: i64) -> String {
    let secs = seconds.max(0);
    match (secs / 3600, secs % 3600 / 60, secs % 60) {
        (0, m, s) => format!("{m}:{s:02}"),
        (h, m, s) => format!("{h}:{m:02}:{s:02}"),
    }
}

/// Clip `s` to `max_width` terminal columns, marking the cut with `…`.
pub fn truncate(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    let budget = max_width.saturating_sub(1);
    let mut used = 0;
    let kept: String = s
        .chars()
        .take_while(|c| {
            used += c.width().unwrap_or(0);
            used <= budget
        })
        .collect();
    format!("{kept}…")
}

/// Summary of an archived video for `yta transcribe`.
pub fn print_report(report: &PipelineReport) {
    let v = &report.video;
    println!("Archived: {}", truncate(&v.title, 70));
    println!("  ID:       {}", v.id);
    println!("  URL:      {}", v.url);
    if let Some(date) = v.publish_date {
        println!("  Posted:   {date}");
    }
    println!("  Duration: {}", format_duration(v.duration_seconds));
    println!("  Segments: {}", report.segments);

    match &report.artifact {
        Artifact::File { path, bytes } => {
            println!("  Saved to: {} ({bytes} bytes appended)", path.display());
        }
        Artifact::Database {
            video_rows,
            transcript_rows,
        } => {
            println!(
                "  Stored:   {video_rows} video_info row, {transcript_rows} transcription_data row{}",
                if *transcript_rows == 1 { "" } else { "s" }
            );
        }
    }
}
