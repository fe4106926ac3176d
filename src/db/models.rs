use chrono::NaiveDate;
use rusqlite::types::Value;

use crate::error::Result;
use crate::provider::VideoReference;
use crate::transcript::{format_segments, CaptionFormat, Segment};

/// `d-m-yyyy`, no zero padding.
pub fn format_publish_date(date: NaiveDate) -> String {
    date.format("%-d-%-m-%Y").to_string()
}

/// Row for `video_info`, in column order.
pub fn video_info_row(video: &VideoReference) -> Result<Vec<Value>> {
    Ok(vec![
        video
            .publish_date
            .map(|d| Value::Text(format_publish_date(d)))
            .unwrap_or(Value::Null),
        Value::Text(video.id.clone()),
        Value::Text(video.url.clone()),
        Value::Text(video.title.clone()),
        Value::Text(video.description.clone()),
        Value::Text(serde_json::to_string(&video.tags)?),
        Value::Integer(video.duration_seconds),
    ])
}

/// Rows for `transcription_data`: the segments split into numbered parts of
/// at most `per_part` segments, each stored as a JSON segment list.
pub fn transcription_rows(
    video_id: &str,
    segments: &[Segment],
    per_part: usize,
) -> Result<Vec<Vec<Value>>> {
    segments
        .chunks(per_part.max(1))
        .enumerate()
        .map(|(i, part)| {
            Ok(vec![
                Value::Text(video_id.to_string()),
                Value::Integer(i as i64 + 1),
                Value::Text(format_segments(video_id, part, CaptionFormat::Json)?),
            ])
        })
        .collect()
}
