use serde_json::Value;

use crate::app::Result;
use crate::note::enrich::{enrich_images, enrich_times, enrich_video};
use crate::note::select::select_first;
use crate::note::value::is_truthy;
use crate::note::NoteRecord;

/// Build the final record for one page: select the note, derive media URLs
/// and timestamps, then stamp it with the URL it came from.
pub fn assemble(note_section: &Value, source_url: &str) -> Result<NoteRecord> {
    let mut record = select_first(note_section)?;

    let images = enrich_images(record.get("imageList"));
    record.insert("imageList", Value::Array(images));

    let video = record
        .get("video")
        .filter(|video| is_truthy(video))
        .map(enrich_video);
    if let Some(video) = video {
        record.insert("video", video);
    }

    enrich_times(&mut record);
    record.insert("noteUrl", Value::String(source_url.to_string()));

    Ok(record)
}
