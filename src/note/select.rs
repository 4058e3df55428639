use serde_json::{Map, Value};
use tracing::{debug, error};

use crate::app::{Result, XhsnoteError};
use crate::note::value::{expect_object, is_truthy, optional_object};
use crate::note::NoteRecord;

/// Pick the first populated note from `noteDetailMap`, in page order.
///
/// The returned record is a copy; the parsed state is left untouched.
pub fn select_first(note_section: &Value) -> Result<NoteRecord> {
    let empty = Map::new();
    let section = optional_object(Some(note_section), "note")?.unwrap_or(&empty);
    let detail_map =
        optional_object(section.get("noteDetailMap"), "note.noteDetailMap")?.unwrap_or(&empty);

    for (key, entry) in detail_map {
        let Some(note) = entry.get("note").filter(|note| is_truthy(note)) else {
            continue;
        };
        let note = expect_object(note, &format!("note.noteDetailMap.{key}.note"))?;
        debug!(key = %key, "using first populated note in noteDetailMap");
        return Ok(NoteRecord::from(note.clone()));
    }

    error!(entries = detail_map.len(), "noteDetailMap has no entry with a note");
    Err(XhsnoteError::MissingNote)
}
