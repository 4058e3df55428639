use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::Serializer;
use tracing::info;

use crate::app::{Result, XhsnoteError};
use crate::note::NoteRecord;
use crate::store::NoteStore;

const INDENT: &[u8] = b"    ";

/// Writes notes as UTF-8 JSON with four-space indentation. Non-ASCII text is
/// written as-is, not escaped.
#[derive(Debug, Clone, Default)]
pub struct JsonFileStore;

impl JsonFileStore {
    pub fn new() -> Self {
        Self
    }

    pub fn to_json(record: &NoteRecord) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        let mut serializer = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(INDENT));
        record
            .serialize(&mut serializer)
            .map_err(XhsnoteError::Serialize)?;
        Ok(buf)
    }
}

impl NoteStore for JsonFileStore {
    fn write(&self, record: &NoteRecord, path: &Path) -> Result<PathBuf> {
        let body = Self::to_json(record)?;
        fs::write(path, body)?;
        info!(path = %path.display(), "wrote note detail");
        Ok(path.to_path_buf())
    }
}
