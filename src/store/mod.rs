pub mod json_file;

use std::path::{Path, PathBuf};

use crate::app::Result;
use crate::note::NoteRecord;

pub use json_file::JsonFileStore;

pub trait NoteStore {
    /// Persist `record` at `path`, returning where it was written.
    ///
    /// Parent directories must already exist.
    fn write(&self, record: &NoteRecord, path: &Path) -> Result<PathBuf>;
}
