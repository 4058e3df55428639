//! Note extraction pipeline.
//!
//! ```text
//! page text → extract → select_first → enrich → NoteRecord (+ noteUrl)
//! ```
//!
//! All of it is synchronous and stateless; each call works on its own copy of
//! the parsed page state.

pub mod assemble;
pub mod enrich;
pub mod extract;
pub mod record;
pub mod select;
pub mod value;

pub use assemble::assemble;
pub use enrich::TimestampFormatError;
pub use extract::{extract, ExtractedState};
pub use record::NoteRecord;
pub use select::select_first;
