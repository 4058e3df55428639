//! One note, end to end: fetch → extract → assemble → (optionally) write.

use std::path::Path;

use serde_json::Value;
use tracing::debug;

use crate::app::{AppContext, Result};
use crate::note::{self, NoteRecord};

#[derive(Default, Clone, Copy)]
pub struct ParseOptions<'a> {
    /// Write the record here after assembly. The parent must exist.
    pub output_path: Option<&'a Path>,
    /// Called with the full `__INITIAL_STATE__` tree before assembly.
    pub on_initial_state: Option<&'a (dyn Fn(&Value) + Sync)>,
}

pub async fn parse_note(
    ctx: &AppContext,
    url: &str,
    options: ParseOptions<'_>,
) -> Result<NoteRecord> {
    let page = ctx.fetcher.fetch(url, &ctx.headers, ctx.timeout).await?;
    debug!(url, bytes = page.len(), "received note page");

    let state = note::extract(&page)?;
    if let Some(hook) = options.on_initial_state {
        hook(&state.full_state);
    }

    let record = note::assemble(&state.note_section, url)?;

    if let Some(path) = options.output_path {
        ctx.store.write(&record, path)?;
    }
    Ok(record)
}
