use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{error, info};

use crate::app::{AppContext, Result, XhsnoteError};
use crate::note::NoteRecord;
use crate::service::{self, ParseOptions};

const INVALID_FILENAME_CHARS: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

/// Outcome of a batch run.
#[derive(Debug, Default)]
pub struct BatchSummary {
    pub saved: Vec<PathBuf>,
    /// `(url, error message)` for every URL that could not be processed.
    pub failures: Vec<(String, String)>,
}

impl BatchSummary {
    pub fn total(&self) -> usize {
        self.saved.len() + self.failures.len()
    }

    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Parse every URL in order and write one JSON file per note.
///
/// A failing URL is logged and recorded; the remaining URLs still run.
pub async fn run_batch(ctx: &AppContext, urls: &[String], output_dir: &Path) -> BatchSummary {
    let total = urls.len();
    let mut summary = BatchSummary::default();

    for (index, url) in urls.iter().enumerate() {
        info!("Parsing [{}/{}]: {}", index + 1, total, url);
        match save_note(ctx, url, output_dir).await {
            Ok(path) => {
                info!("Saved to {}", path.display());
                summary.saved.push(path);
            }
            Err(e) => {
                error!("Failed to parse [{}]: {}", url, e);
                summary.failures.push((url.clone(), e.to_string()));
            }
        }
    }

    if summary.is_success() {
        info!("All done, {} note(s) saved", summary.saved.len());
    } else {
        error!("{} of {} URL(s) failed", summary.failures.len(), total);
    }
    summary
}

async fn save_note(ctx: &AppContext, url: &str, output_dir: &Path) -> Result<PathBuf> {
    let record = service::parse_note(ctx, url, ParseOptions::default()).await?;
    let path = build_output_path(&record, output_dir);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    ctx.store.write(&record, &path)
}

/// `<base>/<author>_notes/<title>_<noteId>_noteDetail.json`
pub fn build_output_path(record: &NoteRecord, base_dir: &Path) -> PathBuf {
    let author = sanitize_segment(record.nickname(), "unknown_author");
    let title = sanitize_segment(record.title(), "untitled");
    let note_id = sanitize_segment(record.note_id(), "note");

    base_dir
        .join(format!("{author}_notes"))
        .join(format!("{title}_{note_id}_noteDetail.json"))
}

/// Make a value safe to use inside a file name.
///
/// Reserved and control characters become `_`, surrounding whitespace and
/// trailing dots are removed. Empty results fall back to `fallback`.
pub fn sanitize_segment(value: Option<&Value>, fallback: &str) -> String {
    let text = match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    };

    let sanitized: String = text
        .chars()
        .map(|c| {
            if INVALID_FILENAME_CHARS.contains(&c) || (c as u32) < 0x20 {
                '_'
            } else {
                c
            }
        })
        .collect();

    let cleaned = sanitized.trim().trim_end_matches(|c: char| c == '.' || c == ' ');
    if cleaned.is_empty() {
        fallback.to_string()
    } else {
        cleaned.to_string()
    }
}

/// Read URLs from a list file, one per line. Blank lines and `#` comments
/// are skipped.
pub fn load_urls_from_file(path: &Path) -> Result<Vec<String>> {
    if !path.exists() {
        return Err(XhsnoteError::Input(format!(
            "input file does not exist: {}",
            path.display()
        )));
    }
    if !path.is_file() {
        return Err(XhsnoteError::Input(format!(
            "input path is not a file: {}",
            path.display()
        )));
    }

    let content = fs::read_to_string(path).map_err(|e| {
        XhsnoteError::Input(format!("failed to read input file {}: {}", path.display(), e))
    })?;

    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(String::from)
        .collect())
}

/// Command-line URLs followed by file URLs, trimmed, without duplicates.
pub fn collect_input_urls(urls: &[String], input_file: Option<&Path>) -> Result<Vec<String>> {
    let mut collected: Vec<String> = urls
        .iter()
        .map(|url| url.trim())
        .filter(|url| !url.is_empty())
        .map(String::from)
        .collect();

    if let Some(path) = input_file {
        collected.extend(load_urls_from_file(path)?);
    }

    let mut seen = HashSet::new();
    collected.retain(|url| seen.insert(url.clone()));
    Ok(collected)
}
