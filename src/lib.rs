//! # xhsnote
//!
//! Turns Xiaohongshu (RED) note pages into `noteDetail` JSON files.
//!
//! ## Architecture
//!
//! ```text
//! Fetcher → extract → select → enrich → Store
//! ```
//!
//! - [`fetcher`]: HTTP page fetching behind the [`Fetcher`](fetcher::Fetcher) trait
//! - [`note`]: `window.__INITIAL_STATE__` extraction and note reshaping
//! - [`store`]: JSON file output
//! - [`cli`]: Batch driver over a list of URLs
//!
//! ## Quick Start
//!
//! ```bash
//! # One note
//! xhsnote https://www.xiaohongshu.com/explore/<note-id>
//!
//! # A list of notes, with file logging
//! xhsnote -f urls.txt -o notes --save-log
//! ```

/// Application context and error handling.
///
/// The [`AppContext`](app::AppContext) struct wires together the fetcher,
/// the store and per-run request settings.
pub mod app;

/// Command-line interface using clap, plus the batch runner.
pub mod cli;

/// Settings resolution: CLI flags, then `.env`, then defaults.
pub mod config;

/// Page fetching.
///
/// - [`Fetcher`](fetcher::Fetcher): Async trait for fetching page text
/// - [`HttpFetcher`](fetcher::HttpFetcher): reqwest-based implementation
pub mod fetcher;

/// Subscriber setup for `tracing`, with optional file output.
pub mod logging;

/// The extraction pipeline.
///
/// - [`extract`](note::extract()): Locate and parse the embedded state
/// - [`select_first`](note::select_first): First populated note in page order
/// - [`enrich`](note::enrich): Timestamps and watermark-free media URLs
/// - [`assemble`](note::assemble()): All of the above plus `noteUrl`
pub mod note;

/// Single-note service used by the CLI.
pub mod service;

/// Note persistence.
///
/// - [`NoteStore`](store::NoteStore): Trait for writing a finished note
/// - [`JsonFileStore`](store::JsonFileStore): Pretty-printed UTF-8 JSON files
pub mod store;
