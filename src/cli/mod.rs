pub mod commands;

use std::path::PathBuf;

use clap::Parser;
use tracing::level_filters::LevelFilter;

use crate::config::parse_log_level;

/// Settings left unset here fall back to the `.env` file, then to defaults.
#[derive(Parser, Debug)]
#[command(name = "xhsnote")]
#[command(about = "Parse Xiaohongshu notes into noteDetail JSON files", long_about = None)]
pub struct Cli {
    /// Note URLs to parse
    pub urls: Vec<String>,

    /// File with one URL per line; blank lines and lines starting with `#` are skipped
    #[arg(short = 'f', long)]
    pub input_file: Option<PathBuf>,

    /// .env file to read (default: ./.env when present)
    #[arg(long)]
    pub env_file: Option<PathBuf>,

    /// Output directory for JSON files (default: output)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Request timeout in seconds (default: 15)
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Override the User-Agent header
    #[arg(long)]
    pub user_agent: Option<String>,

    /// Log level: trace, debug, info, warn, error (default: info)
    #[arg(long, value_parser = parse_log_level)]
    pub log_level: Option<LevelFilter>,

    /// Also write logs to <log-dir>/xhsnote.log
    #[arg(long, overrides_with = "no_save_log")]
    pub save_log: bool,

    /// Disable file logging even if the .env file enables it
    #[arg(long, overrides_with = "save_log")]
    pub no_save_log: bool,

    /// Directory for the log file (default: logs)
    #[arg(long)]
    pub log_dir: Option<PathBuf>,
}

impl Cli {
    /// `Some` only when one of `--save-log` / `--no-save-log` was given.
    pub fn save_log_flag(&self) -> Option<bool> {
        match (self.save_log, self.no_save_log) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        }
    }
}
