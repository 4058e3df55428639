use thiserror::Error;

use crate::config::ConfigError;

#[derive(Error, Debug)]
pub enum XhsnoteError {
    #[error("Page structure not recognised: window.__INITIAL_STATE__ script not found")]
    StateNotFound,

    #[error("Embedded state is not valid JSON: {0}")]
    StateParse(#[source] serde_json::Error),

    #[error("noteDetailMap contains no note data")]
    MissingNote,

    #[error("Unexpected shape for `{field}`: expected {expected}, found {found}")]
    UnexpectedShape {
        field: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Invalid header: {0}")]
    InvalidHeader(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize note: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("Input error: {0}")]
    Input(String),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

pub type Result<T> = std::result::Result<T, XhsnoteError>;
