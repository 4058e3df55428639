use std::sync::Arc;
use std::time::Duration;

use reqwest::header::HeaderMap;

use crate::app::error::Result;
use crate::config::Settings;
use crate::fetcher::{request_headers, Fetcher, HttpFetcher};
use crate::store::{JsonFileStore, NoteStore};

pub struct AppContext {
    pub fetcher: Arc<dyn Fetcher + Send + Sync>,
    pub store: Arc<dyn NoteStore + Send + Sync>,
    /// Sent with every page request, on top of the fetcher's defaults.
    pub headers: HeaderMap,
    pub timeout: Duration,
}

impl AppContext {
    pub fn new(settings: &Settings) -> Result<Self> {
        let fetcher: Arc<dyn Fetcher + Send + Sync> = Arc::new(HttpFetcher::new()?);
        Self::with_fetcher(fetcher, settings)
    }

    pub fn with_fetcher(
        fetcher: Arc<dyn Fetcher + Send + Sync>,
        settings: &Settings,
    ) -> Result<Self> {
        let headers = request_headers(settings.user_agent.as_deref())?;
        let store: Arc<dyn NoteStore + Send + Sync> = Arc::new(JsonFileStore::new());

        Ok(Self {
            fetcher,
            store,
            headers,
            timeout: settings.timeout,
        })
    }
}
