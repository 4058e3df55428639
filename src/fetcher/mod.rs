pub mod http_fetcher;
#[cfg(test)]
pub mod stub;

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};

use crate::app::{Result, XhsnoteError};

pub use http_fetcher::{HttpFetcher, DEFAULT_TIMEOUT, DEFAULT_USER_AGENT};

#[async_trait]
pub trait Fetcher {
    /// Fetch the page at `url` and return its body as text.
    ///
    /// `headers` are sent on top of the fetcher's defaults and win on conflict.
    async fn fetch(&self, url: &str, headers: &HeaderMap, timeout: Duration) -> Result<String>;
}

/// Extra request headers for a run: only a `User-Agent` override for now.
pub fn request_headers(user_agent: Option<&str>) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    if let Some(agent) = user_agent.filter(|agent| !agent.is_empty()) {
        let value = HeaderValue::from_str(agent)
            .map_err(|e| XhsnoteError::InvalidHeader(format!("User-Agent: {e}")))?;
        headers.insert(USER_AGENT, value);
    }
    Ok(headers)
}
