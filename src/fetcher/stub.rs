//! In-memory fetcher for tests.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::HeaderMap;
use reqwest::Client;

use crate::app::{Result, XhsnoteError};
use crate::fetcher::Fetcher;

/// Serves canned pages by URL. Unknown URLs fail with an `Http` error, the
/// same variant a failed reqwest request produces.
#[derive(Default)]
pub struct StaticFetcher {
    pages: HashMap<String, String>,
    requests: Mutex<Vec<(String, HeaderMap, Duration)>>,
}

impl StaticFetcher {
    pub fn with_page(mut self, url: &str, body: impl Into<String>) -> Self {
        self.pages.insert(url.to_string(), body.into());
        self
    }

    /// Every `(url, headers, timeout)` seen so far.
    pub fn requests(&self) -> Vec<(String, HeaderMap, Duration)> {
        self.requests.lock().map(|r| r.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl Fetcher for StaticFetcher {
    async fn fetch(&self, url: &str, headers: &HeaderMap, timeout: Duration) -> Result<String> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push((url.to_string(), headers.clone(), timeout));
        }

        self.pages.get(url).cloned().ok_or_else(request_failed)
    }
}

/// A genuine `reqwest::Error`, produced without any I/O by building a
/// request with an unusable URL.
fn request_failed() -> XhsnoteError {
    Client::new().get("http://").build().map_or_else(XhsnoteError::Http, |_| {
        XhsnoteError::InvalidUrl(url::ParseError::EmptyHost)
    })
}
