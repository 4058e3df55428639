use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use reqwest::Client;
use tracing::{debug, info};
use url::Url;

use crate::app::Result;
use crate::fetcher::Fetcher;

pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self> {
        let client = Client::builder().gzip(true).brotli(true).build()?;

        Ok(Self { client })
    }

    /// Default browser headers overlaid with the caller's.
    fn merge_headers(extra: &HeaderMap) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(DEFAULT_USER_AGENT));
        for (name, value) in extra {
            headers.insert(name.clone(), value.clone());
        }
        headers
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str, headers: &HeaderMap, timeout: Duration) -> Result<String> {
        let url = Url::parse(url)?;
        debug!(%url, timeout_secs = timeout.as_secs(), "fetching note page");

        let response = self
            .client
            .get(url)
            .headers(Self::merge_headers(headers))
            .timeout(timeout)
            .send()
            .await?;

        response.error_for_status_ref()?;
        info!(status = response.status().as_u16(), "fetched note page");

        Ok(response.text().await?)
    }
}
