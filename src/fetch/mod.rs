pub mod http;
pub mod webdriver;

use crate::config::FetcherConfig;
use crate::error::FetchError;
use async_trait::async_trait;
use std::sync::Arc;
use url::Url;

/// Retrieves the HTML of a page. One attempt per call, no retries.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    async fn fetch(&self, url: &Url) -> Result<String, FetchError>;
}

/// Build the fetcher described by the configuration
pub fn from_config(config: &FetcherConfig) -> Result<Arc<dyn PageFetcher>, FetchError> {
    match config {
        FetcherConfig::Http {
            timeout_ms,
            user_agent,
        } => Ok(Arc::new(http::HttpFetcher::new(*timeout_ms, user_agent)?)),
        FetcherConfig::WebDriver {
            webdriver_url,
            timeout_secs,
        } => Ok(Arc::new(webdriver::WebDriverFetcher::new(
            webdriver_url,
            *timeout_secs,
        ))),
    }
}
