use crate::error::FetchError;
use crate::fetch::PageFetcher;
use async_trait::async_trait;
use fantoccini::{Client, ClientBuilder};
use std::time::Duration;
use tokio::time::timeout;
use url::Url;

/// Alternative WebDriver endpoints tried when the configured one is unreachable
const FALLBACK_WEBDRIVER_URLS: [&str; 3] = [
    "http://localhost:9515", // ChromeDriver default
    "http://localhost:4444", // Selenium / geckodriver default
    "http://127.0.0.1:4444",
];

/// Fetches pages through a browser session so client-rendered markup is scored.
///
/// Each fetch opens a new session and closes it afterwards.
pub struct WebDriverFetcher {
    webdriver_url: String,
    timeout: Duration,
}

impl WebDriverFetcher {
    pub fn new(webdriver_url: &str, timeout_secs: u64) -> Self {
        Self {
            webdriver_url: webdriver_url.to_string(),
            timeout: Duration::from_secs(timeout_secs),
        }
    }

    /// Connects to the configured WebDriver, then to the common defaults
    async fn connect(&self, url: &Url) -> Result<Client, FetchError> {
        let first_error = match ClientBuilder::native().connect(&self.webdriver_url).await {
            Ok(client) => {
                ::log::debug!("Connected to WebDriver at {}", self.webdriver_url);
                return Ok(client);
            }
            Err(e) => {
                ::log::error!(
                    "Failed to connect to WebDriver at {}: {}",
                    self.webdriver_url,
                    e
                );
                e.to_string()
            }
        };

        for fallback in FALLBACK_WEBDRIVER_URLS {
            if fallback == self.webdriver_url {
                continue;
            }
            ::log::info!("Trying fallback WebDriver URL: {}", fallback);
            if let Ok(client) = ClientBuilder::native().connect(fallback).await {
                ::log::debug!("Connected to fallback WebDriver at {}", fallback);
                return Ok(client);
            }
        }

        ::log::error!(
            "Make sure a WebDriver server is running or set the WEBDRIVER_URL environment variable"
        );
        Err(FetchError::WebDriver {
            url: url.to_string(),
            message: format!("could not connect to WebDriver: {}", first_error),
        })
    }

    async fn page_source(client: &Client, url: &Url) -> Result<String, FetchError> {
        let webdriver_error = |context: &str, e: fantoccini::error::CmdError| {
            FetchError::WebDriver {
                url: url.to_string(),
                message: format!("{}: {}", context, e),
            }
        };

        client
            .goto(url.as_str())
            .await
            .map_err(|e| webdriver_error("navigation failed", e))?;
        client
            .source()
            .await
            .map_err(|e| webdriver_error("reading page source failed", e))
    }
}

#[async_trait]
impl PageFetcher for WebDriverFetcher {
    fn name(&self) -> &'static str {
        "webdriver"
    }

    async fn fetch(&self, url: &Url) -> Result<String, FetchError> {
        let started = std::time::Instant::now();
        let client = self.connect(url).await?;

        let result = match timeout(self.timeout, Self::page_source(&client, url)).await {
            Ok(result) => result,
            Err(_) => {
                ::log::error!("Timeout rendering: {}", url);
                Err(FetchError::Timeout(url.to_string()))
            }
        };

        if let Err(e) = client.close().await {
            ::log::warn!("Failed to close WebDriver session: {}", e);
        }

        if result.is_ok() {
            ::log::debug!(
                "Rendered {} in {:.2} seconds",
                url,
                started.elapsed().as_secs_f64()
            );
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::net::TcpListener;

    #[tokio::test]
    async fn test_unreachable_webdriver_is_a_fetch_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let fetcher = WebDriverFetcher::new(&format!("http://{}", addr), 1);
        let url = Url::parse("https://example.com/").unwrap();
        // Only meaningful when no WebDriver is listening on the default ports
        if let Err(e) = fetcher.fetch(&url).await {
            assert!(matches!(
                e,
                FetchError::WebDriver { .. } | FetchError::Timeout(_)
            ));
        }
    }
}
