use crate::error::FetchError;
use crate::fetch::PageFetcher;
use crate::utils::calculate_timeout;
use async_trait::async_trait;
use url::Url;

/// Fetches pages with a plain HTTP GET
pub struct HttpFetcher {
    client: reqwest::Client,
    timeout_ms: u64,
}

impl HttpFetcher {
    pub fn new(timeout_ms: u64, user_agent: &str) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()
            .map_err(|source| FetchError::Http {
                url: String::new(),
                source,
            })?;

        Ok(Self { client, timeout_ms })
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    fn name(&self) -> &'static str {
        "http"
    }

    async fn fetch(&self, url: &Url) -> Result<String, FetchError> {
        let started = std::time::Instant::now();
        ::log::debug!("GET {}", url);

        let timeout = calculate_timeout(self.timeout_ms, url.as_str().len());
        let wrap = |source: reqwest::Error| {
            if source.is_timeout() {
                FetchError::Timeout(url.to_string())
            } else {
                FetchError::Http {
                    url: url.to_string(),
                    source,
                }
            }
        };

        let response = self
            .client
            .get(url.clone())
            .timeout(timeout)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(wrap)?;
        let body = response.text().await.map_err(wrap)?;

        ::log::debug!(
            "Fetched {} ({} bytes) in {:.2} seconds",
            url,
            body.len(),
            started.elapsed().as_secs_f64()
        );
        Ok(body)
    }
}
