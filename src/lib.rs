pub mod analysis;
pub mod config;
pub mod error;
pub mod fetch;
pub mod filter;
pub mod parsers;
pub mod results;
pub mod routes;
pub mod server;
pub mod store;
pub mod utils;

// Re-export commonly used types for convenience
pub use config::AppConfig;
pub use error::{Error, FetchError, Result};
pub use results::{AnalysisInput, AnalysisResult, ContentAnalysis, WebsiteAnalysis};

use analysis::tokenize::Tokenizer;
use config::ContentConfig;
use fetch::PageFetcher;
use filter::UrlPolicy;
use std::sync::Arc;

/// Composition root: owns one instance of each analyzer collaborator.
///
/// Build it once and share it (e.g. behind an `Arc`) with the CLI or server.
pub struct Analyzer {
    config: ContentConfig,
    tokenizer: Tokenizer,
    fetcher: Arc<dyn PageFetcher>,
    policy: UrlPolicy,
}

impl Analyzer {
    /// Create an analyzer with default content options around the given fetcher
    pub fn new(fetcher: Arc<dyn PageFetcher>) -> Self {
        Self {
            config: ContentConfig::default(),
            tokenizer: Tokenizer::default(),
            fetcher,
            policy: UrlPolicy::default(),
        }
    }

    /// Build every collaborator from configuration
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let fetcher = fetch::from_config(&config.fetch)?;
        let policy = UrlPolicy::new(&config.url_policy)?;

        Ok(Self::new(fetcher)
            .with_content_config(config.analysis.clone())
            .with_url_policy(policy))
    }

    pub fn with_content_config(mut self, config: ContentConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_tokenizer(mut self, tokenizer: Tokenizer) -> Self {
        self.tokenizer = tokenizer;
        self
    }

    pub fn with_url_policy(mut self, policy: UrlPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn content_config(&self) -> &ContentConfig {
        &self.config
    }

    /// Score already-captured HTML
    pub fn analyze_html(&self, input: &AnalysisInput) -> WebsiteAnalysis {
        analysis::analyze_html(input.url.as_deref(), &input.html)
    }

    /// Fetch a URL once and score it
    pub async fn score_url(&self, url: &str) -> Result<WebsiteAnalysis> {
        let url = self.policy.check(url)?;
        ::log::info!("Scoring {} via {} fetcher", url, self.fetcher.name());

        let html = self.fetcher.fetch(&url).await.inspect_err(|e| {
            ::log::error!("Fetch failed for {}: {}", url, e);
        })?;
        let input = AnalysisInput::new(Some(url.to_string()), html);
        let result = self.analyze_html(&input);

        ::log::info!("Scored {}: {}", url, result.score);
        Ok(result)
    }

    /// CMS-side suggestions for a piece of content
    pub fn analyze_content(&self, content: &str) -> ContentAnalysis {
        analysis::content::analyze_content(content, &self.config, &self.tokenizer)
    }

    /// Top keywords of plain text, per the configured keyword count
    pub fn extract_keywords(&self, text: &str) -> Vec<String> {
        analysis::keywords::extract_keywords(text, &self.tokenizer, self.config.keyword_count)
    }

    /// Readability of plain text
    pub fn readability(&self, text: &str) -> f64 {
        analysis::readability::readability(text)
    }

    /// Word-overlap relevance of `text` to `query`
    pub fn similarity(&self, query: &str, text: &str) -> f64 {
        analysis::semantic::similarity(query, text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fetch::testing::StaticFetcher;

    const PAGE: &str = r#"<html><head><title>T</title>
        <meta name="description" content="D">
        <meta property="og:title" content="T"></head>
        <body><p>Hello</p></body></html>"#;

    fn analyzer() -> Analyzer {
        Analyzer::new(Arc::new(
            StaticFetcher::default().with_page("https://example.com/", PAGE),
        ))
    }

    #[tokio::test]
    async fn test_score_url() {
        let result = analyzer().score_url("https://example.com/").await.unwrap();
        assert_eq!(result.score, 46);
        assert_eq!(result.url.as_deref(), Some("https://example.com/"));
        assert_eq!(result.result().recommendations.len(), 1);
    }

    #[tokio::test]
    async fn test_score_url_errors_are_wrapped() {
        let err = analyzer()
            .score_url("https://example.com/missing")
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Fetch(FetchError::WebDriver { .. })));
        assert!(err.to_string().starts_with("Failed to analyze website:"));

        let err = analyzer().score_url("not a url").await.unwrap_err();
        assert!(matches!(err, Error::Fetch(FetchError::InvalidUrl { .. })));

        let err = analyzer()
            .score_url("https://example.com/logo.png")
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Fetch(FetchError::Rejected(_))));
    }

    #[test]
    fn test_configured_keyword_count() {
        let analyzer = analyzer().with_content_config(ContentConfig {
            keyword_count: 2,
            ..ContentConfig::default()
        });
        assert_eq!(
            analyzer.extract_keywords("alpha beta gamma alpha"),
            vec!["alpha", "beta"]
        );
    }

    #[test]
    fn test_custom_tokenizer() {
        let analyzer = analyzer().with_tokenizer(Tokenizer::with_stopwords(["alpha"]));
        assert_eq!(
            analyzer.extract_keywords("alpha beta gamma alpha"),
            vec!["beta", "gamma"]
        );
    }

    #[test]
    fn test_from_config() {
        let config =
            AppConfig::from_json(r#"{"url_policy": {"include_patterns": ["("]}}"#).unwrap();
        assert!(matches!(Analyzer::from_config(&config), Err(Error::Pattern(_))));
        assert!(Analyzer::from_config(&AppConfig::default()).is_ok());
    }
}
