use crate::error::Result;
use crate::filter::UrlPolicyConfig;
use crate::routes::RouteConfig;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Top-level configuration passed into the composition root.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub analysis: ContentConfig,

    #[serde(default)]
    pub fetch: FetcherConfig,

    #[serde(default)]
    pub url_policy: UrlPolicyConfig,

    #[serde(default)]
    pub site: SiteConfig,

    #[serde(default)]
    pub server: ServerConfig,
}

/// Options controlling which content checks run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentConfig {
    /// Whether the readability check contributes a suggestion
    #[serde(default = "default_true")]
    pub enable_readability: bool,

    /// Whether keyword suggestions are produced
    #[serde(default = "default_true")]
    pub enable_keywords: bool,

    /// Minimum number of words before a length warning is raised
    #[serde(default = "default_min_content_length")]
    pub min_content_length: usize,

    /// Number of keywords to suggest
    #[serde(default = "default_keyword_count")]
    pub keyword_count: usize,

    /// Whether semantic agent search is served
    #[serde(default = "default_true")]
    pub enable_semantic_search: bool,

    /// Minimum similarity for a document to count as a search hit
    #[serde(default = "default_relevance_threshold")]
    pub relevance_threshold: f64,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            enable_readability: true,
            enable_keywords: true,
            min_content_length: default_min_content_length(),
            keyword_count: default_keyword_count(),
            enable_semantic_search: true,
            relevance_threshold: default_relevance_threshold(),
        }
    }
}

/// How pages are retrieved for scoring
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum FetcherConfig {
    /// Plain HTTP GET
    Http {
        #[serde(default = "default_timeout_ms")]
        timeout_ms: u64,

        #[serde(default = "default_user_agent")]
        user_agent: String,
    },

    /// Rendered through a WebDriver session (e.g. ChromeDriver)
    WebDriver {
        #[serde(default = "default_webdriver_url")]
        webdriver_url: String,

        #[serde(default = "default_webdriver_timeout")]
        timeout_secs: u64,
    },
}

impl Default for FetcherConfig {
    fn default() -> Self {
        FetcherConfig::Http {
            timeout_ms: default_timeout_ms(),
            user_agent: default_user_agent(),
        }
    }
}

impl FetcherConfig {
    /// WebDriver configuration with defaults, honouring `WEBDRIVER_URL`
    pub fn webdriver() -> Self {
        let mut config = FetcherConfig::WebDriver {
            webdriver_url: default_webdriver_url(),
            timeout_secs: default_webdriver_timeout(),
        };
        config.apply_env();
        config
    }

    /// Override the WebDriver URL with an environment variable if provided
    pub fn apply_env(&mut self) {
        if let FetcherConfig::WebDriver { webdriver_url, .. } = self {
            if let Ok(url) = std::env::var("WEBDRIVER_URL") {
                if !url.is_empty() {
                    *webdriver_url = url;
                }
            }
        }
    }
}

/// Site identity used when generating structured data and discovery tags
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    #[serde(default = "default_site_name")]
    pub name: String,

    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default)]
    pub logo_url: String,

    /// Whether the site is visible to crawlers
    #[serde(default = "default_true")]
    pub public: bool,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            name: default_site_name(),
            base_url: default_base_url(),
            logo_url: String::new(),
            public: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,

    /// JSON file with the documents served by collection and search routes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub documents: Option<PathBuf>,

    /// Route table; the built-in table is used when empty
    #[serde(default)]
    pub routes: Vec<RouteConfig>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            documents: None,
            routes: Vec::new(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut file = File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;

        Self::from_json(&contents)
    }

    /// Load configuration from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        let mut config: Self = serde_json::from_str(json)?;
        config.fetch.apply_env();
        Ok(config)
    }
}

fn default_true() -> bool {
    true
}

fn default_min_content_length() -> usize {
    300
}

fn default_keyword_count() -> usize {
    5
}

fn default_relevance_threshold() -> f64 {
    0.5
}

fn default_timeout_ms() -> u64 {
    10_000
}

fn default_user_agent() -> String {
    concat!("agent-readiness/", env!("CARGO_PKG_VERSION")).to_string()
}

fn default_webdriver_url() -> String {
    "http://localhost:4444".to_string()
}

fn default_webdriver_timeout() -> u64 {
    45
}

fn default_site_name() -> String {
    "My Site".to_string()
}

fn default_base_url() -> String {
    "http://localhost:5000".to_string()
}

fn default_bind() -> String {
    "127.0.0.1:5000".to_string()
}
