use thiserror::Error;

/// Errors raised while retrieving a page for analysis.
///
/// A fetch is attempted exactly once; any failure surfaces as one of these.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("URL rejected by policy: {0}")]
    Rejected(String),

    #[error("HTTP request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("WebDriver error for {url}: {message}")]
    WebDriver { url: String, message: String },

    #[error("timed out fetching {0}")]
    Timeout(String),
}

/// Crate-wide error type.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Failed to analyze website: {0}")]
    Fetch(#[from] FetchError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid configuration: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid URL pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("invalid route table: {0}")]
    Routes(String),

    #[error("{0} not found")]
    NotFound(String),
}

pub type Result<T> = std::result::Result<T, Error>;
