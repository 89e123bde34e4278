use crate::error::FetchError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use url::Url;

/// Configuration for deciding which URLs may be fetched for scoring
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UrlPolicyConfig {
    /// Regex patterns for URLs to allow (if empty, all URLs are allowed unless excluded)
    #[serde(default)]
    pub include_patterns: Vec<String>,

    /// Regex patterns for URLs to refuse (these take precedence over include patterns)
    #[serde(default = "default_exclude_patterns")]
    pub exclude_patterns: Vec<String>,
}

fn default_exclude_patterns() -> Vec<String> {
    vec![r"\.(jpg|jpeg|png|gif|css|js|ico|svg|woff|woff2|ttf|eot|pdf)$".to_string()]
}

impl Default for UrlPolicyConfig {
    fn default() -> Self {
        Self {
            include_patterns: Vec::new(),
            exclude_patterns: default_exclude_patterns(),
        }
    }
}

/// Compiled URL policy
#[derive(Debug)]
pub struct UrlPolicy {
    include_regexes: Vec<Regex>,
    exclude_regexes: Vec<Regex>,
}

impl Default for UrlPolicy {
    fn default() -> Self {
        Self::new(&UrlPolicyConfig::default()).expect("Default regex patterns should be valid")
    }
}

impl UrlPolicy {
    /// Compile a policy from configuration
    pub fn new(config: &UrlPolicyConfig) -> Result<Self, regex::Error> {
        let include_regexes = config
            .include_patterns
            .iter()
            .map(|p| Regex::new(p))
            .collect::<Result<Vec<_>, _>>()?;
        let exclude_regexes = config
            .exclude_patterns
            .iter()
            .map(|p| Regex::new(p))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            include_regexes,
            exclude_regexes,
        })
    }

    /// Parse a URL and check it against the policy, returning the URL without its fragment
    pub fn check(&self, raw: &str) -> Result<Url, FetchError> {
        let url = Url::parse(raw.trim()).map_err(|source| FetchError::InvalidUrl {
            url: raw.to_string(),
            source,
        })?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(FetchError::Rejected(format!(
                "unsupported scheme '{}' in {}",
                url.scheme(),
                url
            )));
        }

        let url_str = url.as_str();
        if self.exclude_regexes.iter().any(|r| r.is_match(url_str)) {
            ::log::debug!("URL policy excluded: {}", url_str);
            return Err(FetchError::Rejected(format!("{} matches an exclude pattern", url)));
        }

        if !self.include_regexes.is_empty()
            && !self.include_regexes.iter().any(|r| r.is_match(url_str))
        {
            ::log::debug!("URL policy found no include match: {}", url_str);
            return Err(FetchError::Rejected(format!("{} matches no include pattern", url)));
        }

        Ok(normalize_url(&url))
    }
}

/// Create a normalized version of the URL (fragments removed)
pub fn normalize_url(url: &Url) -> Url {
    let mut normalized = url.clone();
    normalized.set_fragment(None);
    normalized
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy() {
        let policy = UrlPolicy::default();

        assert!(policy.check("https://example.com/page.html").is_ok());

        // Static assets are refused
        let err = policy.check("https://example.com/image.jpg").unwrap_err();
        assert!(matches!(err, FetchError::Rejected(_)));
    }

    #[test]
    fn test_invalid_and_unsupported_urls() {
        let policy = UrlPolicy::default();

        assert!(matches!(
            policy.check("not a url").unwrap_err(),
            FetchError::InvalidUrl { .. }
        ));
        assert!(matches!(
            policy.check("ftp://example.com/file").unwrap_err(),
            FetchError::Rejected(_)
        ));
    }

    #[test]
    fn test_regex_patterns() {
        let config = UrlPolicyConfig {
            include_patterns: vec![r"^https://example\.com/".to_string()],
            exclude_patterns: vec![r"/draft/".to_string()],
        };
        let policy = UrlPolicy::new(&config).unwrap();

        assert!(policy.check("https://example.com/docs").is_ok());
        assert!(policy.check("https://other.com/docs").is_err());
        // Exclusion wins even when the include pattern matches
        assert!(policy.check("https://example.com/draft/page").is_err());
    }

    #[test]
    fn test_fragment_is_removed() {
        let policy = UrlPolicy::default();
        let url = policy.check("https://example.com/page#section").unwrap();
        assert_eq!(url.as_str(), "https://example.com/page");
    }

    #[test]
    fn test_bad_pattern_is_an_error() {
        let config = UrlPolicyConfig {
            include_patterns: vec!["(".to_string()],
            exclude_patterns: vec![],
        };
        assert!(UrlPolicy::new(&config).is_err());
    }
}
