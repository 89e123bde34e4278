use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A page captured for analysis
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisInput {
    /// URL the HTML was fetched from (if any)
    pub url: Option<String>,

    /// Raw HTML
    pub html: String,
}

impl AnalysisInput {
    pub fn new(url: Option<String>, html: String) -> Self {
        Self { url, html }
    }
}

/// Title, description and social tags found in a page head
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetadataBundle {
    pub title: Option<String>,
    pub description: Option<String>,
    pub keywords: Option<String>,

    /// Open Graph properties with the `og:` prefix removed
    pub og_tags: BTreeMap<String, String>,

    /// Twitter Card properties with the `twitter:` prefix removed
    pub twitter_cards: BTreeMap<String, String>,
}

/// One parsed JSON-LD block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaRecord {
    /// The record's `@type`, when it has one
    pub schema_type: Option<String>,

    pub data: serde_json::Value,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessibilityIssueKind {
    MissingAltText,
    MissingAriaLabel,
}

impl AccessibilityIssueKind {
    pub fn message(&self) -> &'static str {
        match self {
            AccessibilityIssueKind::MissingAltText => "Missing alt text for image",
            AccessibilityIssueKind::MissingAriaLabel => {
                "Missing ARIA label for interactive element"
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessibilityIssue {
    pub kind: AccessibilityIssueKind,

    /// Short description of the offending element, e.g. `<img src="a.png">`
    pub element: String,
}

/// Per-category scores, each within 0..=100
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryScores {
    pub schema: u8,
    pub metadata: u8,
    pub accessibility: u8,
}

/// The web-scoring contract: an overall score plus recommendations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub score: u8,
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemaAnalysis {
    pub count: usize,
    pub types: Vec<Option<String>>,
    pub score: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetadataAnalysis {
    pub data: MetadataBundle,
    pub score: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessibilityAnalysis {
    pub issues: Vec<AccessibilityIssue>,
    pub score: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageAnalysis {
    pub schema: SchemaAnalysis,
    pub metadata: MetadataAnalysis,
    pub accessibility: AccessibilityAnalysis,
}

impl PageAnalysis {
    pub fn scores(&self) -> CategoryScores {
        CategoryScores {
            schema: self.schema.score,
            metadata: self.metadata.score,
            accessibility: self.accessibility.score,
        }
    }
}

/// Full report for a scored web page
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebsiteAnalysis {
    pub url: Option<String>,
    pub score: u8,
    pub analysis: PageAnalysis,
    pub recommendations: Vec<String>,
}

impl WebsiteAnalysis {
    /// Reduce the report to the `{score, recommendations}` contract
    pub fn result(&self) -> AnalysisResult {
        AnalysisResult {
            score: self.score,
            recommendations: self.recommendations.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionKind {
    Warning,
    Success,
    Info,
}

/// A content-editing hint from the CMS path
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    #[serde(rename = "type")]
    pub kind: SuggestionKind,
    pub message: String,
}

impl Suggestion {
    pub fn new(kind: SuggestionKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Result of analysing a piece of CMS content
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentAnalysis {
    pub word_count: usize,

    /// Present only when the readability check is enabled
    #[serde(skip_serializing_if = "Option::is_none")]
    pub readability: Option<f64>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub keywords: Vec<String>,

    pub suggestions: Vec<Suggestion>,
}
