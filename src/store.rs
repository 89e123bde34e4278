//! In-memory content collection.
//!
//! Stands in for the CMS: documents carry arbitrary key/value metadata where
//! optimization data, structured data and analysis results are persisted.

use crate::analysis::keywords::top_terms;
use crate::analysis::semantic::similarity;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tokio::sync::RwLock;

pub const OPTIMIZATION_KEY: &str = "optimization_data";
pub const STRUCTURED_DATA_KEY: &str = "structured_data";
pub const ANALYSIS_KEY: &str = "content_analysis";

const TOP_KEYWORD_LIMIT: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageRef {
    pub url: String,
    #[serde(default)]
    pub width: u32,
    #[serde(default)]
    pub height: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub id: u64,

    #[serde(default = "default_post_type")]
    pub post_type: String,

    pub title: String,

    #[serde(default)]
    pub excerpt: String,

    #[serde(default)]
    pub content: String,

    #[serde(default)]
    pub author: String,

    /// ISO 8601 publication date
    #[serde(default)]
    pub published: String,

    /// ISO 8601 modification date
    #[serde(default)]
    pub modified: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<ImageRef>,

    #[serde(default)]
    pub meta: BTreeMap<String, serde_json::Value>,
}

fn default_post_type() -> String {
    "post".to_string()
}

/// Agent-facing data an editor attaches to a document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OptimizationData {
    /// Comma-separated keywords
    #[serde(default)]
    pub keywords: String,

    #[serde(default)]
    pub agent_description: String,

    #[serde(default)]
    pub optimization_score: i64,
}

impl Document {
    pub fn optimization_data(&self) -> Option<OptimizationData> {
        let value = self.meta.get(OPTIMIZATION_KEY)?;
        match serde_json::from_value(value.clone()) {
            Ok(data) => Some(data),
            Err(e) => {
                ::log::warn!("Document {} has unreadable optimization data: {}", self.id, e);
                None
            }
        }
    }

    fn matches_search(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle)
            || self.excerpt.to_lowercase().contains(needle)
            || self.content.to_lowercase().contains(needle)
    }
}

/// A page of documents from a collection query
#[derive(Debug, Clone, Serialize)]
pub struct DocumentPage {
    pub items: Vec<Document>,
    pub total: usize,
    pub pages: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct SearchHit {
    pub document: Document,
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VisibilityStats {
    pub total_documents: usize,
    pub optimized_documents: usize,
    pub average_score: Option<f64>,
    pub top_keywords: Vec<(String, usize)>,
}

#[derive(Debug, Default)]
pub struct DocumentStore {
    documents: RwLock<BTreeMap<u64, Document>>,
}

impl DocumentStore {
    pub fn new(documents: Vec<Document>) -> Self {
        Self {
            documents: RwLock::new(documents.into_iter().map(|d| (d.id, d)).collect()),
        }
    }

    /// Load documents from a JSON array file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let documents: Vec<Document> = serde_json::from_str(&contents)?;
        ::log::info!("Loaded {} documents", documents.len());
        Ok(Self::new(documents))
    }

    pub async fn len(&self) -> usize {
        self.documents.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.documents.read().await.is_empty()
    }

    pub async fn get(&self, id: u64) -> Result<Document> {
        self.documents
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| Error::NotFound(format!("document {}", id)))
    }

    /// Store one metadata value on a document
    pub async fn set_meta(&self, id: u64, key: &str, value: serde_json::Value) -> Result<()> {
        let mut documents = self.documents.write().await;
        let document = documents
            .get_mut(&id)
            .ok_or_else(|| Error::NotFound(format!("document {}", id)))?;
        document.meta.insert(key.to_string(), value);
        ::log::debug!("Updated '{}' on document {}", key, id);
        Ok(())
    }

    pub async fn set_optimization_data(&self, id: u64, data: &OptimizationData) -> Result<()> {
        self.set_meta(id, OPTIMIZATION_KEY, serde_json::to_value(data)?)
            .await
    }

    /// Documents of a post type (all types when `None`), filtered by a
    /// case-insensitive search string and paged from 1
    pub async fn query(
        &self,
        post_type: Option<&str>,
        search: Option<&str>,
        page: usize,
        per_page: usize,
    ) -> DocumentPage {
        let needle = search.map(str::to_lowercase).filter(|s| !s.is_empty());
        let documents = self.documents.read().await;
        let matching: Vec<&Document> = documents
            .values()
            .filter(|d| post_type.is_none_or(|t| d.post_type == t))
            .filter(|d| needle.as_deref().is_none_or(|n| d.matches_search(n)))
            .collect();

        let per_page = per_page.max(1);
        let total = matching.len();
        let pages = total.div_ceil(per_page);
        let items = matching
            .into_iter()
            .skip(page.saturating_sub(1).saturating_mul(per_page))
            .take(per_page)
            .cloned()
            .collect();

        DocumentPage {
            items,
            total,
            pages,
        }
    }

    /// Optimized documents whose agent description is relevant to the query,
    /// most relevant first
    pub async fn semantic_search(&self, query: &str, threshold: f64) -> Vec<SearchHit> {
        let documents = self.documents.read().await;
        let mut hits: Vec<SearchHit> = documents
            .values()
            .filter_map(|d| {
                let data = d.optimization_data()?;
                let score = similarity(query, &data.agent_description);
                (score > threshold).then(|| SearchHit {
                    document: d.clone(),
                    score,
                })
            })
            .collect();

        // Stable, so equal scores keep id order
        hits.sort_by(|a, b| b.score.total_cmp(&a.score));
        hits
    }

    /// Optimized documents containing the query text
    pub async fn keyword_search(&self, query: &str) -> Vec<Document> {
        let needle = query.to_lowercase();
        self.documents
            .read()
            .await
            .values()
            .filter(|d| d.meta.contains_key(OPTIMIZATION_KEY) && d.matches_search(&needle))
            .cloned()
            .collect()
    }

    pub async fn visibility_stats(&self) -> VisibilityStats {
        let documents = self.documents.read().await;
        let optimized: Vec<OptimizationData> = documents
            .values()
            .filter_map(Document::optimization_data)
            .collect();

        let average_score = if optimized.is_empty() {
            None
        } else {
            let sum: i64 = optimized.iter().map(|d| d.optimization_score).sum();
            Some(sum as f64 / optimized.len() as f64)
        };

        let keywords = optimized.iter().flat_map(|d| {
            d.keywords
                .split(',')
                .map(str::trim)
                .filter(|k| !k.is_empty())
                .map(str::to_string)
                .collect::<Vec<_>>()
        });

        VisibilityStats {
            total_documents: documents.len(),
            optimized_documents: optimized.len(),
            average_score,
            top_keywords: top_terms(keywords, TOP_KEYWORD_LIMIT),
        }
    }
}
