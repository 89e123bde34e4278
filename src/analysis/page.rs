//! Category scoring for a fetched page: structured data, metadata and accessibility.

use crate::parsers::PageDocument;
use crate::results::{
    AccessibilityAnalysis, AccessibilityIssue, MetadataAnalysis, MetadataBundle, PageAnalysis,
    SchemaAnalysis, SchemaRecord,
};

const POINTS_PER_SCHEMA: usize = 20;
const POINTS_PER_ISSUE: usize = 10;

/// 0 without JSON-LD, otherwise 20 per record up to 100
pub fn schema_score(count: usize) -> u8 {
    (count.saturating_mul(POINTS_PER_SCHEMA)).min(100) as u8
}

pub fn metadata_score(metadata: &MetadataBundle) -> u8 {
    let mut score = 0u32;

    if metadata.title.is_some() {
        score += 20;
    }
    if metadata.description.is_some() {
        score += 20;
    }
    if metadata.keywords.is_some() {
        score += 10;
    }
    if !metadata.og_tags.is_empty() {
        score += 25;
    }
    if !metadata.twitter_cards.is_empty() {
        score += 25;
    }

    score.min(100) as u8
}

/// 100 minus 10 per issue, floored at 0
pub fn accessibility_score(issue_count: usize) -> u8 {
    100usize.saturating_sub(issue_count.saturating_mul(POINTS_PER_ISSUE)) as u8
}

pub fn analyze_schema(records: &[SchemaRecord]) -> SchemaAnalysis {
    SchemaAnalysis {
        count: records.len(),
        types: records.iter().map(|r| r.schema_type.clone()).collect(),
        score: schema_score(records.len()),
    }
}

pub fn analyze_metadata(data: MetadataBundle) -> MetadataAnalysis {
    let score = metadata_score(&data);
    MetadataAnalysis { data, score }
}

pub fn analyze_accessibility(issues: Vec<AccessibilityIssue>) -> AccessibilityAnalysis {
    let score = accessibility_score(issues.len());
    AccessibilityAnalysis { issues, score }
}

/// Run all three category analyzers over a parsed page
pub fn analyze_page(page: &PageDocument) -> PageAnalysis {
    PageAnalysis {
        schema: analyze_schema(&page.schema_records()),
        metadata: analyze_metadata(page.metadata()),
        accessibility: analyze_accessibility(page.accessibility_issues()),
    }
}
