//! Content and page analyzers.
//!
//! Every function here is pure: text or HTML in, scores and suggestions out.

pub mod content;
pub mod enhance;
pub mod keywords;
pub mod page;
pub mod readability;
pub mod score;
pub mod semantic;
pub mod structured_data;
pub mod tokenize;


use crate::parsers::PageDocument;
use crate::results::WebsiteAnalysis;

/// Score a page: category analysis, weighted aggregate and recommendations
pub fn analyze_html(url: Option<&str>, html: &str) -> WebsiteAnalysis {
    let page = PageDocument::parse(html);
    let analysis = page::analyze_page(&page);
    let scores = analysis.scores();

    let result = WebsiteAnalysis {
        url: url.map(str::to_string),
        score: score::overall_score(&scores),
        recommendations: score::recommendations(&scores),
        analysis,
    };

    ::log::debug!(
        "Scored {}: overall {} (schema {}, metadata {}, accessibility {})",
        url.unwrap_or("<inline html>"),
        result.score,
        scores.schema,
        scores.metadata,
        scores.accessibility
    );

    result
}
