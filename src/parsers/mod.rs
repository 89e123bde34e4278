pub mod html;
pub mod text;

use crate::results::{AccessibilityIssue, MetadataBundle, SchemaRecord};
use scraper::Html;

/// A parsed HTML page and the raw facts the analyzers score
pub struct PageDocument {
    doc: Html,
}

impl PageDocument {
    /// Parse an HTML document
    pub fn parse(html: &str) -> Self {
        Self {
            doc: Html::parse_document(html),
        }
    }

    /// Visible text content
    pub fn text(&self) -> String {
        html::extract_text(&self.doc)
    }

    /// Valid JSON-LD records
    pub fn schema_records(&self) -> Vec<SchemaRecord> {
        html::json_ld(&self.doc)
    }

    pub fn metadata(&self) -> MetadataBundle {
        html::metadata(&self.doc)
    }

    pub fn accessibility_issues(&self) -> Vec<AccessibilityIssue> {
        html::accessibility_issues(&self.doc)
    }
}
