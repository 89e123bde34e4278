use crate::parsers::text;
use crate::results::{AccessibilityIssue, AccessibilityIssueKind, MetadataBundle, SchemaRecord};
use scraper::{ElementRef, Html, Selector};
use std::collections::BTreeMap;

fn selector(css: &'static str) -> Selector {
    Selector::parse(css).expect("static selector should parse")
}

/// Extracts visible body text, skipping script and style contents.
///
/// Inline elements join their text directly; block elements are separated by a space.
pub fn extract_text(doc: &Html) -> String {
    let body_selector = selector("body");
    let mut raw = String::new();

    for body in doc.select(&body_selector) {
        collect_text(body, &mut raw);
    }

    text::normalize_whitespace(&raw)
}

fn collect_text(element: ElementRef, out: &mut String) {
    for child in element.children() {
        if let Some(fragment) = child.value().as_text() {
            out.push_str(fragment);
            continue;
        }
        let Some(child) = ElementRef::wrap(child) else {
            continue;
        };
        let name = child.value().name();
        if matches!(name, "script" | "style" | "noscript") {
            continue;
        }

        let block = is_block(name);
        if block {
            out.push(' ');
        }
        collect_text(child, out);
        if block {
            out.push(' ');
        }
    }
}

fn is_block(name: &str) -> bool {
    matches!(
        name,
        "p" | "div"
            | "br"
            | "hr"
            | "h1"
            | "h2"
            | "h3"
            | "h4"
            | "h5"
            | "h6"
            | "ul"
            | "ol"
            | "li"
            | "dl"
            | "dt"
            | "dd"
            | "table"
            | "tr"
            | "td"
            | "th"
            | "section"
            | "article"
            | "header"
            | "footer"
            | "nav"
            | "aside"
            | "main"
            | "blockquote"
            | "pre"
            | "figure"
            | "figcaption"
            | "address"
            | "form"
    )
}

/// Strips tags from an HTML document or fragment, returning normalized text
pub fn strip_tags(html: &str) -> String {
    extract_text(&Html::parse_document(html))
}

/// Parses every `application/ld+json` script block.
///
/// Blocks that are not valid JSON are logged and skipped.
pub fn json_ld(doc: &Html) -> Vec<SchemaRecord> {
    let script_selector = selector(r#"script[type="application/ld+json"]"#);
    let mut records = Vec::new();

    for (index, element) in doc.select(&script_selector).enumerate() {
        let raw = element.text().collect::<String>();
        match serde_json::from_str::<serde_json::Value>(&raw) {
            Ok(data) => {
                let schema_type = match data.get("@type") {
                    Some(serde_json::Value::String(s)) => Some(s.clone()),
                    Some(other) if !other.is_null() => Some(other.to_string()),
                    _ => None,
                };
                records.push(SchemaRecord { schema_type, data });
            }
            Err(e) => {
                ::log::warn!("Invalid JSON-LD schema in block {}: {}", index, e);
            }
        }
    }

    ::log::debug!("Found {} valid JSON-LD blocks", records.len());
    records
}

/// Collects title, description, keywords and social tags
pub fn metadata(doc: &Html) -> MetadataBundle {
    let title = doc
        .select(&selector("title"))
        .flat_map(|e| e.text())
        .collect::<String>();

    MetadataBundle {
        title: non_empty(title.trim()),
        description: meta_content(doc, r#"meta[name="description"]"#),
        keywords: meta_content(doc, r#"meta[name="keywords"]"#),
        og_tags: prefixed_tags(doc, r#"meta[property^="og:"]"#, "property", "og:"),
        twitter_cards: prefixed_tags(doc, r#"meta[name^="twitter:"]"#, "name", "twitter:"),
    }
}

/// Images without alt text and role-bearing elements without an ARIA label, in document order
pub fn accessibility_issues(doc: &Html) -> Vec<AccessibilityIssue> {
    let mut issues = Vec::new();

    for element in doc.select(&selector("img")) {
        if is_blank(element.value().attr("alt")) {
            issues.push(AccessibilityIssue {
                kind: AccessibilityIssueKind::MissingAltText,
                element: describe(element),
            });
        }
    }

    for element in doc.select(&selector("[role]")) {
        if is_blank(element.value().attr("aria-label")) {
            issues.push(AccessibilityIssue {
                kind: AccessibilityIssueKind::MissingAriaLabel,
                element: describe(element),
            });
        }
    }

    issues
}

fn meta_content(doc: &Html, css: &'static str) -> Option<String> {
    doc.select(&selector(css))
        .next()
        .and_then(|e| e.value().attr("content"))
        .and_then(non_empty)
}

fn prefixed_tags(
    doc: &Html,
    css: &'static str,
    attr: &str,
    prefix: &str,
) -> BTreeMap<String, String> {
    doc.select(&selector(css))
        .filter_map(|e| {
            let key = e.value().attr(attr)?;
            let name = key.strip_prefix(prefix).unwrap_or(key);
            let content = e.value().attr("content").unwrap_or_default();
            Some((name.to_string(), content.to_string()))
        })
        .collect()
}

fn describe(element: ElementRef<'_>) -> String {
    let value = element.value();
    let mut out = format!("<{}", value.name());
    for attr in ["id", "role", "src"] {
        if let Some(v) = value.attr(attr) {
            out.push_str(&format!(" {}=\"{}\"", attr, v));
        }
    }
    out.push('>');
    out
}

fn is_blank(value: Option<&str>) -> bool {
    value.is_none_or(|v| v.is_empty())
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_tags() {
        let html = "<p>Hello, <b>world</b>!</p><script>var x = 1;</script><p>Bye.</p>";
        assert_eq!(strip_tags(html), "Hello, world! Bye.");
        assert_eq!(
            strip_tags("<p>An <b>un</b>believable result.</p>"),
            "An unbelievable result."
        );
        assert_eq!(strip_tags("<ul><li>one</li><li>two</li></ul>"), "one two");
        assert_eq!(strip_tags(""), "");
    }

    #[test]
    fn test_json_ld_skips_malformed_blocks() {
        let doc = Html::parse_document(
            r#"<html><head>
            <script type="application/ld+json">{"@type": "Article", "headline": "A"}</script>
            <script type="application/ld+json">{not valid</script>
            <script type="application/ld+json">{"name": "untyped"}</script>
            <script type="text/javascript">{"@type": "Ignored"}</script>
            </head><body></body></html>"#,
        );

        let records = json_ld(&doc);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].schema_type.as_deref(), Some("Article"));
        assert_eq!(records[1].schema_type, None);
    }

    #[test]
    fn test_metadata() {
        let doc = Html::parse_document(
            r#"<html><head>
            <title> Page Title </title>
            <meta name="description" content="A page">
            <meta name="keywords" content="">
            <meta property="og:title" content="OG Title">
            <meta property="og:image" content="https://example.com/a.png">
            <meta name="twitter:card" content="summary">
            </head><body></body></html>"#,
        );

        let bundle = metadata(&doc);
        assert_eq!(bundle.title.as_deref(), Some("Page Title"));
        assert_eq!(bundle.description.as_deref(), Some("A page"));
        assert_eq!(bundle.keywords, None);
        assert_eq!(bundle.og_tags.len(), 2);
        assert_eq!(bundle.og_tags["title"], "OG Title");
        assert_eq!(bundle.twitter_cards["card"], "summary");
    }

    #[test]
    fn test_accessibility_issues() {
        let doc = Html::parse_document(
            r#"<body>
            <img src="a.png">
            <img src="b.png" alt="">
            <img src="c.png" alt="A cat">
            <div role="button">Click</div>
            <nav role="navigation" aria-label="Main"></nav>
            </body>"#,
        );

        let issues = accessibility_issues(&doc);
        assert_eq!(issues.len(), 3);
        assert_eq!(issues[0].kind, AccessibilityIssueKind::MissingAltText);
        assert_eq!(issues[0].element, r#"<img src="a.png">"#);
        assert_eq!(issues[1].kind, AccessibilityIssueKind::MissingAltText);
        assert_eq!(issues[2].kind, AccessibilityIssueKind::MissingAriaLabel);
        assert_eq!(issues[2].element, r#"<div role="button">"#);
    }
}
