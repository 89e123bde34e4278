//! Rendering helpers that make content easier for agents to consume.

use crate::config::SiteConfig;
use crate::store::OptimizationData;
use crate::utils::escape_attr;
use regex::Regex;
use std::sync::LazyLock;

static PLAIN_HEADING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<h([1-6])>(.+?)</h([1-6])>").expect("heading pattern should be valid")
});

/// Path prefix under which the agent API is served
pub const API_PREFIX: &str = "/api/v1";

/// Wrap content in an Article scope and mark plain headings as headlines
pub fn add_semantic_markup(content: &str) -> String {
    let marked = PLAIN_HEADING.replace_all(content, "<h$1 itemprop=\"headline\">$2</h$1>");
    format!(
        r#"<article itemscope itemtype="http://schema.org/Article">{}</article>"#,
        marked
    )
}

/// Prefix content with an HTML comment carrying the optimization data
pub fn add_agent_metadata(content: &str, data: &OptimizationData) -> serde_json::Result<String> {
    let json = serde_json::to_string_pretty(data)?.replace("--", "- -");
    Ok(format!(
        "\n<!-- agent-optimization-meta\n{}\n-->\n{}",
        json, content
    ))
}

/// Semantic markup plus the agent metadata comment
pub fn enhance_content(content: &str, data: &OptimizationData) -> serde_json::Result<String> {
    add_agent_metadata(&add_semantic_markup(content), data)
}

/// `<meta>`/`<link>` tags advertising a document to agents
pub fn agent_meta_tags(data: &OptimizationData, site: &SiteConfig) -> String {
    let endpoint = format!("{}{}", site.base_url.trim_end_matches('/'), API_PREFIX);
    format!(
        concat!(
            "\n<!-- Agent Discovery Meta Tags -->\n",
            "<meta name=\"agent-optimization-score\" content=\"{}\" />\n",
            "<meta name=\"agent-keywords\" content=\"{}\" />\n",
            "<meta name=\"agent-description\" content=\"{}\" />\n",
            "<link rel=\"agent-api-endpoint\" href=\"{}\" />\n"
        ),
        data.optimization_score,
        escape_attr(&data.keywords),
        escape_attr(&data.agent_description),
        escape_attr(&endpoint),
    )
}

/// Append agent crawler rules to robots.txt; a non-public site is left untouched
pub fn robots_txt(existing: &str, site: &SiteConfig) -> String {
    if !site.public {
        return existing.to_string();
    }

    let mut output = existing.to_string();
    output.push_str("\n# Agent Readiness - Agent Crawler Rules\n");
    output.push_str("User-agent: *\n");
    output.push_str(&format!("Allow: {}/\n", API_PREFIX));
    output.push_str("Allow: /*.json$\n");
    output.push_str(&format!(
        "\nSitemap: {}/sitemap.xml\n",
        site.base_url.trim_end_matches('/')
    ));
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data() -> OptimizationData {
        OptimizationData {
            keywords: "rust, \"web\"".into(),
            agent_description: "A <guide>".into(),
            optimization_score: 72,
        }
    }

    fn site() -> SiteConfig {
        SiteConfig {
            base_url: "https://example.com/".into(),
            ..SiteConfig::default()
        }
    }

    #[test]
    fn test_semantic_markup() {
        let out = add_semantic_markup("<h2>Intro</h2><p>Text</p><h3 class=\"x\">Kept</h3>");
        assert_eq!(
            out,
            "<article itemscope itemtype=\"http://schema.org/Article\">\
             <h2 itemprop=\"headline\">Intro</h2><p>Text</p><h3 class=\"x\">Kept</h3></article>"
        );
    }

    #[test]
    fn test_agent_metadata_comment() {
        let out = add_agent_metadata("<p>x</p>", &data()).unwrap();
        assert!(out.starts_with("\n<!-- agent-optimization-meta\n{"));
        assert!(out.contains("\"optimization_score\": 72"));
        assert!(out.ends_with("-->\n<p>x</p>"));
    }

    #[test]
    fn test_agent_meta_tags_are_escaped() {
        let tags = agent_meta_tags(&data(), &site());
        assert!(tags.contains(r#"<meta name="agent-optimization-score" content="72" />"#));
        assert!(tags.contains(r#"content="rust, &quot;web&quot;""#));
        assert!(tags.contains(r#"content="A &lt;guide&gt;""#));
        assert!(tags.contains(r#"href="https://example.com/api/v1""#));
    }

    #[test]
    fn test_robots_txt() {
        let out = robots_txt("User-agent: *\nDisallow: /admin/\n", &site());
        assert!(out.starts_with("User-agent: *\nDisallow: /admin/\n"));
        assert!(out.contains("Allow: /api/v1/\n"));
        assert!(out.contains("Allow: /*.json$\n"));
        assert!(out.ends_with("Sitemap: https://example.com/sitemap.xml\n"));

        let private = SiteConfig {
            public: false,
            ..site()
        };
        assert_eq!(robots_txt("x", &private), "x");
    }
}
