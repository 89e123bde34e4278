use crate::analysis::keywords::extract_keywords;
use crate::analysis::readability::readability;
use crate::analysis::tokenize::Tokenizer;
use crate::config::ContentConfig;
use crate::parsers::{html, text};
use crate::results::{ContentAnalysis, Suggestion, SuggestionKind};

/// Readability above this is reported as a success
pub const GOOD_READABILITY: f64 = 60.0;

/// Analyse CMS content (HTML or plain text) and build the editor suggestion list.
///
/// Suggestions are ordered: length warning, readability, keywords.
pub fn analyze_content(
    content: &str,
    config: &ContentConfig,
    tokenizer: &Tokenizer,
) -> ContentAnalysis {
    let plain = html::strip_tags(content);
    let word_count = text::word_count(&plain);
    let mut suggestions = Vec::new();

    if word_count < config.min_content_length {
        suggestions.push(Suggestion::new(
            SuggestionKind::Warning,
            format!(
                "Content length ({} words) is below the recommended minimum ({} words).",
                word_count, config.min_content_length
            ),
        ));
    }

    let readability = config.enable_readability.then(|| readability(&plain));
    if let Some(score) = readability {
        let good = score > GOOD_READABILITY;
        suggestions.push(Suggestion::new(
            if good {
                SuggestionKind::Success
            } else {
                SuggestionKind::Warning
            },
            format!(
                "Readability score: {}/100. {}",
                score.trunc() as i64,
                if good {
                    "Good job!"
                } else {
                    "Consider simplifying your content."
                }
            ),
        ));
    }

    let keywords = if config.enable_keywords {
        let keywords = extract_keywords(&plain, tokenizer, config.keyword_count);
        suggestions.push(Suggestion::new(
            SuggestionKind::Info,
            format!("Suggested keywords: {}", keywords.join(", ")),
        ));
        keywords
    } else {
        Vec::new()
    };

    ::log::debug!(
        "Content analysis: {} words, {} suggestions",
        word_count,
        suggestions.len()
    );

    ContentAnalysis {
        word_count,
        readability,
        keywords,
        suggestions,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> ContentConfig {
        ContentConfig::default()
    }

    #[test]
    fn test_short_content_warns() {
        let analysis = analyze_content(
            "<p>The cat sat. The cat ran.</p>",
            &config(),
            &Tokenizer::default(),
        );

        assert_eq!(analysis.word_count, 6);
        assert_eq!(analysis.suggestions.len(), 3);
        assert_eq!(analysis.suggestions[0].kind, SuggestionKind::Warning);
        assert_eq!(
            analysis.suggestions[0].message,
            "Content length (6 words) is below the recommended minimum (300 words)."
        );
        assert_eq!(analysis.suggestions[2].kind, SuggestionKind::Info);
        assert_eq!(analysis.suggestions[2].message, "Suggested keywords: cat, sat, ran");
        assert_eq!(analysis.keywords, vec!["cat", "sat", "ran"]);
    }

    #[test]
    fn test_readability_message() {
        let cfg = ContentConfig {
            min_content_length: 0,
            enable_keywords: false,
            ..config()
        };
        // 206.835 - 1.015*3 - 84.6*1 = 119.19
        let analysis = analyze_content("The cat sat. The dog ran.", &cfg, &Tokenizer::default());
        assert_eq!(analysis.suggestions.len(), 1);
        assert_eq!(analysis.suggestions[0].kind, SuggestionKind::Success);
        assert_eq!(analysis.suggestions[0].message, "Readability score: 119/100. Good job!");

        let empty = analyze_content("", &cfg, &Tokenizer::default());
        assert_eq!(empty.readability, Some(0.0));
        assert_eq!(empty.suggestions[0].kind, SuggestionKind::Warning);
        assert_eq!(
            empty.suggestions[0].message,
            "Readability score: 0/100. Consider simplifying your content."
        );
    }

    #[test]
    fn test_inline_markup_does_not_split_words() {
        let cfg = ContentConfig {
            min_content_length: 4,
            ..config()
        };
        let analysis = analyze_content(
            "<p>An <b>un</b>believable <em>result</em>.</p>",
            &cfg,
            &Tokenizer::default(),
        );

        assert_eq!(analysis.word_count, 3);
        assert_eq!(analysis.keywords, vec!["an", "unbelievable", "result"]);
        assert_eq!(
            analysis.suggestions[0].message,
            "Content length (3 words) is below the recommended minimum (4 words)."
        );
    }

    #[test]
    fn test_checks_can_be_disabled() {
        let cfg = ContentConfig {
            enable_readability: false,
            enable_keywords: false,
            min_content_length: 1,
            ..config()
        };
        let analysis = analyze_content("<p>Enough words here.</p>", &cfg, &Tokenizer::default());
        assert!(analysis.suggestions.is_empty());
        assert_eq!(analysis.readability, None);
        assert!(analysis.keywords.is_empty());
    }
}
