//! Word-overlap relevance between an agent query and a description.
//!
//! similarity = common / (ln|query| + ln|text|), clamped to [0, 1], where
//! `common` counts query words (duplicates included) that occur in the text.
//! An empty side scores 0. When both sides are a single word the denominator
//! is 0, so the result is 1 on a match and 0 otherwise.

use std::collections::HashSet;

pub fn similarity(query: &str, text: &str) -> f64 {
    let query = query.to_lowercase();
    let text = text.to_lowercase();
    let query_words: Vec<&str> = query.split_whitespace().collect();
    let text_words: Vec<&str> = text.split_whitespace().collect();

    if query_words.is_empty() || text_words.is_empty() {
        return 0.0;
    }

    let vocabulary: HashSet<&str> = text_words.iter().copied().collect();
    let common = query_words
        .iter()
        .filter(|w| vocabulary.contains(*w))
        .count();

    let denominator = (query_words.len() as f64).ln() + (text_words.len() as f64).ln();
    if denominator <= 0.0 {
        return if common > 0 { 1.0 } else { 0.0 };
    }

    (common as f64 / denominator).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_strings() {
        for text in ["rust web", "a fast rust web framework", "one two three four five six"] {
            let score = similarity(text, text);
            assert!(score > 0.0 && score <= 1.0, "{} scored {}", text, score);
        }
    }

    #[test]
    fn test_empty_inputs() {
        assert_eq!(similarity("", "some text"), 0.0);
        assert_eq!(similarity("query", ""), 0.0);
        assert_eq!(similarity("   ", "   "), 0.0);
    }

    #[test]
    fn test_single_words() {
        assert_eq!(similarity("rust", "Rust"), 1.0);
        assert_eq!(similarity("rust", "go"), 0.0);
    }

    #[test]
    fn test_no_overlap() {
        assert_eq!(similarity("alpha beta", "gamma delta epsilon"), 0.0);
    }

    #[test]
    fn test_partial_overlap() {
        // 1 / (ln 2 + ln 4)
        let score = similarity("rust guide", "a guide to cooking");
        let expected = 1.0 / (2f64.ln() + 4f64.ln());
        assert!((score - expected).abs() < 1e-12);
        assert!(score < 0.5);
    }

    #[test]
    fn test_duplicate_query_words_count() {
        // 2 / (ln 2 + ln 2) clamps to 1
        assert_eq!(similarity("seo seo", "seo tools"), 1.0);
    }
}
