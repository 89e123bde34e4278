use crate::parsers::text;
use std::collections::HashSet;

/// Common English words ignored when ranking keywords
pub const DEFAULT_STOPWORDS: [&str; 20] = [
    "the", "be", "to", "of", "and", "a", "in", "that", "have", "i", "it", "for", "not", "on",
    "with", "he", "as", "you", "do", "at",
];

/// Splits text into lowercase words and drops stopwords
#[derive(Debug, Clone)]
pub struct Tokenizer {
    stopwords: HashSet<String>,
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::with_stopwords(DEFAULT_STOPWORDS)
    }
}

impl Tokenizer {
    /// Create a tokenizer with a custom stopword set
    pub fn with_stopwords<I, S>(stopwords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            stopwords: stopwords
                .into_iter()
                .map(|s| s.as_ref().to_lowercase())
                .collect(),
        }
    }

    pub fn is_stopword(&self, word: &str) -> bool {
        self.stopwords.contains(word)
    }

    /// Lazily yields lowercase, punctuation-free, non-stopword tokens
    pub fn tokens<'a>(&'a self, input: &'a str) -> impl Iterator<Item = String> + 'a {
        text::words(input)
            .map(str::to_lowercase)
            .filter(move |w| !self.is_stopword(w))
    }
}
