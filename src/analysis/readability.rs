//! Flesch reading-ease estimate.
//!
//! The score is deliberately left unclamped: very simple text scores above
//! 100 and dense text can go negative.

use regex::Regex;
use std::sync::LazyLock;

static SENTENCE_END: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.!?]+").expect("sentence pattern should be valid"));

const VOWELS: &[u8] = b"aeiouy";

/// Counts and score for a block of plain text
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReadabilityStats {
    pub words: usize,
    pub sentences: usize,
    pub syllables: usize,
    pub score: f64,
}

/// Whitespace-delimited token count
pub fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Runs of sentence-ending punctuation; `"Wait..."` is one sentence
pub fn count_sentences(text: &str) -> usize {
    SENTENCE_END.find_iter(text).count()
}

/// Vowel-group heuristic over the text reduced to ASCII letters.
///
/// Non-letters are removed before counting, so vowel groups that meet across
/// a word boundary merge into one.
pub fn count_syllables(text: &str) -> usize {
    let letters: Vec<u8> = text
        .bytes()
        .map(|b| b.to_ascii_lowercase())
        .filter(u8::is_ascii_lowercase)
        .collect();

    letters
        .iter()
        .enumerate()
        .filter(|&(i, b)| VOWELS.contains(b) && (i == 0 || !VOWELS.contains(&letters[i - 1])))
        .count()
}

pub fn analyze(text: &str) -> ReadabilityStats {
    let words = count_words(text);
    let sentences = count_sentences(text);
    let syllables = count_syllables(text);

    let score = if words == 0 || sentences == 0 {
        0.0
    } else {
        206.835
            - 1.015 * (words as f64 / sentences as f64)
            - 84.6 * (syllables as f64 / words as f64)
    };

    ReadabilityStats {
        words,
        sentences,
        syllables,
        score,
    }
}

/// Readability score of plain text; 0 when there are no words or no sentences
pub fn readability(text: &str) -> f64 {
    analyze(text).score
}
