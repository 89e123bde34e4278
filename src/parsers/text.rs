/// Collapse all runs of whitespace into single spaces and trim the ends
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Splits text into words: runs of letters, apostrophes and hyphens.
///
/// Digits and punctuation separate words; apostrophes and hyphens at the edge
/// of a word are dropped, so `'quoted'` yields `quoted`.
pub fn words(text: &str) -> impl Iterator<Item = &str> + '_ {
    text.split(|c: char| !is_word_char(c))
        .map(|w| w.trim_matches(|c| c == '\'' || c == '-'))
        .filter(|w| !w.is_empty())
}

/// Number of words as defined by [`words`]
pub fn word_count(text: &str) -> usize {
    words(text).count()
}

fn is_word_char(c: char) -> bool {
    c.is_alphabetic() || c == '\'' || c == '-'
}
