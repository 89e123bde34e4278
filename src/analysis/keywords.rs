use crate::analysis::tokenize::Tokenizer;
use std::collections::HashMap;

pub const DEFAULT_KEYWORD_COUNT: usize = 5;

/// Term frequencies in first-occurrence order
pub fn frequencies<I>(terms: I) -> Vec<(String, usize)>
where
    I: IntoIterator<Item = String>,
{
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut counts: Vec<(String, usize)> = Vec::new();

    for term in terms {
        match index.get(&term) {
            Some(&slot) => counts[slot].1 += 1,
            None => {
                index.insert(term.clone(), counts.len());
                counts.push((term, 1));
            }
        }
    }

    counts
}

/// Top `limit` terms by descending frequency; ties keep first-occurrence order
pub fn top_terms<I>(terms: I, limit: usize) -> Vec<(String, usize)>
where
    I: IntoIterator<Item = String>,
{
    let mut counts = frequencies(terms);
    // sort_by is stable
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts.truncate(limit);
    counts
}

/// Most frequent non-stopword tokens of `text`
pub fn extract_keywords(text: &str, tokenizer: &Tokenizer, limit: usize) -> Vec<String> {
    top_terms(tokenizer.tokens(text), limit)
        .into_iter()
        .map(|(term, _)| term)
        .collect()
}
