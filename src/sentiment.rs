//! Mock sentiment feed
//!
//! The dashboard renders a word cloud over simulated rider posts; drawing
//! the image belongs to the presentation layer, the token counting happens
//! here. Real-time sentiment would need an X API feed, which this core
//! deliberately does not have.

use std::collections::HashMap;

/// Simulated X posts about the rail service
pub const MOCK_POSTS: [&str; 4] = [
    "Deutsche Bahn delayed again, terrible service",
    "ICE train was on time, great experience",
    "DB needs better punctuality, frustrating",
    "Love the new trains, but delays ruin it",
];

/// Token frequency table feeding the word cloud.
///
/// Tokens are lowercased and split on non-alphanumeric characters;
/// one-character tokens are dropped. Sorted by count descending, ties
/// alphabetical, so repeated renders see one canonical order.
#[must_use]
pub fn word_frequencies(posts: &[&str]) -> Vec<(String, usize)> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for post in posts {
        for token in post.to_lowercase().split(|c: char| !c.is_alphanumeric()) {
            if token.chars().count() > 1 {
                *counts.entry(token.to_string()).or_insert(0) += 1;
            }
        }
    }

    let mut rows: Vec<(String, usize)> = counts.into_iter().collect();
    rows.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_repeated_tokens_case_insensitively() {
        let rows = word_frequencies(&["delay delay Delay!", "ok ok"]);
        assert_eq!(
            rows,
            vec![("delay".to_string(), 3), ("ok".to_string(), 2)]
        );
    }

    #[test]
    fn test_drops_one_character_tokens() {
        let rows = word_frequencies(&["I a x yz"]);
        assert_eq!(rows, vec![("yz".to_string(), 1)]);
    }

    #[test]
    fn test_ties_sort_alphabetically() {
        let rows = word_frequencies(&["bb aa", "aa bb"]);
        assert_eq!(
            rows,
            vec![("aa".to_string(), 2), ("bb".to_string(), 2)]
        );
    }

    #[test]
    fn test_empty_input() {
        assert!(word_frequencies(&[]).is_empty());
    }

    #[test]
    fn test_mock_posts_tokenize_cleanly() {
        let rows = word_frequencies(&MOCK_POSTS);
        assert!(rows.iter().any(|(token, _)| token == "punctuality"));
        assert!(rows.iter().any(|(token, _)| token == "delayed"));
        // Punctuation never leaks into tokens
        assert!(rows
            .iter()
            .all(|(token, _)| token.chars().all(char::is_alphanumeric)));
    }
}
