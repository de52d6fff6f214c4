//! Word tokenization for the search index
//!
//! Pages are indexed by the lowercase ASCII-alphabetic words of length >= 3
//! that appear in their text content.

use std::collections::HashMap;

/// Minimum length for an indexed word
const MIN_WORD_LEN: usize = 3;

/// Iterates over the indexable words of a text
///
/// A word is a maximal run of ASCII letters of length >= 3, lowercased.
/// Everything else (digits, punctuation, non-ASCII letters) acts as a
/// separator and is never part of a token.
pub fn tokenize(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !c.is_ascii_alphabetic())
        .filter(|run| run.len() >= MIN_WORD_LEN)
        .map(|run| run.to_ascii_lowercase())
}

/// Counts word occurrences in a text
///
/// Returns a map from each indexable word to the number of times it occurs.
pub fn count_words(text: &str) -> HashMap<String, u32> {
    let mut counts = HashMap::new();
    for word in tokenize(text) {
        *counts.entry(word).or_insert(0) += 1;
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_lowercases() {
        let words: Vec<String> = tokenize("Hello WORLD").collect();
        assert_eq!(words, vec!["hello", "world"]);
    }

    #[test]
    fn test_tokenize_skips_short_words() {
        let words: Vec<String> = tokenize("a an the of it").collect();
        assert_eq!(words, vec!["the"]);
    }

    #[test]
    fn test_tokenize_splits_on_punctuation_and_digits() {
        let words: Vec<String> = tokenize("foo2bar, baz-qux!").collect();
        assert_eq!(words, vec!["foo", "bar", "baz", "qux"]);
    }

    #[test]
    fn test_tokenize_splits_on_non_ascii() {
        // "naïve" splits into "na"/"ve" (both too short); "café" keeps "caf"
        let words: Vec<String> = tokenize("naïve café").collect();
        assert_eq!(words, vec!["caf"]);
    }

    #[test]
    fn test_tokenize_empty() {
        assert_eq!(tokenize("").count(), 0);
        assert_eq!(tokenize("12 34 !!").count(), 0);
    }

    #[test]
    fn test_count_words() {
        let counts = count_words("the cat and the dog and the bird");
        assert_eq!(counts.get("the"), Some(&3));
        assert_eq!(counts.get("and"), Some(&2));
        assert_eq!(counts.get("cat"), Some(&1));
        assert_eq!(counts.get("a"), None);
    }

    #[test]
    fn test_count_words_empty_text() {
        assert!(count_words("").is_empty());
    }
}
