// src/spelling/tokenizer.rs
// =============================================================================
// Turns raw README text into a list of candidate words.
//
// The tokenizer is deliberately blunt: every character that is not a word
// character becomes a space, then the text is split on whitespace. URLs,
// code and contractions get chopped into pieces - the word filter deals
// with what comes out.
//
// Example:
//   "Install with `cargo install foo-bar`!"
//   -> ["Install", "with", "cargo", "install", "foo", "bar"]
// =============================================================================

use once_cell::sync::Lazy;
use regex::Regex;

// \w is Unicode-aware in the regex crate, so "café" stays one word
static NON_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\w]").unwrap());
static NON_WORD_OR_APOSTROPHE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\w']").unwrap());

// Splits text into words, keeping their original case and order
//
// Parameters:
//   text: the README body
//   keep_apostrophes: keep ' inside words ("don't" stays one token)
pub fn tokenize(text: &str, keep_apostrophes: bool) -> Vec<String> {
    let pattern = if keep_apostrophes {
        &*NON_WORD_OR_APOSTROPHE
    } else {
        &*NON_WORD
    };

    pattern
        .replace_all(text, " ")
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_punctuation_becomes_separators() {
        let words = tokenize("Install with `cargo install foo-bar`!", false);
        assert_eq!(words, vec!["Install", "with", "cargo", "install", "foo", "bar"]);
    }

    #[test]
    fn test_case_and_underscores_preserved() {
        let words = tokenize("## My_Project\n\nSee   the Docs.", false);
        assert_eq!(words, vec!["My_Project", "See", "the", "Docs"]);
    }

    #[test]
    fn test_contractions() {
        assert_eq!(tokenize("don't stop", false), vec!["don", "t", "stop"]);
        assert_eq!(tokenize("don't stop", true), vec!["don't", "stop"]);
    }

    #[test]
    fn test_urls_are_fragmented() {
        let words = tokenize("https://github.com/rust-lang", false);
        assert_eq!(words, vec!["https", "github", "com", "rust", "lang"]);
    }

    #[test]
    fn test_empty_and_symbol_only_input() {
        assert!(tokenize("", false).is_empty());
        assert!(tokenize("--- *** !!!", false).is_empty());
    }

    #[test]
    fn test_unicode_words() {
        assert_eq!(tokenize("café, naïve.", false), vec!["café", "naïve"]);
    }
}
