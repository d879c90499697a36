// src/spelling/oracle.rs
// =============================================================================
// The dictionary side of the spellchecker.
//
// Anything that can answer "do you know this word?" implements the
// SpellingOracle trait. The session never cares where the answer comes from,
// so tests can hand it a WordList built from a few strings while the real
// binary loads a Hunspell .dic/.aff pair (see hunspell.rs).
//
// Rust concepts:
// - Traits: A shared interface (like an interface in Java/TypeScript)
// - Trait objects (&dyn Trait): Pick the implementation at runtime
// =============================================================================

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::DictionaryError;

// Suggestions further away than this are not worth offering
const MAX_SUGGESTION_DISTANCE: usize = 2;
const MAX_SUGGESTIONS: usize = 8;

pub trait SpellingOracle {
    /// Is this word in the dictionary?
    fn known(&self, word: &str) -> bool;

    /// Likely corrections, best first. Empty when there are none.
    fn suggestions(&self, _word: &str) -> Vec<String> {
        Vec::new()
    }
}

/// When does an unknown word count as misspelled?
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReportPolicy {
    /// Unknown to the primary AND the developer dictionary
    #[default]
    UnknownToAll,
    /// Unknown to the primary dictionary, which still has a suggestion for it.
    /// Words with no suggestions at all (usually names) are let through.
    NeedsSuggestion,
}

impl ReportPolicy {
    pub fn should_report(
        &self,
        word: &str,
        primary: &dyn SpellingOracle,
        developer: &dyn SpellingOracle,
    ) -> bool {
        match self {
            ReportPolicy::UnknownToAll => unknown_to_all(word, primary, developer),
            ReportPolicy::NeedsSuggestion => {
                !primary.known(word) && primary.suggestions(word).iter().any(|s| !s.is_empty())
            }
        }
    }
}

/// True when neither dictionary knows the word
pub fn unknown_to_all(
    word: &str,
    primary: &dyn SpellingOracle,
    developer: &dyn SpellingOracle,
) -> bool {
    !primary.known(word) && !developer.known(word)
}

/// An in-memory set of words.
///
/// Lookups are case-insensitive. Loaded from either a Hunspell `.dic` file
/// (count line, then `word/FLAGS` entries) or a plain word-per-line list.
#[derive(Debug, Clone, Default)]
pub struct WordList {
    words: HashSet<String>,
}

impl WordList {
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            words: words
                .into_iter()
                .map(|w| w.as_ref().trim().to_lowercase())
                .filter(|w| !w.is_empty())
                .collect(),
        }
    }

    // Parses dictionary file contents
    //
    // A leading line that is only a number is the Hunspell word count and is
    // skipped. Affix flags after '/' are dropped: "walk/DSG" -> "walk".
    pub fn parse(contents: &str) -> Self {
        let mut lines = contents.lines().peekable();

        if let Some(first) = lines.peek() {
            let first = first.trim();
            if !first.is_empty() && first.chars().all(|c| c.is_ascii_digit()) {
                lines.next();
            }
        }

        Self::from_words(lines.map(entry_stem))
    }

    pub fn load(path: &Path) -> Result<Self, DictionaryError> {
        let contents = fs::read_to_string(path).map_err(|source| DictionaryError::Io {
            operation: "read",
            path: path.to_path_buf(),
            source,
        })?;

        let list = Self::parse(&contents);
        debug!(path = %path.display(), words = list.len(), "dictionary loaded");
        Ok(list)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl SpellingOracle for WordList {
    fn known(&self, word: &str) -> bool {
        self.words.contains(&word.to_lowercase())
    }

    fn suggestions(&self, word: &str) -> Vec<String> {
        let word = word.to_lowercase();
        let len = word.chars().count();

        let mut scored: Vec<(usize, &String)> = self
            .words
            .iter()
            .filter(|candidate| candidate.chars().count().abs_diff(len) <= MAX_SUGGESTION_DISTANCE)
            .map(|candidate| (levenshtein_distance(&word, candidate), candidate))
            .filter(|(distance, _)| *distance > 0 && *distance <= MAX_SUGGESTION_DISTANCE)
            .collect();

        scored.sort();
        scored
            .into_iter()
            .take(MAX_SUGGESTIONS)
            .map(|(_, candidate)| candidate.clone())
            .collect()
    }
}

// "walk/DSG # comment" -> "walk"
pub(crate) fn entry_stem(line: &str) -> &str {
    line.split(&['/', '\t', '#'][..])
        .next()
        .unwrap_or("")
        .trim()
}

/// Edit distance between two words, counted in characters
fn levenshtein_distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    let mut previous: Vec<usize> = (0..=b.len()).collect();
    let mut current = vec![0; b.len() + 1];

    for (i, ca) in a.iter().enumerate() {
        current[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let cost = if ca == cb { 0 } else { 1 };
            current[j + 1] = (previous[j + 1] + 1) // deletion
                .min(current[j] + 1) // insertion
                .min(previous[j] + cost); // substitution
        }
        std::mem::swap(&mut previous, &mut current);
    }

    previous[b.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hunspell_dic() {
        let list = WordList::parse("3\nwalk/DSG\nHello\ncafé/M\n");
        assert_eq!(list.len(), 3);
        assert!(list.known("walk"));
        assert!(list.known("hello"));
        assert!(list.known("Café"));
        assert!(!list.known("3"));
    }

    #[test]
    fn test_parse_plain_word_list() {
        let list = WordList::parse("apple\nbanana\n\n");
        assert_eq!(list.len(), 2);
        assert!(list.known("banana"));
    }

    #[test]
    fn test_suggestions_closest_first() {
        let list = WordList::from_words(["spelling", "spewing", "selling", "unrelated"]);
        let suggestions = list.suggestions("speling");
        assert_eq!(suggestions[0], "spelling");
        assert!(suggestions.contains(&"selling".to_string()));
        assert!(!suggestions.contains(&"unrelated".to_string()));
    }

    #[test]
    fn test_no_suggestions_for_far_words() {
        let list = WordList::from_words(["apple", "banana"]);
        assert!(list.suggestions("zxqvw").is_empty());
    }

    #[test]
    fn test_levenshtein() {
        assert_eq!(levenshtein_distance("kitten", "sitting"), 3);
        assert_eq!(levenshtein_distance("", "abc"), 3);
        assert_eq!(levenshtein_distance("café", "cafe"), 1);
    }

    #[test]
    fn test_unknown_to_all_policy() {
        let primary = WordList::from_words(["hello"]);
        let developer = WordList::from_words(["rustc"]);
        let policy = ReportPolicy::UnknownToAll;

        assert!(!policy.should_report("hello", &primary, &developer));
        assert!(!policy.should_report("rustc", &primary, &developer));
        assert!(policy.should_report("helo", &primary, &developer));
    }

    #[test]
    fn test_needs_suggestion_policy() {
        let primary = WordList::from_words(["hello"]);
        let developer = WordList::default();
        let policy = ReportPolicy::NeedsSuggestion;

        // close to "hello": reported
        assert!(policy.should_report("helo", &primary, &developer));
        // nothing close: treated as a name, not reported
        assert!(!policy.should_report("kubernetes", &primary, &developer));
        assert!(!policy.should_report("hello", &primary, &developer));
    }
}
