// src/spelling/filter.rs
// =============================================================================
// Decides which tokens are worth asking the dictionary about.
//
// Each token is lowercased and then goes through four checks, in order:
//   1. too short?                      -> ignore
//   2. equal to the repository name?   -> ignore
//   3. blacklisted symbol / substring / boilerplate word? -> ignore
//   4. already reported for this repo? -> ignore
// Whatever survives is "checkable".
//
// A WordFilter is created per repository, so the "already reported" set
// never leaks from one repository into the next.
// =============================================================================

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

pub const DEFAULT_MIN_WORD_LEN: usize = 4;

pub const DEFAULT_DEV_SYMBOLS: [&str; 9] = ["::", ".", "--", "#", "=>", "`", "_", "&", "*"];

pub const DEFAULT_WORD_SUBS: [&str; 3] = ["Controller", "Exception", "Action"];

pub const DEFAULT_BOILERPLATE: [&str; 15] = [
    "git", "github", "rubygems", "html", "http", "https", "www", "readme", "json", "yaml",
    "config", "todo", "usage", "install", "license",
];

/// Which form of the token the substring blacklist is compared against.
///
/// `Lowered` compares the blacklist entries as written against the
/// lowercased token, so capitalized entries like `Controller` never match.
/// `Original` matches `Controller` in `UsersController`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SubstringCase {
    #[default]
    Lowered,
    Original,
}

/// The ignore lists and thresholds used by every WordFilter
#[derive(Debug, Clone)]
pub struct FilterRules {
    /// `None` disables the length floor
    pub min_word_len: Option<usize>,
    pub dev_symbols: Vec<String>,
    pub word_subs: Vec<String>,
    pub boilerplate: HashSet<String>,
    pub substring_case: SubstringCase,
}

impl Default for FilterRules {
    fn default() -> Self {
        Self {
            min_word_len: Some(DEFAULT_MIN_WORD_LEN),
            dev_symbols: DEFAULT_DEV_SYMBOLS.iter().map(|s| s.to_string()).collect(),
            word_subs: DEFAULT_WORD_SUBS.iter().map(|s| s.to_string()).collect(),
            boilerplate: DEFAULT_BOILERPLATE.iter().map(|s| s.to_string()).collect(),
            substring_case: SubstringCase::default(),
        }
    }
}

/// Why a token was (or wasn't) let through
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    TooShort,
    RepoName,
    Blacklisted,
    AlreadyReported,
    /// Holds the lowercased word to look up
    Checkable(String),
}

pub struct WordFilter<'a> {
    rules: &'a FilterRules,
    repo_name: String,
    reported: HashSet<String>,
}

impl<'a> WordFilter<'a> {
    pub fn new(rules: &'a FilterRules, repo_name: &str) -> Self {
        Self {
            rules,
            repo_name: repo_name.to_lowercase(),
            reported: HashSet::new(),
        }
    }

    pub fn classify(&self, token: &str) -> Verdict {
        let word = token.to_lowercase();

        if let Some(min) = self.rules.min_word_len {
            if word.chars().count() < min {
                return Verdict::TooShort;
            }
        }

        if word == self.repo_name {
            return Verdict::RepoName;
        }

        if self.is_blacklisted(token, &word) {
            return Verdict::Blacklisted;
        }

        if self.reported.contains(&word) {
            return Verdict::AlreadyReported;
        }

        Verdict::Checkable(word)
    }

    /// Records a word as reported so later occurrences are skipped
    pub fn mark_reported(&mut self, word: &str) {
        self.reported.insert(word.to_lowercase());
    }

    fn is_blacklisted(&self, token: &str, word: &str) -> bool {
        if self.rules.dev_symbols.iter().any(|s| word.contains(s.as_str())) {
            return true;
        }

        let haystack = match self.rules.substring_case {
            SubstringCase::Original => token,
            SubstringCase::Lowered => word,
        };
        if self.rules.word_subs.iter().any(|s| haystack.contains(s.as_str())) {
            return true;
        }

        self.rules.boilerplate.contains(word)
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What is WordFilter<'a>?
//    - 'a is a lifetime: the filter borrows the FilterRules instead of
//      copying them, and must not outlive them
//
// 2. Why return a Verdict enum instead of a bool?
//    - Tests (and debug logs) can see WHY a token was dropped
//    - Checkable carries the lowercased word, so callers don't redo it
// -----------------------------------------------------------------------------
