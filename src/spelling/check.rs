// src/spelling/check.rs
// =============================================================================
// Ties the pipeline together: tokenize -> filter -> ask the dictionaries.
//
// Example:
//   README "Teh quick browm fox", repo "fox", primary knows "quick"
//   -> misspelled = ["browm"]   ("teh" and "fox" are too short)
// =============================================================================

use super::{
    tokenize, unknown_to_all, FilterRules, ReportPolicy, SpellingOracle, Verdict, WordFilter,
};

/// Everything that decides which words get reported
#[derive(Debug, Clone, Copy)]
pub struct Checker<'a> {
    pub rules: &'a FilterRules,
    pub keep_apostrophes: bool,
    pub policy: ReportPolicy,
}

impl<'a> Checker<'a> {
    /// Misspelled words in README order, each at most once
    pub fn misspelled(
        &self,
        text: &str,
        repo_name: &str,
        primary: &dyn SpellingOracle,
        developer: &dyn SpellingOracle,
    ) -> Vec<String> {
        self.collect(text, repo_name, |word| {
            self.policy.should_report(word, primary, developer)
        })
    }

    /// Words learn mode should offer: unknown to both dictionaries, each once
    pub fn learn_candidates(
        &self,
        text: &str,
        repo_name: &str,
        primary: &dyn SpellingOracle,
        developer: &dyn SpellingOracle,
    ) -> Vec<String> {
        self.collect(text, repo_name, |word| unknown_to_all(word, primary, developer))
    }

    fn collect(&self, text: &str, repo_name: &str, report: impl Fn(&str) -> bool) -> Vec<String> {
        let mut filter = WordFilter::new(self.rules, repo_name);
        let mut words = Vec::new();

        for token in tokenize(text, self.keep_apostrophes) {
            if let Verdict::Checkable(word) = filter.classify(&token) {
                if report(&word) {
                    filter.mark_reported(&word);
                    words.push(word);
                }
            }
        }

        words
    }
}
