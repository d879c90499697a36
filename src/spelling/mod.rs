// src/spelling/mod.rs
// =============================================================================
// This module contains the README spellchecking pipeline.
//
// Submodules:
// - tokenizer: README text -> list of words
// - filter: drops words not worth checking (too short, repo name, symbols...)
// - oracle: dictionaries that answer "is this a real word?"
// - hunspell: the primary dictionary (.dic + .aff, or a plain word list)
// - custom: the developer dictionary file that learn mode appends to
// - check: runs the whole pipeline over one README
// =============================================================================

mod check;
mod custom;
mod error;
mod filter;
mod hunspell;
mod oracle;
mod tokenizer;

pub use check::Checker;
pub use custom::CustomDictionary;
pub use error::DictionaryError;
pub use filter::{
    FilterRules, SubstringCase, Verdict, WordFilter, DEFAULT_BOILERPLATE, DEFAULT_DEV_SYMBOLS,
    DEFAULT_MIN_WORD_LEN, DEFAULT_WORD_SUBS,
};
pub use hunspell::PrimaryDictionary;
pub use oracle::{unknown_to_all, ReportPolicy, SpellingOracle, WordList};
pub use tokenizer::tokenize;
