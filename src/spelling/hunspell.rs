// src/spelling/hunspell.rs
// =============================================================================
// The primary dictionary.
//
// A Hunspell dictionary is two files side by side:
//   en_US.dic  - stems with affix flags   ("walk/DSG")
//   en_US.aff  - what each flag means     (S -> +s, D -> +ed, G -> +ing)
// Only the pair knows that "walks", "walked" and "walking" are words, so when
// the .aff file is there we hand both to spellbook. A bare word list (or a
// .dic with no .aff next to it) falls back to a plain WordList.
//
// Example:
//   dictionary = "/usr/share/hunspell/en_US.dic"  -> Hunspell (en_US.aff found)
//   dictionary = "/usr/share/dict/words"          -> WordList
// =============================================================================

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use super::{DictionaryError, SpellingOracle, WordList};

const MAX_SUGGESTIONS: usize = 8;

/// A `.dic`/`.aff` pair checked by a Hunspell-compatible engine.
pub struct HunspellDictionary {
    dictionary: spellbook::Dictionary,
    entries: usize,
}

impl HunspellDictionary {
    /// Builds the dictionary from the contents of the two files
    pub fn parse(aff: &str, dic: &str, path: &Path) -> Result<Self, DictionaryError> {
        let dictionary =
            spellbook::Dictionary::new(aff, dic).map_err(|e| DictionaryError::Affix {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;

        // first line is the approximate count, the rest are stems
        let entries = dic
            .lines()
            .skip(1)
            .filter(|line| !line.trim().is_empty())
            .count();

        Ok(Self {
            dictionary,
            entries,
        })
    }

    pub fn load(dic_path: &Path, aff_path: &Path) -> Result<Self, DictionaryError> {
        let aff = read(aff_path)?;
        let dic = read(dic_path)?;
        let dictionary = Self::parse(&aff, &dic, dic_path)?;

        debug!(
            path = %dic_path.display(),
            affixes = %aff_path.display(),
            stems = dictionary.entries,
            "hunspell dictionary loaded"
        );
        Ok(dictionary)
    }

    /// Number of stems in the .dic file (before affix expansion)
    pub fn len(&self) -> usize {
        self.entries
    }
}

impl fmt::Debug for HunspellDictionary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HunspellDictionary")
            .field("entries", &self.entries)
            .finish_non_exhaustive()
    }
}

impl SpellingOracle for HunspellDictionary {
    fn known(&self, word: &str) -> bool {
        self.dictionary.check(word)
    }

    fn suggestions(&self, word: &str) -> Vec<String> {
        let mut suggestions = Vec::new();
        self.dictionary.suggest(word, &mut suggestions);
        suggestions.truncate(MAX_SUGGESTIONS);
        suggestions
    }
}

/// Whichever kind of dictionary the configured path turned out to be
#[derive(Debug)]
pub enum PrimaryDictionary {
    Hunspell(HunspellDictionary),
    Words(WordList),
}

impl PrimaryDictionary {
    // Parameters:
    //   path - a Hunspell .dic file or a plain word-per-line list
    pub fn load(path: &Path) -> Result<Self, DictionaryError> {
        let is_dic = path.extension().is_some_and(|ext| ext == "dic");
        if !is_dic {
            return WordList::load(path).map(Self::Words);
        }

        let aff_path = affix_path(path);
        if aff_path.exists() {
            HunspellDictionary::load(path, &aff_path).map(Self::Hunspell)
        } else {
            warn!(
                path = %path.display(),
                "no .aff file next to the dictionary; inflected forms will be reported"
            );
            WordList::load(path).map(Self::Words)
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Hunspell(dictionary) => dictionary.len(),
            Self::Words(list) => list.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl SpellingOracle for PrimaryDictionary {
    fn known(&self, word: &str) -> bool {
        match self {
            Self::Hunspell(dictionary) => dictionary.known(word),
            Self::Words(list) => list.known(word),
        }
    }

    fn suggestions(&self, word: &str) -> Vec<String> {
        match self {
            Self::Hunspell(dictionary) => dictionary.suggestions(word),
            Self::Words(list) => list.suggestions(word),
        }
    }
}

// "en_US.dic" -> "en_US.aff"
fn affix_path(dic_path: &Path) -> PathBuf {
    dic_path.with_extension("aff")
}

fn read(path: &Path) -> Result<String, DictionaryError> {
    fs::read_to_string(path).map_err(|source| DictionaryError::Io {
        operation: "read",
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use tempfile::tempdir;

    // A cut-down en_US: plural, past tense and -ing suffixes
    pub(crate) const AFF: &str = "SET UTF-8
TRY esianrtolcdugmphbyfvkwz'

SFX S Y 4
SFX S y ies [^aeiou]y
SFX S 0 s [aeiou]y
SFX S 0 es [sxzh]
SFX S 0 s [^sxzhy]

SFX D Y 4
SFX D 0 d e
SFX D y ied [^aeiou]y
SFX D 0 ed [^ey]
SFX D 0 ed [aeiou]y

SFX G Y 2
SFX G e ing e
SFX G 0 ing [^e]
";

    pub(crate) const DIC: &str = "3\nwalk/DSG\nrepository/S\nlove/DSG\n";

    pub(crate) fn sample() -> HunspellDictionary {
        HunspellDictionary::parse(AFF, DIC, Path::new("en_US.dic")).unwrap()
    }

    #[test]
    fn test_inflected_forms_are_known() {
        let dictionary = sample();
        for word in ["walk", "walks", "walked", "walking", "repositories", "loved", "loving"] {
            assert!(dictionary.known(word), "{word} should be known");
        }
        assert!(!dictionary.known("walkz"));
        assert!(!dictionary.known("repositorys"));
        assert_eq!(dictionary.len(), 3);
    }

    #[test]
    fn test_suggestions_for_typo() {
        let dictionary = sample();
        let suggestions = dictionary.suggestions("walkng");
        assert!(suggestions.len() <= MAX_SUGGESTIONS);
        assert!(suggestions.contains(&"walking".to_string()));
    }

    #[test]
    fn test_load_picks_hunspell_when_aff_is_present() {
        let dir = tempdir().unwrap();
        let dic_path = dir.path().join("en_US.dic");
        fs::write(&dic_path, DIC).unwrap();
        fs::write(dir.path().join("en_US.aff"), AFF).unwrap();

        let primary = PrimaryDictionary::load(&dic_path).unwrap();
        assert!(matches!(primary, PrimaryDictionary::Hunspell(_)));
        assert!(primary.known("walked"));
        assert!(!primary.is_empty());
    }

    #[test]
    fn test_load_without_aff_falls_back_to_word_list() {
        let dir = tempdir().unwrap();
        let dic_path = dir.path().join("en_US.dic");
        fs::write(&dic_path, DIC).unwrap();

        let primary = PrimaryDictionary::load(&dic_path).unwrap();
        assert!(matches!(primary, PrimaryDictionary::Words(_)));
        assert!(primary.known("walk"));
        assert!(!primary.known("walked"));
    }

    #[test]
    fn test_plain_word_list() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("words");
        fs::write(&path, "walked\nrepositories\n").unwrap();

        let primary = PrimaryDictionary::load(&path).unwrap();
        assert!(matches!(primary, PrimaryDictionary::Words(_)));
        assert_eq!(primary.len(), 2);
        assert!(primary.known("Walked"));
    }

    #[test]
    fn test_missing_file_is_an_io_error() {
        let dir = tempdir().unwrap();
        let result = PrimaryDictionary::load(&dir.path().join("nope.txt"));
        assert!(matches!(result, Err(DictionaryError::Io { .. })));
    }
}
