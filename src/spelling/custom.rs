// src/spelling/custom.rs
// =============================================================================
// The custom ("developer") dictionary that learn mode writes to.
//
// File format (the same one Hunspell uses for .dic files):
//
//   3        <- number of words
//   foo
//   bar
//   baz
//
// Appending "qux" bumps the count and adds a line:
//
//   4
//   foo
//   bar
//   baz
//   qux
//
// Every append re-reads the whole file, rewrites it and closes it again.
// There is only ever one writer (this process), so no locking is needed.
// =============================================================================

use std::collections::HashSet;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use super::oracle::entry_stem;
use super::{DictionaryError, SpellingOracle};

#[derive(Debug, Clone)]
pub struct CustomDictionary {
    path: PathBuf,
    words: HashSet<String>,
}

impl CustomDictionary {
    // Loads the dictionary at `path`
    //
    // A file that does not exist yet is an empty dictionary; it gets created
    // by the first append.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, DictionaryError> {
        let path = path.into();
        let words = match read_existing(&path)? {
            Some(contents) => parse_words(&path, &contents)?,
            None => HashSet::new(),
        };

        debug!(path = %path.display(), words = words.len(), "custom dictionary loaded");
        Ok(Self { path, words })
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(&word.to_lowercase())
    }

    /// Adds a word to the file.
    ///
    /// Returns `Ok(false)` and leaves the file untouched when the word is
    /// already there.
    pub fn append(&mut self, word: &str) -> Result<bool, DictionaryError> {
        let word = word.trim();

        // Re-read so we never clobber edits made since load()
        let contents = read_existing(&self.path)?.unwrap_or_else(|| "0\n".to_string());
        let current = parse_words(&self.path, &contents)?;

        if current.contains(&word.to_lowercase()) {
            self.words = current;
            return Ok(false);
        }

        let updated = with_appended_word(&self.path, &contents, word)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| DictionaryError::Io {
                operation: "create directory for",
                path: self.path.clone(),
                source,
            })?;
        }
        fs::write(&self.path, updated).map_err(|source| DictionaryError::Io {
            operation: "write",
            path: self.path.clone(),
            source,
        })?;

        info!(word = %word, path = %self.path.display(), "word added to custom dictionary");

        self.words = current;
        self.words.insert(word.to_lowercase());
        Ok(true)
    }
}

impl SpellingOracle for CustomDictionary {
    fn known(&self, word: &str) -> bool {
        self.contains(word)
    }
}

fn read_existing(path: &Path) -> Result<Option<String>, DictionaryError> {
    match fs::read_to_string(path) {
        Ok(contents) => Ok(Some(contents)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(source) => Err(DictionaryError::Io {
            operation: "read",
            path: path.to_path_buf(),
            source,
        }),
    }
}

// Number of leading ASCII digits; the count header
fn header_len(contents: &str) -> usize {
    contents.bytes().take_while(u8::is_ascii_digit).count()
}

fn parse_words(path: &Path, contents: &str) -> Result<HashSet<String>, DictionaryError> {
    if contents.trim().is_empty() {
        return Ok(HashSet::new());
    }
    if header_len(contents) == 0 {
        return Err(DictionaryError::MalformedHeader {
            path: path.to_path_buf(),
        });
    }

    Ok(contents
        .lines()
        .skip(1)
        .map(entry_stem)
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
        .collect())
}

// "3\nfoo\nbar\nbaz\n" + "qux" -> "4\nfoo\nbar\nbaz\nqux\n"
fn with_appended_word(path: &Path, contents: &str, word: &str) -> Result<String, DictionaryError> {
    let contents = if contents.trim().is_empty() { "0\n" } else { contents };

    let digits = header_len(contents);
    let count: u64 = contents[..digits]
        .parse()
        .map_err(|_| DictionaryError::MalformedHeader {
            path: path.to_path_buf(),
        })?;

    let mut updated = format!("{}{}", count + 1, &contents[digits..]);
    if !updated.ends_with('\n') {
        updated.push('\n');
    }
    updated.push_str(word);
    updated.push('\n');
    Ok(updated)
}
