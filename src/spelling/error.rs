// src/spelling/error.rs

use std::path::PathBuf;

use thiserror::Error;

/// Errors from loading or updating dictionary files.
#[derive(Debug, Error)]
pub enum DictionaryError {
    #[error("failed to {operation} dictionary '{}': {source}", path.display())]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The first line of a custom dictionary must be the word count
    #[error("dictionary '{}' does not start with a word count", path.display())]
    MalformedHeader { path: PathBuf },

    #[error("could not parse hunspell dictionary '{}': {reason}", path.display())]
    Affix { path: PathBuf, reason: String },
}
