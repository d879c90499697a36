// src/config.rs
// =============================================================================
// Settings for a run, read from an optional TOML file.
//
// Lookup order:
// 1. the file passed with --config (must exist)
// 2. ./readme-speller.toml, if present
// 3. built-in defaults
//
// Every field has a default, so a config file only needs the keys it wants
// to change:
//
//   branch = "main"
//   min-word-len = 5
//   boilerplate = ["git", "github", "npm"]
//   selection-fallback = "advance"
//
// Command-line flags are applied on top of whatever this produces.
// =============================================================================

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::github::{GithubConfig, DEFAULT_API_URL, DEFAULT_BRANCH, DEFAULT_RAW_HOST};
use crate::session::SelectionFallback;
use crate::spelling::{
    FilterRules, ReportPolicy, SubstringCase, DEFAULT_BOILERPLATE, DEFAULT_DEV_SYMBOLS,
    DEFAULT_MIN_WORD_LEN, DEFAULT_WORD_SUBS,
};

pub const DEFAULT_CONFIG_FILE: &str = "readme-speller.toml";

const DEFAULT_DICTIONARY: &str = "/usr/share/hunspell/en_US.dic";

// Where macOS keeps user spelling dictionaries, under $HOME
const DEV_DICTIONARY_DIR: &str = "Library/Spelling";
const DEV_DICTIONARY_FILE: &str = "en_US-dev.dic";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file '{}': {source}", path.display())]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid setting '{field}': {reason}")]
    Invalid { field: &'static str, reason: String },

    #[error("could not determine the home directory for the developer dictionary")]
    NoHomeDir,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct Settings {
    pub api_url: String,
    pub raw_host: String,
    pub branch: String,
    pub timeout_secs: u64,
    pub max_pages: usize,
    /// 0 disables the length floor
    pub min_word_len: usize,
    pub keep_apostrophes: bool,
    pub dev_symbols: Vec<String>,
    pub word_subs: Vec<String>,
    pub boilerplate: Vec<String>,
    pub substring_case: SubstringCase,
    pub report_policy: ReportPolicy,
    pub selection_fallback: SelectionFallback,
    pub max_repos: Option<usize>,
    pub dictionary: PathBuf,
    pub dev_dictionary: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            raw_host: DEFAULT_RAW_HOST.to_string(),
            branch: DEFAULT_BRANCH.to_string(),
            timeout_secs: 30,
            max_pages: 10,
            min_word_len: DEFAULT_MIN_WORD_LEN,
            keep_apostrophes: false,
            dev_symbols: to_strings(&DEFAULT_DEV_SYMBOLS),
            word_subs: to_strings(&DEFAULT_WORD_SUBS),
            boilerplate: to_strings(&DEFAULT_BOILERPLATE),
            substring_case: SubstringCase::default(),
            report_policy: ReportPolicy::default(),
            selection_fallback: SelectionFallback::default(),
            max_repos: None,
            dictionary: PathBuf::from(DEFAULT_DICTIONARY),
            dev_dictionary: None,
        }
    }
}

impl Settings {
    // Loads settings following the lookup order described above
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => {
                let fallback = Path::new(DEFAULT_CONFIG_FILE);
                if fallback.is_file() {
                    Self::from_file(fallback)
                } else {
                    debug!("no config file, using defaults");
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let settings: Settings = toml::from_str(&contents).map_err(|source| ConfigError::Toml {
            path: path.to_path_buf(),
            source,
        })?;

        debug!(path = %path.display(), "config file loaded");
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_pages == 0 {
            return Err(ConfigError::Invalid {
                field: "max-pages",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.max_repos == Some(0) {
            return Err(ConfigError::Invalid {
                field: "max-repos",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.branch.trim().is_empty() {
            return Err(ConfigError::Invalid {
                field: "branch",
                reason: "must not be empty".to_string(),
            });
        }
        Ok(())
    }

    pub fn filter_rules(&self) -> FilterRules {
        FilterRules {
            min_word_len: (self.min_word_len > 0).then_some(self.min_word_len),
            dev_symbols: self.dev_symbols.clone(),
            word_subs: self.word_subs.clone(),
            boilerplate: self.boilerplate.iter().map(|w| w.to_lowercase()).collect(),
            substring_case: self.substring_case,
        }
    }

    pub fn github_config(&self, token: Option<String>) -> GithubConfig {
        GithubConfig {
            api_url: self.api_url.clone(),
            raw_host: self.raw_host.clone(),
            branch: self.branch.clone(),
            token,
            timeout: Duration::from_secs(self.timeout_secs),
        }
    }

    /// The configured developer dictionary, or ~/Library/Spelling/en_US-dev.dic
    pub fn dev_dictionary_path(&self) -> Result<PathBuf, ConfigError> {
        if let Some(path) = &self.dev_dictionary {
            return Ok(path.clone());
        }
        let home = dirs::home_dir().ok_or(ConfigError::NoHomeDir)?;
        Ok(home.join(DEV_DICTIONARY_DIR).join(DEV_DICTIONARY_FILE))
    }
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
