// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// There are no subcommands: the tool always starts an interactive session.
// --learn switches that session from "report misspellings" to "teach the
// developer dictionary new words".
//
// Anything given here wins over the config file.
// =============================================================================

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::session::SelectionFallback;
use crate::spelling::ReportPolicy;

#[derive(Parser, Debug)]
#[command(
    name = "readme-speller",
    version,
    about = "Crawl public GitHub repositories and spellcheck their READMEs",
    long_about = "readme-speller pages through GitHub's public repository listing, finds each \
                  repository's README on raw.githubusercontent.com and reports words missing \
                  from your dictionaries. With --learn it asks which unknown words to add to \
                  a developer dictionary instead."
)]
pub struct Cli {
    /// Learning mode: offer unknown words for the developer dictionary
    #[arg(long)]
    pub learn: bool,

    /// Path to a TOML config file (default: ./readme-speller.toml if present)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Primary dictionary (.dic file or plain word list)
    #[arg(long)]
    pub dictionary: Option<PathBuf>,

    /// Developer dictionary that learn mode appends to
    /// (default: ~/Library/Spelling/en_US-dev.dic)
    #[arg(long)]
    pub dev_dictionary: Option<PathBuf>,

    /// Print each repository report as JSON
    #[arg(long)]
    pub json: bool,

    /// When a word counts as misspelled
    #[arg(long, value_enum)]
    pub policy: Option<PolicyArg>,

    /// What to do with an out-of-range repository number
    #[arg(long, value_enum)]
    pub on_invalid: Option<FallbackArg>,

    /// Stop after inspecting this many repositories
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub max_repos: Option<u64>,

    /// GitHub token, raises the API rate limit
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Show debug logs (RUST_LOG takes precedence)
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum PolicyArg {
    /// Unknown to both the primary and the developer dictionary
    UnknownToAll,
    /// Unknown to the primary dictionary and it has a suggestion
    NeedsSuggestion,
}

impl From<PolicyArg> for ReportPolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::UnknownToAll => ReportPolicy::UnknownToAll,
            PolicyArg::NeedsSuggestion => ReportPolicy::NeedsSuggestion,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum FallbackArg {
    /// Ask again
    Reprompt,
    /// Move on to the next repository
    Advance,
}

impl From<FallbackArg> for SelectionFallback {
    fn from(arg: FallbackArg) -> Self {
        match arg {
            FallbackArg::Reprompt => SelectionFallback::Reprompt,
            FallbackArg::Advance => SelectionFallback::Advance,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["readme-speller"]).unwrap();
        assert!(!cli.learn);
        assert!(cli.policy.is_none());
        assert!(cli.max_repos.is_none());
    }

    #[test]
    fn test_learn_and_overrides() {
        let cli = Cli::try_parse_from([
            "readme-speller",
            "--learn",
            "--policy",
            "needs-suggestion",
            "--on-invalid",
            "advance",
            "--max-repos",
            "3",
        ])
        .unwrap();
        assert!(cli.learn);
        assert_eq!(
            ReportPolicy::from(cli.policy.unwrap()),
            ReportPolicy::NeedsSuggestion
        );
        assert_eq!(
            SelectionFallback::from(cli.on_invalid.unwrap()),
            SelectionFallback::Advance
        );
        assert_eq!(cli.max_repos, Some(3));
    }

    #[test]
    fn test_zero_max_repos_rejected() {
        assert!(Cli::try_parse_from(["readme-speller", "--max-repos", "0"]).is_err());
    }
}
