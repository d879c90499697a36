// src/github/mod.rs
// =============================================================================
// This module handles everything we fetch from GitHub.
//
// Currently implements:
// - Paging through the public repository listing (api.github.com)
// - Finding a repository's README by probing raw.githubusercontent.com
// - Downloading the README text
//
// Everything runs one request at a time: each call is awaited before the
// next one is sent.
// =============================================================================

mod client;
mod error;
mod pages;
mod readme;

pub use client::{GithubClient, GithubConfig, DEFAULT_API_URL, DEFAULT_BRANCH, DEFAULT_RAW_HOST};
pub use error::FetchError;
pub use pages::{pages, Repository};
pub use readme::{fetch_readme, Readme};
