// src/github/error.rs
// =============================================================================
// Errors that can happen while talking to GitHub.
//
// Every network failure in this tool ends up as a FetchError. The session
// catches it, reports it and moves on - a broken page or README never takes
// the whole session down.
// =============================================================================

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    /// The request never produced a response (DNS, TLS, timeout, ...)
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The listing endpoint answered with a non-2xx status
    #[error("failed to fetch {url}: HTTP {status}")]
    Status { url: String, status: u16 },

    /// The listing response had no usable `Link` header
    #[error("response from {url} has no parseable Link header")]
    MissingLink { url: String },

    /// The listing body was not the JSON we expected
    #[error("could not decode repository listing from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    /// A repository URL we cannot map onto the raw-content host
    #[error("cannot build raw content URL from '{url}'")]
    BadRepoUrl { url: String },

    /// Building the HTTP client itself failed
    #[error("could not build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}
