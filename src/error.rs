// src/error.rs
// =============================================================================
// Error types for the crawl engine.
//
// Only the errors that can stop a whole run (or that a caller may want to
// inspect) live here. A failure fetching one page is turned into a log line
// by the tree builder and never leaves it.
// =============================================================================

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CrawlError {
    #[error("error parsing url '{address}': {source}")]
    InvalidAddress {
        address: String,
        #[source]
        source: url::ParseError,
    },

    #[error("failed to form {method} request to url '{address}': {source}")]
    RequestBuild {
        method: &'static str,
        address: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to send {method} request to url '{address}': {source}")]
    RequestSend {
        method: &'static str,
        address: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("received bad status whilst sending {method} request to '{address}': {status}")]
    BadStatus {
        method: &'static str,
        address: String,
        status: u16,
    },

    #[error("error reading body of '{address}': {source}")]
    Body {
        address: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("error encoding url tree to json: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("failed to write checkpoint to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, CrawlError>;
