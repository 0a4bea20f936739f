// src/checker/http.rs
// =============================================================================
// Pre-flight check that every seed URL is alive before any crawling starts.
//
// Key functionality:
// - Parses every seed as a URL first (a typo aborts before any network I/O)
// - Makes one HTTP HEAD request per seed (lightweight, no body download)
// - Any failure is fatal for the whole run: this is a gate, not a filter
//
// Rust concepts:
// - async/await: For network I/O
// - Result<T, E> and ?: The first failing seed short-circuits the loop
// =============================================================================

use crate::error::{CrawlError, Result};
use reqwest::Client;
use tracing::{debug, info};
use url::Url;

const METHOD: &str = "HEAD";

// Parses every seed, then checks each one in order.
//
// Returns: the seeds exactly as they were given (not the normalized URL
// text), in order, so the tree records what the user typed
pub async fn validate_seeds(client: &Client, seeds: &[String]) -> Result<Vec<String>> {
    let urls = parse_seeds(seeds)?;

    for url in &urls {
        check_seed(client, url).await?;
    }

    info!("all {} seed url(s) responded", urls.len());
    Ok(seeds.to_vec())
}

// Turns raw arguments into URLs, failing on the first malformed one
pub fn parse_seeds(seeds: &[String]) -> Result<Vec<Url>> {
    seeds
        .iter()
        .map(|seed| {
            Url::parse(seed).map_err(|source| CrawlError::InvalidAddress {
                address: seed.clone(),
                source,
            })
        })
        .collect()
}

// Sends a HEAD request and insists on a 2xx answer
async fn check_seed(client: &Client, url: &Url) -> Result<()> {
    let address = url.as_str();

    let request = client
        .head(url.clone())
        .build()
        .map_err(|source| CrawlError::RequestBuild {
            method: METHOD,
            address: address.to_string(),
            source,
        })?;

    let response = client
        .execute(request)
        .await
        .map_err(|source| CrawlError::RequestSend {
            method: METHOD,
            address: address.to_string(),
            source,
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(CrawlError::BadStatus {
            method: METHOD,
            address: address.to_string(),
            status: status.as_u16(),
        });
    }

    debug!("seed {} answered HTTP {}", address, status.as_u16());
    Ok(())
}
