// src/crawl/fetch.rs
// =============================================================================
// Downloads one page for the tree builder.
//
// Every failure comes back as a CrawlError so the caller can log it, but the
// builder treats all of them the same way: the node just gets no children.
// =============================================================================

use crate::error::{CrawlError, Result};
use reqwest::{Client, StatusCode};

const METHOD: &str = "GET";

// Fetches a page and returns its body as text.
// Anything but a plain 200 OK counts as a failure.
pub async fn fetch_page(client: &Client, address: &str) -> Result<String> {
    let request = client
        .get(address)
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

    if response.status() != StatusCode::OK {
        return Err(CrawlError::BadStatus {
            method: METHOD,
            address: address.to_string(),
            status: response.status().as_u16(),
        });
    }

    response.text().await.map_err(|source| CrawlError::Body {
        address: address.to_string(),
        source,
    })
}
