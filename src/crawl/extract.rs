// src/crawl/extract.rs
// =============================================================================
// Finds absolute URLs inside raw page text.
//
// There is no HTML parsing here on purpose: a single regex is run over the
// whole body, so links inside attributes, plain text and <script> blocks are
// all picked up. Matches come back in the order they appear, duplicates
// included. Deduplication is the ledger's job.
// =============================================================================

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // scheme, optional www., host, a dot, a 1-6 char top-level part, then
    // any run of URL-safe path/query/fragment characters. The word boundary
    // is ASCII-only so links glued to non-Latin text still match.
    static ref URL_PATTERN: Regex = Regex::new(
        r"https?://(www\.)?[-a-zA-Z0-9@:%._\+~#=]{1,256}\.[a-zA-Z0-9()]{1,6}(?-u:\b)([-a-zA-Z0-9()@:%_\+.~#?&/=]*)"
    )
    .expect("link pattern is a valid regex");
}

// Returns every URL-looking substring of `text`, lazily, in document order
pub fn extract_links(text: &str) -> impl Iterator<Item = &str> + '_ {
    URL_PATTERN.find_iter(text).map(|m| m.as_str())
}
