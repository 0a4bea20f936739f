// src/crawl/mod.rs
// =============================================================================
// This module handles crawling and the url tree it produces.
//
// Submodules:
// - extract: Finds absolute URLs in page text with a regex
// - ledger:  Remembers every URL already placed in the tree
// - tree:    The forest of discovered URLs and its JSON shape
// - fetch:   Downloads one page
// - builder: The depth-first traversal tying the above together
//
// Rust concepts:
// - Modules: Organize code into namespaces
// - pub use: Re-export items so callers write `crawl::Forest`
// =============================================================================

mod builder;
mod extract;
mod fetch;
mod ledger;
mod tree;

pub use builder::{CrawlOutcome, CrawlStats};
pub use ledger::VisitedSet;
pub use tree::{CrawlNode, Forest};
