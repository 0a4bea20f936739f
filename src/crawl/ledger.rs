// src/crawl/ledger.rs
// =============================================================================
// The deduplication ledger: every address that has ever been put in the tree.
//
// Two addresses count as the same page when the text after their last "//"
// is identical, so `http://x.com/a` and `https://x.com/a` collide. That rule
// is loose (a query string containing "//" can make unrelated pages collide)
// and it lives in resource_key() alone so it can be tightened later without
// touching the crawler.
//
// Rust concepts:
// - HashSet: O(1) "have we seen this key?" lookups
// - Borrowing: resource_key() returns a slice of its input, no allocation
// =============================================================================

use std::collections::HashSet;

// The part of an address used for "same page" comparisons: whatever follows
// the last "//" when the address is split on "//" from the left
pub fn resource_key(address: &str) -> &str {
    address.split("//").last().unwrap_or(address)
}

// Insertion-ordered record of visited addresses plus an index of their keys
#[derive(Debug, Default)]
pub struct VisitedSet {
    addresses: Vec<String>,
    keys: HashSet<String>,
}

impl VisitedSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn already_seen(&self, address: &str) -> bool {
        self.keys.contains(resource_key(address))
    }

    // Records an address; returns false if an equivalent one was already there
    pub fn record(&mut self, address: &str) -> bool {
        if !self.keys.insert(resource_key(address).to_string()) {
            return false;
        }
        self.addresses.push(address.to_string());
        true
    }

    pub fn len(&self) -> usize {
        self.addresses.len()
    }
}
