// src/checker/mod.rs
// =============================================================================
// Seed validation.
//
// Submodules:
// - http: Parses the seed URLs and checks each one with a HEAD request
//
// This file (mod.rs) is the module root; it re-exports the public API so
// callers can write `checker::validate_seeds()`.
// =============================================================================

mod http;

pub use http::validate_seeds;
