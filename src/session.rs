// src/session.rs
// =============================================================================
// A CrawlSession owns everything one run needs: the configuration, the HTTP
// client, the url tree and the ledger of visited addresses.
//
// The validator, the tree builder and the checkpoint writer all work through
// a session, so two sessions in the same process never share state.
//
// Rust concepts:
// - Ownership: the session owns the Forest and VisitedSet outright
// - &self vs &mut self: only crawling needs mutable access
// =============================================================================

use crate::checker;
use crate::checkpoint;
use crate::config::CrawlConfig;
use crate::crawl::{CrawlStats, Forest, VisitedSet};
use crate::error::{CrawlError, Result};
use reqwest::Client;

pub struct CrawlSession {
    pub(crate) config: CrawlConfig,
    pub(crate) client: Client,
    pub(crate) forest: Forest,
    pub(crate) visited: VisitedSet,
    pub(crate) stats: CrawlStats,
}

impl CrawlSession {
    pub fn new(config: CrawlConfig) -> Result<Self> {
        // The spoofed user-agent goes on the client so every request carries it
        let mut builder = Client::builder().user_agent(config.user_agent.as_str());
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(CrawlError::Client)?;

        Ok(Self {
            config,
            client,
            forest: Forest::new(),
            visited: VisitedSet::new(),
            stats: CrawlStats::default(),
        })
    }

    // All-or-nothing: every seed must parse and answer HEAD with a 2xx
    pub async fn validate_seeds(&self, seeds: &[String]) -> Result<Vec<String>> {
        checker::validate_seeds(&self.client, seeds).await
    }

    // Saves the forest as it stands right now
    pub fn checkpoint(&self) -> Result<()> {
        checkpoint::write_checkpoint(&self.config.store_path, &self.forest)
    }

    pub fn config(&self) -> &CrawlConfig {
        &self.config
    }

    pub fn forest(&self) -> &Forest {
        &self.forest
    }

    pub fn visited(&self) -> &VisitedSet {
        &self.visited
    }

    pub fn stats(&self) -> CrawlStats {
        self.stats
    }
}
