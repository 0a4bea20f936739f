// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// The whole interface is one command: a list of seed URLs plus a handful of
// options. clap takes care of --help, --version and the usage error printed
// when no seeds are given.
// =============================================================================

use crate::config::{
    CrawlConfig, CLOAK_USER_AGENT, DEFAULT_MAX_DEPTH, DEFAULT_STORE_PATH, DEFAULT_TIMEOUT_SECS,
    MAX_DEPTH_LIMIT,
};
use clap::builder::RangedU64ValueParser;
use clap::Parser;
use std::path::PathBuf;

// The literal first argument the old tool used to mean "resume"
const RESUME_TOKEN: &str = "continue";

#[derive(Parser, Debug)]
#[command(
    name = "urltree",
    version = "0.1.0",
    about = "Crawl seed URLs and save the tree of every link discovered from them",
    long_about = "urltree checks that every seed URL is reachable, then follows every absolute \
                  link found in each page depth-first, recording who-linked-to-whom as a JSON \
                  tree. Ctrl-C saves what has been found so far."
)]
pub struct Cli {
    /// Seed URLs to start crawling from (at least one)
    ///
    /// Example: urltree https://example.com https://example.org
    #[arg(required = true, value_name = "SEED")]
    pub seeds: Vec<String>,

    /// File the url tree is written to
    #[arg(short, long, default_value = DEFAULT_STORE_PATH)]
    pub output: PathBuf,

    /// Deepest level to fetch; pages at this depth are recorded but not crawled
    ///
    /// Accepts 0 up to 1000
    #[arg(
        long,
        default_value_t = DEFAULT_MAX_DEPTH,
        value_parser = RangedU64ValueParser::<usize>::new().range(0..=MAX_DEPTH_LIMIT as u64)
    )]
    pub max_depth: usize,

    /// User-Agent header sent with every request
    #[arg(long, default_value = CLOAK_USER_AGENT)]
    pub user_agent: String,

    /// Per-request timeout in seconds (0 = wait forever)
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout: u64,

    /// Show debug logging (RUST_LOG overrides this)
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    // True when the first seed is the "continue" token from the old tool
    pub fn is_resume_request(&self) -> bool {
        self.seeds
            .first()
            .is_some_and(|first| first.eq_ignore_ascii_case(RESUME_TOKEN))
    }

    pub fn crawl_config(&self) -> CrawlConfig {
        CrawlConfig::default()
            .with_store_path(&self.output)
            .with_max_depth(self.max_depth)
            .with_user_agent(&self.user_agent)
            .with_timeout_secs(self.timeout)
    }
}
