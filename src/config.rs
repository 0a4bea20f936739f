// src/config.rs
// =============================================================================
// Runtime configuration for a crawl.
//
// The CLI layer (cli.rs) fills one of these in; everything below main.rs only
// sees a CrawlConfig, which keeps the engine usable from tests without
// going through argument parsing.
// =============================================================================

use std::path::PathBuf;
use std::time::Duration;

/// Where the url tree is saved when no `--output` is given.
pub const DEFAULT_STORE_PATH: &str = "store.json";

/// Deepest level the crawler will fetch. Roots are depth 0.
pub const DEFAULT_MAX_DEPTH: usize = 100;

/// Largest accepted max depth. Writing the tree recurses once per level, so
/// this keeps the checkpoint well inside the thread's stack.
pub const MAX_DEPTH_LIMIT: usize = 1000;

/// Browser user-agent sent with every request so simple bot filters let us in.
pub const CLOAK_USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64; rv:108.0) Gecko/20100101 Firefox/108.0";

/// Per-request deadline when none is configured.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub struct CrawlConfig {
    /// File the forest is checkpointed to
    pub store_path: PathBuf,
    /// Nodes at this depth are attached but never fetched
    pub max_depth: usize,
    /// Value of the User-Agent header
    pub user_agent: String,
    /// Deadline for each request, `None` waits forever
    pub timeout: Option<Duration>,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            store_path: PathBuf::from(DEFAULT_STORE_PATH),
            max_depth: DEFAULT_MAX_DEPTH,
            user_agent: CLOAK_USER_AGENT.to_string(),
            timeout: Some(Duration::from_secs(DEFAULT_TIMEOUT_SECS)),
        }
    }
}

impl CrawlConfig {
    pub fn with_store_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.store_path = path.into();
        self
    }

    // Clamped to MAX_DEPTH_LIMIT
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth.min(MAX_DEPTH_LIMIT);
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    // A timeout of zero seconds means "no deadline"
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout = (secs > 0).then(|| Duration::from_secs(secs));
        self
    }
}
