// src/crawl/builder.rs
// =============================================================================
// Builds the url tree, depth-first.
//
// How it works:
// 1. Each seed that hasn't been seen becomes a root and is recorded
// 2. A page is fetched and every URL in its body is extracted
// 3. Each URL not already in the ledger becomes a child, is recorded, and is
//    crawled immediately, before the next URL on the parent page
// 4. A failed fetch just leaves that node without children
//
// Instead of calling itself recursively, the builder keeps an explicit stack
// of frames (one per page being worked through), so a deep site can't blow
// the call stack. Pages at the configured max depth are recorded but never
// fetched.
//
// Cancellation is checked at every node boundary: before a new child is
// attached and while a fetch is in flight. Whatever is in the forest at that
// point is consistent and ready to checkpoint.
// =============================================================================

use super::extract::extract_links;
use super::fetch::fetch_page;
use super::tree::NodeId;
use crate::session::CrawlSession;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

// How a crawl ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrawlOutcome {
    /// Every reachable, unseen link was visited
    Completed,
    /// The cancellation token fired first
    Interrupted,
}

// Counters reported at the end of a run
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CrawlStats {
    pub pages_fetched: usize,
    pub pages_failed: usize,
    pub duplicates_skipped: usize,
}

// A page whose links are being worked through
struct Frame {
    node: NodeId,
    depth: usize,
    pending: std::vec::IntoIter<String>,
}

impl CrawlSession {
    // Crawls every seed in order, building one tree per unseen seed.
    // Seeds are stored exactly as given so a page's link back to itself
    // matches its own root.
    pub async fn crawl(&mut self, seeds: &[String], cancel: &CancellationToken) -> CrawlOutcome {
        for address in seeds {
            if cancel.is_cancelled() {
                return CrawlOutcome::Interrupted;
            }

            if self.visited.already_seen(address) {
                debug!("skipping duplicate seed {}", address);
                continue;
            }

            let root = self.forest.add_root(address.as_str());
            self.visited.record(address);

            if self.expand(root, cancel).await == CrawlOutcome::Interrupted {
                return CrawlOutcome::Interrupted;
            }
        }

        CrawlOutcome::Completed
    }

    // Crawls everything reachable from `root`, which must already be recorded
    async fn expand(&mut self, root: NodeId, cancel: &CancellationToken) -> CrawlOutcome {
        let mut stack = Vec::new();
        self.open(root, 0, cancel, &mut stack).await;

        while let Some(frame) = stack.last_mut() {
            if cancel.is_cancelled() {
                return CrawlOutcome::Interrupted;
            }

            let Some(candidate) = frame.pending.next() else {
                stack.pop();
                continue;
            };
            let (parent, depth) = (frame.node, frame.depth + 1);

            if self.visited.already_seen(&candidate) {
                self.stats.duplicates_skipped += 1;
                continue;
            }

            let child = self.forest.add_child(parent, candidate.as_str());
            self.visited.record(&candidate);

            self.open(child, depth, cancel, &mut stack).await;
        }

        if cancel.is_cancelled() {
            CrawlOutcome::Interrupted
        } else {
            CrawlOutcome::Completed
        }
    }

    // Fetches a node's page and, on success, pushes a frame holding its links.
    // Failures are local: they are logged and the node stays a leaf.
    async fn open(
        &mut self,
        node: NodeId,
        depth: usize,
        cancel: &CancellationToken,
        stack: &mut Vec<Frame>,
    ) {
        let address = self.forest.address(node).to_string();

        if depth >= self.config.max_depth {
            debug!("not fetching {} at max depth {}", address, depth);
            return;
        }

        info!("crawling [depth {}]: {}", depth, address);

        let fetched = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                debug!("fetch of {} abandoned", address);
                return;
            }
            result = fetch_page(&self.client, &address) => result,
        };

        match fetched {
            Ok(body) => {
                self.stats.pages_fetched += 1;
                let links: Vec<String> = extract_links(&body).map(str::to_owned).collect();
                debug!("{} link(s) found on {}", links.len(), address);
                stack.push(Frame {
                    node,
                    depth,
                    pending: links.into_iter(),
                });
            }
            Err(e) => {
                self.stats.pages_failed += 1;
                warn!("{}", e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CrawlConfig;
    use crate::crawl::CrawlNode;
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::sync::Notify;
    use wiremock::{
        matchers::{method, path},
        Mock, MockServer, ResponseTemplate,
    };

    async fn page(server: &MockServer, at: &str, body: String) {
        Mock::given(method("GET"))
            .and(path(at))
            .respond_with(ResponseTemplate::new(200).set_body_string(body))
            .mount(server)
            .await;
    }

    fn seed(server: &MockServer, at: &str) -> String {
        format!("{}{}", server.uri(), at)
    }

    fn addresses(nodes: &[CrawlNode]) -> Vec<&str> {
        nodes.iter().map(|n| n.address.as_str()).collect()
    }

    fn session() -> CrawlSession {
        CrawlSession::new(CrawlConfig::default()).unwrap()
    }

    /// A page linking to itself only gets its other link as a child
    #[tokio::test]
    async fn test_self_link_is_suppressed() {
        let mock_server = MockServer::start().await;
        let uri = mock_server.uri();

        page(&mock_server, "/", format!(r#"<a href="{uri}/">home</a> <a href="{uri}/b">b</a>"#)).await;
        Mock::given(method("GET"))
            .and(path("/b"))
            .respond_with(ResponseTemplate::new(200).set_body_string("no links here"))
            .expect(1)
            .mount(&mock_server)
            .await;

        let mut session = session();
        let outcome = session
            .crawl(&[seed(&mock_server, "/")], &CancellationToken::new())
            .await;

        assert_eq!(outcome, CrawlOutcome::Completed);
        let trees = session.forest().to_trees();
        assert_eq!(addresses(&trees), vec![format!("{uri}/")]);
        assert_eq!(addresses(&trees[0].children), vec![format!("{uri}/b")]);
        assert!(trees[0].children[0].children.is_empty());
        assert_eq!(session.stats().pages_fetched, 2);
        assert_eq!(session.stats().duplicates_skipped, 1);
    }

    /// A seed without a trailing slash keeps its spelling, so the page's
    /// identical link back to it is recognised
    #[tokio::test]
    async fn test_seed_is_stored_as_given() {
        let mock_server = MockServer::start().await;
        let uri = mock_server.uri();

        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(200).set_body_string(format!("home: {uri}")))
            .expect(1)
            .mount(&mock_server)
            .await;

        let mut session = session();
        session
            .crawl(&[uri.clone()], &CancellationToken::new())
            .await;

        let trees = session.forest().to_trees();
        assert_eq!(addresses(&trees), vec![uri.as_str()]);
        assert!(trees[0].children.is_empty());
        assert_eq!(session.stats().duplicates_skipped, 1);
    }

    /// Children are crawled before their later siblings
    #[tokio::test]
    async fn test_depth_first_order() {
        let mock_server = MockServer::start().await;
        let uri = mock_server.uri();

        page(&mock_server, "/", format!("{uri}/a {uri}/b")).await;
        page(&mock_server, "/a", format!("{uri}/b")).await;
        page(&mock_server, "/b", String::new()).await;

        let mut session = session();
        session
            .crawl(&[seed(&mock_server, "/")], &CancellationToken::new())
            .await;

        // /b is reached through /a first, so the root's own link to it is skipped
        let trees = session.forest().to_trees();
        assert_eq!(addresses(&trees[0].children), vec![format!("{uri}/a")]);
        assert_eq!(addresses(&trees[0].children[0].children), vec![format!("{uri}/b")]);
    }

    #[tokio::test]
    async fn test_failed_fetch_keeps_leaf_and_siblings() {
        let mock_server = MockServer::start().await;
        let uri = mock_server.uri();

        // /missing has no mock, so the server answers 404
        page(&mock_server, "/", format!("{uri}/missing {uri}/ok")).await;
        page(&mock_server, "/ok", format!("{uri}/leaf")).await;
        page(&mock_server, "/leaf", String::new()).await;

        let mut session = session();
        let outcome = session
            .crawl(&[seed(&mock_server, "/")], &CancellationToken::new())
            .await;

        assert_eq!(outcome, CrawlOutcome::Completed);
        let root = &session.forest().to_trees()[0];
        assert_eq!(
            addresses(&root.children),
            vec![format!("{uri}/missing"), format!("{uri}/ok")]
        );
        assert!(root.children[0].children.is_empty());
        assert_eq!(addresses(&root.children[1].children), vec![format!("{uri}/leaf")]);
        assert_eq!(session.stats().pages_failed, 1);
    }

    #[tokio::test]
    async fn test_one_root_per_unique_seed_in_order() {
        let mock_server = MockServer::start().await;
        let uri = mock_server.uri();

        page(&mock_server, "/two", String::new()).await;
        page(&mock_server, "/one", String::new()).await;

        let seeds = [
            seed(&mock_server, "/two"),
            seed(&mock_server, "/one"),
            seed(&mock_server, "/two"),
        ];
        let mut session = session();
        session.crawl(&seeds, &CancellationToken::new()).await;

        let trees = session.forest().to_trees();
        assert_eq!(addresses(&trees), vec![format!("{uri}/two"), format!("{uri}/one")]);
        assert_eq!(session.visited().len(), 2);
    }

    #[tokio::test]
    async fn test_scheme_variant_counts_as_seen() {
        let mock_server = MockServer::start().await;
        let uri = mock_server.uri();
        let https_variant = uri.replacen("http://", "https://", 1);

        page(&mock_server, "/", format!("{https_variant}/ {uri}/x")).await;
        page(&mock_server, "/x", String::new()).await;

        let mut session = session();
        session
            .crawl(&[seed(&mock_server, "/")], &CancellationToken::new())
            .await;

        let root = &session.forest().to_trees()[0];
        assert_eq!(addresses(&root.children), vec![format!("{uri}/x")]);
    }

    #[tokio::test]
    async fn test_max_depth_records_but_does_not_fetch() {
        let mock_server = MockServer::start().await;
        let uri = mock_server.uri();

        page(&mock_server, "/", format!("{uri}/deep")).await;
        Mock::given(method("GET"))
            .and(path("/deep"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&mock_server)
            .await;

        let mut session = CrawlSession::new(CrawlConfig::default().with_max_depth(1)).unwrap();
        session
            .crawl(&[seed(&mock_server, "/")], &CancellationToken::new())
            .await;

        let root = &session.forest().to_trees()[0];
        assert_eq!(addresses(&root.children), vec![format!("{uri}/deep")]);
    }

    #[tokio::test]
    async fn test_cancelled_before_start_attaches_nothing() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&mock_server)
            .await;

        let cancel = CancellationToken::new();
        cancel.cancel();

        let mut session = session();
        let outcome = session.crawl(&[seed(&mock_server, "/")], &cancel).await;

        assert_eq!(outcome, CrawlOutcome::Interrupted);
        assert!(session.forest().is_empty());
    }

    #[tokio::test]
    async fn test_interrupt_keeps_exactly_the_attached_nodes() {
        let mock_server = MockServer::start().await;
        let uri = mock_server.uri();

        page(&mock_server, "/", format!("{uri}/b {uri}/c {uri}/d")).await;
        page(&mock_server, "/b", String::new()).await;
        Mock::given(method("GET"))
            .and(path("/c"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(format!("{uri}/e"))
                    .set_delay(Duration::from_secs(10)),
            )
            .mount(&mock_server)
            .await;

        // an interrupt delivered while /c is still loading
        let interrupt = Arc::new(Notify::new());
        let source = interrupt.clone();
        let cancel = CancellationToken::new();
        let listener = crate::signal::spawn_listener(cancel.clone(), move || {
            let source = source.clone();
            async move {
                source.notified().await;
                Ok(())
            }
        });
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(500)).await;
            interrupt.notify_one();
        });

        let dir = tempfile::tempdir().unwrap();
        let store = dir.path().join("store.json");
        let mut session =
            CrawlSession::new(CrawlConfig::default().with_store_path(&store)).unwrap();
        let outcome = session.crawl(&[seed(&mock_server, "/")], &cancel).await;
        session.checkpoint().unwrap();
        listener.abort();

        assert_eq!(outcome, CrawlOutcome::Interrupted);
        assert_eq!(session.forest().len(), 3);

        let saved: Vec<CrawlNode> =
            serde_json::from_str(&std::fs::read_to_string(&store).unwrap()).unwrap();
        assert_eq!(saved.len(), 1);
        let root = &saved[0];
        assert_eq!(root.address, seed(&mock_server, "/"));
        assert_eq!(
            addresses(&root.children),
            vec![format!("{uri}/b"), format!("{uri}/c")]
        );
        assert!(root.children[0].children.is_empty());
        assert!(root.children[1].children.is_empty());
    }
}
