// src/crawl/tree.rs
// =============================================================================
// The url tree: one root per seed, children in the order links were found.
//
// While crawling, nodes live in a flat arena (a Vec) and refer to their
// children by index. That lets the crawler hold on to "the node I'm working
// on" without fighting the borrow checker over a deeply nested &mut, and lets
// the checkpoint writer read the whole forest at any moment.
//
// CrawlNode is the nested, serializable shape written to disk.
// =============================================================================

use serde::{Deserialize, Serialize};

/// One discovered URL and the URLs found on its page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrawlNode {
    #[serde(rename = "url")]
    pub address: String,
    /// Reserved for resuming a crawl; never set by this tool
    #[serde(rename = "continue", default, skip_serializing_if = "is_false")]
    pub continuation: bool,
    #[serde(rename = "trees", default)]
    pub children: Vec<CrawlNode>,
}

fn is_false(value: &bool) -> bool {
    !*value
}

impl CrawlNode {
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            continuation: false,
            children: Vec::new(),
        }
    }
}

/// Index of a node inside a [`Forest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Debug)]
struct Entry {
    address: String,
    children: Vec<NodeId>,
}

/// Every node of the crawl. Nodes are only ever added, never removed.
#[derive(Debug, Default)]
pub struct Forest {
    nodes: Vec<Entry>,
    roots: Vec<NodeId>,
}

impl Forest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_root(&mut self, address: impl Into<String>) -> NodeId {
        let id = self.push(address.into());
        self.roots.push(id);
        id
    }

    pub fn add_child(&mut self, parent: NodeId, address: impl Into<String>) -> NodeId {
        let id = self.push(address.into());
        self.nodes[parent.0].children.push(id);
        id
    }

    fn push(&mut self, address: String) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Entry {
            address,
            children: Vec::new(),
        });
        id
    }

    pub fn address(&self, id: NodeId) -> &str {
        &self.nodes[id.0].address
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    /// Total number of nodes across all trees.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Builds the nested form of every tree, roots in seed order.
    pub fn to_trees(&self) -> Vec<CrawlNode> {
        self.roots().iter().map(|&root| self.to_node(root)).collect()
    }

    // Recursion depth is bounded by the crawl's max depth
    fn to_node(&self, id: NodeId) -> CrawlNode {
        let mut node = CrawlNode::new(self.address(id));
        node.children = self.children(id).iter().map(|&child| self.to_node(child)).collect();
        node
    }
}
