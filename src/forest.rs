//! Parent/child tree over the nodes of a compound graph.
//!
//! Every node has exactly one parent, which is either another node or the
//! synthetic [`GRAPH_ROOT`]. Nodes that have never been attached anywhere are
//! children of the root. The children of a node keep the order in which they
//! were attached.
use std::collections::HashMap;

use indexmap::IndexSet;

use crate::GRAPH_ROOT;

/// A tree of node identifiers rooted at [`GRAPH_ROOT`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Forest {
    parent: HashMap<String, String>,
    children: HashMap<String, IndexSet<String>>,
}

impl Forest {
    /// Creates a tree that only contains the root.
    pub fn new() -> Self {
        let mut children = HashMap::new();
        children.insert(GRAPH_ROOT.to_owned(), IndexSet::new());

        Self {
            parent: HashMap::new(),
            children,
        }
    }

    /// Registers a new node as a child of the root.
    ///
    /// Does nothing when the node is already part of the tree.
    pub fn insert(&mut self, node: &str) {
        if self.parent.contains_key(node) {
            return;
        }

        self.parent.insert(node.to_owned(), GRAPH_ROOT.to_owned());
        self.children.insert(node.to_owned(), IndexSet::new());
        self.root_children_mut().insert(node.to_owned());
    }

    /// Checks whether making `parent` the parent of `node` would introduce a cycle.
    ///
    /// A node can not be its own parent.
    pub fn would_cycle(&self, node: &str, parent: &str) -> bool {
        if node == parent {
            return true;
        }

        // When `node` does not have any children it can't contain `parent`.
        if self.children.get(node).map_or(true, IndexSet::is_empty) {
            return false;
        }

        let mut ancestor = parent;

        loop {
            if ancestor == node {
                return true;
            }

            match self.parent.get(ancestor) {
                Some(next) if next != GRAPH_ROOT => ancestor = next,
                _ => return false,
            }
        }
    }

    /// Moves `node` under `parent`, or under the root when `parent` is `None`.
    ///
    /// Both nodes must already be part of the tree and the move must not
    /// introduce a cycle, see [`Forest::would_cycle`].
    pub fn attach(&mut self, node: &str, parent: Option<&str>) {
        let parent = parent.unwrap_or(GRAPH_ROOT);
        debug_assert!(!self.would_cycle(node, parent));

        self.detach(node);

        self.parent.insert(node.to_owned(), parent.to_owned());
        self.children
            .entry(parent.to_owned())
            .or_default()
            .insert(node.to_owned());
    }

    /// Detaches a node from its parent. The node stays without a parent until
    /// it is attached again.
    ///
    /// Siblings are swap-removed, so the order of the remaining children may
    /// change.
    fn detach(&mut self, node: &str) {
        let Some(parent) = self.parent.remove(node) else {
            return;
        };

        if let Some(siblings) = self.children.get_mut(&parent) {
            siblings.swap_remove(node);
        }
    }

    /// Removes a node from the tree, moving its children to the root.
    pub fn remove(&mut self, node: &str) {
        self.detach(node);

        let Some(orphans) = self.children.remove(node) else {
            return;
        };

        for child in orphans {
            self.parent.insert(child.clone(), GRAPH_ROOT.to_owned());
            self.root_children_mut().insert(child);
        }
    }

    /// Returns a node's parent or `None` if it is a child of the root.
    #[inline]
    pub fn parent(&self, node: &str) -> Option<&str> {
        self.parent
            .get(node)
            .map(String::as_str)
            .filter(|parent| *parent != GRAPH_ROOT)
    }

    /// Iterates over the children of a node, or of the root when `node` is `None`.
    ///
    /// Returns `None` for nodes that are not part of the tree.
    pub fn children(&self, node: Option<&str>) -> Option<impl Iterator<Item = &str> + '_> {
        let children = self.children.get(node.unwrap_or(GRAPH_ROOT))?;
        Some(children.iter().map(String::as_str))
    }

    fn root_children_mut(&mut self) -> &mut IndexSet<String> {
        self.children.entry(GRAPH_ROOT.to_owned()).or_default()
    }
}

impl Default for Forest {
    fn default() -> Self {
        Self::new()
    }
}
