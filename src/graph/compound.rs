//! Parent/child relations of compound graphs and subgraph extraction.
use std::collections::HashMap;

use tracing::trace;

use super::{validate_id, Graph};
use crate::error::GraphError;
use crate::forest::Forest;
use crate::GRAPH_ROOT;

impl<N, E> Graph<N, E> {
    /// Makes `parent` the parent of `node`, or moves `node` to the root when
    /// `parent` is `None`.
    ///
    /// Missing nodes are created without a value.
    ///
    /// # Errors
    ///
    ///  - When the graph is not compound.
    ///  - When one of the ids is invalid.
    ///  - When `node` is `parent` or one of its ancestors.
    ///
    /// # Example
    ///
    /// ```
    /// # use graphlib::{Graph, GraphOptions};
    /// let mut graph = Graph::<(), ()>::with_options(GraphOptions::default().with_compound(true));
    /// graph.set_parent("a", Some("p")).unwrap();
    /// graph.set_parent("p", Some("r")).unwrap();
    ///
    /// assert_eq!(graph.parent("a"), Some("p"));
    /// assert_eq!(graph.parent("p"), Some("r"));
    /// assert_eq!(graph.parent("r"), None);
    /// assert!(graph.set_parent("r", Some("a")).is_err());
    /// ```
    pub fn set_parent(
        &mut self,
        node: &str,
        parent: Option<&str>,
    ) -> Result<&mut Self, GraphError> {
        let Some(forest) = &self.forest else {
            return Err(GraphError::NotCompound);
        };

        validate_id(node)?;

        if let Some(parent) = parent {
            validate_id(parent)?;

            if forest.would_cycle(node, parent) {
                return Err(GraphError::ParentCycle {
                    node: node.to_owned(),
                    parent: parent.to_owned(),
                });
            }

            self.insert_node(parent, None, false);
        }

        self.insert_node(node, None, false);

        if let Some(forest) = &mut self.forest {
            forest.attach(node, parent);
        }

        trace!(node = node, new_parent = ?parent, "set parent");
        Ok(self)
    }

    /// Returns the parent of a node.
    ///
    /// Returns `None` for children of the root, unknown nodes, and in graphs
    /// that are not compound.
    #[inline]
    pub fn parent(&self, node: &str) -> Option<&str> {
        self.forest.as_ref()?.parent(node)
    }

    /// Returns the children of a node, or of the root when `node` is `None`.
    ///
    /// In a graph that is not compound every node is a child of the root and
    /// has no children itself. Returns `None` for unknown nodes.
    ///
    /// # Example
    ///
    /// ```
    /// # use graphlib::Graph;
    /// let mut graph = Graph::<(), ()>::new();
    /// graph.set_nodes(["a", "b"]).unwrap();
    ///
    /// assert_eq!(graph.children(None), Some(vec!["a", "b"]));
    /// assert_eq!(graph.children(Some("a")), Some(vec![]));
    /// assert_eq!(graph.children(Some("c")), None);
    /// ```
    pub fn children(&self, node: Option<&str>) -> Option<Vec<&str>> {
        let node = node.filter(|node| *node != GRAPH_ROOT);

        match (&self.forest, node) {
            (Some(forest), node) => Some(forest.children(node)?.collect()),
            (None, None) => Some(self.nodes().collect()),
            (None, Some(node)) if self.has_node(node) => Some(Vec::new()),
            (None, Some(_)) => None,
        }
    }

    /// Creates a new graph with the same options that contains the nodes for
    /// which `predicate` returns true, together with the edges between them.
    ///
    /// In a compound graph a kept node whose parent was dropped is moved under
    /// its nearest kept ancestor. The predicate is called once per node.
    ///
    /// # Example
    ///
    /// ```
    /// # use graphlib::{Graph, GraphOptions};
    /// let mut graph = Graph::<(), ()>::with_options(GraphOptions::default().with_compound(true));
    /// graph.set_parent("a", Some("p")).unwrap();
    /// graph.set_parent("p", Some("r")).unwrap();
    ///
    /// let filtered = graph.filter_nodes(|id| id != "p");
    /// assert_eq!(filtered.parent("a"), Some("r"));
    /// ```
    pub fn filter_nodes<F>(&self, mut predicate: F) -> Graph<N, E>
    where
        F: FnMut(&str) -> bool,
        N: Clone,
        E: Clone,
    {
        let mut copy = Graph::with_capacity(self.options, self.node_count(), self.edge_count());

        for (id, node) in &self.nodes {
            if predicate(id.as_str()) {
                copy.insert_node(id, node.value.clone(), true);
            }
        }

        for (edge, label) in &self.edges {
            if copy.has_node(edge.source()) && copy.has_node(edge.target()) {
                copy.link_edge(edge.clone(), label.clone());
            }
        }

        if let Some(forest) = &self.forest {
            let mut promoted = HashMap::new();
            let parents: Vec<(String, &str)> = copy
                .nodes()
                .filter_map(|id| {
                    let parent = kept_ancestor(forest, id, &copy, &mut promoted)?;
                    Some((id.to_owned(), parent))
                })
                .collect();

            if let Some(copy_forest) = &mut copy.forest {
                for (id, parent) in parents {
                    copy_forest.attach(&id, Some(parent));
                }
            }
        }

        copy
    }
}

/// Finds the nearest ancestor of `node` that is part of `kept`.
///
/// Dropped ancestors are memoised in `promoted` so that every chain of dropped
/// nodes is walked once.
fn kept_ancestor<'a, N, E>(
    forest: &'a Forest,
    node: &str,
    kept: &Graph<N, E>,
    promoted: &mut HashMap<&'a str, Option<&'a str>>,
) -> Option<&'a str> {
    let mut dropped = Vec::new();
    let mut current = forest.parent(node);

    let ancestor = loop {
        match current {
            None => break None,
            Some(ancestor) if kept.has_node(ancestor) => break Some(ancestor),
            Some(ancestor) => {
                if let Some(&cached) = promoted.get(ancestor) {
                    break cached;
                }
                dropped.push(ancestor);
                current = forest.parent(ancestor);
            }
        }
    };

    for node in dropped {
        promoted.insert(node, ancestor);
    }

    ancestor
}

#[cfg(test)]
mod test {
    use crate::error::ErrorKind;
    use crate::{Graph, GraphError, GraphOptions};

    fn compound() -> Graph<u32, u32> {
        Graph::with_options(GraphOptions::default().with_compound(true))
    }

    fn sorted(mut items: Vec<&str>) -> Vec<&str> {
        items.sort_unstable();
        items
    }

    #[test]
    fn set_parent_requires_compound() {
        let mut graph = Graph::<(), ()>::new();
        let error = graph.set_parent("a", Some("parent")).unwrap_err();
        assert_eq!(error, GraphError::NotCompound);
        assert_eq!(error.kind(), ErrorKind::IllegalOperation);
        assert!(graph.is_empty());
        assert_eq!(graph.parent("a"), None);
    }

    #[test]
    fn set_parent_creates_nodes() {
        let mut graph = compound();
        graph.set_node_with("a", 1).unwrap();
        graph.set_parent("a", Some("parent")).unwrap();
        assert!(graph.has_node("parent"));
        assert_eq!(graph.parent("a"), Some("parent"));
        assert_eq!(graph.node("a"), Some(&1));

        let mut graph = compound();
        graph.set_node_with("parent", 2).unwrap();
        graph.set_parent("a", Some("parent")).unwrap();
        assert!(graph.has_node("a"));
        assert_eq!(graph.node("parent"), Some(&2));
    }

    #[test]
    fn new_nodes_have_no_parent() {
        let mut graph = compound();
        graph.set_node("a").unwrap();
        assert_eq!(graph.parent("a"), None);
        assert_eq!(graph.children(None), Some(vec!["a"]));
        assert_eq!(graph.children(Some("a")), Some(vec![]));
    }

    #[test]
    fn set_parent_moves_between_parents() {
        let mut graph = compound();
        graph.set_parent("a", Some("parent")).unwrap();
        graph.set_parent("a", Some("parent2")).unwrap();
        assert_eq!(graph.parent("a"), Some("parent2"));
        assert_eq!(graph.children(Some("parent")), Some(vec![]));
        assert_eq!(graph.children(Some("parent2")), Some(vec!["a"]));

        graph.set_parent("a", None).unwrap();
        assert_eq!(graph.parent("a"), None);
        assert_eq!(
            sorted(graph.children(None).unwrap()),
            ["a", "parent", "parent2"]
        );
    }

    #[test]
    fn set_parent_preserves_tree() {
        let mut graph = compound();
        graph.set_parent("c", Some("b")).unwrap();
        graph.set_parent("b", Some("a")).unwrap();

        let error = graph.set_parent("a", Some("c")).unwrap_err();
        assert!(matches!(error, GraphError::ParentCycle { .. }));
        assert_eq!(graph.parent("a"), None);

        assert!(graph.set_parent("a", Some("a")).is_err());
        assert!(!graph.has_node("d"));
        assert!(graph.set_parent("", Some("d")).is_err());
        assert!(!graph.has_node("d"));
    }

    #[test]
    fn remove_node_detaches_relations() {
        let mut graph = compound();
        graph.set_parent("a", Some("b")).unwrap();
        graph.set_parent("b", Some("c")).unwrap();
        graph.remove_node("b");

        assert!(!graph.has_node("b"));
        assert_eq!(graph.parent("b"), None);
        assert_eq!(graph.children(Some("b")), None);
        assert_eq!(graph.children(Some("c")), Some(vec![]));
        assert_eq!(graph.parent("a"), None);
    }

    #[test]
    fn children_of_simple_graph() {
        let mut graph = Graph::<(), ()>::new();
        graph.set_edge("a", "b", None).unwrap();
        assert_eq!(graph.children(None), Some(vec!["a", "b"]));
        assert_eq!(graph.children(Some(crate::GRAPH_ROOT)), Some(vec!["a", "b"]));
        assert_eq!(graph.children(Some("a")), Some(vec![]));
        assert_eq!(graph.children(Some("x")), None);
        assert_eq!(graph.parent("a"), None);
    }

    #[test]
    fn filter_copies_values_and_edges() {
        let mut graph = Graph::<u32, u32>::new();
        graph.set_node_with("a", 123).unwrap();
        graph.set_path(["a", "b", "c"], None).unwrap();
        graph.set_edge("a", "c", 456).unwrap();

        let copy = graph.filter_nodes(|_| true);
        assert_eq!(copy, graph);
        assert_eq!(copy.node("a"), Some(&123));
        assert_eq!(copy.edge("a", "c"), Some(&456));

        let empty = graph.filter_nodes(|_| false);
        assert!(empty.is_empty());

        let only_a = graph.filter_nodes(|id| id == "a");
        assert!(only_a.nodes().eq(["a"]));
        assert_eq!(only_a.edge_count(), 0);
    }

    #[test]
    fn filter_calls_predicate_once_per_node() {
        let mut graph = compound();
        graph.set_path(["a", "b", "c"], None).unwrap();
        graph.set_parent("a", Some("p")).unwrap();

        let mut calls = 0;
        graph.filter_nodes(|_| {
            calls += 1;
            true
        });
        assert_eq!(calls, graph.node_count());
    }

    #[test]
    fn filter_preserves_options() {
        for options in [
            GraphOptions::default(),
            GraphOptions::undirected(),
            GraphOptions::default().with_multigraph(true),
            GraphOptions::default().with_compound(true),
        ] {
            let graph = Graph::<(), ()>::with_options(options);
            assert_eq!(graph.filter_nodes(|_| true).options(), options);
        }
    }

    #[test]
    fn filter_keeps_multi_level_subgraphs() {
        let mut graph = compound();
        graph.set_parent("a", Some("parent")).unwrap();
        graph.set_parent("parent", Some("root")).unwrap();

        let copy = graph.filter_nodes(|_| true);
        assert_eq!(copy.parent("a"), Some("parent"));
        assert_eq!(copy.parent("parent"), Some("root"));
        assert_eq!(copy, graph);
    }

    #[test]
    fn filter_promotes_to_nearest_kept_ancestor() {
        let mut graph = compound();
        graph.set_parent("a", Some("p1")).unwrap();
        graph.set_parent("b", Some("p1")).unwrap();
        graph.set_parent("p1", Some("p2")).unwrap();
        graph.set_parent("p2", Some("root")).unwrap();

        let copy = graph.filter_nodes(|id| !id.starts_with('p'));
        assert_eq!(copy.parent("a"), Some("root"));
        assert_eq!(copy.parent("b"), Some("root"));
        assert_eq!(sorted(copy.children(Some("root")).unwrap()), ["a", "b"]);

        let copy = graph.filter_nodes(|id| id != "root" && id != "p2");
        assert_eq!(copy.parent("a"), Some("p1"));
        assert_eq!(copy.parent("p1"), None);
    }
}
