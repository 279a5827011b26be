//! The graph container.
//!
//! Nodes are identified by strings and carry an optional user value. Edges are
//! identified by their canonical [`Edge`] descriptor and carry an optional label.
//! Every node keeps its incoming and outgoing edges together with the number of
//! parallel edges to each neighbour, so that neighbour queries stay cheap in
//! multigraphs.
use std::iter::FusedIterator;

use indexmap::{map::Keys, IndexMap, IndexSet};
use tracing::trace;

use crate::counter::Counter;
use crate::edge::Edge;
use crate::error::GraphError;
use crate::forest::Forest;
use crate::options::GraphOptions;
use crate::GRAPH_ROOT;

mod compound;

#[cfg(test)]
mod proptests;

/// Per-node storage.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Node<N> {
    /// Associated node value.
    value: Option<N>,
    /// Edges whose canonical target is this node.
    incoming: IndexSet<Edge>,
    /// Edges whose canonical source is this node.
    outgoing: IndexSet<Edge>,
    /// Number of edges from each predecessor.
    predecessors: Counter,
    /// Number of edges to each successor.
    successors: Counter,
}

impl<N> Node<N> {
    fn new(value: Option<N>) -> Self {
        Self {
            value,
            incoming: IndexSet::new(),
            outgoing: IndexSet::new(),
            predecessors: Counter::new(),
            successors: Counter::new(),
        }
    }
}

/// A directed or undirected multigraph with optional compound nodes.
///
/// # Example
///
/// ```
/// # use graphlib::{Graph, GraphOptions};
/// let mut graph = Graph::<&str, u32>::with_options(GraphOptions::default().with_multigraph(true));
///
/// graph.set_node_with("a", "start").unwrap();
/// graph.set_edge("a", "b", 1).unwrap();
/// graph.set_named_edge("a", "b", "fast", 2).unwrap();
///
/// assert_eq!(graph.node("a"), Some(&"start"));
/// assert_eq!(graph.edge_count(), 2);
/// assert_eq!(graph.named_edge("a", "b", "fast"), Some(&2));
/// assert!(graph.successors("a").eq(["b"]));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Graph<N, E> {
    options: GraphOptions,
    nodes: IndexMap<String, Node<N>>,
    edges: IndexMap<Edge, Option<E>>,
    /// Parent/child tree, present exactly when the graph is compound.
    forest: Option<Forest>,
}

impl<N, E> Default for Graph<N, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N, E> Graph<N, E> {
    /// Create a new empty simple directed graph.
    pub fn new() -> Self {
        Self::with_options(GraphOptions::default())
    }

    /// Create a new empty graph with the given options.
    pub fn with_options(options: GraphOptions) -> Self {
        Self::with_capacity(options, 0, 0)
    }

    /// Create a new empty graph with preallocated capacities for nodes and edges.
    pub fn with_capacity(options: GraphOptions, nodes: usize, edges: usize) -> Self {
        Self {
            options,
            nodes: IndexMap::with_capacity(nodes),
            edges: IndexMap::with_capacity(edges),
            forest: options.compound.then(Forest::new),
        }
    }

    #[inline]
    pub fn options(&self) -> GraphOptions {
        self.options
    }

    #[inline]
    pub fn is_directed(&self) -> bool {
        self.options.directed
    }

    #[inline]
    pub fn is_multigraph(&self) -> bool {
        self.options.multigraph
    }

    #[inline]
    pub fn is_compound(&self) -> bool {
        self.options.compound
    }

    /// Changes whether the graph is directed.
    ///
    /// # Errors
    ///
    /// Existing edges are keyed by the current setting, so the option can only
    /// change while the graph is empty.
    pub fn set_directed(&mut self, directed: bool) -> Result<(), GraphError> {
        self.update_options("directed", self.options.with_directed(directed))
    }

    /// Changes whether the graph allows named parallel edges.
    ///
    /// # Errors
    ///
    /// The option can only change while the graph is empty.
    pub fn set_multigraph(&mut self, multigraph: bool) -> Result<(), GraphError> {
        self.update_options("multigraph", self.options.with_multigraph(multigraph))
    }

    /// Changes whether the graph has compound nodes.
    ///
    /// # Errors
    ///
    /// The option can only change while the graph is empty.
    pub fn set_compound(&mut self, compound: bool) -> Result<(), GraphError> {
        self.update_options("compound", self.options.with_compound(compound))
    }

    fn update_options(
        &mut self,
        option: &'static str,
        options: GraphOptions,
    ) -> Result<(), GraphError> {
        if options == self.options {
            return Ok(());
        } else if !self.is_empty() {
            return Err(GraphError::OptionsLocked { option });
        }

        self.options = options;
        self.forest = options.compound.then(Forest::new);
        Ok(())
    }

    /// Number of nodes in the graph.
    #[inline]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of edges in the graph.
    #[inline]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Whether the graph has neither nodes nor edges.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }

    /// Iterator over the node ids of the graph.
    ///
    /// Nodes are visited in insertion order, except that removing a node moves
    /// the last node into its place.
    ///
    /// # Example
    ///
    /// ```
    /// # use graphlib::Graph;
    /// let mut graph = Graph::<(), ()>::new();
    /// graph.set_nodes(["a", "b", "c", "d"]).unwrap();
    /// graph.remove_node("b");
    ///
    /// assert!(graph.nodes().eq(["a", "d", "c"]));
    /// ```
    #[inline]
    pub fn nodes(&self) -> Nodes<'_, N> {
        Nodes(self.nodes.keys())
    }

    /// Iterator over the node ids together with their values.
    pub fn node_values(&self) -> impl Iterator<Item = (&str, Option<&N>)> + '_ {
        self.nodes
            .iter()
            .map(|(id, node)| (id.as_str(), node.value.as_ref()))
    }

    /// Returns true if the graph has a node with the id.
    #[inline]
    pub fn has_node(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    /// A reference to the value of a node.
    ///
    /// Returns `None` if the node does not exist or has no value.
    #[inline]
    pub fn node(&self, id: &str) -> Option<&N> {
        self.nodes.get(id)?.value.as_ref()
    }

    /// A mutable reference to the value of a node.
    #[inline]
    pub fn node_mut(&mut self, id: &str) -> Option<&mut N> {
        self.nodes.get_mut(id)?.value.as_mut()
    }

    /// Nodes without incoming edges.
    pub fn sources(&self) -> Vec<&str> {
        self.nodes
            .iter()
            .filter(|(_, node)| node.incoming.is_empty())
            .map(|(id, _)| id.as_str())
            .collect()
    }

    /// Nodes without outgoing edges.
    pub fn sinks(&self) -> Vec<&str> {
        self.nodes
            .iter()
            .filter(|(_, node)| node.outgoing.is_empty())
            .map(|(id, _)| id.as_str())
            .collect()
    }

    /// Creates the node if it does not exist yet.
    ///
    /// The value of an existing node is left untouched.
    ///
    /// # Errors
    ///
    /// Fails when the id is empty or reserved.
    pub fn set_node(&mut self, id: &str) -> Result<&mut Self, GraphError> {
        validate_id(id)?;
        self.insert_node(id, None, false);
        Ok(self)
    }

    /// Creates the node or replaces its value.
    ///
    /// Passing `None` clears the value of an existing node.
    ///
    /// # Example
    ///
    /// ```
    /// # use graphlib::Graph;
    /// let mut graph = Graph::<&str, ()>::new();
    /// graph.set_node_with("a", "foo").unwrap();
    /// graph.set_node("a").unwrap();
    /// assert_eq!(graph.node("a"), Some(&"foo"));
    ///
    /// graph.set_node_with("a", None).unwrap();
    /// assert_eq!(graph.node("a"), None);
    /// assert!(graph.has_node("a"));
    /// ```
    pub fn set_node_with(
        &mut self,
        id: &str,
        value: impl Into<Option<N>>,
    ) -> Result<&mut Self, GraphError> {
        validate_id(id)?;
        self.insert_node(id, value.into(), true);
        Ok(self)
    }

    /// Creates every node that does not exist yet.
    ///
    /// # Errors
    ///
    /// Fails without creating any node when one of the ids is invalid.
    pub fn set_nodes<I>(&mut self, ids: I) -> Result<&mut Self, GraphError>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let ids = validated(ids)?;
        for id in &ids {
            self.insert_node(id.as_ref(), None, false);
        }
        Ok(self)
    }

    /// Creates the nodes or replaces their values with a copy of `value`.
    pub fn set_nodes_with<I>(
        &mut self,
        ids: I,
        value: impl Into<Option<N>>,
    ) -> Result<&mut Self, GraphError>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
        N: Clone,
    {
        let ids = validated(ids)?;
        let value = value.into();
        for id in &ids {
            self.insert_node(id.as_ref(), value.clone(), true);
        }
        Ok(self)
    }

    /// Inserts a node that is known to have a valid id.
    pub(crate) fn insert_node(&mut self, id: &str, value: Option<N>, replace: bool) {
        if let Some(node) = self.nodes.get_mut(id) {
            if replace {
                node.value = value;
            }
            return;
        }

        self.nodes.insert(id.to_owned(), Node::new(value));

        if let Some(forest) = &mut self.forest {
            forest.insert(id);
        }

        trace!(node = id, "inserted node");
    }

    /// Removes the node together with its incident edges.
    ///
    /// In a compound graph the children of the node are moved to the root.
    /// Returns whether the node existed.
    ///
    /// # Example
    ///
    /// ```
    /// # use graphlib::Graph;
    /// let mut graph = Graph::<(), ()>::new();
    /// graph.set_path(["a", "b", "c"], None).unwrap();
    ///
    /// assert!(graph.remove_node("b"));
    /// assert!(!graph.remove_node("b"));
    /// assert_eq!(graph.edge_count(), 0);
    /// ```
    pub fn remove_node(&mut self, id: &str) -> bool {
        let Some(node) = self.nodes.get(id) else {
            return false;
        };

        let incident: Vec<Edge> = node
            .incoming
            .iter()
            .chain(&node.outgoing)
            .cloned()
            .collect();

        if let Some(forest) = &mut self.forest {
            forest.remove(id);
        }

        for edge in &incident {
            self.unlink_edge(edge);
        }

        self.nodes.swap_remove(id);
        trace!(node = id, edges = incident.len(), "removed node");
        true
    }

    /// Iterator over the edges of the graph.
    #[inline]
    pub fn edges(&self) -> Edges<'_, E> {
        Edges(self.edges.keys())
    }

    /// Iterator over the edges together with their labels.
    pub fn edge_labels(&self) -> impl Iterator<Item = (&Edge, Option<&E>)> + '_ {
        self.edges.iter().map(|(edge, label)| (edge, label.as_ref()))
    }

    /// Creates an unnamed edge or replaces its label.
    ///
    /// Missing endpoints are created without a value.
    pub fn set_edge(
        &mut self,
        source: &str,
        target: &str,
        label: impl Into<Option<E>>,
    ) -> Result<&mut Self, GraphError> {
        self.insert_edge(source, target, None, label.into())
    }

    /// Creates a named edge or replaces its label.
    ///
    /// # Errors
    ///
    /// Fails with [`GraphError::NamedEdgeInSimpleGraph`] when the name is not
    /// empty and the graph is not a multigraph.
    pub fn set_named_edge(
        &mut self,
        source: &str,
        target: &str,
        name: &str,
        label: impl Into<Option<E>>,
    ) -> Result<&mut Self, GraphError> {
        self.insert_edge(source, target, Some(name), label.into())
    }

    /// Creates the edge described by `edge` or replaces its label.
    pub fn set_edge_from(
        &mut self,
        edge: &Edge,
        label: impl Into<Option<E>>,
    ) -> Result<&mut Self, GraphError> {
        self.insert_edge(edge.source(), edge.target(), edge.name(), label.into())
    }

    fn insert_edge(
        &mut self,
        source: &str,
        target: &str,
        name: Option<&str>,
        label: Option<E>,
    ) -> Result<&mut Self, GraphError> {
        validate_id(source)?;
        validate_id(target)?;

        let edge = self.edge_key(source, target, name);

        if let Some(slot) = self.edges.get_mut(&edge) {
            *slot = label;
            return Ok(self);
        }

        if edge.name().is_some() && !self.options.multigraph {
            return Err(GraphError::NamedEdgeInSimpleGraph);
        }

        self.link_edge(edge, label);
        Ok(self)
    }

    /// Inserts an edge in canonical form, creating missing endpoints.
    ///
    /// Replaces the label when the edge already exists.
    pub(crate) fn link_edge(&mut self, edge: Edge, label: Option<E>) {
        if let Some(slot) = self.edges.get_mut(&edge) {
            *slot = label;
            return;
        }

        self.insert_node(edge.source(), None, false);
        self.insert_node(edge.target(), None, false);

        if let Some(target) = self.nodes.get_mut(edge.target()) {
            target.incoming.insert(edge.clone());
            target.predecessors.increment(edge.source());
        }

        if let Some(source) = self.nodes.get_mut(edge.source()) {
            source.outgoing.insert(edge.clone());
            source.successors.increment(edge.target());
        }

        trace!(edge = %edge, "inserted edge");
        self.edges.insert(edge, label);
    }

    /// Removes an edge in canonical form, returning whether it existed.
    fn unlink_edge(&mut self, edge: &Edge) -> bool {
        if self.edges.swap_remove(edge).is_none() {
            return false;
        }

        if let Some(target) = self.nodes.get_mut(edge.target()) {
            target.incoming.swap_remove(edge);
            target.predecessors.decrement(edge.source());
        }

        if let Some(source) = self.nodes.get_mut(edge.source()) {
            source.outgoing.swap_remove(edge);
            source.successors.decrement(edge.target());
        }

        trace!(edge = %edge, "removed edge");
        true
    }

    #[inline]
    fn edge_key(&self, source: &str, target: &str, name: Option<&str>) -> Edge {
        Edge::canonical(self.options.directed, source, target, name)
    }

    /// Returns true if the graph has an unnamed edge between the nodes.
    ///
    /// In an undirected graph the order of the endpoints does not matter.
    #[inline]
    pub fn has_edge(&self, source: &str, target: &str) -> bool {
        self.edges.contains_key(&self.edge_key(source, target, None))
    }

    /// Returns true if the graph has an edge with the given name between the nodes.
    #[inline]
    pub fn has_named_edge(&self, source: &str, target: &str, name: &str) -> bool {
        self.edges
            .contains_key(&self.edge_key(source, target, Some(name)))
    }

    /// Returns true if the graph contains the edge described by `edge`.
    #[inline]
    pub fn contains_edge(&self, edge: &Edge) -> bool {
        self.edges
            .contains_key(&edge.canonicalize(self.options.directed))
    }

    /// A reference to the label of an unnamed edge.
    ///
    /// Returns `None` if the edge does not exist or has no label.
    #[inline]
    pub fn edge(&self, source: &str, target: &str) -> Option<&E> {
        self.edges
            .get(&self.edge_key(source, target, None))?
            .as_ref()
    }

    /// A reference to the label of a named edge.
    #[inline]
    pub fn named_edge(&self, source: &str, target: &str, name: &str) -> Option<&E> {
        self.edges
            .get(&self.edge_key(source, target, Some(name)))?
            .as_ref()
    }

    /// A reference to the label of the edge described by `edge`.
    #[inline]
    pub fn edge_label(&self, edge: &Edge) -> Option<&E> {
        self.edges
            .get(&edge.canonicalize(self.options.directed))?
            .as_ref()
    }

    /// A mutable reference to the label of the edge described by `edge`.
    #[inline]
    pub fn edge_label_mut(&mut self, edge: &Edge) -> Option<&mut E> {
        let key = edge.canonicalize(self.options.directed);
        self.edges.get_mut(&key)?.as_mut()
    }

    /// Removes an unnamed edge, returning whether it existed.
    pub fn remove_edge(&mut self, source: &str, target: &str) -> bool {
        let edge = self.edge_key(source, target, None);
        self.unlink_edge(&edge)
    }

    /// Removes a named edge, returning whether it existed.
    pub fn remove_named_edge(&mut self, source: &str, target: &str, name: &str) -> bool {
        let edge = self.edge_key(source, target, Some(name));
        self.unlink_edge(&edge)
    }

    /// Removes the edge described by `edge`, returning whether it existed.
    pub fn remove_edge_from(&mut self, edge: &Edge) -> bool {
        let edge = edge.canonicalize(self.options.directed);
        self.unlink_edge(&edge)
    }

    /// Connects each consecutive pair of nodes in `ids` with an unnamed edge.
    ///
    /// Every edge receives a copy of `label`. Fewer than two ids add nothing.
    ///
    /// # Errors
    ///
    /// Fails without modifying the graph when one of the ids is invalid.
    ///
    /// # Example
    ///
    /// ```
    /// # use graphlib::Graph;
    /// let mut graph = Graph::<(), &str>::new();
    /// graph.set_path(["a", "b", "c"], "next").unwrap();
    ///
    /// assert_eq!(graph.edge_count(), 2);
    /// assert_eq!(graph.edge("b", "c"), Some(&"next"));
    /// ```
    pub fn set_path<I>(
        &mut self,
        ids: I,
        label: impl Into<Option<E>>,
    ) -> Result<&mut Self, GraphError>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
        E: Clone,
    {
        let ids = validated(ids)?;
        let label = label.into();

        for pair in ids.windows(2) {
            self.set_edge(pair[0].as_ref(), pair[1].as_ref(), label.clone())?;
        }

        Ok(self)
    }

    /// Edges that point to `node`, optionally only those coming from `source`.
    ///
    /// Unknown nodes have no edges.
    pub fn in_edges<'a>(
        &'a self,
        node: &str,
        source: Option<&'a str>,
    ) -> impl Iterator<Item = &'a Edge> + 'a {
        self.nodes
            .get(node)
            .into_iter()
            .flat_map(|node| node.incoming.iter())
            .filter(move |edge| source.map_or(true, |source| edge.source() == source))
    }

    /// Edges that leave `node`, optionally only those going to `target`.
    ///
    /// Unknown nodes have no edges.
    pub fn out_edges<'a>(
        &'a self,
        node: &str,
        target: Option<&'a str>,
    ) -> impl Iterator<Item = &'a Edge> + 'a {
        self.nodes
            .get(node)
            .into_iter()
            .flat_map(|node| node.outgoing.iter())
            .filter(move |edge| target.map_or(true, |target| edge.target() == target))
    }

    /// Edges incident to `node` regardless of direction, optionally only those
    /// that connect it to `other`.
    ///
    /// Every edge is reported once, loops included.
    pub fn node_edges<'a>(
        &'a self,
        node: &str,
        other: Option<&'a str>,
    ) -> impl Iterator<Item = &'a Edge> + 'a {
        let outgoing = self.out_edges(node, other).filter(|edge| !edge.is_loop());
        self.in_edges(node, other).chain(outgoing)
    }

    /// Distinct nodes with an edge into `node`.
    pub fn predecessors<'a>(&'a self, node: &str) -> impl Iterator<Item = &'a str> + 'a {
        self.nodes
            .get(node)
            .into_iter()
            .flat_map(|node| node.predecessors.keys())
            .map(String::as_str)
    }

    /// Distinct nodes with an edge from `node`.
    pub fn successors<'a>(&'a self, node: &str) -> impl Iterator<Item = &'a str> + 'a {
        self.nodes
            .get(node)
            .into_iter()
            .flat_map(|node| node.successors.keys())
            .map(String::as_str)
    }

    /// Distinct predecessors and successors of `node`.
    ///
    /// # Example
    ///
    /// ```
    /// # use graphlib::Graph;
    /// let mut graph = Graph::<(), ()>::new();
    /// graph.set_path(["a", "b", "c", "a"], None).unwrap();
    /// graph.set_edge("b", "a", None).unwrap();
    ///
    /// let mut neighbors: Vec<_> = graph.neighbors("a").collect();
    /// neighbors.sort();
    /// assert_eq!(neighbors, ["b", "c"]);
    /// ```
    pub fn neighbors<'a>(&'a self, node: &str) -> impl Iterator<Item = &'a str> + 'a {
        self.nodes
            .get(node)
            .into_iter()
            .flat_map(|node| {
                let successors = node
                    .successors
                    .keys()
                    .filter(move |successor| !node.predecessors.contains(successor));
                node.predecessors.keys().chain(successors)
            })
            .map(String::as_str)
    }

    /// Whether the node has no successors, or no neighbours in an undirected graph.
    pub fn is_leaf(&self, node: &str) -> bool {
        if self.options.directed {
            self.successors(node).next().is_none()
        } else {
            self.neighbors(node).next().is_none()
        }
    }

    /// Position of a node in iteration order.
    #[inline]
    pub(crate) fn node_index(&self, id: &str) -> Option<usize> {
        self.nodes.get_index_of(id)
    }
}

/// Checks that `id` can be used as a node identifier.
pub(crate) fn validate_id(id: &str) -> Result<(), GraphError> {
    if id.is_empty() {
        Err(GraphError::EmptyNodeId)
    } else if id == GRAPH_ROOT {
        Err(GraphError::ReservedNodeId(id.to_owned()))
    } else {
        Ok(())
    }
}

/// Validates every id before anything is inserted.
fn validated<I>(ids: I) -> Result<Vec<I::Item>, GraphError>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let ids: Vec<I::Item> = ids.into_iter().collect();
    for id in &ids {
        validate_id(id.as_ref())?;
    }
    Ok(ids)
}

/// Iterator created by [`Graph::nodes`].
pub struct Nodes<'a, N>(Keys<'a, String, Node<N>>);

impl<'a, N> Iterator for Nodes<'a, N> {
    type Item = &'a str;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(String::as_str)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl<'a, N> ExactSizeIterator for Nodes<'a, N> {}
impl<'a, N> FusedIterator for Nodes<'a, N> {}

/// Iterator created by [`Graph::edges`].
pub struct Edges<'a, E>(Keys<'a, Edge, Option<E>>);

impl<'a, E> Iterator for Edges<'a, E> {
    type Item = &'a Edge;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.0.next()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl<'a, E> ExactSizeIterator for Edges<'a, E> {}
impl<'a, E> FusedIterator for Edges<'a, E> {}
