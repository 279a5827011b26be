//! Structural options of a graph.

/// Flags that determine how a [`Graph`] interprets its edges and nodes.
///
/// [`Graph`]: crate::Graph
///
/// # Example
///
/// ```
/// # use graphlib::GraphOptions;
/// let options = GraphOptions::undirected().with_multigraph(true);
/// assert!(!options.directed);
/// assert!(options.multigraph);
/// assert!(!options.compound);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GraphOptions {
    /// Whether the order of an edge's endpoints is significant.
    pub directed: bool,
    /// Whether several edges may connect the same pair of nodes, distinguished by name.
    pub multigraph: bool,
    /// Whether nodes can be the parent of other nodes.
    pub compound: bool,
}

impl GraphOptions {
    /// Options for a simple directed graph.
    pub const fn directed() -> Self {
        Self {
            directed: true,
            multigraph: false,
            compound: false,
        }
    }

    /// Options for a simple undirected graph.
    pub const fn undirected() -> Self {
        Self {
            directed: false,
            multigraph: false,
            compound: false,
        }
    }

    #[inline]
    pub const fn with_directed(mut self, directed: bool) -> Self {
        self.directed = directed;
        self
    }

    #[inline]
    pub const fn with_multigraph(mut self, multigraph: bool) -> Self {
        self.multigraph = multigraph;
        self
    }

    #[inline]
    pub const fn with_compound(mut self, compound: bool) -> Self {
        self.compound = compound;
        self
    }
}

impl Default for GraphOptions {
    fn default() -> Self {
        Self::directed()
    }
}
