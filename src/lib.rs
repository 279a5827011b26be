//! Directed multigraphs with string node identifiers and optional compound nodes.
//!
//! A [`Graph`] stores user values on nodes and labels on edges. Depending on its
//! [`GraphOptions`] it is directed or undirected, allows parallel edges
//! distinguished by a name, and may arrange its nodes in a parent/child tree.
//!
//! ```
//! # use graphlib::Graph;
//! let mut graph = Graph::<(), ()>::new();
//! graph.set_path(["a", "b", "c"], None).unwrap();
//!
//! assert_eq!(graph.node_count(), 3);
//! assert_eq!(graph.topsort().unwrap(), ["a", "b", "c"]);
//! assert!(graph.find_cycles().is_empty());
//! ```
//!
//! The [`algorithms`] module contains strongly and weakly connected components
//! and topological sorting.
pub mod algorithms;
mod counter;
pub mod edge;
pub mod error;
mod forest;
pub mod graph;
pub mod options;

pub use algorithms::CycleError;
pub use edge::Edge;
pub use error::{ErrorKind, GraphError};
pub use graph::Graph;
pub use options::GraphOptions;

/// Identifier of the synthetic root of the compound tree.
///
/// Node ids equal to this sentinel are rejected by every mutator.
pub const GRAPH_ROOT: &str = "\u{0}";

/// Name used in the edge key string form for edges without a name.
pub const DEFAULT_EDGE_NAME: &str = "\u{0}";

/// Delimiter between the components of an edge key string.
pub const EDGE_KEY_DELIM: &str = "\u{1}";
