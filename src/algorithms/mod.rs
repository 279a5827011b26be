//! Graph algorithms.
//!
//! All traversals run on explicit work stacks over the positions of the nodes
//! in [`Graph::nodes`], so deep graphs do not exhaust the call stack. They
//! visit nodes and neighbours in the graph's iteration order, which makes the
//! results deterministic for a given sequence of mutations.
mod components;
mod cycles;
mod tarjan;
mod topsort;

pub use components::components;
pub use cycles::{find_cycles, is_acyclic};
pub use tarjan::tarjan;
pub use topsort::topsort;

pub use crate::error::CycleError;

use crate::Graph;

/// Positions of the successors of every node.
fn successor_table<N, E>(graph: &Graph<N, E>) -> Vec<Vec<usize>> {
    graph
        .nodes()
        .map(|id| {
            graph
                .successors(id)
                .filter_map(|successor| graph.node_index(successor))
                .collect()
        })
        .collect()
}

/// Positions of the predecessors of every node.
fn predecessor_table<N, E>(graph: &Graph<N, E>) -> Vec<Vec<usize>> {
    graph
        .nodes()
        .map(|id| {
            graph
                .predecessors(id)
                .filter_map(|predecessor| graph.node_index(predecessor))
                .collect()
        })
        .collect()
}

impl<N, E> Graph<N, E> {
    /// Strongly connected components, see [`tarjan`].
    #[inline]
    pub fn tarjan(&self) -> Vec<Vec<&str>> {
        tarjan(self)
    }

    /// Weakly connected components, see [`components`].
    #[inline]
    pub fn components(&self) -> Vec<Graph<N, E>>
    where
        N: Clone,
        E: Clone,
    {
        components(self)
    }

    /// Topological order of the nodes, see [`topsort`].
    #[inline]
    pub fn topsort(&self) -> Result<Vec<&str>, CycleError> {
        topsort(self)
    }

    /// Whether the graph has no cycles, see [`is_acyclic`].
    #[inline]
    pub fn is_acyclic(&self) -> bool {
        is_acyclic(self)
    }

    /// Strongly connected components that contain a cycle, see [`find_cycles`].
    #[inline]
    pub fn find_cycles(&self) -> Vec<Vec<&str>> {
        find_cycles(self)
    }
}
