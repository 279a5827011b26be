use tracing::debug;

use super::{tarjan, topsort};
use crate::Graph;

/// Whether the graph has no directed cycle, self-loops included.
pub fn is_acyclic<N, E>(graph: &Graph<N, E>) -> bool {
    topsort(graph).is_ok()
}

/// Strongly connected components that contain a cycle.
///
/// These are the components with more than one node plus the single nodes that
/// have a self-loop. The components are in the order returned by [`tarjan`].
///
/// # Example
///
/// ```
/// # use graphlib::{algorithms::find_cycles, Graph};
/// let mut graph = Graph::<(), ()>::new();
/// graph.set_path(["a", "b", "c"], None).unwrap();
/// graph.set_edge("c", "c", None).unwrap();
///
/// assert_eq!(find_cycles(&graph), [["c"]]);
/// ```
pub fn find_cycles<N, E>(graph: &Graph<N, E>) -> Vec<Vec<&str>> {
    let cycles: Vec<_> = tarjan(graph)
        .into_iter()
        .filter(|component| match component.as_slice() {
            [node] => graph.successors(node).any(|successor| successor == *node),
            _ => true,
        })
        .collect();

    debug!(cycles = cycles.len(), "found cycles");
    cycles
}
