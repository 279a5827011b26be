use bitvec::prelude::*;
use tracing::debug;

use super::predecessor_table;
use crate::error::CycleError;
use crate::Graph;

/// Orders the nodes so that every edge points from an earlier node to a later one.
///
/// The search starts at every sink in node order and walks the edges backwards,
/// emitting a node once all of its predecessors have been emitted.
///
/// # Errors
///
/// Fails with [`CycleError`] when the graph has a cycle. Self-loops count as
/// cycles.
///
/// # Example
///
/// ```
/// # use graphlib::{algorithms::topsort, Graph};
/// let mut graph = Graph::<(), ()>::new();
/// graph.set_path(["b", "c", "a"], None).unwrap();
/// assert_eq!(topsort(&graph).unwrap(), ["b", "c", "a"]);
///
/// graph.set_edge("a", "b", None).unwrap();
/// assert!(topsort(&graph).is_err());
/// ```
pub fn topsort<N, E>(graph: &Graph<N, E>) -> Result<Vec<&str>, CycleError> {
    let ids: Vec<&str> = graph.nodes().collect();
    let predecessors = predecessor_table(graph);

    let mut visited = bitvec![0; ids.len()];
    let mut on_stack = bitvec![0; ids.len()];
    let mut stack: Vec<(usize, usize)> = Vec::new();
    let mut order = Vec::with_capacity(ids.len());

    let sinks = graph
        .sinks()
        .into_iter()
        .filter_map(|sink| graph.node_index(sink));

    for sink in sinks {
        if visited[sink] {
            continue;
        }

        visited.set(sink, true);
        on_stack.set(sink, true);
        stack.push((sink, 0));

        while let Some((node, next)) = stack.last_mut() {
            let node = *node;

            let Some(&predecessor) = predecessors[node].get(*next) else {
                stack.pop();
                on_stack.set(node, false);
                order.push(ids[node]);
                continue;
            };
            *next += 1;

            if on_stack[predecessor] {
                debug!(node = ids[predecessor], "topological sort found a cycle");
                return Err(CycleError);
            }

            if !visited[predecessor] {
                visited.set(predecessor, true);
                on_stack.set(predecessor, true);
                stack.push((predecessor, 0));
            }
        }
    }

    // Cycles that can not reach a sink are never entered.
    if order.len() != ids.len() {
        debug!(
            nodes = ids.len(),
            sorted = order.len(),
            "topological sort did not reach every node"
        );
        return Err(CycleError);
    }

    Ok(order)
}
