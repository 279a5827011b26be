use bitvec::prelude::*;
use tracing::debug;

use crate::{Graph, GraphOptions};

/// Splits a graph into its weakly connected components.
///
/// Two nodes belong to the same component when they are connected by a path
/// that ignores edge direction. Each component is returned as a separate graph
/// holding copies of its nodes with their values and of its edges with their
/// names and labels. The components keep the directedness and multigraph
/// setting of the input but are never compound.
///
/// Components are ordered by their first node in the input's node order and
/// their nodes follow a depth-first preorder from that node.
///
/// # Example
///
/// ```
/// # use graphlib::{algorithms::components, Graph};
/// let mut graph = Graph::<(), ()>::new();
/// graph.set_path(["a", "b"], None).unwrap();
/// graph.set_path(["c", "d"], None).unwrap();
///
/// let components = components(&graph);
/// assert_eq!(components.len(), 2);
/// assert!(components[1].nodes().eq(["c", "d"]));
/// ```
pub fn components<N, E>(graph: &Graph<N, E>) -> Vec<Graph<N, E>>
where
    N: Clone,
    E: Clone,
{
    let ids: Vec<&str> = graph.nodes().collect();
    let neighbours: Vec<Vec<usize>> = ids
        .iter()
        .map(|id| {
            graph
                .successors(id)
                .chain(graph.predecessors(id))
                .filter_map(|neighbour| graph.node_index(neighbour))
                .collect()
        })
        .collect();

    let options = GraphOptions {
        compound: false,
        ..graph.options()
    };

    let mut visited = bitvec![0; ids.len()];
    let mut stack: Vec<(usize, usize)> = Vec::new();
    let mut components = Vec::new();

    for start in 0..ids.len() {
        if visited[start] {
            continue;
        }

        visited.set(start, true);
        let mut members = vec![start];
        stack.push((start, 0));

        while let Some((node, next)) = stack.last_mut() {
            let node = *node;

            let Some(&neighbour) = neighbours[node].get(*next) else {
                stack.pop();
                continue;
            };
            *next += 1;

            if !visited[neighbour] {
                visited.set(neighbour, true);
                members.push(neighbour);
                stack.push((neighbour, 0));
            }
        }

        components.push(extract(graph, options, members.iter().map(|&node| ids[node])));
    }

    debug!(
        nodes = ids.len(),
        components = components.len(),
        "found weakly connected components"
    );

    components
}

/// Copies the given nodes and the edges leaving them into a new graph.
fn extract<'a, N, E>(
    graph: &'a Graph<N, E>,
    options: GraphOptions,
    members: impl Iterator<Item = &'a str> + Clone,
) -> Graph<N, E>
where
    N: Clone,
    E: Clone,
{
    let mut component = Graph::with_options(options);

    for id in members.clone() {
        component.insert_node(id, graph.node(id).cloned(), true);
    }

    for id in members {
        for edge in graph.out_edges(id, None) {
            component.link_edge(edge.clone(), graph.edge_label(edge).cloned());
        }
    }

    component
}
