use bitvec::prelude::*;
use tracing::debug;

use super::successor_table;
use crate::Graph;

/// Finds the strongly connected components of a graph using Tarjan's algorithm.
///
/// Every node belongs to exactly one component. A node that is not part of any
/// cycle forms a component on its own. Components are returned in the order in
/// which the depth-first search finishes them, which is a reverse topological
/// order of the condensed graph. Within a component the node that was entered
/// first comes last.
///
/// # Example
///
/// ```
/// # use graphlib::{algorithms::tarjan, Graph};
/// let mut graph = Graph::<(), ()>::new();
/// graph.set_path(["a", "b", "a"], None).unwrap();
/// graph.set_edge("b", "c", None).unwrap();
///
/// assert_eq!(tarjan(&graph), [vec!["c"], vec!["b", "a"]]);
/// ```
pub fn tarjan<N, E>(graph: &Graph<N, E>) -> Vec<Vec<&str>> {
    let ids: Vec<&str> = graph.nodes().collect();
    let mut search = Search::new(successor_table(graph));
    let mut components = Vec::new();

    for start in 0..ids.len() {
        if !search.visited[start] {
            search.run(start, &mut components);
        }
    }

    debug!(
        nodes = ids.len(),
        components = components.len(),
        "found strongly connected components"
    );

    components
        .into_iter()
        .map(|component| component.into_iter().map(|node| ids[node]).collect())
        .collect()
}

/// Simulated recursive call of the depth-first search.
#[derive(Debug, Clone, Copy)]
struct Frame {
    node: usize,
    /// Position of the next successor to look at.
    next: usize,
}

struct Search {
    successors: Vec<Vec<usize>>,
    index: Vec<usize>,
    low_link: Vec<usize>,
    visited: BitVec,
    on_stack: BitVec,
    counter: usize,
    /// Nodes of the current path that have not been assigned to a component.
    path: Vec<usize>,
    call_stack: Vec<Frame>,
}

impl Search {
    fn new(successors: Vec<Vec<usize>>) -> Self {
        let len = successors.len();

        Self {
            successors,
            index: vec![0; len],
            low_link: vec![0; len],
            visited: bitvec![0; len],
            on_stack: bitvec![0; len],
            counter: 0,
            path: Vec::with_capacity(32),
            call_stack: Vec::with_capacity(32),
        }
    }

    fn enter(&mut self, node: usize) {
        self.index[node] = self.counter;
        self.low_link[node] = self.counter;
        self.counter += 1;

        self.visited.set(node, true);
        self.on_stack.set(node, true);
        self.path.push(node);
        self.call_stack.push(Frame { node, next: 0 });
    }

    fn run(&mut self, start: usize, components: &mut Vec<Vec<usize>>) {
        self.enter(start);

        while let Some(frame) = self.call_stack.last_mut() {
            let node = frame.node;

            if let Some(&successor) = self.successors[node].get(frame.next) {
                frame.next += 1;

                if !self.visited[successor] {
                    self.enter(successor);
                } else if self.on_stack[successor] {
                    self.low_link[node] = self.low_link[node].min(self.index[successor]);
                }

                continue;
            }

            self.call_stack.pop();

            if let Some(caller) = self.call_stack.last() {
                self.low_link[caller.node] = self.low_link[caller.node].min(self.low_link[node]);
            }

            if self.low_link[node] == self.index[node] {
                let mut component = Vec::new();

                while let Some(member) = self.path.pop() {
                    self.on_stack.set(member, false);
                    component.push(member);

                    if member == node {
                        break;
                    }
                }

                components.push(component);
            }
        }
    }
}
