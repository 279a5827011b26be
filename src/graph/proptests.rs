use proptest::prelude::*;

use crate::{Graph, GraphOptions};

const NODES: u8 = 8;

#[derive(Debug, Clone)]
enum Op {
    SetNode(u8, Option<u8>),
    RemoveNode(u8),
    SetEdge(u8, u8, Option<u8>),
    RemoveEdge(u8, u8, Option<u8>),
    SetParent(u8, Option<u8>),
}

fn id(node: u8) -> String {
    format!("n{node}")
}

fn name(name: Option<u8>) -> String {
    name.map(|name| format!("e{name}")).unwrap_or_default()
}

fn options() -> impl Strategy<Value = GraphOptions> {
    any::<(bool, bool, bool)>().prop_map(|(directed, multigraph, compound)| GraphOptions {
        directed,
        multigraph,
        compound,
    })
}

fn op() -> impl Strategy<Value = Op> {
    let node = 0..NODES;

    prop_oneof![
        (node.clone(), any::<Option<u8>>()).prop_map(|(node, value)| Op::SetNode(node, value)),
        node.clone().prop_map(Op::RemoveNode),
        (node.clone(), node.clone(), proptest::option::of(0..2u8))
            .prop_map(|(source, target, name)| Op::SetEdge(source, target, name)),
        (node.clone(), node.clone(), proptest::option::of(0..2u8))
            .prop_map(|(source, target, name)| Op::RemoveEdge(source, target, name)),
        (node.clone(), proptest::option::of(node))
            .prop_map(|(node, parent)| Op::SetParent(node, parent)),
    ]
}

/// Applies an operation, checking that a failed mutation leaves the graph untouched.
fn apply(graph: &mut Graph<u8, u8>, op: &Op) {
    let before = graph.clone();

    let result = match *op {
        Op::SetNode(node, value) => graph.set_node_with(&id(node), value).map(drop),
        Op::RemoveNode(node) => {
            graph.remove_node(&id(node));
            Ok(())
        }
        Op::SetEdge(source, target, label) => graph
            .set_named_edge(&id(source), &id(target), &name(label), label)
            .map(drop),
        Op::RemoveEdge(source, target, label) => {
            graph.remove_named_edge(&id(source), &id(target), &name(label));
            Ok(())
        }
        Op::SetParent(node, parent) => {
            let parent = parent.map(id);
            graph.set_parent(&id(node), parent.as_deref()).map(drop)
        }
    };

    if result.is_err() {
        assert_eq!(*graph, before);
    }
}

fn build(options: GraphOptions, ops: &[Op]) -> Graph<u8, u8> {
    let mut graph = Graph::with_options(options);
    for op in ops {
        apply(&mut graph, op);
    }
    graph
}

fn check_structure(graph: &Graph<u8, u8>) {
    assert_eq!(graph.nodes().count(), graph.node_count());
    assert_eq!(graph.edges().count(), graph.edge_count());

    for edge in graph.edges() {
        assert!(graph.has_node(edge.source()));
        assert!(graph.has_node(edge.target()));
        assert!(graph.out_edges(edge.source(), None).any(|other| other == edge));
        assert!(graph.in_edges(edge.target(), None).any(|other| other == edge));
        assert!(graph.contains_edge(edge));
    }

    for node in graph.nodes() {
        let out_edges = graph.out_edges(node, None).count();
        let in_edges = graph.in_edges(node, None).count();
        let incident = graph
            .edges()
            .filter(|edge| edge.source() == node || edge.target() == node)
            .count();
        assert_eq!(graph.node_edges(node, None).count(), incident);
        assert!(out_edges + in_edges >= incident);

        for successor in graph.successors(node) {
            assert!(graph.out_edges(node, Some(successor)).next().is_some());
        }

        for edge in graph.out_edges(node, None) {
            assert!(graph.successors(node).any(|successor| successor == edge.target()));
        }

        for edge in graph.in_edges(node, None) {
            assert!(graph.predecessors(node).any(|predecessor| predecessor == edge.source()));
        }
    }

    check_multiplicities(graph);

    if !graph.is_directed() {
        for a in graph.nodes() {
            for b in graph.nodes() {
                assert_eq!(graph.has_edge(a, b), graph.has_edge(b, a));
            }
        }
    }

    if graph.is_compound() {
        for node in graph.nodes() {
            if let Some(parent) = graph.parent(node) {
                assert!(graph.children(Some(parent)).unwrap().contains(&node));
            }

            let mut current = graph.parent(node);
            let mut steps = 0;

            while let Some(parent) = current {
                assert!(graph.has_node(parent));
                steps += 1;
                assert!(steps <= graph.node_count(), "parent cycle through {node}");
                current = graph.parent(parent);
            }
        }
    }
}

/// Removes the parallel edges between every connected pair one at a time and
/// checks that the pair stays adjacent exactly until the last one is gone.
fn check_multiplicities(graph: &Graph<u8, u8>) {
    for source in graph.nodes() {
        for target in graph.successors(source) {
            let parallel: Vec<_> = graph.out_edges(source, Some(target)).cloned().collect();
            assert!(!parallel.is_empty());

            let mut thinned = graph.clone();
            for (removed, edge) in parallel.iter().enumerate() {
                let remaining = parallel.len() - removed - 1;
                assert!(thinned.remove_edge_from(edge));

                assert_eq!(thinned.out_edges(source, Some(target)).count(), remaining);
                assert_eq!(
                    thinned.successors(source).any(|other| other == target),
                    remaining > 0
                );
                assert_eq!(
                    thinned.predecessors(target).any(|other| other == source),
                    remaining > 0
                );
            }
        }
    }
}

proptest! {
    #[test]
    fn mutations_keep_structure(options in options(), ops in prop::collection::vec(op(), 0..64)) {
        let graph = build(options, &ops);
        check_structure(&graph);
    }

    #[test]
    fn removed_node_leaves_no_trace(
        options in options(),
        ops in prop::collection::vec(op(), 0..64),
        removed in 0..NODES,
    ) {
        let mut graph = build(options, &ops);
        let removed = id(removed);
        graph.remove_node(&removed);

        prop_assert!(!graph.has_node(&removed));
        prop_assert!(graph.edges().all(|edge| edge.opposite(&removed).is_none()));
        for node in graph.nodes() {
            prop_assert!(graph.neighbors(node).all(|neighbor| neighbor != removed));
            if graph.is_compound() {
                prop_assert_ne!(graph.parent(node), Some(removed.as_str()));
            }
        }
        check_structure(&graph);
    }

    #[test]
    fn repeated_mutations_are_idempotent(
        options in options(),
        ops in prop::collection::vec(op(), 0..64),
    ) {
        let mut graph = build(options, &ops);
        for op in &ops {
            let mut once = graph.clone();
            apply(&mut once, op);
            let mut twice = once.clone();
            apply(&mut twice, op);
            prop_assert_eq!(&once, &twice);
            graph = once;
        }
    }

    #[test]
    fn filtering_everything_copies(
        options in options(),
        ops in prop::collection::vec(op(), 0..64),
    ) {
        let graph = build(options, &ops);
        prop_assert_eq!(graph.filter_nodes(|_| true), graph.clone());

        let empty = graph.filter_nodes(|_| false);
        prop_assert!(empty.is_empty());
        prop_assert_eq!(empty.options(), graph.options());
    }

    #[test]
    fn algorithms_agree(options in options(), ops in prop::collection::vec(op(), 0..64)) {
        let graph = build(options, &ops);

        let components = graph.tarjan();
        prop_assert_eq!(components.iter().map(Vec::len).sum::<usize>(), graph.node_count());
        prop_assert_eq!(graph.is_acyclic(), graph.find_cycles().is_empty());

        let weak = graph.components();
        prop_assert_eq!(weak.iter().map(Graph::node_count).sum::<usize>(), graph.node_count());
        prop_assert_eq!(weak.iter().map(Graph::edge_count).sum::<usize>(), graph.edge_count());

        if let Ok(order) = graph.topsort() {
            prop_assert_eq!(order.len(), graph.node_count());
            let position = |node: &str| order.iter().position(|other| *other == node);
            for edge in graph.edges() {
                prop_assert!(position(edge.source()) < position(edge.target()));
            }
        }
    }
}
