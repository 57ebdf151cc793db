//! Bidirectional search semantics at the description level.

use std::collections::HashSet;
use std::sync::Arc;

use dendrite::{
    CollisionPolicy, Direction, MemoryGraph, NodeId, Path, PathData, SelectorOrdering,
    StandardExpander, TraversalDescription, Uniqueness,
};

const TO: u32 = 0;

fn outgoing() -> Arc<StandardExpander> {
    Arc::new(StandardExpander::for_type(TO, Direction::Outgoing))
}

fn shortest_path_description(
    end: NodeId,
) -> TraversalDescription<MemoryGraph> {
    TraversalDescription::new()
        .breadth_first()
        .with_expander(outgoing())
        .with_uniqueness(Uniqueness::NodePath)
        .with_bidirectional(
            SelectorOrdering::LevelSynchronized {
                stop_descent_on_result: true,
            },
            CollisionPolicy::ShortestPath,
            end,
        )
}

#[test]
fn diamond_produces_exactly_the_two_minimal_paths() {
    let mut graph = MemoryGraph::new();
    let a = graph.add_node();
    let b = graph.add_node();
    let c = graph.add_node();
    let d = graph.add_node();
    graph.add_relationship(a, b, TO);
    graph.add_relationship(a, c, TO);
    graph.add_relationship(b, d, TO);
    graph.add_relationship(c, d, TO);

    let paths: Vec<PathData> = shortest_path_description(d).traverse(&graph, a).collect();
    assert_eq!(paths.len(), 2);
    for path in &paths {
        assert_eq!(path.length(), 2);
        assert_eq!(path.start_node(), a);
        assert_eq!(path.end_node(), d);
    }
    let middles: HashSet<NodeId> = paths.iter().map(|p| p.nodes()[1]).collect();
    assert_eq!(middles, HashSet::from([b, c]));
}

#[test]
fn longer_routes_are_cut_off_by_the_length_lock() {
    // Minimal route a -> b -> d plus a three-hop detour a -> x -> y -> d.
    let mut graph = MemoryGraph::new();
    let a = graph.add_node();
    let b = graph.add_node();
    let d = graph.add_node();
    let x = graph.add_node();
    let y = graph.add_node();
    graph.add_relationship(a, b, TO);
    graph.add_relationship(b, d, TO);
    graph.add_relationship(a, x, TO);
    graph.add_relationship(x, y, TO);
    graph.add_relationship(y, d, TO);

    let paths: Vec<PathData> = shortest_path_description(d).traverse(&graph, a).collect();
    assert!(!paths.is_empty());
    assert!(paths.iter().all(|p| p.length() == 2));
}

#[test]
fn parallel_shortest_relationships_are_distinct_results() {
    let mut graph = MemoryGraph::new();
    let a = graph.add_node();
    let e = graph.add_node();
    let first = graph.add_relationship(a, e, TO);
    let second = graph.add_relationship(a, e, TO);

    let paths: Vec<PathData> = shortest_path_description(e).traverse(&graph, a).collect();
    assert_eq!(paths.len(), 2);
    let rels: HashSet<u64> = paths.iter().map(|p| p.relationships()[0].id).collect();
    assert_eq!(rels, HashSet::from([first.id, second.id]));
}

#[test]
fn unreachable_end_produces_nothing() {
    let mut graph = MemoryGraph::new();
    let a = graph.add_node();
    let b = graph.add_node();
    graph.add_relationship(b, a, TO);

    let paths: Vec<PathData> = shortest_path_description(b).traverse(&graph, a).collect();
    assert!(paths.is_empty());
}

#[test]
fn relationship_sequences_run_start_to_end() {
    let mut graph = MemoryGraph::new();
    let a = graph.add_node();
    let b = graph.add_node();
    let c = graph.add_node();
    let d = graph.add_node();
    graph.add_relationship(a, b, TO);
    graph.add_relationship(b, c, TO);
    graph.add_relationship(c, d, TO);

    let paths: Vec<PathData> = shortest_path_description(d).traverse(&graph, a).collect();
    assert_eq!(paths.len(), 1);
    let path = &paths[0];
    assert_eq!(path.nodes(), vec![a, b, c, d]);
    let rels = path.relationships();
    assert_eq!(rels.len(), path.nodes().len() - 1);
    for (i, rel) in rels.iter().enumerate() {
        assert_eq!(rel.start_node, path.nodes()[i]);
        assert_eq!(rel.end_node, path.nodes()[i + 1]);
    }
}

#[test]
fn alternating_mode_reports_contacts_of_any_length() {
    let mut graph = MemoryGraph::new();
    let a = graph.add_node();
    let b = graph.add_node();
    let c = graph.add_node();
    graph.add_relationship(a, b, TO);
    graph.add_relationship(b, c, TO);

    let mut traverser = TraversalDescription::new()
        .breadth_first()
        .with_expander(outgoing())
        .with_uniqueness(Uniqueness::NodePath)
        .with_bidirectional(SelectorOrdering::Alternating, CollisionPolicy::Standard, c)
        .traverse(&graph, a);

    let first = traverser.next().expect("a reaches c");
    assert_eq!(first.nodes(), vec![a, b, c]);
}
