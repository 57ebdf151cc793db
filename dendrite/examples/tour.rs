//! A quick tour of the traversal engine over an in-memory graph.
//!
//! Run with: `cargo run --example tour`

use std::sync::Arc;

use dendrite::{
    Direction, MemoryGraph, PathFinder, ShortestPaths, StandardExpander, TraversalDescription,
    Uniqueness, evaluators,
};

fn main() {
    // A small social graph.
    let mut graph = MemoryGraph::new();
    let alice = graph.add_node();
    let bob = graph.add_node();
    let carol = graph.add_node();
    let dave = graph.add_node();
    let knows = 0;
    graph.add_relationship(alice, bob, knows);
    graph.add_relationship(alice, carol, knows);
    graph.add_relationship(bob, dave, knows);
    graph.add_relationship(carol, dave, knows);

    let expander = Arc::new(StandardExpander::for_type(knows, Direction::Outgoing));

    // Everything reachable from alice within two hops, breadth-first.
    println!("reachable from alice:");
    let description = TraversalDescription::new()
        .breadth_first()
        .with_expander(expander.clone())
        .with_uniqueness(Uniqueness::NodeGlobal)
        .with_evaluator(evaluators::to_depth(2));
    for path in description.traverse(&graph, alice) {
        println!("  {path}");
    }

    // All shortest paths alice -> dave, meeting in the middle.
    println!("shortest paths to dave:");
    let mut finder = ShortestPaths::new(expander);
    for path in finder.find_all_paths(&graph, alice, dave) {
        println!("  {path}");
    }
    let metadata = finder.metadata().expect("a search ran");
    println!(
        "examined {} relationships for {} paths",
        metadata.relationships_examined(),
        metadata.paths_returned()
    );
}
