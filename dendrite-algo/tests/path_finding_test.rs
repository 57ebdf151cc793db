//! End-to-end tests for the path finders.

use std::collections::HashSet;
use std::sync::Arc;

use dendrite_api::{Direction, GraphView, NodeId, Path, RelRef, RelTypeId};
use dendrite_algo::{BidirectionalPaths, PathFinder, ShortestPaths};
use dendrite_traversal::StandardExpander;

/// Small in-memory graph for driving the finders.
#[derive(Debug, Default)]
struct SampleGraph {
    next_node: NodeId,
    next_rel: u64,
    rels: Vec<RelRef>,
}

impl SampleGraph {
    fn node(&mut self) -> NodeId {
        let id = self.next_node;
        self.next_node += 1;
        id
    }

    fn edge(&mut self, start: NodeId, end: NodeId) -> RelRef {
        let rel = RelRef {
            id: self.next_rel,
            rel_type: 0,
            start_node: start,
            end_node: end,
        };
        self.next_rel += 1;
        self.rels.push(rel);
        rel
    }
}

impl GraphView for SampleGraph {
    type Relationships<'a> = Box<dyn Iterator<Item = RelRef> + 'a>;

    fn relationships(
        &self,
        node: NodeId,
        direction: Direction,
        rel_type: Option<RelTypeId>,
    ) -> Self::Relationships<'_> {
        Box::new(self.rels.iter().copied().filter(move |rel| {
            if rel_type.is_some_and(|t| rel.rel_type != t) {
                return false;
            }
            match direction {
                Direction::Outgoing => rel.start_node == node,
                Direction::Incoming => rel.end_node == node,
                Direction::Both => rel.start_node == node || rel.end_node == node,
            }
        }))
    }
}

fn outgoing() -> Arc<StandardExpander> {
    Arc::new(StandardExpander::for_type(0, Direction::Outgoing))
}

#[test]
fn diamond_returns_both_shortest_paths() {
    let graph = SampleGraph::new_diamond();
    let (a, b, c, d) = (0, 1, 2, 3);

    let mut finder = ShortestPaths::new(outgoing());
    let paths = finder.find_all_paths(&graph, a, d);
    assert_eq!(paths.len(), 2);
    assert!(paths.iter().all(|p| p.length() == 2));

    let middles: HashSet<NodeId> = paths.iter().map(|p| p.nodes()[1]).collect();
    assert_eq!(middles, HashSet::from([b, c]));
}

#[test]
fn longer_alternatives_are_not_returned() {
    // a -> b -> c and a -> c: only the single-hop path is shortest.
    let mut graph = SampleGraph::default();
    let (a, b, c) = (graph.node(), graph.node(), graph.node());
    graph.edge(a, b);
    graph.edge(b, c);
    graph.edge(a, c);

    let mut finder = ShortestPaths::new(outgoing());
    let paths = finder.find_all_paths(&graph, a, c);
    assert_eq!(paths.len(), 1);
    assert_eq!(paths[0].length(), 1);
    assert_eq!(paths[0].nodes(), vec![a, c]);
}

#[test]
fn disconnected_nodes_yield_nothing() {
    let mut graph = SampleGraph::default();
    let (a, b) = (graph.node(), graph.node());
    // A directed edge the wrong way around: no a -> b path exists.
    graph.edge(b, a);

    let mut finder = ShortestPaths::new(outgoing());
    assert!(finder.find_all_paths(&graph, a, b).is_empty());
    assert!(finder.find_single_path(&graph, a, b).is_none());
}

#[test]
fn start_equal_to_end_is_a_zero_length_path() {
    let mut graph = SampleGraph::default();
    let a = graph.node();

    let mut finder = ShortestPaths::new(outgoing());
    let path = finder.find_single_path(&graph, a, a).expect("trivial path");
    assert_eq!(path.length(), 0);
    assert_eq!(path.end_node(), a);
}

#[test]
fn metadata_is_unavailable_until_a_find_runs() {
    let mut graph = SampleGraph::default();
    let (a, b) = (graph.node(), graph.node());
    graph.edge(a, b);

    let mut finder = ShortestPaths::new(outgoing());
    assert!(finder.metadata().is_err());

    finder.find_all_paths(&graph, a, b);
    let metadata = finder.metadata().expect("metadata after find");
    assert_eq!(metadata.paths_returned(), 1);
    assert!(metadata.relationships_examined() >= 1);
}

#[test]
fn bidirectional_paths_reach_across_a_chain() {
    let mut graph = SampleGraph::default();
    let (a, b, c, d) = (graph.node(), graph.node(), graph.node(), graph.node());
    graph.edge(a, b);
    graph.edge(b, c);
    graph.edge(c, d);

    let mut finder = BidirectionalPaths::new(outgoing(), 4);
    let path = finder.find_single_path(&graph, a, d).expect("a reaches d");
    assert_eq!(path.length(), 3);
    assert_eq!(path.nodes(), vec![a, b, c, d]);
    assert_eq!(path.start_node(), a);
    assert_eq!(path.end_node(), d);
}

impl SampleGraph {
    fn new_diamond() -> SampleGraph {
        let mut graph = SampleGraph::default();
        let a = graph.node();
        let b = graph.node();
        let c = graph.node();
        let d = graph.node();
        graph.edge(a, b);
        graph.edge(a, c);
        graph.edge(b, d);
        graph.edge(c, d);
        graph
    }
}
