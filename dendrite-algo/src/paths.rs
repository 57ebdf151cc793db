//! General bidirectional path search without shortest-path guarantees.

use std::sync::Arc;

use dendrite_api::{Expander, GraphView, NodeId, Path};
use dendrite_traversal::{
    CollisionPolicy, Evaluation, PathData, Result, SelectorOrdering, TraversalDescription,
    TraversalMetadata, Uniqueness, evaluators,
};

use crate::{PathFinder, metadata_or_error};

/// Finds simple paths between two nodes with the alternating
/// bidirectional mode: the two sides take strict turns and every contact
/// is reported, regardless of length.
///
/// The same path may be discovered through more than one meeting point;
/// callers needing distinct paths should deduplicate. `max_depth` bounds
/// the search depth of each side, keeping the search finite on cyclic
/// graphs.
pub struct BidirectionalPaths<G: GraphView> {
    expander: Arc<dyn Expander<G>>,
    max_depth: usize,
    last_metadata: Option<TraversalMetadata>,
}

impl<G: GraphView + 'static> BidirectionalPaths<G> {
    pub fn new(expander: Arc<dyn Expander<G>>, max_depth: usize) -> Self {
        BidirectionalPaths {
            expander,
            max_depth,
            last_metadata: None,
        }
    }

    fn description(&self, end: NodeId) -> TraversalDescription<G> {
        let max_depth = self.max_depth;
        TraversalDescription::new()
            .breadth_first()
            .with_uniqueness(Uniqueness::NodePath)
            .with_expander(self.expander.clone())
            .with_evaluator(evaluators::from_fn(move |path: &dyn Path| {
                Evaluation::of(true, path.length() < max_depth)
            }))
            .with_bidirectional(
                SelectorOrdering::Alternating,
                CollisionPolicy::Standard,
                end,
            )
    }
}

impl<G: GraphView + 'static> PathFinder<G> for BidirectionalPaths<G> {
    fn find_all_paths(&mut self, graph: &G, start: NodeId, end: NodeId) -> Vec<PathData> {
        let mut traverser = self.description(end).traverse(graph, start);
        let paths: Vec<PathData> = traverser.by_ref().collect();
        self.last_metadata = traverser.metadata().ok();
        paths
    }

    fn find_single_path(&mut self, graph: &G, start: NodeId, end: NodeId) -> Option<PathData> {
        let mut traverser = self.description(end).traverse(graph, start);
        let first = traverser.next();
        self.last_metadata = traverser.metadata().ok();
        first
    }

    fn metadata(&self) -> Result<TraversalMetadata> {
        metadata_or_error(self.last_metadata)
    }
}
