//! Unweighted shortest paths via bidirectional level-synchronized search.

use std::sync::Arc;

use dendrite_api::{Expander, GraphView, NodeId};
use dendrite_traversal::{
    CollisionPolicy, PathData, Result, SelectorOrdering, TraversalDescription, TraversalMetadata,
    Uniqueness,
};

use crate::{PathFinder, metadata_or_error};

/// Finds all shortest paths between two nodes.
///
/// Runs a breadth-first search from both ends simultaneously, advancing
/// the two sides level by level, and combines branches where they meet.
/// Every returned path has the same, minimal length; if several distinct
/// shortest paths exist, all of them are returned.
pub struct ShortestPaths<G: GraphView> {
    expander: Arc<dyn Expander<G>>,
    last_metadata: Option<TraversalMetadata>,
}

impl<G: GraphView + 'static> ShortestPaths<G> {
    pub fn new(expander: Arc<dyn Expander<G>>) -> Self {
        ShortestPaths {
            expander,
            last_metadata: None,
        }
    }

    fn description(&self, end: NodeId) -> TraversalDescription<G> {
        TraversalDescription::new()
            .breadth_first()
            .with_uniqueness(Uniqueness::NodePath)
            .with_expander(self.expander.clone())
            .with_bidirectional(
                SelectorOrdering::LevelSynchronized {
                    stop_descent_on_result: true,
                },
                CollisionPolicy::ShortestPath,
                end,
            )
    }
}

impl<G: GraphView + 'static> PathFinder<G> for ShortestPaths<G> {
    fn find_all_paths(&mut self, graph: &G, start: NodeId, end: NodeId) -> Vec<PathData> {
        let mut traverser = self.description(end).traverse(graph, start);
        let paths: Vec<PathData> = traverser.by_ref().collect();
        self.last_metadata = traverser.metadata().ok();
        tracing::debug!(found = paths.len(), "shortest path search finished");
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
