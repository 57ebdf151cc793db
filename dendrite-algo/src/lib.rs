//! Path-finding algorithms built on the dendrite traversal engine.
//!
//! A [`PathFinder`] answers start/end queries by configuring and running
//! a traversal. Finders collect their results eagerly; the traversal
//! underneath stays lazy and stops as soon as the collected result set is
//! complete.

mod paths;
mod shortest_paths;

use dendrite_api::{GraphView, NodeId};
use dendrite_traversal::{Error, PathData, Result, TraversalMetadata};

pub use paths::BidirectionalPaths;
pub use shortest_paths::ShortestPaths;

/// Finds paths between a start and an end node.
pub trait PathFinder<G: GraphView> {
    /// All paths this finder considers results for the given pair.
    fn find_all_paths(&mut self, graph: &G, start: NodeId, end: NodeId) -> Vec<PathData>;

    /// The first such path, or `None` when the nodes are not connected.
    fn find_single_path(&mut self, graph: &G, start: NodeId, end: NodeId) -> Option<PathData> {
        self.find_all_paths(graph, start, end).into_iter().next()
    }

    /// Counters of the most recent find. Fails if no find has run yet.
    fn metadata(&self) -> Result<TraversalMetadata>;
}

pub(crate) fn metadata_or_error(
    last: Option<TraversalMetadata>,
) -> Result<TraversalMetadata> {
    last.ok_or(Error::NoTraversalStarted)
}
