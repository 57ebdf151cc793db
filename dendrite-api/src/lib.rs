//! Public contract between the dendrite traversal engine and the graph
//! store that hosts it.
//!
//! The engine never owns graph data. It borrows opaque identities
//! ([`NodeId`], [`RelId`]) and relationship records ([`RelRef`]) from an
//! external store exposed through [`GraphView`], and asks an [`Expander`]
//! for the candidate relationships of the path it is currently growing.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Opaque node identity, owned by the external graph store.
///
/// The engine only compares and hashes these; it never interprets them.
pub type NodeId = u64;

/// Opaque relationship identity.
///
/// Parallel relationships between the same pair of nodes carry distinct
/// `RelId`s, so they are distinguishable during traversal.
pub type RelId = u64;

/// Relationship type identifier (e.g. `:KNOWS`, `:7`).
pub type RelTypeId = u32;

/// Which relationships of a node to enumerate, relative to that node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Relationships that leave the node.
    Outgoing,
    /// Relationships that arrive at the node.
    Incoming,
    /// Both of the above.
    Both,
}

impl Direction {
    /// The direction with start and end swapped. `Both` is its own reverse.
    pub fn reversed(self) -> Self {
        match self {
            Direction::Outgoing => Direction::Incoming,
            Direction::Incoming => Direction::Outgoing,
            Direction::Both => Direction::Both,
        }
    }
}

/// A borrowed reference to one directed relationship.
///
/// Used as the unit of expansion and as the element of path relationship
/// sequences. Identity is `id`; `start_node`/`end_node` record the stored
/// orientation, independent of the direction it was traversed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RelRef {
    pub id: RelId,
    pub rel_type: RelTypeId,
    pub start_node: NodeId,
    pub end_node: NodeId,
}

impl RelRef {
    /// The endpoint that is not `node`.
    ///
    /// For a loop relationship both endpoints coincide and the node itself
    /// is returned.
    pub fn other_node(&self, node: NodeId) -> NodeId {
        if node == self.start_node {
            self.end_node
        } else {
            self.start_node
        }
    }

    /// Whether both endpoints are the same node.
    pub fn is_loop(&self) -> bool {
        self.start_node == self.end_node
    }
}

/// A sequence of nodes joined by relationships, from a start node to an
/// end node.
///
/// A path of length zero is a single node. Implementations may be lazy
/// views that reconstruct the sequences on demand; `nodes` and
/// `relationships` therefore return owned vectors.
pub trait Path {
    /// First node of the path.
    fn start_node(&self) -> NodeId;

    /// Last node of the path.
    fn end_node(&self) -> NodeId;

    /// The relationship that reached the end node, if the path has any
    /// relationships at all.
    fn last_relationship(&self) -> Option<RelRef>;

    /// Number of relationships in the path.
    fn length(&self) -> usize;

    /// All nodes in order, start node first. One longer than
    /// `relationships`.
    fn nodes(&self) -> Vec<NodeId>;

    /// All relationships in order, the one leaving the start node first.
    fn relationships(&self) -> Vec<RelRef>;
}

/// Read access to a snapshot of the graph, frozen for the duration of one
/// traversal.
///
/// Implementors must return consistent results for the lifetime of the
/// borrow; the engine performs reads only and assumes identities are
/// stable.
pub trait GraphView {
    /// Iterator type for the relationships of a node.
    type Relationships<'a>: Iterator<Item = RelRef> + 'a
    where
        Self: 'a;

    /// Enumerate the relationships of `node` in the given direction,
    /// optionally restricted to one relationship type.
    ///
    /// A loop relationship must be yielded once, not once per matching
    /// direction.
    fn relationships(
        &self,
        node: NodeId,
        direction: Direction,
        rel_type: Option<RelTypeId>,
    ) -> Self::Relationships<'_>;

    /// Number of relationships `relationships` would yield.
    fn degree(&self, node: NodeId, direction: Direction, rel_type: Option<RelTypeId>) -> usize {
        self.relationships(node, direction, rel_type).count()
    }

    /// Whether the node exists in this view. The default implementation
    /// assumes it does; stores with tombstones should override.
    fn contains_node(&self, _node: NodeId) -> bool {
        true
    }
}

/// Produces the candidate relationships to grow a path by.
///
/// `path` is the path built so far; its end node is the node being
/// expanded. Expanders must be deterministic for a frozen graph view.
pub trait Expander<G: GraphView> {
    /// Candidate relationships leaving the end node of `path`.
    fn expand(&self, graph: &G, path: &dyn Path) -> Vec<RelRef>;

    /// An expander that traverses the same relationships in the opposite
    /// direction, used to grow paths from the far end of a bidirectional
    /// search.
    fn reversed(&self) -> Arc<dyn Expander<G>>;
}
