//! # dendrite
//!
//! An embeddable, lazy graph-traversal engine: pluggable expansion
//! rules, visitation-uniqueness policies, inclusion evaluators and
//! traversal orderings, with a meeting-in-the-middle bidirectional mode
//! for shortest-path search.
//!
//! ## Quickstart
//!
//! ```rust
//! use dendrite::{Direction, MemoryGraph, StandardExpander, TraversalDescription, Uniqueness};
//! use std::sync::Arc;
//!
//! let mut graph = MemoryGraph::new();
//! let a = graph.add_node();
//! let b = graph.add_node();
//! let c = graph.add_node();
//! let knows = 0;
//! graph.add_relationship(a, b, knows);
//! graph.add_relationship(b, c, knows);
//!
//! let description = TraversalDescription::new()
//!     .breadth_first()
//!     .with_expander(Arc::new(StandardExpander::for_type(knows, Direction::Outgoing)))
//!     .with_uniqueness(Uniqueness::NodePath);
//! let paths: Vec<_> = description.traverse(&graph, a).collect();
//! assert_eq!(paths.len(), 3); // a, a->b, a->b->c
//! ```
//!
//! ## Core concepts
//!
//! - **[`TraversalDescription`]**: immutable configuration value; every
//!   `with_*` method returns a new instance, so descriptions can be
//!   shared and reused freely.
//! - **[`Traverser`]**: the lazy, one-shot sequence of [`PathData`]
//!   started by [`TraversalDescription::traverse`].
//! - **[`GraphView`]**: the trait your store implements to be traversed.
//!   [`MemoryGraph`] is a ready-made in-memory implementation.
//! - **[`ShortestPaths`]** / **[`BidirectionalPaths`]**: finders from
//!   `dendrite-algo`, answering start/end queries.

use std::collections::HashMap;

pub use dendrite_algo::{BidirectionalPaths, PathFinder, ShortestPaths};
pub use dendrite_api::{
    Direction, Expander, GraphView, NodeId, Path, RelId, RelRef, RelTypeId,
};
pub use dendrite_traversal::{
    BranchOrdering, CollisionPolicy, Error, Evaluation, Evaluator, PathComparator, PathData,
    PathDescription, Result, SelectorOrdering, Side, StandardExpander, TraversalDescription,
    TraversalMetadata, Traverser, Uniqueness, evaluators, sorting,
};

/// A simple in-memory property-free graph, suitable for embedding and
/// for tests.
///
/// Nodes and relationships get sequential identities. The graph hands
/// out [`RelRef`]s by value and implements [`GraphView`], so any
/// traversal can run over it directly.
#[derive(Debug, Default, Clone)]
pub struct MemoryGraph {
    next_node: NodeId,
    next_rel: RelId,
    outgoing: HashMap<NodeId, Vec<RelRef>>,
    incoming: HashMap<NodeId, Vec<RelRef>>,
    node_count: usize,
}

impl MemoryGraph {
    pub fn new() -> Self {
        MemoryGraph::default()
    }

    /// Create a node and return its identity.
    pub fn add_node(&mut self) -> NodeId {
        let id = self.next_node;
        self.next_node += 1;
        self.node_count += 1;
        id
    }

    /// Create a directed relationship and return its reference. Parallel
    /// relationships are allowed and get distinct identities.
    pub fn add_relationship(
        &mut self,
        start: NodeId,
        end: NodeId,
        rel_type: RelTypeId,
    ) -> RelRef {
        let rel = RelRef {
            id: self.next_rel,
            rel_type,
            start_node: start,
            end_node: end,
        };
        self.next_rel += 1;
        self.outgoing.entry(start).or_default().push(rel);
        self.incoming.entry(end).or_default().push(rel);
        rel
    }

    pub fn node_count(&self) -> usize {
        self.node_count
    }

    pub fn relationship_count(&self) -> usize {
        self.next_rel as usize
    }
}

impl GraphView for MemoryGraph {
    type Relationships<'a> = Box<dyn Iterator<Item = RelRef> + 'a>;

    fn relationships(
        &self,
        node: NodeId,
        direction: Direction,
        rel_type: Option<RelTypeId>,
    ) -> Self::Relationships<'_> {
        let type_filter = move |rel: &RelRef| rel_type.is_none_or(|t| rel.rel_type == t);
        let out = self
            .outgoing
            .get(&node)
            .map(|rels| rels.as_slice())
            .unwrap_or_default();
        let inc = self
            .incoming
            .get(&node)
            .map(|rels| rels.as_slice())
            .unwrap_or_default();
        match direction {
            Direction::Outgoing => Box::new(out.iter().copied().filter(type_filter)),
            Direction::Incoming => Box::new(inc.iter().copied().filter(type_filter)),
            Direction::Both => Box::new(
                out.iter()
                    .copied()
                    // A loop lives in both adjacency lists; yield it once.
                    .chain(inc.iter().copied().filter(|rel| !rel.is_loop()))
                    .filter(type_filter),
            ),
        }
    }

    fn degree(&self, node: NodeId, direction: Direction, rel_type: Option<RelTypeId>) -> usize {
        self.relationships(node, direction, rel_type).count()
    }

    fn contains_node(&self, node: NodeId) -> bool {
        node < self.next_node
    }
}
