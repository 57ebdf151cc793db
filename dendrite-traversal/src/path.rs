//! Path views over branch chains, and the owned path value yielded to
//! callers.

use std::fmt;
use std::hash::{Hash, Hasher};

use dendrite_api::{NodeId, Path, RelRef};
use serde::Serialize;

use crate::branch::{BranchArena, BranchId};

/// Lazy view of the path represented by a single branch, reconstructed by
/// walking the parent chain to the root.
pub(crate) struct BranchPath<'a> {
    pub(crate) arena: &'a BranchArena,
    pub(crate) branch: BranchId,
}

impl Path for BranchPath<'_> {
    fn start_node(&self) -> NodeId {
        let root = self.arena.chain(self.branch).last().expect("chain is never empty");
        self.arena.end_node(root)
    }

    fn end_node(&self) -> NodeId {
        self.arena.end_node(self.branch)
    }

    fn last_relationship(&self) -> Option<RelRef> {
        self.arena.last_relationship(self.branch)
    }

    fn length(&self) -> usize {
        self.arena.depth(self.branch)
    }

    fn nodes(&self) -> Vec<NodeId> {
        let mut nodes: Vec<NodeId> = self
            .arena
            .chain(self.branch)
            .map(|b| self.arena.end_node(b))
            .collect();
        nodes.reverse();
        nodes
    }

    fn relationships(&self) -> Vec<RelRef> {
        let mut rels: Vec<RelRef> = self
            .arena
            .chain(self.branch)
            .filter_map(|b| self.arena.last_relationship(b))
            .collect();
        rels.reverse();
        rels
    }
}

/// Lazy view of a path assembled from a start-side branch and an end-side
/// branch that met at the same node during a bidirectional search.
///
/// The relationship sequence runs start to end; the end-side chain is
/// stitched on in its natural walk order, which already points away from
/// the meeting node.
pub(crate) struct BidirectionalBranchPath<'a> {
    pub(crate) arena: &'a BranchArena,
    pub(crate) start: BranchId,
    pub(crate) end: BranchId,
}

impl Path for BidirectionalBranchPath<'_> {
    fn start_node(&self) -> NodeId {
        BranchPath {
            arena: self.arena,
            branch: self.start,
        }
        .start_node()
    }

    fn end_node(&self) -> NodeId {
        let root = self.arena.chain(self.end).last().expect("chain is never empty");
        self.arena.end_node(root)
    }

    fn last_relationship(&self) -> Option<RelRef> {
        // The relationship adjacent to the final node is the depth-1
        // branch of the end-side chain; with an empty end side it is the
        // start side's own last relationship.
        self.arena
            .chain(self.end)
            .find(|&b| self.arena.depth(b) == 1)
            .and_then(|b| self.arena.last_relationship(b))
            .or_else(|| self.arena.last_relationship(self.start))
    }

    fn length(&self) -> usize {
        self.arena.depth(self.start) + self.arena.depth(self.end)
    }

    fn nodes(&self) -> Vec<NodeId> {
        let mut nodes = BranchPath {
            arena: self.arena,
            branch: self.start,
        }
        .nodes();
        // Skip the meeting node itself; it is already the last start-side
        // node.
        nodes.extend(
            self.arena
                .chain(self.end)
                .skip(1)
                .map(|b| self.arena.end_node(b)),
        );
        nodes
    }

    fn relationships(&self) -> Vec<RelRef> {
        let mut rels = BranchPath {
            arena: self.arena,
            branch: self.start,
        }
        .relationships();
        rels.extend(
            self.arena
                .chain(self.end)
                .filter_map(|b| self.arena.last_relationship(b)),
        );
        rels
    }
}

/// An owned, materialized path, yielded by the traverser.
///
/// Equality and hashing follow the relationship sequence; two zero-length
/// paths are equal when they are the same node.
#[derive(Debug, Clone, Serialize)]
pub struct PathData {
    nodes: Vec<NodeId>,
    relationships: Vec<RelRef>,
}

impl PathData {
    pub(crate) fn from_path(path: &dyn Path) -> Self {
        PathData {
            nodes: path.nodes(),
            relationships: path.relationships(),
        }
    }

    /// A path consisting of a single node.
    pub fn single(node: NodeId) -> Self {
        PathData {
            nodes: vec![node],
            relationships: Vec::new(),
        }
    }

    /// Assemble a path from raw segments. Test support only.
    #[cfg(test)]
    pub(crate) fn from_segments(nodes: Vec<NodeId>, relationships: Vec<RelRef>) -> Self {
        debug_assert_eq!(nodes.len(), relationships.len() + 1);
        PathData {
            nodes,
            relationships,
        }
    }
}

impl Path for PathData {
    fn start_node(&self) -> NodeId {
        self.nodes[0]
    }

    fn end_node(&self) -> NodeId {
        *self.nodes.last().expect("a path has at least one node")
    }

    fn last_relationship(&self) -> Option<RelRef> {
        self.relationships.last().copied()
    }

    fn length(&self) -> usize {
        self.relationships.len()
    }

    fn nodes(&self) -> Vec<NodeId> {
        self.nodes.clone()
    }

    fn relationships(&self) -> Vec<RelRef> {
        self.relationships.clone()
    }
}

impl PartialEq for PathData {
    fn eq(&self, other: &Self) -> bool {
        if self.relationships.is_empty() && other.relationships.is_empty() {
            return self.nodes == other.nodes;
        }
        self.relationships.len() == other.relationships.len()
            && self
                .relationships
                .iter()
                .zip(&other.relationships)
                .all(|(a, b)| a.id == b.id)
    }
}

impl Eq for PathData {}

impl Hash for PathData {
    fn hash<H: Hasher>(&self, state: &mut H) {
        if self.relationships.is_empty() {
            self.end_node().hash(state);
        } else {
            for rel in &self.relationships {
                rel.id.hash(state);
            }
        }
    }
}

impl fmt::Display for PathData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({})", self.nodes[0])?;
        let mut current = self.nodes[0];
        for (rel, node) in self.relationships.iter().zip(self.nodes.iter().skip(1)) {
            if rel.start_node == current {
                write!(f, "-[{},{}]->({})", rel.rel_type, rel.id, node)?;
            } else {
                write!(f, "<-[{},{}]-({})", rel.rel_type, rel.id, node)?;
            }
            current = *node;
        }
        Ok(())
    }
}
