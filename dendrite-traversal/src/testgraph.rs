//! Minimal in-memory graph fixture for the unit tests of this crate.

use dendrite_api::{Direction, GraphView, NodeId, RelRef, RelTypeId};

#[derive(Debug, Default)]
pub(crate) struct TestGraph {
    next_node: NodeId,
    next_rel: u64,
    rels: Vec<RelRef>,
}

impl TestGraph {
    pub(crate) fn new() -> Self {
        TestGraph::default()
    }

    pub(crate) fn node(&mut self) -> NodeId {
        let id = self.next_node;
        self.next_node += 1;
        id
    }

    pub(crate) fn edge(&mut self, start: NodeId, end: NodeId, rel_type: RelTypeId) -> RelRef {
        let rel = RelRef {
            id: self.next_rel,
            rel_type,
            start_node: start,
            end_node: end,
        };
        self.next_rel += 1;
        self.rels.push(rel);
        rel
    }
}

impl GraphView for TestGraph {
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
