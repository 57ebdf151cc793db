//! The branch arena: every path prefix discovered during one traversal,
//! stored as records that point only at their parents.
//!
//! Branches never hold forward references to children; the search tree is
//! a set of reverse-pointing chains indexed by [`BranchId`] handles, which
//! sidesteps ownership cycles entirely.

use dendrite_api::{Expander, GraphView, NodeId, RelRef};

use crate::evaluation::Evaluation;
use crate::path::BranchPath;
use crate::traverser::TraversalContext;

/// Handle to a branch record inside a [`BranchArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct BranchId(u32);

impl BranchId {
    fn index(self) -> usize {
        self.0 as usize
    }
}

struct BranchData {
    parent: Option<BranchId>,
    end_node: NodeId,
    /// The relationship that reached this branch; `None` for start
    /// branches.
    last_rel: Option<RelRef>,
    depth: usize,
    evaluation: Evaluation,
    /// Candidate relationships not yet turned into children. `None` until
    /// the first child is requested; emptied on exhaustion or prune.
    candidates: Option<Vec<RelRef>>,
    cursor: usize,
    expanded: usize,
}

pub(crate) struct BranchArena {
    branches: Vec<BranchData>,
}

impl BranchArena {
    pub(crate) fn new() -> Self {
        BranchArena {
            branches: Vec::new(),
        }
    }

    /// Allocate a start branch at depth 0. Its evaluation is a
    /// placeholder until [`set_evaluation`](Self::set_evaluation) is
    /// called.
    pub(crate) fn add_start(&mut self, node: NodeId) -> BranchId {
        self.push(BranchData {
            parent: None,
            end_node: node,
            last_rel: None,
            depth: 0,
            evaluation: Evaluation::ExcludeAndContinue,
            candidates: None,
            cursor: 0,
            expanded: 0,
        })
    }

    fn push(&mut self, data: BranchData) -> BranchId {
        let id = BranchId(u32::try_from(self.branches.len()).expect("branch arena overflow"));
        self.branches.push(data);
        id
    }

    /// Remove a just-allocated branch that a uniqueness filter rejected.
    fn pop_rejected(&mut self, id: BranchId) {
        debug_assert_eq!(id.index(), self.branches.len() - 1);
        self.branches.pop();
    }

    pub(crate) fn parent(&self, id: BranchId) -> Option<BranchId> {
        self.branches[id.index()].parent
    }

    pub(crate) fn depth(&self, id: BranchId) -> usize {
        self.branches[id.index()].depth
    }

    pub(crate) fn end_node(&self, id: BranchId) -> NodeId {
        self.branches[id.index()].end_node
    }

    pub(crate) fn last_relationship(&self, id: BranchId) -> Option<RelRef> {
        self.branches[id.index()].last_rel
    }

    pub(crate) fn evaluation(&self, id: BranchId) -> Evaluation {
        self.branches[id.index()].evaluation
    }

    pub(crate) fn set_evaluation(&mut self, id: BranchId, evaluation: Evaluation) {
        self.branches[id.index()].evaluation = evaluation;
    }

    /// Stop this branch from producing any further children.
    pub(crate) fn prune(&mut self, id: BranchId) {
        let branch = &mut self.branches[id.index()];
        branch.candidates = Some(Vec::new());
        branch.cursor = 0;
    }

    /// The branch and its ancestors, walking up to the root.
    pub(crate) fn chain(&self, from: BranchId) -> Chain<'_> {
        Chain {
            arena: self,
            next: Some(from),
        }
    }

    pub(crate) fn path(&self, branch: BranchId) -> BranchPath<'_> {
        BranchPath {
            arena: self,
            branch,
        }
    }

    /// Produce the next unvisited child of `branch`, or `None` when its
    /// candidates are exhausted.
    ///
    /// Pulls candidate relationships from the expander (once, lazily,
    /// and not at all if the cached evaluation pruned this branch), skips
    /// the relationship the branch itself arrived by, and submits each
    /// freshly built child to the uniqueness filter. Accepted children
    /// are evaluated before being returned; rejected ones are discarded
    /// and counted as unnecessary work.
    pub(crate) fn next_child<G: GraphView>(
        &mut self,
        branch: BranchId,
        graph: &G,
        expander: &dyn Expander<G>,
        ctx: &mut TraversalContext,
    ) -> Option<BranchId> {
        if self.branches[branch.index()].candidates.is_none() {
            let candidates = if self.branches[branch.index()].evaluation.continues() {
                expander.expand(graph, &self.path(branch))
            } else {
                Vec::new()
            };
            self.branches[branch.index()].candidates = Some(candidates);
        }
        loop {
            let data = &self.branches[branch.index()];
            let candidates = data.candidates.as_ref().expect("candidates filled above");
            if data.cursor >= candidates.len() {
                // Release the buffer; the branch stays exhausted.
                let data = &mut self.branches[branch.index()];
                data.candidates = Some(Vec::new());
                data.cursor = 0;
                return None;
            }
            let rel = candidates[data.cursor];
            let came_by = data.last_rel;
            let parent_node = data.end_node;
            let child_depth = data.depth + 1;
            self.branches[branch.index()].cursor += 1;

            if came_by.is_some_and(|r| r.id == rel.id) {
                ctx.unnecessary_relationship_traversed();
                continue;
            }
            self.branches[branch.index()].expanded += 1;

            let child = self.push(BranchData {
                parent: Some(branch),
                end_node: rel.other_node(parent_node),
                last_rel: Some(rel),
                depth: child_depth,
                evaluation: Evaluation::ExcludeAndContinue,
                candidates: None,
                cursor: 0,
                expanded: 0,
            });
            if ctx.is_unique(self, child) {
                ctx.relationship_traversed();
                let evaluation = ctx.evaluate(&self.path(child));
                self.branches[child.index()].evaluation = evaluation;
                return Some(child);
            }
            ctx.unnecessary_relationship_traversed();
            self.pop_rejected(child);
        }
    }
}

#[cfg(test)]
impl BranchArena {
    /// Relationships this branch has turned into child branches so far,
    /// counting uniqueness-rejected candidates.
    pub(crate) fn expanded(&self, id: BranchId) -> usize {
        self.branches[id.index()].expanded
    }

    /// Attach a child directly, bypassing expansion. Test support only.
    pub(crate) fn add_test_child(
        &mut self,
        parent: BranchId,
        node: NodeId,
        rel_id: u64,
    ) -> BranchId {
        let depth = self.depth(parent) + 1;
        let parent_node = self.end_node(parent);
        self.push(BranchData {
            parent: Some(parent),
            end_node: node,
            last_rel: Some(RelRef {
                id: rel_id,
                rel_type: 0,
                start_node: parent_node,
                end_node: node,
            }),
            depth,
            evaluation: Evaluation::ExcludeAndContinue,
            candidates: None,
            cursor: 0,
            expanded: 0,
        })
    }

    /// Whether the branch's candidate state has been emptied.
    pub(crate) fn is_pruned(&self, id: BranchId) -> bool {
        self.branches[id.index()]
            .candidates
            .as_ref()
            .is_some_and(|c| c.is_empty())
    }
}

/// Iterator over a branch and its ancestors, deepest first.
pub(crate) struct Chain<'a> {
    arena: &'a BranchArena,
    next: Option<BranchId>,
}

impl Iterator for Chain<'_> {
    type Item = BranchId;

    fn next(&mut self) -> Option<BranchId> {
        let current = self.next?;
        self.next = self.arena.parent(current);
        Some(current)
    }
}
