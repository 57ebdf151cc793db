//! Pull-based branch selectors implementing the traversal orderings.
//!
//! A selector produces the next branch of the search synchronously, one
//! per call, and owns the expander of its side of the search. Start
//! branches are produced first, in the order given.

use std::collections::VecDeque;
use std::sync::Arc;

use dendrite_api::{Expander, GraphView};

use crate::branch::{BranchArena, BranchId};
use crate::traverser::TraversalContext;

/// Order in which branches are produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BranchOrdering {
    /// Preorder depth-first: a branch is produced before any of its
    /// children, and a whole subtree is finished before its siblings.
    #[default]
    PreorderDepthFirst,
    /// Preorder breadth-first: branches are produced level by level.
    PreorderBreadthFirst,
}

impl BranchOrdering {
    pub(crate) fn create<G: GraphView + 'static>(
        self,
        expander: Arc<dyn Expander<G>>,
        starts: Vec<BranchId>,
    ) -> Box<dyn BranchSelector<G>> {
        match self {
            BranchOrdering::PreorderDepthFirst => Box::new(PreorderDepthFirstSelector {
                expander,
                pending_starts: starts.into(),
                current: None,
            }),
            BranchOrdering::PreorderBreadthFirst => Box::new(PreorderBreadthFirstSelector {
                expander,
                pending_starts: starts.into(),
                queue: VecDeque::new(),
                current: None,
            }),
        }
    }
}

/// Produces the next branch under one ordering, or `None` when the
/// frontier is exhausted. All work happens inside the call.
pub(crate) trait BranchSelector<G: GraphView> {
    fn next(
        &mut self,
        arena: &mut BranchArena,
        graph: &G,
        ctx: &mut TraversalContext,
    ) -> Option<BranchId>;
}

/// The frontier is the parent chain itself: expand the current branch
/// until it is exhausted, then walk up.
struct PreorderDepthFirstSelector<G: GraphView> {
    expander: Arc<dyn Expander<G>>,
    pending_starts: VecDeque<BranchId>,
    current: Option<BranchId>,
}

impl<G: GraphView> BranchSelector<G> for PreorderDepthFirstSelector<G> {
    fn next(
        &mut self,
        arena: &mut BranchArena,
        graph: &G,
        ctx: &mut TraversalContext,
    ) -> Option<BranchId> {
        loop {
            match self.current {
                None => {
                    let start = self.pending_starts.pop_front()?;
                    self.current = Some(start);
                    return Some(start);
                }
                Some(current) => {
                    match arena.next_child(current, graph, self.expander.as_ref(), ctx) {
                        Some(child) => {
                            self.current = Some(child);
                            return Some(child);
                        }
                        // Walking above a start branch yields None, which
                        // moves on to the next start.
                        None => self.current = arena.parent(current),
                    }
                }
            }
        }
    }
}

/// A queue of branches awaiting expansion; children are produced (and
/// enqueued) as the head of the queue is expanded.
struct PreorderBreadthFirstSelector<G: GraphView> {
    expander: Arc<dyn Expander<G>>,
    pending_starts: VecDeque<BranchId>,
    queue: VecDeque<BranchId>,
    current: Option<BranchId>,
}

impl<G: GraphView> BranchSelector<G> for PreorderBreadthFirstSelector<G> {
    fn next(
        &mut self,
        arena: &mut BranchArena,
        graph: &G,
        ctx: &mut TraversalContext,
    ) -> Option<BranchId> {
        loop {
            match self.current {
                None => {
                    if let Some(start) = self.pending_starts.pop_front() {
                        self.queue.push_back(start);
                        return Some(start);
                    }
                    self.current = Some(self.queue.pop_front()?);
                }
                Some(current) => {
                    match arena.next_child(current, graph, self.expander.as_ref(), ctx) {
                        Some(child) => {
                            self.queue.push_back(child);
                            return Some(child);
                        }
                        None => {
                            self.current = self.queue.pop_front();
                            if self.current.is_none() {
                                return None;
                            }
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use dendrite_api::Direction;

    use super::*;
    use crate::expander::StandardExpander;
    use crate::testgraph::TestGraph;
    use crate::uniqueness::Uniqueness;

    /// Two-level tree: a -> (b, c), b -> (d, e).
    fn tree() -> (TestGraph, [u64; 5]) {
        let mut graph = TestGraph::new();
        let a = graph.node();
        let b = graph.node();
        let c = graph.node();
        let d = graph.node();
        let e = graph.node();
        graph.edge(a, b, 0);
        graph.edge(a, c, 0);
        graph.edge(b, d, 0);
        graph.edge(b, e, 0);
        (graph, [a, b, c, d, e])
    }

    fn drain(ordering: BranchOrdering, graph: &TestGraph, start: u64) -> Vec<u64> {
        let mut arena = BranchArena::new();
        let mut ctx = TraversalContext::new(Vec::new(), Uniqueness::NodeGlobal.create(None));
        let root = arena.add_start(start);
        assert!(ctx.is_unique_first(&arena, root));
        let evaluation = ctx.evaluate(&arena.path(root));
        arena.set_evaluation(root, evaluation);

        let expander: Arc<dyn Expander<TestGraph>> =
            Arc::new(StandardExpander::all().add(0, Direction::Outgoing));
        let mut selector = ordering.create(expander, vec![root]);
        let mut visited = Vec::new();
        while let Some(branch) = selector.next(&mut arena, graph, &mut ctx) {
            visited.push(arena.end_node(branch));
        }
        visited
    }

    #[test]
    fn depth_first_is_preorder() {
        let (graph, [a, b, c, d, e]) = tree();
        assert_eq!(
            drain(BranchOrdering::PreorderDepthFirst, &graph, a),
            vec![a, b, d, e, c]
        );
    }

    #[test]
    fn breadth_first_is_level_order() {
        let (graph, [a, b, c, d, e]) = tree();
        assert_eq!(
            drain(BranchOrdering::PreorderBreadthFirst, &graph, a),
            vec![a, b, c, d, e]
        );
    }

    #[test]
    fn start_branch_is_produced_first() {
        let mut graph = TestGraph::new();
        let a = graph.node();
        assert_eq!(
            drain(BranchOrdering::PreorderDepthFirst, &graph, a),
            vec![a]
        );
    }
}
