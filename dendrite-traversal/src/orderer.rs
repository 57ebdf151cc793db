//! Interleaving of the two selectors of a bidirectional search.

use dendrite_api::GraphView;

use crate::branch::{BranchArena, BranchId};
use crate::selector::BranchSelector;
use crate::traverser::TraversalContext;

/// Which half of a bidirectional search produced a branch: the forward
/// search rooted at the start node, or the reverse search rooted at the
/// end node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Start,
    End,
}

impl Side {
    pub fn other(self) -> Side {
        match self {
            Side::Start => Side::End,
            Side::End => Side::Start,
        }
    }
}

const SIDES: [Side; 2] = [Side::Start, Side::End];

/// Discipline for interleaving the two sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectorOrdering {
    /// Strict round-robin, skipping an exhausted side. General
    /// bidirectional search; makes no promise about path lengths.
    Alternating,
    /// Each side runs one full breadth-first level before yielding to the
    /// other. With `stop_descent_on_result`, neither side descends to a
    /// deeper level once a result has been returned, which confines the
    /// search to the minimal collision depth.
    LevelSynchronized { stop_descent_on_result: bool },
}

impl SelectorOrdering {
    pub(crate) fn create<G: GraphView + 'static>(
        self,
        start_selector: Box<dyn BranchSelector<G>>,
        end_selector: Box<dyn BranchSelector<G>>,
    ) -> Box<dyn SelectorOrderer<G>> {
        let selectors = [start_selector, end_selector];
        match self {
            SelectorOrdering::Alternating => Box::new(AlternatingOrderer {
                selectors,
                exhausted: [false; 2],
                side: 1,
            }),
            SelectorOrdering::LevelSynchronized {
                stop_descent_on_result,
            } => Box::new(LevelOrderer {
                selectors,
                states: [SideState::default(), SideState::default()],
                exhausted: [false; 2],
                side: 0,
                stop_descent_on_result,
                halted: false,
            }),
        }
    }
}

/// A branch selector over two underlying selectors that also reports
/// which side produced the current branch.
pub(crate) trait SelectorOrderer<G: GraphView> {
    fn next(
        &mut self,
        arena: &mut BranchArena,
        graph: &G,
        ctx: &mut TraversalContext,
    ) -> Option<BranchId>;

    /// Side of the most recently produced branch.
    fn current_side(&self) -> Side;
}

struct AlternatingOrderer<G: GraphView> {
    selectors: [Box<dyn BranchSelector<G>>; 2],
    exhausted: [bool; 2],
    side: usize,
}

impl<G: GraphView> SelectorOrderer<G> for AlternatingOrderer<G> {
    fn next(
        &mut self,
        arena: &mut BranchArena,
        graph: &G,
        ctx: &mut TraversalContext,
    ) -> Option<BranchId> {
        for _ in 0..2 {
            self.side = (self.side + 1) % 2;
            if self.exhausted[self.side] {
                continue;
            }
            if let Some(branch) = self.selectors[self.side].next(arena, graph, ctx) {
                return Some(branch);
            }
            self.exhausted[self.side] = true;
        }
        None
    }

    fn current_side(&self) -> Side {
        SIDES[self.side]
    }
}

#[derive(Default)]
struct SideState {
    previous_depth: usize,
    /// One branch that ran ahead into the next level while the turn
    /// passed to the other side.
    buffer: Option<BranchId>,
}

struct LevelOrderer<G: GraphView> {
    selectors: [Box<dyn BranchSelector<G>>; 2],
    states: [SideState; 2],
    exhausted: [bool; 2],
    side: usize,
    stop_descent_on_result: bool,
    halted: bool,
}

impl<G: GraphView> SelectorOrderer<G> for LevelOrderer<G> {
    fn next(
        &mut self,
        arena: &mut BranchArena,
        graph: &G,
        ctx: &mut TraversalContext,
    ) -> Option<BranchId> {
        if self.halted {
            return None;
        }
        loop {
            if let Some(parked) = self.states[self.side].buffer.take() {
                return Some(parked);
            }
            if self.exhausted[self.side] {
                let other = 1 - self.side;
                if self.exhausted[other] && self.states[other].buffer.is_none() {
                    return None;
                }
                self.side = other;
                continue;
            }
            match self.selectors[self.side].next(arena, graph, ctx) {
                Some(branch)
                    if arena.depth(branch) == self.states[self.side].previous_depth =>
                {
                    return Some(branch);
                }
                Some(branch) => {
                    // The side finished its level. Once a result exists,
                    // descending further can only produce longer paths.
                    if self.stop_descent_on_result && ctx.metadata().paths_returned() > 0 {
                        self.halted = true;
                        return None;
                    }
                    let state = &mut self.states[self.side];
                    state.previous_depth = arena.depth(branch);
                    state.buffer = Some(branch);
                    self.side = 1 - self.side;
                }
                None => {
                    self.exhausted[self.side] = true;
                    if self.stop_descent_on_result && ctx.metadata().paths_returned() > 0 {
                        self.halted = true;
                        return None;
                    }
                    self.side = 1 - self.side;
                }
            }
        }
    }

    fn current_side(&self) -> Side {
        SIDES[self.side]
    }
}
