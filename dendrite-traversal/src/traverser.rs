//! The traverser: a lazy, one-shot sequence of paths.
//!
//! Pulling a path drives the configured selector, which drives branch
//! expansion through the uniqueness filter and evaluators; in
//! bidirectional mode every produced branch additionally passes through
//! the collision detector, and collision results are drained before more
//! branches are pulled.

use std::collections::VecDeque;
use std::sync::Arc;

use dendrite_api::{GraphView, NodeId, Path, RelRef};

use crate::branch::{BranchArena, BranchId};
use crate::collision::PathCollisionDetector;
use crate::description::TraversalDescription;
use crate::error::{Error, Result};
use crate::evaluation::Evaluation;
use crate::evaluator::{Evaluator, evaluate_all};
use crate::orderer::SelectorOrderer;
use crate::path::PathData;
use crate::selector::BranchSelector;
use crate::uniqueness::UniquenessFilter;

/// Counters kept while a traversal runs.
///
/// Relationships rejected by a uniqueness filter or suppressed as the
/// branch's own incoming relationship count as skipped; everything the
/// traversal actually followed counts as traversed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TraversalMetadata {
    paths_returned: usize,
    relationships_traversed: usize,
    relationships_skipped: usize,
}

impl TraversalMetadata {
    /// Paths yielded so far.
    pub fn paths_returned(&self) -> usize {
        self.paths_returned
    }

    /// Relationships followed into accepted branches.
    pub fn relationships_traversed(&self) -> usize {
        self.relationships_traversed
    }

    /// Relationships examined but not followed.
    pub fn relationships_skipped(&self) -> usize {
        self.relationships_skipped
    }

    /// Total relationships examined, followed or not.
    pub fn relationships_examined(&self) -> usize {
        self.relationships_traversed + self.relationships_skipped
    }
}

/// Mutable per-traversal state shared by the selectors and the branch
/// arena: the evaluator list, the uniqueness filter and the counters.
pub(crate) struct TraversalContext {
    evaluators: Vec<Arc<dyn Evaluator>>,
    uniqueness: UniquenessFilter,
    metadata: TraversalMetadata,
}

impl TraversalContext {
    pub(crate) fn new(
        evaluators: Vec<Arc<dyn Evaluator>>,
        uniqueness: UniquenessFilter,
    ) -> Self {
        TraversalContext {
            evaluators,
            uniqueness,
            metadata: TraversalMetadata::default(),
        }
    }

    pub(crate) fn evaluate(&self, path: &dyn Path) -> Evaluation {
        evaluate_all(&self.evaluators, path)
    }

    pub(crate) fn is_unique(&mut self, arena: &BranchArena, branch: BranchId) -> bool {
        self.uniqueness.check(arena, branch)
    }

    pub(crate) fn is_unique_first(&mut self, arena: &BranchArena, branch: BranchId) -> bool {
        self.uniqueness.check_first(arena, branch)
    }

    pub(crate) fn relationship_traversed(&mut self) {
        self.metadata.relationships_traversed += 1;
    }

    pub(crate) fn unnecessary_relationship_traversed(&mut self) {
        self.metadata.relationships_skipped += 1;
    }

    pub(crate) fn path_returned(&mut self) {
        self.metadata.paths_returned += 1;
    }

    pub(crate) fn metadata(&self) -> TraversalMetadata {
        self.metadata
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum IterState {
    NotStarted,
    Producing,
    DrainingCollisions,
    Exhausted,
}

enum Engine<G: GraphView> {
    Unidirectional(Box<dyn BranchSelector<G>>),
    Bidirectional {
        orderer: Box<dyn SelectorOrderer<G>>,
        detector: PathCollisionDetector,
    },
}

/// Lazy sequence of [`PathData`] over one graph view.
///
/// One-shot: once exhausted it stays exhausted. The description that
/// created it can start fresh traversals at any time. Must not be pulled
/// from multiple call sites concurrently; it owns all of its state and
/// uses no synchronization. A panic escaping from an expander or
/// evaluator leaves the traverser in an undefined position; discard it
/// rather than resume.
pub struct Traverser<'g, G: GraphView> {
    description: TraversalDescription<G>,
    graph: &'g G,
    starts: Vec<NodeId>,
    arena: BranchArena,
    ctx: TraversalContext,
    engine: Option<Engine<G>>,
    pending: VecDeque<PathData>,
    sorted: Option<std::vec::IntoIter<PathData>>,
    state: IterState,
}

impl<'g, G: GraphView + 'static> Traverser<'g, G> {
    pub(crate) fn new(
        description: TraversalDescription<G>,
        graph: &'g G,
        starts: Vec<NodeId>,
    ) -> Self {
        let ctx = TraversalContext::new(
            description.evaluators.clone(),
            description
                .uniqueness
                .create(description.uniqueness_capacity),
        );
        Traverser {
            description,
            graph,
            starts,
            arena: BranchArena::new(),
            ctx,
            engine: None,
            pending: VecDeque::new(),
            sorted: None,
            state: IterState::NotStarted,
        }
    }

    /// Counters for this traversal. Fails until the first path has been
    /// pulled, because nothing has been counted yet.
    pub fn metadata(&self) -> Result<TraversalMetadata> {
        if self.state == IterState::NotStarted {
            return Err(Error::NoTraversalStarted);
        }
        Ok(self.ctx.metadata())
    }

    /// The end node of every remaining path.
    pub fn nodes(self) -> impl Iterator<Item = NodeId> + 'g {
        self.map(|path| path.end_node())
    }

    /// The last relationship of every remaining path, skipping
    /// zero-length paths.
    pub fn relationships(self) -> impl Iterator<Item = RelRef> + 'g {
        self.filter_map(|path| path.last_relationship())
    }

    fn start_traversal(&mut self) {
        tracing::debug!(
            starts = self.starts.len(),
            bidirectional = self.description.bidirectional.is_some(),
            "starting traversal"
        );
        let start_nodes = self.starts.clone();
        let forward_seeds = self.seed_branches(&start_nodes);
        let engine = match self.description.bidirectional {
            None => Engine::Unidirectional(
                self.description
                    .ordering
                    .create(self.description.expander.clone(), forward_seeds),
            ),
            Some(config) => {
                let end_seeds = self.seed_branches(&[config.end_node]);
                let start_selector = self
                    .description
                    .ordering
                    .create(self.description.expander.clone(), forward_seeds);
                let end_selector = self
                    .description
                    .ordering
                    .create(self.description.expander.reversed(), end_seeds);
                Engine::Bidirectional {
                    orderer: config.ordering.create(start_selector, end_selector),
                    detector: config.collision.create(),
                }
            }
        };
        self.engine = Some(engine);
        self.state = IterState::Producing;
    }

    fn seed_branches(&mut self, nodes: &[NodeId]) -> Vec<BranchId> {
        let mut seeds = Vec::with_capacity(nodes.len());
        for &node in nodes {
            let id = self.arena.add_start(node);
            if self.ctx.is_unique_first(&self.arena, id) {
                let evaluation = self.ctx.evaluate(&self.arena.path(id));
                self.arena.set_evaluation(id, evaluation);
                seeds.push(id);
            }
        }
        seeds
    }

    /// One step of the PRODUCING / DRAINING_COLLISIONS machine.
    fn advance(&mut self) -> Option<PathData> {
        loop {
            match self.state {
                IterState::NotStarted => unreachable!("advance before start"),
                IterState::Producing => match self.produce() {
                    Some(path) => {
                        self.ctx.path_returned();
                        return Some(path);
                    }
                    None => {
                        self.state = IterState::Exhausted;
                        tracing::debug!(
                            paths = self.ctx.metadata().paths_returned(),
                            examined = self.ctx.metadata().relationships_examined(),
                            "traversal exhausted"
                        );
                        return None;
                    }
                },
                IterState::DrainingCollisions => match self.pending.pop_front() {
                    Some(path) => {
                        if self.pending.is_empty() {
                            self.state = IterState::Producing;
                        }
                        self.ctx.path_returned();
                        return Some(path);
                    }
                    None => self.state = IterState::Producing,
                },
                IterState::Exhausted => return None,
            }
        }
    }

    fn produce(&mut self) -> Option<PathData> {
        let engine = self.engine.as_mut().expect("engine instantiated on start");
        match engine {
            Engine::Unidirectional(selector) => loop {
                let branch = selector.next(&mut self.arena, self.graph, &mut self.ctx)?;
                if self.arena.evaluation(branch).includes() {
                    return Some(PathData::from_path(&self.arena.path(branch)));
                }
            },
            Engine::Bidirectional { orderer, detector } => loop {
                let branch = orderer.next(&mut self.arena, self.graph, &mut self.ctx)?;
                let side = orderer.current_side();
                if let Some(mut paths) = detector.evaluate(&mut self.arena, branch, side) {
                    let first = paths.remove(0);
                    if !paths.is_empty() {
                        self.pending = paths.into();
                        self.state = IterState::DrainingCollisions;
                    }
                    return Some(first);
                }
            },
        }
    }

    fn materialize_sorted(&mut self) {
        let comparator = self
            .description
            .comparator
            .clone()
            .expect("sorted mode requires a comparator");
        let mut all = Vec::new();
        while let Some(path) = self.advance() {
            all.push(path);
        }
        all.sort_by(|a, b| comparator(a, b));
        self.sorted = Some(all.into_iter());
    }
}

impl<G: GraphView + 'static> Iterator for Traverser<'_, G> {
    type Item = PathData;

    fn next(&mut self) -> Option<PathData> {
        if let Some(buffer) = &mut self.sorted {
            return buffer.next();
        }
        if self.state == IterState::NotStarted {
            self.start_traversal();
            if self.description.comparator.is_some() {
                // Sorting needs the full result set before the first
                // element can be yielded.
                self.materialize_sorted();
                return self.next();
            }
        }
        self.advance()
    }
}
