//! The immutable traversal configuration value.

use std::cmp::Ordering;
use std::sync::Arc;

use dendrite_api::{Expander, GraphView, NodeId};

use crate::collision::CollisionPolicy;
use crate::error::{Error, Result};
use crate::evaluator::Evaluator;
use crate::expander::StandardExpander;
use crate::orderer::SelectorOrdering;
use crate::path::PathData;
use crate::selector::BranchOrdering;
use crate::traverser::Traverser;
use crate::uniqueness::Uniqueness;

/// Comparator used for the optional result sort.
pub type PathComparator = Arc<dyn Fn(&PathData, &PathData) -> Ordering>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct BidirectionalConfig {
    pub(crate) ordering: SelectorOrdering,
    pub(crate) collision: CollisionPolicy,
    pub(crate) end_node: NodeId,
}

/// Everything a traversal is configured by: expander, uniqueness policy,
/// evaluators, branch ordering, optional bidirectional mode and optional
/// result sort.
///
/// The value is immutable; every `with_*` method returns a new instance
/// and leaves the receiver untouched, so one description can seed any
/// number of independent traversals. Mutators that would not change
/// anything return an unchanged copy.
pub struct TraversalDescription<G: GraphView> {
    pub(crate) expander: Arc<dyn Expander<G>>,
    pub(crate) uniqueness: Uniqueness,
    pub(crate) uniqueness_capacity: Option<usize>,
    pub(crate) evaluators: Vec<Arc<dyn Evaluator>>,
    pub(crate) ordering: BranchOrdering,
    pub(crate) bidirectional: Option<BidirectionalConfig>,
    pub(crate) comparator: Option<PathComparator>,
}

impl<G: GraphView> Clone for TraversalDescription<G> {
    fn clone(&self) -> Self {
        TraversalDescription {
            expander: self.expander.clone(),
            uniqueness: self.uniqueness,
            uniqueness_capacity: self.uniqueness_capacity,
            evaluators: self.evaluators.clone(),
            ordering: self.ordering,
            bidirectional: self.bidirectional,
            comparator: self.comparator.clone(),
        }
    }
}

impl<G: GraphView + 'static> Default for TraversalDescription<G> {
    fn default() -> Self {
        TraversalDescription::new()
    }
}

impl<G: GraphView + 'static> TraversalDescription<G> {
    /// Depth-first traversal of every relationship, visiting each node
    /// once, including every path.
    pub fn new() -> Self {
        TraversalDescription {
            expander: Arc::new(StandardExpander::all()),
            uniqueness: Uniqueness::NodeGlobal,
            uniqueness_capacity: None,
            evaluators: Vec::new(),
            ordering: BranchOrdering::PreorderDepthFirst,
            bidirectional: None,
            comparator: None,
        }
    }

    /// Replace the expander.
    pub fn with_expander(&self, expander: Arc<dyn Expander<G>>) -> Self {
        if Arc::ptr_eq(&self.expander, &expander) {
            return self.clone();
        }
        TraversalDescription {
            expander,
            ..self.clone()
        }
    }

    /// Replace the uniqueness policy, dropping any capacity parameter.
    pub fn with_uniqueness(&self, uniqueness: Uniqueness) -> Self {
        if self.uniqueness == uniqueness && self.uniqueness_capacity.is_none() {
            return self.clone();
        }
        TraversalDescription {
            uniqueness,
            uniqueness_capacity: None,
            ..self.clone()
        }
    }

    /// Replace the uniqueness policy, pre-sizing its visited table.
    ///
    /// Fails synchronously for a zero capacity or a policy that keeps no
    /// table.
    pub fn with_uniqueness_parameter(&self, uniqueness: Uniqueness, capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(Error::ZeroUniquenessCapacity);
        }
        if !uniqueness.accepts_parameter() {
            return Err(Error::UniquenessParameterNotAccepted(uniqueness));
        }
        if self.uniqueness == uniqueness && self.uniqueness_capacity == Some(capacity) {
            return Ok(self.clone());
        }
        Ok(TraversalDescription {
            uniqueness,
            uniqueness_capacity: Some(capacity),
            ..self.clone()
        })
    }

    /// Add an evaluator. Evaluators compose conjunctively: a path is
    /// included only if all of them include it, and expansion stops as
    /// soon as any of them prunes.
    pub fn with_evaluator(&self, evaluator: Arc<dyn Evaluator>) -> Self {
        if self
            .evaluators
            .iter()
            .any(|existing| Arc::ptr_eq(existing, &evaluator))
        {
            return self.clone();
        }
        let mut new = self.clone();
        new.evaluators.push(evaluator);
        new
    }

    /// Replace the branch ordering policy.
    pub fn with_order(&self, ordering: BranchOrdering) -> Self {
        if self.ordering == ordering {
            return self.clone();
        }
        TraversalDescription {
            ordering,
            ..self.clone()
        }
    }

    /// Depth-first branch ordering.
    pub fn depth_first(&self) -> Self {
        self.with_order(BranchOrdering::PreorderDepthFirst)
    }

    /// Breadth-first branch ordering.
    pub fn breadth_first(&self) -> Self {
        self.with_order(BranchOrdering::PreorderBreadthFirst)
    }

    /// Turn this into a bidirectional search meeting in the middle
    /// between the start node(s) and `end_node`. The reverse half uses
    /// the reversed expander.
    pub fn with_bidirectional(
        &self,
        ordering: SelectorOrdering,
        collision: CollisionPolicy,
        end_node: NodeId,
    ) -> Self {
        let config = BidirectionalConfig {
            ordering,
            collision,
            end_node,
        };
        if self.bidirectional == Some(config) {
            return self.clone();
        }
        TraversalDescription {
            bidirectional: Some(config),
            ..self.clone()
        }
    }

    /// Sort the results with `comparator` before yielding them.
    ///
    /// Sorting requires the whole result set, so the traversal runs to
    /// completion on the first pull; do not combine with traversals that
    /// are unbounded by pruning or uniqueness.
    pub fn with_sort(&self, comparator: PathComparator) -> Self {
        TraversalDescription {
            comparator: Some(comparator),
            ..self.clone()
        }
    }

    /// Start a lazy traversal from `start`.
    ///
    /// The traverser is one-shot; the description stays reusable.
    pub fn traverse<'g>(&self, graph: &'g G, start: NodeId) -> Traverser<'g, G> {
        self.traverse_all(graph, &[start])
    }

    /// Start a lazy traversal from several start nodes at once. The
    /// search tree gets one root per node, expanded under a single shared
    /// uniqueness filter.
    pub fn traverse_all<'g>(&self, graph: &'g G, starts: &[NodeId]) -> Traverser<'g, G> {
        Traverser::new(self.clone(), graph, starts.to_vec())
    }
}
