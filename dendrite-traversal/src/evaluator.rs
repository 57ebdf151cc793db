//! Inclusion and pruning decisions for branches.

use std::sync::Arc;

use dendrite_api::{NodeId, Path, RelTypeId};

use crate::evaluation::Evaluation;

/// Decides, for each branch, whether the path it represents is included in
/// the result and whether the branch is expanded further.
///
/// Must be deterministic given the branch's node, last relationship, depth
/// and ancestor chain, all of which are reachable through `path`.
pub trait Evaluator {
    fn evaluate(&self, path: &dyn Path) -> Evaluation;
}

/// Conjunctive fold over a list of evaluators: a path is included only if
/// every evaluator includes it, and expansion continues only if every
/// evaluator continues. An empty list includes and continues everything.
pub(crate) fn evaluate_all(evaluators: &[Arc<dyn Evaluator>], path: &dyn Path) -> Evaluation {
    evaluators
        .iter()
        .fold(Evaluation::IncludeAndContinue, |acc, e| {
            acc.and(e.evaluate(path))
        })
}

/// Built-in evaluators.
pub mod evaluators {
    use super::*;

    struct All;

    impl Evaluator for All {
        fn evaluate(&self, _path: &dyn Path) -> Evaluation {
            Evaluation::IncludeAndContinue
        }
    }

    /// Includes every path and never prunes.
    pub fn all() -> Arc<dyn Evaluator> {
        Arc::new(All)
    }

    struct AtDepth(usize);

    impl Evaluator for AtDepth {
        fn evaluate(&self, path: &dyn Path) -> Evaluation {
            if path.length() == self.0 {
                Evaluation::IncludeAndPrune
            } else {
                Evaluation::ExcludeAndContinue
            }
        }
    }

    /// Includes exactly the paths of length `depth` and prunes below them.
    pub fn at_depth(depth: usize) -> Arc<dyn Evaluator> {
        Arc::new(AtDepth(depth))
    }

    struct ToDepth(usize);

    impl Evaluator for ToDepth {
        fn evaluate(&self, path: &dyn Path) -> Evaluation {
            if path.length() < self.0 {
                Evaluation::IncludeAndContinue
            } else {
                Evaluation::IncludeAndPrune
            }
        }
    }

    /// Includes paths up to and including length `depth`, pruning past it.
    pub fn to_depth(depth: usize) -> Arc<dyn Evaluator> {
        Arc::new(ToDepth(depth))
    }

    struct FromDepth(usize);

    impl Evaluator for FromDepth {
        fn evaluate(&self, path: &dyn Path) -> Evaluation {
            if path.length() >= self.0 {
                Evaluation::IncludeAndContinue
            } else {
                Evaluation::ExcludeAndContinue
            }
        }
    }

    /// Includes paths of length `depth` or more.
    pub fn from_depth(depth: usize) -> Arc<dyn Evaluator> {
        Arc::new(FromDepth(depth))
    }

    struct EndNodeIs(Vec<NodeId>);

    impl Evaluator for EndNodeIs {
        fn evaluate(&self, path: &dyn Path) -> Evaluation {
            Evaluation::of(self.0.contains(&path.end_node()), true)
        }
    }

    /// Includes exactly the paths ending at one of the given nodes.
    pub fn include_where_end_node_is(nodes: impl IntoIterator<Item = NodeId>) -> Arc<dyn Evaluator> {
        Arc::new(EndNodeIs(nodes.into_iter().collect()))
    }

    struct LastRelationshipTypeIs(RelTypeId);

    impl Evaluator for LastRelationshipTypeIs {
        fn evaluate(&self, path: &dyn Path) -> Evaluation {
            let matches = path
                .last_relationship()
                .is_some_and(|rel| rel.rel_type == self.0);
            Evaluation::of(matches, true)
        }
    }

    /// Includes exactly the paths whose last relationship has the given
    /// type. Zero-length paths are excluded.
    pub fn include_where_last_relationship_type_is(rel_type: RelTypeId) -> Arc<dyn Evaluator> {
        Arc::new(LastRelationshipTypeIs(rel_type))
    }

    struct FnEvaluator<F>(F);

    impl<F: Fn(&dyn Path) -> Evaluation> Evaluator for FnEvaluator<F> {
        fn evaluate(&self, path: &dyn Path) -> Evaluation {
            (self.0)(path)
        }
    }

    /// Wraps a closure as an evaluator.
    pub fn from_fn<F>(f: F) -> Arc<dyn Evaluator>
    where
        F: Fn(&dyn Path) -> Evaluation + 'static,
    {
        Arc::new(FnEvaluator(f))
    }
}
