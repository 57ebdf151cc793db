//! Meeting-point detection for bidirectional searches.

use indexmap::IndexMap;

use dendrite_api::NodeId;

use crate::branch::{BranchArena, BranchId};
use crate::orderer::Side;
use crate::path::{BidirectionalBranchPath, PathData};

/// How collisions between the two sides of a bidirectional search are
/// turned into result paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CollisionPolicy {
    /// Every contact produces the combined paths; colliding branches keep
    /// expanding. Suited to general bidirectional search.
    Standard,
    /// Shortest-path semantics: colliding branches are pruned, the first
    /// collision locks the accepted path length, and later collisions of
    /// any other length are discarded.
    #[default]
    ShortestPath,
}

impl CollisionPolicy {
    pub(crate) fn create(self) -> PathCollisionDetector {
        PathCollisionDetector {
            policy: self,
            table: IndexMap::new(),
            locked_length: None,
        }
    }
}

/// Tracks, per node, which branches of each side have ended there, and
/// builds combined paths when the sides touch.
///
/// Entries are created lazily on first contact and never removed; a node
/// may collide repeatedly as more branches arrive, which is how multiple
/// equal-length shortest paths are found.
pub(crate) struct PathCollisionDetector {
    policy: CollisionPolicy,
    table: IndexMap<NodeId, [Vec<BranchId>; 2]>,
    locked_length: Option<usize>,
}

impl PathCollisionDetector {
    /// Record `branch` under its end node for `side`; if the opposite
    /// side has already reached that node, return the combined paths.
    ///
    /// Returns `None` when there is no collision, or when every combined
    /// path was discarded by the length lock.
    pub(crate) fn evaluate(
        &mut self,
        arena: &mut BranchArena,
        branch: BranchId,
        side: Side,
    ) -> Option<Vec<PathData>> {
        let node = arena.end_node(branch);
        let buckets = self
            .table
            .entry(node)
            .or_insert_with(|| [Vec::new(), Vec::new()]);
        let index = match side {
            Side::Start => 0,
            Side::End => 1,
        };
        buckets[index].push(branch);
        let others = buckets[1 - index].clone();
        if others.is_empty() {
            return None;
        }

        if self.policy == CollisionPolicy::ShortestPath {
            arena.prune(branch);
            for &other in &others {
                arena.prune(other);
            }
        }

        let mut found = Vec::new();
        for other in others {
            let (start, end) = match side {
                Side::Start => (branch, other),
                Side::End => (other, branch),
            };
            let length = arena.depth(start) + arena.depth(end);
            if !self.accepts_length(length) {
                continue;
            }
            found.push(PathData::from_path(&BidirectionalBranchPath {
                arena,
                start,
                end,
            }));
        }
        if found.is_empty() {
            None
        } else {
            tracing::debug!(node, count = found.len(), "path collision");
            Some(found)
        }
    }

    fn accepts_length(&mut self, length: usize) -> bool {
        match self.policy {
            CollisionPolicy::Standard => true,
            CollisionPolicy::ShortestPath => match self.locked_length {
                None => {
                    self.locked_length = Some(length);
                    true
                }
                Some(locked) => length == locked,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use dendrite_api::Path;

    use super::*;
    use crate::evaluation::Evaluation;

    fn arena_with_chain(nodes: &[NodeId]) -> (BranchArena, Vec<BranchId>) {
        // Hand-build a branch chain without going through expansion.
        let mut arena = BranchArena::new();
        let mut ids = Vec::new();
        let mut current = arena.add_start(nodes[0]);
        ids.push(current);
        for (i, &node) in nodes.iter().enumerate().skip(1) {
            current = arena.add_test_child(current, node, i as u64);
            ids.push(current);
        }
        (arena, ids)
    }

    #[test]
    fn no_collision_before_both_sides_arrive() {
        let (mut arena, ids) = arena_with_chain(&[1, 2]);
        let mut detector = CollisionPolicy::ShortestPath.create();
        assert!(
            detector
                .evaluate(&mut arena, ids[1], Side::Start)
                .is_none()
        );
    }

    #[test]
    fn collision_combines_both_chains() {
        // Start side walks 1 -> 2, end side walks 3 -> 2; meeting at 2.
        let (mut arena, start_ids) = arena_with_chain(&[1, 2]);
        let end_root = arena.add_start(3);
        let end_branch = arena.add_test_child(end_root, 2, 99);

        let mut detector = CollisionPolicy::ShortestPath.create();
        assert!(
            detector
                .evaluate(&mut arena, start_ids[1], Side::Start)
                .is_none()
        );
        let paths = detector
            .evaluate(&mut arena, end_branch, Side::End)
            .expect("collision at node 2");
        assert_eq!(paths.len(), 1);
        assert_eq!(paths[0].length(), 2);
        assert_eq!(paths[0].nodes(), vec![1, 2, 3]);
    }

    #[test]
    fn shortest_path_prunes_colliding_branches() {
        let (mut arena, start_ids) = arena_with_chain(&[1, 2]);
        let end_root = arena.add_start(3);
        let end_branch = arena.add_test_child(end_root, 2, 99);

        let mut detector = CollisionPolicy::ShortestPath.create();
        detector.evaluate(&mut arena, start_ids[1], Side::Start);
        detector.evaluate(&mut arena, end_branch, Side::End);
        assert_eq!(arena.evaluation(start_ids[1]), Evaluation::ExcludeAndContinue);
        // Pruning empties the candidate state rather than touching the
        // evaluation; expansion must now yield nothing.
        assert!(arena.is_pruned(start_ids[1]));
        assert!(arena.is_pruned(end_branch));
    }

    #[test]
    fn length_lock_discards_longer_collisions() {
        // First collision at combined length 2, second at length 3.
        let (mut arena, short) = arena_with_chain(&[1, 2]);
        let end_root = arena.add_start(3);
        let end_at_2 = arena.add_test_child(end_root, 2, 90);

        let long_root = arena.add_start(1);
        let long_mid = arena.add_test_child(long_root, 4, 91);
        let long_at_5 = arena.add_test_child(long_mid, 5, 92);
        let end_at_5 = arena.add_test_child(end_root, 5, 93);

        let mut detector = CollisionPolicy::ShortestPath.create();
        detector.evaluate(&mut arena, short[1], Side::Start);
        let first = detector.evaluate(&mut arena, end_at_2, Side::End).unwrap();
        assert_eq!(first[0].length(), 2);

        detector.evaluate(&mut arena, long_at_5, Side::Start);
        // Combined length would be 2 + 1 = 3: discarded entirely.
        assert!(detector.evaluate(&mut arena, end_at_5, Side::End).is_none());
    }

    #[test]
    fn standard_policy_reports_every_length() {
        let (mut arena, short) = arena_with_chain(&[1, 2]);
        let end_root = arena.add_start(3);
        let end_at_2 = arena.add_test_child(end_root, 2, 90);
        let long_mid = arena.add_test_child(short[0], 4, 91);
        let long_at_5 = arena.add_test_child(long_mid, 5, 92);
        let end_at_5 = arena.add_test_child(end_root, 5, 93);

        let mut detector = CollisionPolicy::Standard.create();
        detector.evaluate(&mut arena, short[1], Side::Start);
        assert!(detector.evaluate(&mut arena, end_at_2, Side::End).is_some());
        detector.evaluate(&mut arena, long_at_5, Side::Start);
        let second = detector.evaluate(&mut arena, end_at_5, Side::End).unwrap();
        assert_eq!(second[0].length(), 3);
        assert!(!arena.is_pruned(short[1]));
    }
}
