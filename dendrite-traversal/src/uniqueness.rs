//! Visitation-uniqueness policies: gates deciding whether a freshly built
//! branch may be visited at all.

use indexmap::IndexSet;

use crate::branch::{BranchArena, BranchId};

/// Granularity at which revisits are rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Uniqueness {
    /// A node is visited at most once in the whole traversal.
    NodeGlobal,
    /// A relationship is traversed at most once in the whole traversal.
    RelationshipGlobal,
    /// A node appears at most once within a single path; different paths
    /// may share nodes.
    NodePath,
    /// A relationship appears at most once within a single path.
    RelationshipPath,
    /// Like `NodeGlobal`, but the visited set resets whenever the
    /// traversal advances to a deeper level. Meant for breadth-first
    /// orderings, where depth is monotone.
    NodeLevel,
    /// Like `NodeLevel`, for relationships.
    RelationshipLevel,
    /// No filtering; every candidate branch is visited.
    None,
}

impl Uniqueness {
    /// Whether `with_uniqueness_parameter` may pass a capacity for this
    /// policy. Only the policies that keep a visited table do.
    pub(crate) fn accepts_parameter(self) -> bool {
        matches!(
            self,
            Uniqueness::NodeGlobal
                | Uniqueness::RelationshipGlobal
                | Uniqueness::NodeLevel
                | Uniqueness::RelationshipLevel
        )
    }

    pub(crate) fn create(self, capacity: Option<usize>) -> UniquenessFilter {
        let seen = IndexSet::with_capacity(capacity.unwrap_or(0));
        match self {
            Uniqueness::NodeGlobal => UniquenessFilter::Global {
                entity: Entity::Node,
                seen,
            },
            Uniqueness::RelationshipGlobal => UniquenessFilter::Global {
                entity: Entity::Relationship,
                seen,
            },
            Uniqueness::NodePath => UniquenessFilter::PerPath {
                entity: Entity::Node,
            },
            Uniqueness::RelationshipPath => UniquenessFilter::PerPath {
                entity: Entity::Relationship,
            },
            Uniqueness::NodeLevel => UniquenessFilter::PerLevel {
                entity: Entity::Node,
                level: 0,
                seen,
            },
            Uniqueness::RelationshipLevel => UniquenessFilter::PerLevel {
                entity: Entity::Relationship,
                level: 0,
                seen,
            },
            Uniqueness::None => UniquenessFilter::None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Entity {
    Node,
    Relationship,
}

impl Entity {
    /// The identity this policy tracks for a branch: its end node, or the
    /// relationship it arrived by. Start branches have no relationship.
    fn id_of(self, arena: &BranchArena, branch: BranchId) -> Option<u64> {
        match self {
            Entity::Node => Some(arena.end_node(branch)),
            Entity::Relationship => arena.last_relationship(branch).map(|rel| rel.id),
        }
    }
}

/// Stateful instantiation of a [`Uniqueness`] policy for one traversal.
pub(crate) enum UniquenessFilter {
    None,
    Global {
        entity: Entity,
        seen: IndexSet<u64>,
    },
    PerPath {
        entity: Entity,
    },
    PerLevel {
        entity: Entity,
        level: usize,
        seen: IndexSet<u64>,
    },
}

impl UniquenessFilter {
    /// Gate for start branches. Node-scoped policies must register the
    /// start node; relationship-scoped ones have nothing to check yet.
    pub(crate) fn check_first(&mut self, arena: &BranchArena, branch: BranchId) -> bool {
        let node_scoped = match self {
            UniquenessFilter::None | UniquenessFilter::PerPath { .. } => return true,
            UniquenessFilter::Global { entity, .. }
            | UniquenessFilter::PerLevel { entity, .. } => *entity == Entity::Node,
        };
        if node_scoped {
            self.check(arena, branch)
        } else {
            true
        }
    }

    /// Gate for candidate branches: `true` means the branch may be
    /// visited.
    pub(crate) fn check(&mut self, arena: &BranchArena, branch: BranchId) -> bool {
        match self {
            UniquenessFilter::None => true,
            UniquenessFilter::Global { entity, seen } => match entity.id_of(arena, branch) {
                Some(id) => seen.insert(id),
                None => true,
            },
            UniquenessFilter::PerPath { entity } => {
                let Some(id) = entity.id_of(arena, branch) else {
                    return true;
                };
                // Walk the ancestor chain; no shared table is kept.
                arena
                    .chain(branch)
                    .skip(1)
                    .all(|ancestor| entity.id_of(arena, ancestor) != Some(id))
            }
            UniquenessFilter::PerLevel { entity, level, seen } => {
                let depth = arena.depth(branch);
                if depth > *level {
                    *level = depth;
                    seen.clear();
                }
                match entity.id_of(arena, branch) {
                    Some(id) => seen.insert(id),
                    None => true,
                }
            }
        }
    }
}
