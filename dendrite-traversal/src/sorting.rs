//! Comparators for the optional result sort.

use std::sync::Arc;

use dendrite_api::Path;

use crate::description::PathComparator;

/// Shortest paths first.
pub fn by_length() -> PathComparator {
    Arc::new(|a, b| a.length().cmp(&b.length()))
}

/// Longest paths first.
pub fn by_length_descending() -> PathComparator {
    Arc::new(|a, b| b.length().cmp(&a.length()))
}

/// Ascending end-node identity.
pub fn by_end_node() -> PathComparator {
    Arc::new(|a, b| a.end_node().cmp(&b.end_node()))
}
