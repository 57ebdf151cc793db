//! # dendrite traversal engine
//!
//! Lazily enumerates paths through a graph according to a pluggable
//! combination of expansion rules, visitation-uniqueness policies,
//! inclusion evaluators and traversal orderings, including a
//! meeting-in-the-middle bidirectional mode for shortest-path search.
//!
//! The engine reads the graph through [`dendrite_api::GraphView`] and
//! never mutates it. Everything is single-threaded, cooperative and
//! pull-based: all work happens inside the call that requests the next
//! path, and abandoning a [`Traverser`] releases all of its state.
//!
//! ```rust,ignore
//! use dendrite_traversal::{TraversalDescription, Uniqueness};
//!
//! let description = TraversalDescription::new()
//!     .breadth_first()
//!     .with_uniqueness(Uniqueness::NodePath);
//! for path in description.traverse(&graph, start) {
//!     println!("{path}");
//! }
//! ```

mod branch;
mod collision;
mod description;
mod error;
mod evaluation;
mod evaluator;
mod expander;
mod orderer;
mod path;
mod selector;
pub mod sorting;
#[cfg(test)]
mod testgraph;
mod traverser;
mod uniqueness;

pub use collision::CollisionPolicy;
pub use description::{PathComparator, TraversalDescription};
pub use error::{Error, Result};
pub use evaluation::Evaluation;
pub use evaluator::{Evaluator, evaluators};
pub use expander::{PathDescription, StandardExpander};
pub use orderer::{SelectorOrdering, Side};
pub use path::PathData;
pub use selector::BranchOrdering;
pub use traverser::{TraversalMetadata, Traverser};
pub use uniqueness::Uniqueness;
