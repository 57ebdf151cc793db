use thiserror::Error;

use crate::uniqueness::Uniqueness;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("uniqueness policy {0:?} does not take a parameter")]
    UniquenessParameterNotAccepted(Uniqueness),

    #[error("uniqueness capacity must be greater than zero")]
    ZeroUniquenessCapacity,

    #[error("path description has no steps")]
    EmptyPathDescription,

    #[error("no traversal has been started")]
    NoTraversalStarted,
}
