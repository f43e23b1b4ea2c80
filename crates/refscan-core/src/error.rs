//! Error types for the reference scanner.

use thiserror::Error;

use crate::model::ObjectId;

/// Result type for core operations.
pub type CoreResult<T> = Result<T, ScanError>;

/// Boxed error produced by a host collaborator.
pub type HostError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors raised while building an [`ObjectGraph`](crate::ObjectGraph).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GraphError {
    /// Every object id up to `u64::MAX` is already taken.
    #[error("No object ids left to assign")]
    IdsExhausted,
}

/// Errors that can abort a scan.
///
/// Finding nothing is not an error: an empty result list is a successful scan.
#[derive(Debug, Error)]
pub enum ScanError {
    /// Walking parent links from `object` led back to a node already visited.
    #[error("Cyclic hierarchy detected while resolving the path of object {object}")]
    CyclicHierarchy { object: ObjectId },

    /// A root or parent id the hierarchy does not know about.
    #[error("Object {object} is not part of the hierarchy")]
    UnknownObject { object: ObjectId },

    /// Failure reported by a host collaborator, passed through untouched.
    #[error("{0}")]
    Host(#[source] HostError),
}

impl ScanError {
    /// Wrap a host collaborator error.
    pub fn host(err: impl Into<HostError>) -> Self {
        Self::Host(err.into())
    }

    /// Whether this error indicates a corrupt object graph.
    pub fn is_inconsistent_graph(&self) -> bool {
        matches!(
            self,
            ScanError::CyclicHierarchy { .. } | ScanError::UnknownObject { .. }
        )
    }
}
