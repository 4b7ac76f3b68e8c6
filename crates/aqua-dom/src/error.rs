//! DOM operation errors

use crate::{NodeId, SelectorError};

/// Result type for DOM operations
pub type DomResult<T> = Result<T, DomError>;

/// DOM operation errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomError {
    #[error("Node not found: {0:?}")]
    NotFound(NodeId),

    #[error("Node is not an element: {0:?}")]
    NotAnElement(NodeId),

    #[error("Hierarchy request error")]
    HierarchyRequest,

    #[error("Invalid selector: {0}")]
    InvalidSelector(#[from] SelectorError),
}
