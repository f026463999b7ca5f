//! Error types for tree construction and requirement matching.

use thiserror::Error;

/// Errors returned by [`Tree`](crate::Tree) construction and requirement lookups.
///
/// Every variant is an expected outcome of querying possibly-absent data; none
/// of them indicate a fault in the tree itself.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProbeError {
    /// The requirement failed validation and was not registered.
    #[error("Invalid requirement: {0}")]
    InvalidRequirement(String),

    /// The requirement is well-formed but nothing within the allowed depth matched.
    #[error("The required node was not found in the parent")]
    NodeNotFound,

    /// The document handed to the tree builder was null or empty.
    #[error("Cannot build a tree from an empty document")]
    EmptyDocument,
}

impl ProbeError {
    /// `true` when a well-formed requirement simply was not satisfied.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ProbeError::NodeNotFound)
    }

    /// `true` when the requirement itself was rejected before any search ran.
    pub fn is_invalid(&self) -> bool {
        matches!(self, ProbeError::InvalidRequirement(_))
    }
}

/// Convenience alias used throughout treeprobe.
pub type Result<T> = std::result::Result<T, ProbeError>;
