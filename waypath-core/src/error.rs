//! Error types for waypath-core.
//!
//! Every variant is recoverable at the caller boundary. `PathError` messages
//! are written to be shown to an end user as a notice; `AnimationError`
//! signals an integration bug and should fail fast.

use thiserror::Error;

/// Result type alias for graph construction and loading.
pub type GraphResult<T> = std::result::Result<T, GraphError>;

/// Errors raised while building, loading or mutating a [`Graph`](crate::Graph).
#[derive(Error, Debug)]
pub enum GraphError {
    /// A node with the same identifier already exists.
    #[error("Duplicate node id: {id}")]
    DuplicateNode {
        /// The repeated identifier.
        id: String,
    },

    /// An edge references a node that is not part of the graph.
    #[error("Edge {source_id} -- {target_id} references unknown node: {missing}")]
    UnknownNode {
        /// Edge source as supplied.
        source_id: String,
        /// Edge target as supplied.
        target_id: String,
        /// The endpoint that could not be resolved.
        missing: String,
    },

    /// IO error reading a graph file.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed graph JSON.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors returned by the path finder and by session path queries.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PathError {
    /// Origin or destination is not a node of the graph.
    #[error("Unknown node: {id}")]
    InvalidEndpoint {
        /// The identifier that was not found.
        id: String,
    },

    /// An edge carries a negative or non-finite weight.
    #[error("Invalid weight {weight} on edge {source_id} -- {target_id}: weights must be non-negative")]
    InvalidWeight {
        /// Edge endpoint.
        source_id: String,
        /// Edge endpoint.
        target_id: String,
        /// The offending weight.
        weight: f64,
    },

    /// The destination cannot be reached from the origin.
    #[error("No path exists between {source_id} and {target_id}")]
    NoPathExists {
        /// Requested origin.
        source_id: String,
        /// Requested destination.
        target_id: String,
    },

    /// A path was requested before both endpoints were selected.
    #[error("Select both an origin and a destination first")]
    SelectionIncomplete,
}

/// Precondition violations when driving a [`PathAnimator`](crate::PathAnimator).
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationError {
    /// An animation was requested for an empty path.
    #[error("Cannot animate an empty path")]
    InvalidPath,

    /// The handle was cancelled, replaced, or never issued by this animator.
    #[error("Animation handle {0} is not active")]
    InvalidHandle(u64),
}
