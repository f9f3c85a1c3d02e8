//! Error types for the clustering engine.

use thiserror::Error;

/// Errors that can occur while building, evaluating or rounding a clustering.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClusterError {
    /// Malformed vertex/edge lists or a malformed LP solution map.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// An assignment lacks a label for a vertex referenced by an edge.
    #[error("No cluster assigned to vertex {0}")]
    MissingVertexAssignment(String),

    /// The external relaxation solver failed.
    #[error("Relaxation solve failed: {0}")]
    SolverError(String),
}

/// Result type for clustering operations.
pub type ClusterResult<T> = Result<T, ClusterError>;
