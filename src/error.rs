//! Error types for graph operations.

use crate::graph::VertexId;
use thiserror::Error;

/// The error type for graph mutations and keyed queries.
///
/// An infeasible shortest-path query is not an error;
/// see [`Route::Impossible`](crate::algorithm::Route::Impossible).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    /// No vertex carries the given key.
    #[error("vertex not found: {0}")]
    VertexNotFound(String),

    /// A handle was issued before a vertex removal shifted matrix indices.
    #[error("stale handle {vertex:?}: issued at generation {issued}, graph is at {current}")]
    StaleHandle {
        vertex: VertexId,
        issued: u64,
        current: u64,
    },
}

impl GraphError {
    pub(crate) fn vertex_not_found<K: std::fmt::Debug>(key: &K) -> Self {
        Self::VertexNotFound(format!("{:?}", key))
    }
}

/// A specialized Result type for graph operations.
pub type Result<T> = std::result::Result<T, GraphError>;
