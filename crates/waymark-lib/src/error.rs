use std::path::PathBuf;

use thiserror::Error;

use crate::graph::NodeId;

/// Convenient result alias for the waymark library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Text map could not be located at the resolved path.
    #[error("map file not found at {path}")]
    MapNotFound { path: PathBuf },

    /// Raised when a query endpoint is not present in the graph.
    #[error("unknown node id: {id}")]
    UnknownNode { id: NodeId },

    /// Raised when the frontier empties before the target is reached.
    #[error("no route found between {origin} and {target}")]
    RouteNotFound { origin: NodeId, target: NodeId },

    /// Raised when a computed route plan lacks any steps.
    #[error("route plan was empty")]
    EmptyRoutePlan,

    /// Raised when a binary graph is truncated or internally inconsistent.
    #[error("failed to decode graph at byte {offset}: {message}")]
    GraphDecode { offset: usize, message: String },

    /// Raised when a graph cannot be represented in the binary layout.
    #[error("failed to encode graph: {message}")]
    GraphEncode { message: String },

    /// Raised when a binary graph file cannot be opened.
    #[error("failed to load graph from {path}: {message}")]
    GraphLoad { path: PathBuf, message: String },

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Wrapper for JSON rendering errors.
    #[error(transparent)]
    Serialize(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn decode(offset: usize, message: impl Into<String>) -> Self {
        Error::GraphDecode {
            offset,
            message: message.into(),
        }
    }
}
