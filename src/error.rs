//! Error types for the labeling, the audit and the instance I/O.

use thiserror::Error;

use crate::tree::VertexId;

/// Result type alias for labeling operations.
pub type Result<T> = std::result::Result<T, ProximityError>;

/// Errors raised by the labeler, the auditor and the instance readers.
#[derive(Error, Debug)]
pub enum ProximityError {
    /// Malformed tree, k outside `[1, n]`, root out of range, ...
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The greedy step found more unlabeled nodes than free labels in a neighborhood.
    #[error("allocation exhausted at node {node}: {unassigned} unlabeled nodes but only {available} free labels")]
    AllocationExhausted {
        /// node whose neighborhood was being labeled
        node: VertexId,
        /// unlabeled nodes in the neighborhood
        unassigned: usize,
        /// labels not yet used in the neighborhood
        available: usize,
    },

    /// A label was seen twice before all labels were seen.
    #[error("label {label} of node {node} appears twice in the neighborhood of {source_node}")]
    DuplicateLabelInNeighborhood {
        /// source of the neighborhood query
        source_node: VertexId,
        /// node carrying the repeated label
        node: VertexId,
        /// repeated label
        label: usize,
    },

    /// A node carries a label outside `[0, k-1]`.
    #[error("node {node} has label {label}, outside [0, {k})")]
    LabelOutOfRange {
        /// offending node
        node: VertexId,
        /// its label
        label: usize,
        /// number of labels
        k: usize,
    },

    /// A node reached by a query on a complete labeling has no label.
    #[error("node {0} is not labeled")]
    UnlabeledNode(VertexId),

    /// Some subset member is unreachable from the source inside the subset.
    #[error("node {node} of the subset is not reachable from {source_node} inside the subset")]
    DisconnectedSubset {
        /// source of the distance computation
        source_node: VertexId,
        /// first unreachable member
        node: VertexId,
    },

    /// The k-node neighborhood of a node has radius 0 (k = 1 or a single node tree).
    #[error("k-node radius of node {0} is zero")]
    DivideByZero(VertexId),

    /// Instance file could not be parsed.
    #[error("parse error: {0}")]
    Parse(String),

    /// I/O error.
    #[error("io error: {0}")]
    IoError(#[from] std::io::Error),

    /// Serialization error.
    #[error("serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}
