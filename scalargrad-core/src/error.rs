use crate::autograd::NodeId;
use thiserror::Error;

/// Custom error type for the scalargrad engine.
#[derive(Error, Debug, PartialEq, Clone)] // PartialEq for easier testing
pub enum EngineError {
    #[error("Type error in {operation}: expected {expected}, got {found}")]
    TypeKind {
        operation: String,
        expected: String,
        found: String,
    },

    #[error("Input size mismatch: expected {expected} inputs, got {actual}")]
    InputSizeMismatch { expected: usize, actual: usize },

    #[error("Cannot overwrite the value of node {node}: it was produced by '{op}', only leaves can be set")]
    NotALeaf { node: NodeId, op: String },

    #[error("Unknown node {node}: graph only holds {len} nodes")]
    UnknownNode { node: NodeId, len: usize },

    #[error("Invalid layer sizes: {0}")]
    InvalidLayerSizes(String),

    #[error("Invalid initialization: {0}")]
    InvalidInit(String),
}
