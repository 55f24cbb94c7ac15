// Scalar reverse-mode automatic differentiation, plus a small neural network library on top.
pub mod autograd;
pub mod error;
pub mod model;
pub mod nn;
pub mod ops;

// Re-export the engine types so they are reachable as `scalargrad_core::Graph` etc.
pub use autograd::{Graph, Node, NodeId, Op};
pub use error::EngineError;
pub use ops::Operand;
// Re-export traits required by public functions
pub use num_traits;
