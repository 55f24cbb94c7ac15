//! # Autograd
//!
//! The computation graph lives in a [`Graph`] arena. Every operation in [`crate::ops`] appends a
//! [`Node`] tagged with the [`Op`] that produced it; [`Graph::backward`] walks the nodes
//! reachable from a root in reverse topological order and applies each node's chain-rule step.

pub mod backward_op;
pub mod grad_check;
pub mod graph;

pub use backward_op::Op;
pub use graph::{Graph, Node, NodeId};
