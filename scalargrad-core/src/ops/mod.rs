//! # Scalar Operations Module (`ops`)
//!
//! Every operation appends one node to a [`Graph`](crate::autograd::Graph) and tags it with the
//! [`Op`](crate::autograd::Op) variant that `propagate_gradient` later dispatches on. Operations
//! are exposed as methods on `Graph` and accept any [`Operand`]: a node handle or a plain
//! number, which is coerced into a leaf first.
//!
//! ## Panics
//!
//! Every operation panics if a node operand does not belong to the graph it is called on, or
//! was dropped by [`Graph::truncate`](crate::autograd::Graph::truncate). Use
//! [`Graph::try_node`](crate::autograd::Graph::try_node) to check a handle beforehand.
//!
//! ## Key Submodules:
//!
//! - [`arithmetic`]: add, mul, pow and the derived neg, sub, div.
//! - [`activation`]: tanh, exp, relu.
//! - [`operand`]: the node-or-number parameter type and `as_node` coercion.

pub mod activation;
pub mod arithmetic;
pub mod operand;

pub use operand::Operand;
