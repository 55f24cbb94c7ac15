//! # Activation Functions
//!
//! Non-linear scalar functions used by the neurons in [`crate::nn`]:
//! - [`tanh`](crate::autograd::Graph::tanh)
//! - [`exp`](crate::autograd::Graph::exp)
//! - [`relu`](crate::autograd::Graph::relu)

pub mod exp;
pub mod relu;
pub mod tanh;
