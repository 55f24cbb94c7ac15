use crate::autograd::{Graph, NodeId};
use crate::ops::Operand;

impl Graph {
    /// `a / b`, built as `a * b ** -1`.
    ///
    /// Division by zero is not an error: the result follows IEEE-754 and becomes ±infinity
    /// (or NaN for `0 / 0`).
    pub fn div(&mut self, a: impl Into<Operand>, b: impl Into<Operand>) -> NodeId {
        let reciprocal = match b.into() {
            Operand::Scalar(value) => Operand::Scalar(value.powf(-1.0)),
            Operand::Node(id) => Operand::Node(self.powf(id, -1.0)),
        };
        self.mul(a, reciprocal)
    }
}

// --- Tests ---
#[cfg(test)]
#[path = "div_test.rs"]
mod tests;
