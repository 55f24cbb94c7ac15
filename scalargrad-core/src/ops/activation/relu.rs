use crate::autograd::{Graph, NodeId, Op};
use crate::ops::Operand;

// --- Forward Operation ---

impl Graph {
    /// Rectified linear unit, `max(0, a)`.
    ///
    /// Backward passes the upstream gradient where the output is positive and nothing
    /// elsewhere. A NaN input stays NaN.
    pub fn relu(&mut self, a: impl Into<Operand>) -> NodeId {
        let a = self.as_node(a);
        let input = self.value(a);
        let value = if input < 0.0 { 0.0 } else { input };
        self.push(value, Op::Relu(a))
    }
}

// --- Tests ---
#[cfg(test)]
#[path = "relu_test.rs"]
mod tests;
