use crate::autograd::{Graph, NodeId, Op};
use crate::error::EngineError;
use crate::ops::Operand;

// --- Forward Operation ---

impl Graph {
    /// `base ** exponent` for a constant exponent.
    ///
    /// Backward passes `exponent * base ** (exponent - 1) * grad` to `base`.
    ///
    /// # Errors
    /// Returns [`EngineError::TypeKind`] if `exponent` is a node: raising to the power of
    /// another node is not supported.
    pub fn pow(
        &mut self,
        base: impl Into<Operand>,
        exponent: impl Into<Operand>,
    ) -> Result<NodeId, EngineError> {
        let exponent = match exponent.into() {
            Operand::Scalar(exponent) => exponent,
            Operand::Node(id) => {
                return Err(EngineError::TypeKind {
                    operation: "pow".to_string(),
                    expected: "a numeric constant exponent".to_string(),
                    found: format!("node {}", id),
                })
            }
        };
        let base = self.as_node(base);
        Ok(self.powf(base, exponent))
    }

    /// Infallible form of [`Graph::pow`] used by the derived operations.
    pub(crate) fn powf(&mut self, base: NodeId, exponent: f64) -> NodeId {
        let value = self.value(base).powf(exponent);
        self.push(value, Op::Pow { base, exponent })
    }
}

// --- Tests ---
#[cfg(test)]
#[path = "pow_test.rs"]
mod tests;
