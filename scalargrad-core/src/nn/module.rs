use crate::autograd::{Graph, NodeId};
use crate::error::EngineError;
use crate::ops::Operand;

/// The base trait for all neural network modules (neurons, layers, networks).
///
/// Modules do not own a graph. Their parameters are leaf nodes living in the [`Graph`] they
/// were created on, and `forward` appends the computation to that same graph.
pub trait Module: std::fmt::Debug {
    /// Performs a forward pass of the module.
    ///
    /// # Arguments
    /// * `graph`: The graph holding this module's parameters. New nodes are appended to it.
    /// * `inputs`: One operand per input feature.
    ///
    /// # Returns
    /// One output node per output feature, or an [`EngineError::InputSizeMismatch`] if
    /// `inputs` has the wrong length.
    fn forward(&self, graph: &mut Graph, inputs: &[Operand]) -> Result<Vec<NodeId>, EngineError>;

    /// Returns all learnable parameters of the module, including those of sub-modules.
    fn parameters(&self) -> Vec<NodeId>;

    /// Returns all learnable parameters with hierarchical names
    /// (e.g. `"layers.0.neurons.1.w.2"`, `"layers.0.neurons.1.b"`).
    fn named_parameters(&self) -> Vec<(String, NodeId)>;

    /// Returns the direct child modules. Leaf modules have none.
    fn children(&self) -> Vec<&dyn Module> {
        Vec::new()
    }

    /// Returns the direct child modules along with their names.
    fn named_children(&self) -> Vec<(String, &dyn Module)> {
        Vec::new()
    }

    /// Returns all modules in the tree (self + all descendants), depth-first.
    fn modules(&self) -> Vec<&dyn Module>;

    /// Resets the gradient of every parameter to zero.
    ///
    /// [`Graph::backward`] accumulates, so this must be called between two
    /// forward/backward cycles that reuse the same parameters.
    fn zero_grad(&self, graph: &mut Graph) {
        graph.zero_grad_of(&self.parameters());
    }
}

/// Checks the number of inputs a module receives against the number it was built for.
pub(crate) fn check_input_size(expected: usize, inputs: &[Operand]) -> Result<(), EngineError> {
    if inputs.len() != expected {
        return Err(EngineError::InputSizeMismatch {
            expected,
            actual: inputs.len(),
        });
    }
    Ok(())
}
