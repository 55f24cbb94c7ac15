use crate::autograd::{Graph, NodeId};
use crate::error::EngineError;
use crate::nn::init::Init;
use crate::nn::module::{check_input_size, Module};
use crate::ops::Operand;
use rand::Rng;

/// Non-linearity applied to a neuron's weighted sum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Activation {
    #[default]
    Tanh,
    Relu,
    /// No activation; the weighted sum is returned as is.
    Linear,
}

impl Activation {
    pub fn apply(&self, graph: &mut Graph, x: NodeId) -> NodeId {
        match self {
            Activation::Tanh => graph.tanh(x),
            Activation::Relu => graph.relu(x),
            Activation::Linear => x,
        }
    }
}

/// A single unit computing `act(b + Σ w_i * x_i)`.
#[derive(Debug, Clone)]
pub struct Neuron {
    weights: Vec<NodeId>,
    bias: NodeId,
    activation: Activation,
}

impl Neuron {
    /// Creates a neuron with `nin` weights and a bias, all drawn from `init` as new leaves of
    /// `graph`.
    pub fn new<R: Rng + ?Sized>(
        graph: &mut Graph,
        nin: usize,
        init: Init,
        activation: Activation,
        rng: &mut R,
    ) -> Result<Self, EngineError> {
        let values = init.sample_n(nin + 1, rng)?;
        let weights = values[..nin].iter().map(|&w| graph.leaf(w)).collect();
        let bias = graph.leaf(values[nin]);
        Ok(Neuron {
            weights,
            bias,
            activation,
        })
    }

    /// Builds a neuron around existing parameter nodes.
    pub fn from_parameters(weights: Vec<NodeId>, bias: NodeId, activation: Activation) -> Self {
        Neuron {
            weights,
            bias,
            activation,
        }
    }

    /// Number of inputs.
    pub fn nin(&self) -> usize {
        self.weights.len()
    }

    pub fn weights(&self) -> &[NodeId] {
        &self.weights
    }

    pub fn bias(&self) -> NodeId {
        self.bias
    }

    pub fn activation(&self) -> Activation {
        self.activation
    }

    /// Forward pass returning the single output node.
    pub fn activate(&self, graph: &mut Graph, inputs: &[Operand]) -> Result<NodeId, EngineError> {
        check_input_size(self.nin(), inputs)?;
        // The running sum starts from the bias
        let mut sum = self.bias;
        for (&w, &x) in self.weights.iter().zip(inputs) {
            let product = graph.mul(w, x);
            sum = graph.add(sum, product);
        }
        Ok(self.activation.apply(graph, sum))
    }
}

impl Module for Neuron {
    fn forward(&self, graph: &mut Graph, inputs: &[Operand]) -> Result<Vec<NodeId>, EngineError> {
        Ok(vec![self.activate(graph, inputs)?])
    }

    /// Weights in input order, then the bias.
    fn parameters(&self) -> Vec<NodeId> {
        let mut params = self.weights.clone();
        params.push(self.bias);
        params
    }

    fn named_parameters(&self) -> Vec<(String, NodeId)> {
        let mut params: Vec<(String, NodeId)> = self
            .weights
            .iter()
            .enumerate()
            .map(|(i, &w)| (format!("w.{}", i), w))
            .collect();
        params.push(("b".to_string(), self.bias));
        params
    }

    fn modules(&self) -> Vec<&dyn Module> {
        vec![self]
    }
}
