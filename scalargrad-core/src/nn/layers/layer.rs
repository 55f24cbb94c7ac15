use crate::autograd::{Graph, NodeId};
use crate::error::EngineError;
use crate::nn::init::Init;
use crate::nn::module::{check_input_size, Module};
use crate::nn::neuron::{Activation, Neuron};
use crate::ops::Operand;
use rand::Rng;

/// A set of neurons that all see the same input.
#[derive(Debug, Clone)]
pub struct Layer {
    neurons: Vec<Neuron>,
    nin: usize,
}

impl Layer {
    /// Creates a layer of `nout` neurons with `nin` inputs each.
    ///
    /// # Errors
    /// [`EngineError::InvalidLayerSizes`] if `nin` or `nout` is zero, or
    /// [`EngineError::InvalidInit`] for an invalid `init`.
    pub fn new<R: Rng + ?Sized>(
        graph: &mut Graph,
        nin: usize,
        nout: usize,
        init: Init,
        activation: Activation,
        rng: &mut R,
    ) -> Result<Self, EngineError> {
        if nin == 0 || nout == 0 {
            return Err(EngineError::InvalidLayerSizes(format!(
                "a layer needs at least one input and one neuron, got nin={} nout={}",
                nin, nout
            )));
        }
        let neurons = (0..nout)
            .map(|_| Neuron::new(graph, nin, init, activation, rng))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Layer { neurons, nin })
    }

    /// Builds a layer from existing neurons, which must all take the same non-zero number of
    /// inputs.
    pub fn from_neurons(neurons: Vec<Neuron>) -> Result<Self, EngineError> {
        let nin = match neurons.first() {
            Some(first) => first.nin(),
            None => {
                return Err(EngineError::InvalidLayerSizes(
                    "a layer needs at least one neuron".to_string(),
                ))
            }
        };
        if nin == 0 {
            return Err(EngineError::InvalidLayerSizes(
                "a layer needs at least one input, got neurons with nin=0".to_string(),
            ));
        }
        if let Some(other) = neurons.iter().find(|n| n.nin() != nin) {
            return Err(EngineError::InvalidLayerSizes(format!(
                "all neurons must take {} inputs, found one taking {}",
                nin,
                other.nin()
            )));
        }
        Ok(Layer { neurons, nin })
    }

    pub fn nin(&self) -> usize {
        self.nin
    }

    /// Number of neurons, i.e. number of outputs.
    pub fn nout(&self) -> usize {
        self.neurons.len()
    }

    pub fn neurons(&self) -> &[Neuron] {
        &self.neurons
    }
}

impl Module for Layer {
    fn forward(&self, graph: &mut Graph, inputs: &[Operand]) -> Result<Vec<NodeId>, EngineError> {
        check_input_size(self.nin, inputs)?;
        self.neurons
            .iter()
            .map(|neuron| neuron.activate(graph, inputs))
            .collect()
    }

    fn parameters(&self) -> Vec<NodeId> {
        self.neurons.iter().flat_map(|n| n.parameters()).collect()
    }

    fn named_parameters(&self) -> Vec<(String, NodeId)> {
        let mut params = Vec::new();
        for (i, neuron) in self.neurons.iter().enumerate() {
            for (name, id) in neuron.named_parameters() {
                params.push((format!("neurons.{}.{}", i, name), id));
            }
        }
        params
    }

    fn children(&self) -> Vec<&dyn Module> {
        self.neurons.iter().map(|n| n as &dyn Module).collect()
    }

    fn named_children(&self) -> Vec<(String, &dyn Module)> {
        self.neurons
            .iter()
            .enumerate()
            .map(|(i, n)| (format!("neurons.{}", i), n as &dyn Module))
            .collect()
    }

    fn modules(&self) -> Vec<&dyn Module> {
        let mut all_modules = vec![self as &dyn Module];
        for neuron in &self.neurons {
            all_modules.extend(neuron.modules());
        }
        all_modules
    }
}
