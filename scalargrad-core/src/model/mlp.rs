use crate::autograd::{Graph, NodeId};
use crate::error::EngineError;
use crate::nn::init::Init;
use crate::nn::layers::layer::Layer;
use crate::nn::module::Module;
use crate::nn::neuron::Activation;
use crate::ops::Operand;
use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Construction options for [`Mlp`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MlpConfig {
    pub init: Init,
    /// Activation of every layer but the last.
    pub hidden_activation: Activation,
    pub output_activation: Activation,
}

impl Default for MlpConfig {
    fn default() -> Self {
        MlpConfig {
            init: Init::default(),
            hidden_activation: Activation::Tanh,
            output_activation: Activation::Tanh,
        }
    }
}

/// Multi-layer perceptron: an ordered stack of fully connected [`Layer`]s.
///
/// Layer `i` maps `sz[i]` inputs to `sz[i + 1]` outputs, where `sz = [nin] + sizes`.
#[derive(Debug, Clone)]
pub struct Mlp {
    layers: Vec<Layer>,
}

impl Mlp {
    /// Builds a network with the default [`MlpConfig`].
    pub fn new<R: Rng + ?Sized>(
        graph: &mut Graph,
        nin: usize,
        sizes: &[usize],
        rng: &mut R,
    ) -> Result<Self, EngineError> {
        Self::with_config(graph, nin, sizes, MlpConfig::default(), rng)
    }

    /// Builds a network whose parameters are drawn from a [`StdRng`] seeded with `seed`.
    pub fn seeded(
        graph: &mut Graph,
        nin: usize,
        sizes: &[usize],
        seed: u64,
    ) -> Result<Self, EngineError> {
        let mut rng = StdRng::seed_from_u64(seed);
        Self::new(graph, nin, sizes, &mut rng)
    }

    pub fn with_config<R: Rng + ?Sized>(
        graph: &mut Graph,
        nin: usize,
        sizes: &[usize],
        config: MlpConfig,
        rng: &mut R,
    ) -> Result<Self, EngineError> {
        if sizes.is_empty() {
            return Err(EngineError::InvalidLayerSizes(
                "an MLP needs at least one layer".to_string(),
            ));
        }
        if nin == 0 || sizes.contains(&0) {
            return Err(EngineError::InvalidLayerSizes(format!(
                "layer sizes must be non-zero, got nin={} sizes={:?}",
                nin, sizes
            )));
        }

        let mut layers = Vec::with_capacity(sizes.len());
        let mut fan_in = nin;
        for (i, &nout) in sizes.iter().enumerate() {
            let activation = if i + 1 == sizes.len() {
                config.output_activation
            } else {
                config.hidden_activation
            };
            layers.push(Layer::new(graph, fan_in, nout, config.init, activation, rng)?);
            fan_in = nout;
        }

        let mlp = Mlp { layers };
        debug!(
            "built MLP {}->{:?} with {} parameters",
            nin,
            sizes,
            mlp.parameters().len()
        );
        Ok(mlp)
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// Number of inputs the first layer expects.
    pub fn nin(&self) -> usize {
        self.layers.first().map_or(0, Layer::nin)
    }

    /// Forward pass for a network ending in a single neuron, returning that neuron's output.
    ///
    /// # Errors
    /// [`EngineError::InvalidLayerSizes`] if the final layer does not have exactly one neuron,
    /// plus any error from [`Module::forward`].
    pub fn forward_scalar(
        &self,
        graph: &mut Graph,
        inputs: &[Operand],
    ) -> Result<NodeId, EngineError> {
        let nout = self.layers.last().map_or(0, Layer::nout);
        if nout != 1 {
            return Err(EngineError::InvalidLayerSizes(format!(
                "forward_scalar needs a final layer of size 1, found {}",
                nout
            )));
        }
        let outputs = self.forward(graph, inputs)?;
        outputs.first().copied().ok_or_else(|| {
            EngineError::InvalidLayerSizes("final layer produced no output".to_string())
        })
    }
}

impl Module for Mlp {
    fn forward(&self, graph: &mut Graph, inputs: &[Operand]) -> Result<Vec<NodeId>, EngineError> {
        let mut current: Vec<Operand> = inputs.to_vec();
        let mut outputs = Vec::new();
        for layer in &self.layers {
            outputs = layer.forward(graph, &current)?;
            current = outputs.iter().map(|&id| Operand::from(id)).collect();
        }
        Ok(outputs)
    }

    fn parameters(&self) -> Vec<NodeId> {
        let mut params = Vec::new();
        for layer in &self.layers {
            params.extend(layer.parameters());
        }
        params
    }

    fn named_parameters(&self) -> Vec<(String, NodeId)> {
        let mut params = Vec::new();
        for (i, layer) in self.layers.iter().enumerate() {
            for (param_name, id) in layer.named_parameters() {
                params.push((format!("layers.{}.{}", i, param_name), id));
            }
        }
        params
    }

    fn children(&self) -> Vec<&dyn Module> {
        self.layers.iter().map(|l| l as &dyn Module).collect()
    }

    fn named_children(&self) -> Vec<(String, &dyn Module)> {
        self.layers
            .iter()
            .enumerate()
            .map(|(i, l)| (format!("layers.{}", i), l as &dyn Module))
            .collect()
    }

    fn modules(&self) -> Vec<&dyn Module> {
        let mut all_modules = vec![self as &dyn Module];
        for layer in &self.layers {
            all_modules.extend(layer.modules());
        }
        all_modules
    }
}

#[cfg(test)]
#[path = "mlp_test.rs"]
mod tests;
