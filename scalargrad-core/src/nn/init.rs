use crate::error::EngineError;
use rand::distributions::{Distribution, Uniform};
use rand::Rng;
use rand_distr::Normal;

/// Scheme used to draw the initial value of each weight and bias.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Init {
    /// Uniform on `[low, high)`.
    Uniform { low: f64, high: f64 },
    /// Gaussian with the given mean and standard deviation.
    Normal { mean: f64, std_dev: f64 },
}

impl Default for Init {
    /// Uniform on `[-1, 1)`.
    fn default() -> Self {
        Init::Uniform {
            low: -1.0,
            high: 1.0,
        }
    }
}

impl Init {
    /// Checks the scheme's parameters without drawing anything.
    ///
    /// # Errors
    /// [`EngineError::InvalidInit`] if a bound is not finite, if `low >= high`, if the width
    /// `high - low` overflows, or if the standard deviation is negative or not finite.
    pub fn validate(&self) -> Result<(), EngineError> {
        match *self {
            Init::Uniform { low, high } => {
                if !low.is_finite() || !high.is_finite() || low >= high {
                    return Err(EngineError::InvalidInit(format!(
                        "uniform bounds must be finite with low < high, got [{}, {})",
                        low, high
                    )));
                }
                if !(high - low).is_finite() {
                    return Err(EngineError::InvalidInit(format!(
                        "uniform range [{}, {}) is too wide to sample from",
                        low, high
                    )));
                }
            }
            Init::Normal { mean, std_dev } => {
                if !mean.is_finite() || !std_dev.is_finite() || std_dev < 0.0 {
                    return Err(EngineError::InvalidInit(format!(
                        "normal needs a finite mean and a finite, non-negative std_dev, got mean={} std_dev={}",
                        mean, std_dev
                    )));
                }
            }
        }
        Ok(())
    }

    /// Draws one value.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<f64, EngineError> {
        Ok(self.sample_n(1, rng)?[0])
    }

    /// Draws `n` values from the same distribution.
    pub fn sample_n<R: Rng + ?Sized>(&self, n: usize, rng: &mut R) -> Result<Vec<f64>, EngineError> {
        self.validate()?;
        let values = match *self {
            Init::Uniform { low, high } => {
                let dist = Uniform::new(low, high);
                (0..n).map(|_| dist.sample(rng)).collect()
            }
            Init::Normal { mean, std_dev } => {
                let dist = Normal::new(mean, std_dev)
                    .map_err(|e| EngineError::InvalidInit(e.to_string()))?;
                (0..n).map(|_| dist.sample(rng)).collect()
            }
        };
        Ok(values)
    }
}

// --- Tests ---
#[cfg(test)]
#[path = "init_test.rs"]
mod tests; // Link to the test file
