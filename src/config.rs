//! Run-level configuration shared by both estimators.

use crate::iterate::IterationConfig;
use crate::sampling::SamplingConfig;
use crate::{Error, Result};

#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunConfig {
    pub damping: f64,
    pub samples: usize,
    /// Convergence threshold for the iterative estimator.
    pub tolerance: f64,
    pub seed: Option<u64>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            damping: 0.85,
            samples: 10_000,
            tolerance: 0.001,
            seed: None,
        }
    }
}

impl RunConfig {
    /// Both estimators must accept their derived configs.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..1.0).contains(&self.damping) {
            return Err(Error::InvalidParameter(format!(
                "damping must be in [0,1) (got {})",
                self.damping
            )));
        }
        self.sampling().validate()?;
        self.iteration().validate()
    }

    pub fn sampling(&self) -> SamplingConfig {
        SamplingConfig {
            damping: self.damping,
            samples: self.samples,
            seed: self.seed,
        }
    }

    pub fn iteration(&self) -> IterationConfig {
        IterationConfig {
            damping: self.damping,
            tolerance: self.tolerance,
            max_iterations: None,
        }
    }
}
