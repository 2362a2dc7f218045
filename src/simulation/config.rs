#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Run parameters of a [`super::Simulation`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "kebab-case"))]
pub struct SimulationConfig {
    /// Number of decisions to simulate.
    pub steps: u32,
    /// Seed of the task sampler.
    pub seed: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            steps: 1_000,
            seed: 7,
        }
    }
}
