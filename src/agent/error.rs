use thiserror::Error;

use crate::algorithms::mdp::ModelError;
use crate::distribution::DistributionError;
use crate::topology::TopologyError;

/// Setup-time failure of an agent.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum AgentError {
    #[error(transparent)]
    Topology(#[from] TopologyError),

    #[error(transparent)]
    Distribution(#[from] DistributionError),

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error("Pickup probability must lie in [0, 1], got {0}")]
    InvalidPickupProbability(f64),
}
