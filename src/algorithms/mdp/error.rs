use thiserror::Error;

use crate::topology::CityId;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ModelError {
    #[error("Cannot build an MDP over an empty topology")]
    EmptyModel,

    #[error("Task distribution covers {found} cities, topology has {expected}")]
    OracleSizeMismatch { expected: usize, found: usize },

    #[error("Task distribution returned a non-finite {what} for {from} -> {to:?}")]
    InvalidOracle {
        what: &'static str,
        from: CityId,
        to: Option<CityId>,
    },

    #[error("Invalid MDP configuration: {0}")]
    InvalidConfig(String),

    #[error(
        "Discount factor times largest transition is {modulus}; value iteration needs it below 1"
    )]
    NonContracting { modulus: f64 },

    #[error("Value function became non-finite after {sweeps} sweeps")]
    Diverged { sweeps: usize },
}
