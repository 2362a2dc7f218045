use thiserror::Error;

use crate::topology::CityId;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum DistributionError {
    #[error("Distribution must cover at least one city")]
    Empty,

    #[error("Expected a {expected}x{expected} table, row {row} has {found} entries")]
    ShapeMismatch {
        expected: usize,
        row: usize,
        found: usize,
    },

    #[error("Probability for {from} -> {to} must lie in [0, 1], got {value}")]
    InvalidProbability {
        from: CityId,
        to: CityId,
        value: f64,
    },

    #[error("Task probabilities leaving city {from} sum to {sum}, more than 1")]
    RowExceedsOne { from: CityId, sum: f64 },

    #[error("Reward for {from} -> {to} must be finite")]
    InvalidReward { from: CityId, to: CityId },

    #[error("Invalid distribution parameter: {0}")]
    InvalidParameter(String),
}
