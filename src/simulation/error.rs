use thiserror::Error;

use crate::topology::CityId;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SimulationError {
    #[error("Unknown city: {0}")]
    UnknownCity(CityId),

    #[error("Unknown home city: {0}")]
    UnknownHome(String),

    #[error("Task {task} is not available at city {location}")]
    TaskNotAvailable { task: u64, location: CityId },

    #[error("Task distribution covers {found} cities, topology has {expected}")]
    DistributionSize { expected: usize, found: usize },
}
