//! Host simulation loop used to exercise behaviors end to end.

mod config;
mod engine;
mod error;
mod metrics;

pub use config::SimulationConfig;
pub use engine::{Simulation, StepResult};
pub use error::SimulationError;
pub use metrics::{ProfitTracker, SimulationReport};
