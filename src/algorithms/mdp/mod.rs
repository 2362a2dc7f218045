//! Markov decision process for a reactive delivery vehicle.
//!
//! States are cities. Actions are "accept the offered task to city j" or
//! "move toward city j", laid out by [`ActionSpace`]. The pipeline is:
//!
//! 1. [`MdpModel::build`] turns the topology and the task oracle into the
//!    reward table `R` and the transition table `T`.
//! 2. [`ValueIteration`] computes the fixed point of
//!    `V(i) = max_a R(i,a) + γ T(i,a) V(next(a))`, bounded by a sweep budget.
//! 3. [`MdpPolicy::choose_best`] reads the frozen `R`, `T`, `V` to pick the
//!    action for a city and an optional offered task.
//!
//! [`learn_policy`] runs steps 1 and 2 once and returns the ready policy.

mod action;
mod config;
mod error;
mod evaluator;
mod model;
mod solver;


use rand::rngs::StdRng;
use rand::SeedableRng;

pub use action::{ActionIndex, ActionSpace};
pub use config::MdpConfig;
pub use error::ModelError;
pub use evaluator::MdpPolicy;
pub use model::MdpModel;
pub use solver::{SolveOutcome, Solution, ValueIteration};

use crate::distribution::TaskDistribution;
use crate::topology::Topology;

/// Builds the model, solves it, and freezes the result into a policy.
///
/// Running out of sweeps is not an error: the outcome is logged and the
/// last value function is kept. A value function that stops being finite
/// is.
pub fn learn_policy(
    topology: &Topology,
    distribution: &dyn TaskDistribution,
    cost_per_km: f64,
    config: &MdpConfig,
) -> Result<MdpPolicy, ModelError> {
    config.validate()?;
    let model = MdpModel::build(topology, distribution, cost_per_km, config)?;
    let mut rng = StdRng::seed_from_u64(config.seed);
    let solution = ValueIteration::from_config(config).solve(&model, &mut rng);

    match solution.outcome {
        SolveOutcome::Converged { sweeps, delta } => {
            tracing::info!(sweeps, delta, states = model.num_states(), "policy learned");
        }
        SolveOutcome::Exhausted { sweeps, delta } => {
            tracing::warn!(
                sweeps,
                delta,
                threshold = config.threshold,
                "value iteration did not converge; keeping last value function"
            );
        }
        SolveOutcome::Diverged { sweeps } => return Err(ModelError::Diverged { sweeps }),
    }

    Ok(MdpPolicy::new(model, solution, config.discount_factor))
}
