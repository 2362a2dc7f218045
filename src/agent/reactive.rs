//! MDP-driven reactive agent.

use super::action::Action;
use super::behavior::Behavior;
use super::error::AgentError;
use super::vehicle::Vehicle;
use crate::algorithms::mdp::{learn_policy, MdpConfig, MdpPolicy};
use crate::distribution::{Task, TaskDistribution};
use crate::topology::{CityId, Topology};
use crate::Id;

/// Agent that follows the optimal stationary policy of the delivery MDP.
///
/// # Lifecycle
///
/// [`ReactiveAgent::setup`] builds the model and runs value iteration once.
/// The returned agent is ready; every later call to [`Behavior::act`] only
/// reads the frozen policy.
#[derive(Debug, Clone)]
pub struct ReactiveAgent {
    id: Id,
    name: String,
    policy: MdpPolicy,
}

impl ReactiveAgent {
    /// Learns the policy for `vehicle` operating on `topology`.
    pub fn setup(
        topology: &Topology,
        distribution: &dyn TaskDistribution,
        vehicle: &Vehicle,
        config: &MdpConfig,
    ) -> Result<Self, AgentError> {
        let id = crate::generate_id();
        tracing::info!(
            agent = %id,
            discount_factor = config.discount_factor,
            cities = topology.len(),
            "setting up reactive agent"
        );
        let policy = learn_policy(topology, distribution, vehicle.cost_per_km, config)?;
        Ok(Self {
            id,
            name: format!("reactive-{}", vehicle.name),
            policy,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn policy(&self) -> &MdpPolicy {
        &self.policy
    }
}

impl Behavior for ReactiveAgent {
    fn act(&mut self, current: CityId, available: Option<&Task>) -> Action {
        let space = self.policy.space();
        let target = available.map(|task| task.delivery);
        let index = self.policy.choose_best(current, target);

        let action = match available {
            Some(task) if space.is_pickup(index) => Action::Pickup(task.clone()),
            _ => Action::Move(space.next_state(index)),
        };
        tracing::debug!(agent = %self.id, current, index, %action, "decision");
        action
    }

    fn name(&self) -> &str {
        &self.name
    }
}
