//! End-to-end scenario: topology, vehicle, agent and simulation settings.
//!
//! A scenario file is TOML (feature `cli`):
//!
//! ```toml
//! [topology]
//! cities = ["A", "B"]
//! roads = [{ from = "A", to = "B", km = 12.0 }]
//!
//! [vehicle]
//! cost-per-km = 5.0
//!
//! [agent]
//! discount-factor = 0.95
//!
//! [simulation]
//! steps = 500
//! ```
//!
//! Every section is optional; missing ones fall back to their defaults and
//! the default topology is [`TopologySpec::switzerland`].

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use thiserror::Error;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::agent::{AgentError, Behavior, RandomBehavior, ReactiveAgent, Vehicle};
use crate::algorithms::mdp::MdpConfig;
use crate::distribution::{DistributionConfig, DistributionError, TableDistribution};
use crate::simulation::{Simulation, SimulationConfig, SimulationError, SimulationReport};
use crate::topology::{Topology, TopologyError, TopologySpec};

#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("Cannot read scenario file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid scenario file: {0}")]
    Parse(String),

    #[error(transparent)]
    Topology(#[from] TopologyError),

    #[error(transparent)]
    Distribution(#[from] DistributionError),

    #[error(transparent)]
    Agent(#[from] AgentError),

    #[error(transparent)]
    Simulation(#[from] SimulationError),
}

/// Which behavior drives the vehicle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum BehaviorKind {
    /// MDP policy computed once at setup.
    #[default]
    Reactive,
    /// Coin-flip pickups, random neighbor moves.
    Random,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Scenario {
    pub topology: TopologySpec,
    pub vehicle: Vehicle,
    pub agent: MdpConfig,
    pub distribution: DistributionConfig,
    pub simulation: SimulationConfig,
}

impl Default for Scenario {
    fn default() -> Self {
        Self {
            topology: TopologySpec::switzerland(),
            vehicle: Vehicle::default(),
            agent: MdpConfig::default(),
            distribution: DistributionConfig::default(),
            simulation: SimulationConfig::default(),
        }
    }
}

impl Scenario {
    #[cfg(feature = "cli")]
    pub fn from_toml_str(text: &str) -> Result<Self, ScenarioError> {
        toml::from_str(text).map_err(|e| ScenarioError::Parse(e.to_string()))
    }

    #[cfg(feature = "cli")]
    pub fn load(path: &std::path::Path) -> Result<Self, ScenarioError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Builds the topology and the generated task distribution.
    pub fn environment(&self) -> Result<(Topology, TableDistribution), ScenarioError> {
        let topology = self.topology.build()?;
        let mut rng = StdRng::seed_from_u64(self.distribution.seed);
        let distribution = TableDistribution::generate(&topology, &self.distribution, &mut rng)?;
        Ok((topology, distribution))
    }

    /// Sets up the chosen behavior and simulates `simulation.steps` decisions.
    pub fn run(&self, kind: BehaviorKind, p_pickup: f64) -> Result<SimulationReport, ScenarioError> {
        let (topology, distribution) = self.environment()?;
        let mut behavior: Box<dyn Behavior> = match kind {
            BehaviorKind::Reactive => Box::new(ReactiveAgent::setup(
                &topology,
                &distribution,
                &self.vehicle,
                &self.agent,
            )?),
            BehaviorKind::Random => Box::new(RandomBehavior::new(
                &topology,
                p_pickup,
                self.simulation.seed,
            )?),
        };

        let mut simulation = Simulation::new(
            &topology,
            &distribution,
            self.vehicle.clone(),
            self.simulation.seed,
        )?;
        Ok(simulation.run(behavior.as_mut(), self.simulation.steps)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn short() -> Scenario {
        Scenario {
            simulation: SimulationConfig {
                steps: 50,
                ..SimulationConfig::default()
            },
            ..Scenario::default()
        }
    }

    #[test]
    fn default_scenario_runs_both_behaviors() {
        let scenario = short();
        let reactive = scenario.run(BehaviorKind::Reactive, 0.5).unwrap();
        let random = scenario.run(BehaviorKind::Random, 0.5).unwrap();
        assert_eq!(reactive.tracker.actions, 50);
        assert_eq!(random.tracker.actions, 50);
        assert_eq!(random.behavior, "random");
    }

    #[test]
    fn broken_topology_surfaces() {
        let scenario = Scenario {
            topology: TopologySpec {
                cities: vec!["A".into(), "B".into()],
                roads: vec![],
            },
            ..short()
        };
        assert!(matches!(
            scenario.run(BehaviorKind::Reactive, 0.5),
            Err(ScenarioError::Topology(TopologyError::IsolatedCity(_)))
        ));
    }

    #[test]
    fn invalid_discount_surfaces() {
        let mut scenario = short();
        scenario.agent.discount_factor = 1.2;
        assert!(matches!(
            scenario.run(BehaviorKind::Reactive, 0.5),
            Err(ScenarioError::Agent(AgentError::Model(_)))
        ));
    }

    #[cfg(feature = "cli")]
    #[test]
    fn parses_partial_toml() {
        let text = r#"
            [topology]
            cities = ["A", "B", "C"]
            roads = [
                { from = "A", to = "B", km = 10.0 },
                { from = "B", to = "C", km = 15.0 },
            ]

            [vehicle]
            cost-per-km = 3.5
            home = "B"

            [agent]
            discount-factor = 0.8
        "#;
        let scenario = Scenario::from_toml_str(text).unwrap();
        assert_eq!(scenario.topology.cities.len(), 3);
        assert_eq!(scenario.vehicle.cost_per_km, 3.5);
        assert_eq!(scenario.vehicle.home.as_deref(), Some("B"));
        assert_eq!(scenario.agent.discount_factor, 0.8);
        assert_eq!(scenario.agent.threshold, MdpConfig::default().threshold);
        assert_eq!(scenario.simulation, SimulationConfig::default());
        let (topology, _) = scenario.environment().unwrap();
        assert_eq!(topology.distance(0, 2).value(), 25.0);
    }

    #[cfg(feature = "cli")]
    #[test]
    fn empty_toml_is_default() {
        assert_eq!(Scenario::from_toml_str("").unwrap(), Scenario::default());
    }

    #[cfg(feature = "cli")]
    #[test]
    fn malformed_toml_is_reported() {
        assert!(matches!(
            Scenario::from_toml_str("[agent\ndiscount-factor = "),
            Err(ScenarioError::Parse(_))
        ));
    }
}
