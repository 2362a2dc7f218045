//! Single-vehicle pickup and delivery simulation.
//!
//! Each step: sample task → ask behavior → travel → book profit.

use rand::rngs::StdRng;
use rand::SeedableRng;

use super::error::SimulationError;
use super::metrics::{ProfitTracker, SimulationReport};
use crate::agent::{Action, Behavior, Vehicle};
use crate::distribution::{sample_task, Task, TaskDistribution};
use crate::topology::{CityId, Topology};

/// Result of a single simulation step.
#[derive(Debug, Clone, PartialEq)]
pub struct StepResult {
    /// Task offered at the start of the step.
    pub offered: Option<Task>,
    /// Action chosen by the behavior.
    pub action: Action,
    /// City the vehicle is in after the step.
    pub location: CityId,
    /// Reward minus travel cost of this step.
    pub profit: f64,
}

/// Drives one vehicle through the topology.
///
/// # Lifecycle
///
/// 1. Create with [`Simulation::new`]; the vehicle starts at its home city.
/// 2. Call [`Simulation::step`] or [`Simulation::run`] with a [`Behavior`].
/// 3. Inspect [`Simulation::tracker`] or the returned [`SimulationReport`].
pub struct Simulation<'a> {
    topology: &'a Topology,
    distribution: &'a dyn TaskDistribution,
    vehicle: Vehicle,
    location: CityId,
    rng: StdRng,
    next_task_id: u64,
    tracker: ProfitTracker,
}

impl<'a> Simulation<'a> {
    pub fn new(
        topology: &'a Topology,
        distribution: &'a dyn TaskDistribution,
        vehicle: Vehicle,
        seed: u64,
    ) -> Result<Self, SimulationError> {
        if let Some(found) = distribution.num_cities() {
            if found != topology.len() {
                return Err(SimulationError::DistributionSize {
                    expected: topology.len(),
                    found,
                });
            }
        }
        let location = match &vehicle.home {
            Some(name) => topology
                .id_of(name)
                .ok_or_else(|| SimulationError::UnknownHome(name.clone()))?,
            None => 0,
        };
        Ok(Self {
            topology,
            distribution,
            vehicle,
            location,
            rng: StdRng::seed_from_u64(seed),
            next_task_id: 0,
            tracker: ProfitTracker::default(),
        })
    }

    pub fn location(&self) -> CityId {
        self.location
    }

    pub fn tracker(&self) -> &ProfitTracker {
        &self.tracker
    }

    /// Executes one decision of `behavior` and applies it.
    pub fn step(&mut self, behavior: &mut dyn Behavior) -> Result<StepResult, SimulationError> {
        let n = self.topology.len();
        let offered = sample_task(
            self.distribution,
            self.location,
            n,
            self.next_task_id,
            &mut self.rng,
        );
        if offered.is_some() {
            self.next_task_id += 1;
        }

        let action = behavior.act(self.location, offered.as_ref());
        let from = self.location;
        let (reward, distance) = match &action {
            Action::Pickup(task) => {
                let is_offered = offered.as_ref().map(|t| t.id) == Some(task.id);
                if !is_offered || task.pickup != from {
                    return Err(SimulationError::TaskNotAvailable {
                        task: task.id,
                        location: from,
                    });
                }
                if task.delivery >= n {
                    return Err(SimulationError::UnknownCity(task.delivery));
                }
                self.location = task.delivery;
                (task.reward, self.topology.distance(from, task.delivery).value())
            }
            Action::Move(target) => {
                if *target >= n {
                    return Err(SimulationError::UnknownCity(*target));
                }
                match self.topology.next_hop(from, *target) {
                    Some(hop) => {
                        self.location = hop;
                        let km = self
                            .topology
                            .road_length(from, hop)
                            .unwrap_or_else(|| self.topology.distance(from, hop))
                            .value();
                        (0.0, km)
                    }
                    None => (0.0, 0.0),
                }
            }
        };

        self.tracker
            .record(action.is_pickup(), reward, distance, self.vehicle.cost_per_km);
        tracing::info!(
            behavior = behavior.name(),
            "The total profit after {} actions is {:.2} (average profit: {:.2})",
            self.tracker.actions,
            self.tracker.total_profit(),
            self.tracker.average_profit()
        );

        Ok(StepResult {
            offered,
            action,
            location: self.location,
            profit: reward - distance * self.vehicle.cost_per_km,
        })
    }

    /// Runs `steps` decisions and summarizes the profit.
    pub fn run(
        &mut self,
        behavior: &mut dyn Behavior,
        steps: u32,
    ) -> Result<SimulationReport, SimulationError> {
        for _ in 0..steps {
            self.step(behavior)?;
        }
        Ok(SimulationReport {
            behavior: behavior.name().to_string(),
            tracker: self.tracker.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::{RandomBehavior, ReactiveAgent};
    use crate::algorithms::mdp::MdpConfig;
    use crate::distribution::{DistributionConfig, TableDistribution};
    use crate::topology::TopologySpec;

    /// Always moves toward a fixed city.
    struct Homing(CityId);

    impl Behavior for Homing {
        fn act(&mut self, _current: CityId, _available: Option<&Task>) -> Action {
            Action::Move(self.0)
        }

        fn name(&self) -> &str {
            "homing"
        }
    }

    /// Tries to pick up a task that was never offered.
    struct Forger;

    impl Behavior for Forger {
        fn act(&mut self, current: CityId, _available: Option<&Task>) -> Action {
            Action::Pickup(Task {
                id: 999,
                pickup: current,
                delivery: current,
                reward: 1e9,
            })
        }

        fn name(&self) -> &str {
            "forger"
        }
    }

    fn line() -> Topology {
        let mut b = Topology::builder();
        for name in ["A", "B", "C"] {
            b.add_city(name).unwrap();
        }
        b.add_road(0, 1, 10.0).unwrap();
        b.add_road(1, 2, 20.0).unwrap();
        b.build().unwrap()
    }

    #[test]
    fn move_travels_one_hop() {
        let topology = line();
        let dist = TableDistribution::uniform(3, 0.0, 0.0).unwrap();
        let mut sim = Simulation::new(&topology, &dist, Vehicle::default(), 1).unwrap();
        let mut behavior = Homing(2);

        let first = sim.step(&mut behavior).unwrap();
        assert_eq!(first.location, 1);
        assert_eq!(first.profit, -50.0);

        let second = sim.step(&mut behavior).unwrap();
        assert_eq!(second.location, 2);
        assert_eq!(second.profit, -100.0);

        let third = sim.step(&mut behavior).unwrap();
        assert_eq!(third.location, 2);
        assert_eq!(third.profit, 0.0);
        assert_eq!(sim.tracker().total_profit(), -150.0);
    }

    #[test]
    fn pickup_delivers_along_shortest_path() {
        let topology = line();
        let mut probabilities = vec![vec![0.0; 3]; 3];
        probabilities[0][2] = 1.0;
        let mut rewards = vec![vec![0.0; 3]; 3];
        rewards[0][2] = 500.0;
        let dist = TableDistribution::new(probabilities, rewards).unwrap();
        let mut sim = Simulation::new(&topology, &dist, Vehicle::default(), 1).unwrap();
        let mut behavior = RandomBehavior::new(&topology, 1.0, 0).unwrap();

        let step = sim.step(&mut behavior).unwrap();
        assert!(step.action.is_pickup());
        assert_eq!(step.location, 2);
        assert_eq!(step.profit, 500.0 - 30.0 * 5.0);
    }

    #[test]
    fn forged_pickup_is_rejected() {
        let topology = line();
        let dist = TableDistribution::uniform(3, 0.0, 0.0).unwrap();
        let mut sim = Simulation::new(&topology, &dist, Vehicle::default(), 1).unwrap();
        assert_eq!(
            sim.step(&mut Forger),
            Err(SimulationError::TaskNotAvailable {
                task: 999,
                location: 0
            })
        );
    }

    #[test]
    fn unknown_move_target_is_rejected() {
        let topology = line();
        let dist = TableDistribution::uniform(3, 0.0, 0.0).unwrap();
        let mut sim = Simulation::new(&topology, &dist, Vehicle::default(), 1).unwrap();
        assert_eq!(
            sim.step(&mut Homing(7)),
            Err(SimulationError::UnknownCity(7))
        );
    }

    #[test]
    fn home_city_is_resolved() {
        let topology = line();
        let dist = TableDistribution::uniform(3, 0.0, 0.0).unwrap();
        let vehicle = Vehicle {
            home: Some("C".to_string()),
            ..Vehicle::default()
        };
        let sim = Simulation::new(&topology, &dist, vehicle, 1).unwrap();
        assert_eq!(sim.location(), 2);

        let lost = Vehicle {
            home: Some("Atlantis".to_string()),
            ..Vehicle::default()
        };
        assert!(matches!(
            Simulation::new(&topology, &dist, lost, 1),
            Err(SimulationError::UnknownHome(_))
        ));
    }

    #[test]
    fn mis_sized_distribution_is_rejected() {
        let topology = line();
        let dist = TableDistribution::uniform(4, 0.1, 1.0).unwrap();
        assert!(matches!(
            Simulation::new(&topology, &dist, Vehicle::default(), 1),
            Err(SimulationError::DistributionSize {
                expected: 3,
                found: 4
            })
        ));
    }

    #[test]
    fn reactive_agent_outearns_random_baseline() {
        let topology = TopologySpec::switzerland().build().unwrap();
        let dist_config = DistributionConfig::default();
        let dist = TableDistribution::generate(
            &topology,
            &dist_config,
            &mut StdRng::seed_from_u64(dist_config.seed),
        )
        .unwrap();
        let vehicle = Vehicle::default();

        let mut agent =
            ReactiveAgent::setup(&topology, &dist, &vehicle, &MdpConfig::default()).unwrap();
        let mut random = RandomBehavior::new(&topology, 0.5, 3).unwrap();

        let reactive = Simulation::new(&topology, &dist, vehicle.clone(), 11)
            .unwrap()
            .run(&mut agent, 2_000)
            .unwrap();
        let baseline = Simulation::new(&topology, &dist, vehicle, 11)
            .unwrap()
            .run(&mut random, 2_000)
            .unwrap();

        assert_eq!(reactive.tracker.actions, 2_000);
        assert!(
            reactive.tracker.average_profit() > baseline.tracker.average_profit(),
            "reactive {} vs random {}",
            reactive.tracker.average_profit(),
            baseline.tracker.average_profit()
        );
    }
}
