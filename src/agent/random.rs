//! Random baseline behavior.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use super::action::Action;
use super::behavior::Behavior;
use super::error::AgentError;
use crate::distribution::Task;
use crate::topology::{CityId, Topology};

/// Accepts offered tasks with a fixed probability, otherwise wanders.
///
/// When a task is declined or none is offered the vehicle moves to a
/// uniformly chosen neighbor. Used as a lower-bound baseline for the
/// MDP-driven agent.
pub struct RandomBehavior {
    p_pickup: f64,
    neighbors: Vec<Vec<CityId>>,
    rng: StdRng,
}

impl RandomBehavior {
    pub fn new(topology: &Topology, p_pickup: f64, seed: u64) -> Result<Self, AgentError> {
        if !(0.0..=1.0).contains(&p_pickup) {
            return Err(AgentError::InvalidPickupProbability(p_pickup));
        }
        Ok(Self {
            p_pickup,
            neighbors: (0..topology.len())
                .map(|c| topology.neighbors(c).to_vec())
                .collect(),
            rng: StdRng::seed_from_u64(seed),
        })
    }
}

impl Behavior for RandomBehavior {
    fn act(&mut self, current: CityId, available: Option<&Task>) -> Action {
        if let Some(task) = available {
            if self.rng.gen::<f64>() < self.p_pickup {
                return Action::Pickup(task.clone());
            }
        }
        let target = self
            .neighbors
            .get(current)
            .and_then(|nbs| nbs.choose(&mut self.rng))
            .copied()
            .unwrap_or(current);
        Action::Move(target)
    }

    fn name(&self) -> &str {
        "random"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topology::TopologySpec;

    fn task(from: CityId, to: CityId) -> Task {
        Task {
            id: 0,
            pickup: from,
            delivery: to,
            reward: 1.0,
        }
    }

    #[test]
    fn always_picks_up_with_probability_one() {
        let topology = TopologySpec::switzerland().build().unwrap();
        let mut b = RandomBehavior::new(&topology, 1.0, 4).unwrap();
        for _ in 0..20 {
            assert!(b.act(0, Some(&task(0, 3))).is_pickup());
        }
    }

    #[test]
    fn moves_only_to_neighbors() {
        let topology = TopologySpec::switzerland().build().unwrap();
        let mut b = RandomBehavior::new(&topology, 0.0, 4).unwrap();
        for city in 0..topology.len() {
            match b.act(city, Some(&task(city, 0))) {
                Action::Move(to) => assert!(topology.has_neighbor(city, to)),
                other => panic!("unexpected {:?}", other),
            }
        }
    }

    #[test]
    fn single_city_stays_put() {
        let mut builder = Topology::builder();
        builder.add_city("Solo").unwrap();
        let topology = builder.build().unwrap();
        let mut b = RandomBehavior::new(&topology, 0.5, 1).unwrap();
        assert_eq!(b.act(0, None), Action::Move(0));
    }

    #[test]
    fn invalid_probability_rejected() {
        let topology = TopologySpec::switzerland().build().unwrap();
        assert!(matches!(
            RandomBehavior::new(&topology, 1.5, 0),
            Err(AgentError::InvalidPickupProbability(_))
        ));
    }
}
