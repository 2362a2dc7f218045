//! Reward and transition tables of the delivery MDP.

use super::action::{ActionIndex, ActionSpace};
use super::config::MdpConfig;
use super::error::ModelError;
use crate::distribution::TaskDistribution;
use crate::topology::{CityId, Topology};

/// Frozen `R` and `T` tables, each `num_states × num_actions`.
///
/// # Invariants
///
/// - `T[i][i]` (accepting a task back to the departure city) is 0
/// - `T[i][n + i]` (moving to the departure city) is 0
/// - `T[i][n + j]` is non-zero only when `j` neighbors `i`
#[derive(Debug, Clone)]
pub struct MdpModel {
    space: ActionSpace,
    rewards: Vec<Vec<f64>>,
    transitions: Vec<Vec<f64>>,
}

impl MdpModel {
    /// Builds `R` and `T` from the topology and the task oracle.
    ///
    /// - `R[i][j]`, `j < n`: expected reward of a task `i -> j`
    /// - `R[i][n + j]`: `-distance(i, j) * cost_per_km`
    /// - `T[i][j]`, `j < n`: `transition_scale * P(task i -> j)`
    /// - `T[i][n + j]`: `P(no task at i) / |neighbors(i)|` for neighbors `j`
    ///
    /// Every reward entry is multiplied by `config.reward_scale`. The
    /// model is rejected unless `discount_factor * max T < 1`, which keeps
    /// the Bellman operator a contraction.
    pub fn build(
        topology: &Topology,
        distribution: &dyn TaskDistribution,
        cost_per_km: f64,
        config: &MdpConfig,
    ) -> Result<Self, ModelError> {
        let n = topology.len();
        if n == 0 {
            return Err(ModelError::EmptyModel);
        }
        if !(cost_per_km.is_finite() && cost_per_km >= 0.0) {
            return Err(ModelError::InvalidConfig(format!(
                "cost per km must be non-negative, got {}",
                cost_per_km
            )));
        }
        if let Some(found) = distribution.num_cities() {
            if found != n {
                return Err(ModelError::OracleSizeMismatch { expected: n, found });
            }
        }
        let space = ActionSpace::new(n);

        let mut rewards = vec![vec![0.0; space.num_actions()]; n];
        let mut transitions = vec![vec![0.0; space.num_actions()]; n];

        for i in 0..n {
            // empty only for a single-city topology
            let neighbors = topology.neighbors(i);
            let no_task = finite(distribution.probability(i, None), "probability", i, None)?;

            for j in 0..n {
                let reward = finite(distribution.reward(i, j), "reward", i, Some(j))?;
                rewards[i][space.pickup(j)] = reward * config.reward_scale;

                let move_cost = topology.distance(i, j).value() * cost_per_km;
                rewards[i][space.move_to(j)] = -move_cost * config.reward_scale;

                if i != j {
                    let p = finite(
                        distribution.probability(i, Some(j)),
                        "probability",
                        i,
                        Some(j),
                    )?;
                    transitions[i][space.pickup(j)] = config.transition_scale * p;

                    if !neighbors.is_empty() && topology.has_neighbor(i, j) {
                        transitions[i][space.move_to(j)] = no_task / neighbors.len() as f64;
                    }
                }
            }
        }

        let model = Self {
            space,
            rewards,
            transitions,
        };

        let modulus = config.discount_factor * model.max_transition();
        if modulus >= 1.0 {
            return Err(ModelError::NonContracting { modulus });
        }
        Ok(model)
    }

    /// Wraps precomputed tables.
    ///
    /// # Panics
    ///
    /// Panics if either table is not `n × 2n` for `n >= 1`.
    pub fn from_tables(rewards: Vec<Vec<f64>>, transitions: Vec<Vec<f64>>) -> Self {
        let n = rewards.len();
        assert!(n > 0, "MDP needs at least one state");
        assert_eq!(transitions.len(), n, "T must have one row per state");
        for row in rewards.iter().chain(&transitions) {
            assert_eq!(row.len(), 2 * n, "rows must have 2 * num_states entries");
        }
        Self {
            space: ActionSpace::new(n),
            rewards,
            transitions,
        }
    }

    pub fn space(&self) -> ActionSpace {
        self.space
    }

    pub fn num_states(&self) -> usize {
        self.space.num_states()
    }

    pub fn reward(&self, state: CityId, action: ActionIndex) -> f64 {
        self.rewards[state][action]
    }

    pub fn transition(&self, state: CityId, action: ActionIndex) -> f64 {
        self.transitions[state][action]
    }

    /// `R(i, a) + γ · T(i, a) · V(next(a))`.
    pub fn q_value(&self, state: CityId, action: ActionIndex, values: &[f64], gamma: f64) -> f64 {
        let next = self.space.next_state(action);
        self.rewards[state][action] + gamma * self.transitions[state][action] * values[next]
    }

    /// Smallest and largest entry of the reward table.
    pub fn reward_range(&self) -> (f64, f64) {
        self.rewards
            .iter()
            .flatten()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &r| {
                (lo.min(r), hi.max(r))
            })
    }

    /// Largest entry of the transition table.
    pub fn max_transition(&self) -> f64 {
        self.transitions.iter().flatten().fold(0.0, |m, &t| m.max(t))
    }
}

fn finite(
    value: f64,
    what: &'static str,
    from: CityId,
    to: Option<CityId>,
) -> Result<f64, ModelError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ModelError::InvalidOracle { what, from, to })
    }
}
