#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use rand::Rng;

use super::error::DistributionError;
use super::traits::TaskDistribution;
use crate::topology::{CityId, Topology};

const ROW_TOLERANCE: f64 = 1e-9;

/// Parameters for [`TableDistribution::generate`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "kebab-case"))]
pub struct DistributionConfig {
    /// Probability that some task is offered at a city.
    pub task_probability: f64,
    /// Reward paid per km of shortest-path delivery distance.
    pub reward_per_km: f64,
    /// Seed of the generator used for per-destination weights.
    pub seed: u64,
}

impl Default for DistributionConfig {
    fn default() -> Self {
        Self {
            task_probability: 0.7,
            reward_per_km: 20.0,
            seed: 42,
        }
    }
}

/// Task distribution backed by explicit probability and reward tables.
///
/// `probabilities[i][j]` is the probability that the task offered at `i` goes
/// to `j`; the remainder of each row is the probability that no task is offered.
#[derive(Debug, Clone, PartialEq)]
pub struct TableDistribution {
    probabilities: Vec<Vec<f64>>,
    rewards: Vec<Vec<f64>>,
    no_task: Vec<f64>,
}

impl TableDistribution {
    pub fn new(
        probabilities: Vec<Vec<f64>>,
        rewards: Vec<Vec<f64>>,
    ) -> Result<Self, DistributionError> {
        let n = probabilities.len();
        if n == 0 {
            return Err(DistributionError::Empty);
        }
        if rewards.len() != n {
            return Err(DistributionError::InvalidParameter(format!(
                "reward table has {} rows, expected {}",
                rewards.len(),
                n
            )));
        }
        for (row, (p, r)) in probabilities.iter().zip(&rewards).enumerate() {
            for found in [p.len(), r.len()] {
                if found != n {
                    return Err(DistributionError::ShapeMismatch {
                        expected: n,
                        row,
                        found,
                    });
                }
            }
        }

        let mut no_task = Vec::with_capacity(n);
        for from in 0..n {
            for to in 0..n {
                let value = probabilities[from][to];
                if !(0.0..=1.0).contains(&value) {
                    return Err(DistributionError::InvalidProbability { from, to, value });
                }
                if !rewards[from][to].is_finite() {
                    return Err(DistributionError::InvalidReward { from, to });
                }
            }
            let sum: f64 = probabilities[from].iter().sum();
            if sum > 1.0 + ROW_TOLERANCE {
                return Err(DistributionError::RowExceedsOne { from, sum });
            }
            no_task.push((1.0 - sum).max(0.0));
        }

        Ok(Self {
            probabilities,
            rewards,
            no_task,
        })
    }

    /// Same probability and reward for every pair of distinct cities.
    pub fn uniform(
        num_cities: usize,
        probability: f64,
        reward: f64,
    ) -> Result<Self, DistributionError> {
        let mut probabilities = vec![vec![probability; num_cities]; num_cities];
        let mut rewards = vec![vec![reward; num_cities]; num_cities];
        for i in 0..num_cities {
            probabilities[i][i] = 0.0;
            rewards[i][i] = 0.0;
        }
        Self::new(probabilities, rewards)
    }

    /// Random destination weights per city, rewards proportional to distance.
    ///
    /// Each row is normalized so that a task is offered with
    /// `config.task_probability`. The same seed yields the same tables.
    pub fn generate<R: Rng + ?Sized>(
        topology: &Topology,
        config: &DistributionConfig,
        rng: &mut R,
    ) -> Result<Self, DistributionError> {
        if !(0.0..=1.0).contains(&config.task_probability) {
            return Err(DistributionError::InvalidParameter(format!(
                "task-probability must lie in [0, 1], got {}",
                config.task_probability
            )));
        }
        if !config.reward_per_km.is_finite() || config.reward_per_km < 0.0 {
            return Err(DistributionError::InvalidParameter(format!(
                "reward-per-km must be non-negative, got {}",
                config.reward_per_km
            )));
        }

        let n = topology.len();
        let mut probabilities = vec![vec![0.0; n]; n];
        let mut rewards = vec![vec![0.0; n]; n];
        for from in 0..n {
            let weights: Vec<f64> = (0..n)
                .map(|to| if to == from { 0.0 } else { rng.gen::<f64>() })
                .collect();
            let total: f64 = weights.iter().sum();
            for to in 0..n {
                if total > 0.0 {
                    probabilities[from][to] = config.task_probability * weights[to] / total;
                }
                rewards[from][to] = topology.distance(from, to).value() * config.reward_per_km;
            }
        }
        Self::new(probabilities, rewards)
    }
}

impl TaskDistribution for TableDistribution {
    fn reward(&self, from: CityId, to: CityId) -> f64 {
        self.rewards
            .get(from)
            .and_then(|row| row.get(to))
            .copied()
            .unwrap_or(0.0)
    }

    fn probability(&self, from: CityId, to: Option<CityId>) -> f64 {
        match to {
            Some(to) => self
                .probabilities
                .get(from)
                .and_then(|row| row.get(to))
                .copied()
                .unwrap_or(0.0),
            None => self.no_task.get(from).copied().unwrap_or(0.0),
        }
    }

    fn num_cities(&self) -> Option<usize> {
        Some(self.probabilities.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topology::TopologySpec;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn uniform_fills_off_diagonal() {
        let d = TableDistribution::uniform(3, 0.3, 100.0).unwrap();
        assert_eq!(d.probability(0, Some(1)), 0.3);
        assert_eq!(d.probability(0, Some(0)), 0.0);
        assert!((d.probability(0, None) - 0.4).abs() < 1e-12);
        assert_eq!(d.reward(1, 2), 100.0);
        assert_eq!(d.reward(1, 1), 0.0);
        assert_eq!(d.num_cities(), Some(3));
    }

    #[test]
    fn out_of_range_lookups_are_zero() {
        let d = TableDistribution::uniform(2, 0.5, 1.0).unwrap();
        assert_eq!(d.reward(5, 0), 0.0);
        assert_eq!(d.probability(0, Some(9)), 0.0);
        assert_eq!(d.probability(9, None), 0.0);
    }

    #[test]
    fn row_over_one_rejected() {
        let err = TableDistribution::uniform(4, 0.5, 1.0).unwrap_err();
        assert!(matches!(err, DistributionError::RowExceedsOne { from: 0, .. }));
    }

    #[test]
    fn negative_probability_rejected() {
        let err = TableDistribution::new(
            vec![vec![0.0, -0.1], vec![0.2, 0.0]],
            vec![vec![0.0; 2]; 2],
        )
        .unwrap_err();
        assert_eq!(
            err,
            DistributionError::InvalidProbability {
                from: 0,
                to: 1,
                value: -0.1
            }
        );
    }

    #[test]
    fn ragged_table_rejected() {
        let err = TableDistribution::new(
            vec![vec![0.0, 0.1], vec![0.2]],
            vec![vec![0.0; 2]; 2],
        )
        .unwrap_err();
        assert!(matches!(err, DistributionError::ShapeMismatch { row: 1, .. }));
    }

    #[test]
    fn empty_rejected() {
        assert_eq!(
            TableDistribution::new(vec![], vec![]).unwrap_err(),
            DistributionError::Empty
        );
    }

    #[test]
    fn generated_rows_sum_to_task_probability() {
        let topology = TopologySpec::switzerland().build().unwrap();
        let config = DistributionConfig::default();
        let mut rng = StdRng::seed_from_u64(config.seed);
        let d = TableDistribution::generate(&topology, &config, &mut rng).unwrap();
        for from in 0..topology.len() {
            let sum: f64 = (0..topology.len())
                .map(|to| d.probability(from, Some(to)))
                .sum();
            assert!((sum - config.task_probability).abs() < 1e-9);
            assert!((d.probability(from, None) - (1.0 - config.task_probability)).abs() < 1e-9);
            assert_eq!(d.probability(from, Some(from)), 0.0);
        }
    }

    #[test]
    fn generated_rewards_scale_with_distance() {
        let topology = TopologySpec::switzerland().build().unwrap();
        let config = DistributionConfig::default();
        let mut rng = StdRng::seed_from_u64(config.seed);
        let d = TableDistribution::generate(&topology, &config, &mut rng).unwrap();
        let a = topology.id_of("Lausanne").unwrap();
        let b = topology.id_of("Geneve").unwrap();
        assert_eq!(d.reward(a, b), 62.0 * config.reward_per_km);
    }

    #[test]
    fn generation_is_reproducible() {
        let topology = TopologySpec::switzerland().build().unwrap();
        let config = DistributionConfig::default();
        let d1 = TableDistribution::generate(
            &topology,
            &config,
            &mut StdRng::seed_from_u64(config.seed),
        )
        .unwrap();
        let d2 = TableDistribution::generate(
            &topology,
            &config,
            &mut StdRng::seed_from_u64(config.seed),
        )
        .unwrap();
        assert_eq!(d1, d2);
    }

    #[test]
    fn invalid_task_probability_rejected() {
        let topology = TopologySpec::switzerland().build().unwrap();
        let config = DistributionConfig {
            task_probability: 1.5,
            ..DistributionConfig::default()
        };
        let err =
            TableDistribution::generate(&topology, &config, &mut StdRng::seed_from_u64(0))
                .unwrap_err();
        assert!(matches!(err, DistributionError::InvalidParameter(_)));
    }
}
