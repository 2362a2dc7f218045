//! Value iteration over the delivery MDP.
//!
//! Sweeps are synchronous: every Q value of a sweep is computed from the
//! previous sweep's V, and V is replaced once the sweep is complete. The
//! Bellman operator used here contracts with modulus `γ · max T`, so the
//! per-sweep sup-norm delta is non-increasing whenever that modulus is
//! below 1. A sweep producing a non-finite value ends the run as
//! [`SolveOutcome::Diverged`].

use rand::Rng;

use super::config::MdpConfig;
use super::model::MdpModel;

/// How a value-iteration run ended.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SolveOutcome {
    /// The last sweep moved no value by more than the threshold.
    Converged { sweeps: usize, delta: f64 },
    /// The sweep budget ran out first; V holds the last sweep's values.
    Exhausted { sweeps: usize, delta: f64 },
    /// Sweep `sweeps` produced a non-finite value; V holds the last finite sweep.
    Diverged { sweeps: usize },
}

impl SolveOutcome {
    pub fn is_converged(&self) -> bool {
        matches!(self, SolveOutcome::Converged { .. })
    }

    pub fn sweeps(&self) -> usize {
        match *self {
            SolveOutcome::Converged { sweeps, .. }
            | SolveOutcome::Exhausted { sweeps, .. }
            | SolveOutcome::Diverged { sweeps } => sweeps,
        }
    }

    /// Sup-norm change of the last sweep; infinite after divergence.
    pub fn final_delta(&self) -> f64 {
        match *self {
            SolveOutcome::Converged { delta, .. } | SolveOutcome::Exhausted { delta, .. } => delta,
            SolveOutcome::Diverged { .. } => f64::INFINITY,
        }
    }
}

/// Value function together with the convergence record that produced it.
#[derive(Debug, Clone)]
pub struct Solution {
    pub values: Vec<f64>,
    pub outcome: SolveOutcome,
    /// Sup-norm delta of every sweep, in order.
    pub deltas: Vec<f64>,
}

/// Bounded value-iteration solver.
#[derive(Debug, Clone, Copy)]
pub struct ValueIteration {
    gamma: f64,
    threshold: f64,
    max_sweeps: usize,
}

impl ValueIteration {
    pub fn new(gamma: f64, threshold: f64, max_sweeps: usize) -> Self {
        Self {
            gamma,
            threshold,
            max_sweeps,
        }
    }

    pub fn from_config(config: &MdpConfig) -> Self {
        Self::new(config.discount_factor, config.threshold, config.max_sweeps)
    }

    /// Draws one initial value per state uniformly from the reward range.
    pub fn initial_values<R: Rng + ?Sized>(model: &MdpModel, rng: &mut R) -> Vec<f64> {
        let (lo, hi) = model.reward_range();
        (0..model.num_states())
            .map(|_| if hi > lo { rng.gen_range(lo..=hi) } else { lo })
            .collect()
    }

    /// Runs value iteration from a random initial V.
    pub fn solve<R: Rng + ?Sized>(&self, model: &MdpModel, rng: &mut R) -> Solution {
        let initial = Self::initial_values(model, rng);
        self.solve_from(model, initial)
    }

    /// Runs value iteration from the given initial V.
    ///
    /// # Panics
    ///
    /// Panics if `values` does not hold one entry per state.
    pub fn solve_from(&self, model: &MdpModel, mut values: Vec<f64>) -> Solution {
        assert_eq!(
            values.len(),
            model.num_states(),
            "initial value function must have one entry per state"
        );
        let space = model.space();
        let mut next = vec![0.0; values.len()];
        let mut deltas = Vec::new();

        for sweep in 1..=self.max_sweeps {
            let mut delta: f64 = 0.0;
            for (state, slot) in next.iter_mut().enumerate() {
                let best = (0..space.num_actions())
                    .map(|a| model.q_value(state, a, &values, self.gamma))
                    .fold(f64::NEG_INFINITY, f64::max);
                if !best.is_finite() {
                    tracing::debug!(sweep, state, "value iteration diverged");
                    return Solution {
                        values,
                        outcome: SolveOutcome::Diverged { sweeps: sweep },
                        deltas,
                    };
                }
                delta = delta.max((best - values[state]).abs());
                *slot = best;
            }
            std::mem::swap(&mut values, &mut next);
            deltas.push(delta);
            tracing::trace!(sweep, delta, "value iteration sweep");

            if delta <= self.threshold {
                tracing::debug!(sweeps = sweep, delta, "value iteration converged");
                return Solution {
                    values,
                    outcome: SolveOutcome::Converged {
                        sweeps: sweep,
                        delta,
                    },
                    deltas,
                };
            }
        }

        let delta = deltas.last().copied().unwrap_or(f64::INFINITY);
        Solution {
            values,
            outcome: SolveOutcome::Exhausted {
                sweeps: self.max_sweeps,
                delta,
            },
            deltas,
        }
    }
}
