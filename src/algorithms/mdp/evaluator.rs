use super::action::{ActionIndex, ActionSpace};
use super::model::MdpModel;
use super::solver::{SolveOutcome, Solution};
use crate::topology::CityId;

/// Optimal stationary policy induced by a solved MDP.
///
/// Holds the frozen `R`, `T` and `V`; every query takes `&self`.
#[derive(Debug, Clone)]
pub struct MdpPolicy {
    model: MdpModel,
    values: Vec<f64>,
    outcome: SolveOutcome,
    gamma: f64,
}

impl MdpPolicy {
    pub fn new(model: MdpModel, solution: Solution, gamma: f64) -> Self {
        Self {
            model,
            values: solution.values,
            outcome: solution.outcome,
            gamma,
        }
    }

    pub fn space(&self) -> ActionSpace {
        self.model.space()
    }

    pub fn model(&self) -> &MdpModel {
        &self.model
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn outcome(&self) -> SolveOutcome {
        self.outcome
    }

    /// Score of taking `action` in `state` under the frozen value function.
    pub fn score(&self, state: CityId, action: ActionIndex) -> f64 {
        self.model.q_value(state, action, &self.values, self.gamma)
    }

    /// Best action in `state`, given the destination of the offered task.
    ///
    /// With `target = None` only move actions compete. With `Some(t)` the
    /// accept action for `t` is scored first, then every move. The scan keeps
    /// the earlier candidate on ties, so the result is deterministic.
    ///
    /// # Panics
    ///
    /// Panics if `state` or `target` is not a valid city index.
    pub fn choose_best(&self, state: CityId, target: Option<CityId>) -> ActionIndex {
        let space = self.model.space();
        let n = space.num_states();
        assert!(state < n, "state {} out of range for {} cities", state, n);

        let first = match target {
            Some(t) => {
                assert!(t < n, "target {} out of range for {} cities", t, n);
                space.pickup(t)
            }
            None => space.move_to(0),
        };

        let mut best = first;
        let mut best_score = self.score(state, first);
        for action in space.moves() {
            let score = self.score(state, action);
            if score > best_score {
                best = action;
                best_score = score;
            }
        }
        best
    }
}
