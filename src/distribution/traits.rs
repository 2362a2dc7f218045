use crate::topology::CityId;

/// Oracle describing where tasks appear and what they pay.
///
/// The MDP model builder only depends on this trait, so tests can plug in
/// synthetic oracles without a topology-backed table.
pub trait TaskDistribution {
    /// Expected reward of delivering a task from `from` to `to`.
    fn reward(&self, from: CityId, to: CityId) -> f64;

    /// Probability that the task offered at `from` is destined for `to`.
    ///
    /// With `to = None`, the probability that no task is offered at `from`.
    fn probability(&self, from: CityId, to: Option<CityId>) -> f64;

    /// Number of cities the oracle is defined for, when it is bounded.
    ///
    /// Oracles answering for any id return `None`.
    fn num_cities(&self) -> Option<usize> {
        None
    }
}

