//! Behavior trait for vehicles driven by the simulation.

use super::action::Action;
use crate::distribution::Task;
use crate::topology::CityId;

/// Decides what a vehicle does at each step.
///
/// Called once per step with the vehicle's current city and the task offered
/// there, if any.
pub trait Behavior: Send {
    /// Chooses the action for this step.
    fn act(&mut self, current: CityId, available: Option<&Task>) -> Action;

    /// Returns a human-readable name for this behavior.
    fn name(&self) -> &str;
}
