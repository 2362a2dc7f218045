use std::fmt;

use crate::distribution::Task;
use crate::topology::CityId;

/// Domain command returned to the simulation for one step.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Accept the offered task and deliver it.
    Pickup(Task),
    /// Travel toward the given city.
    Move(CityId),
}

impl Action {
    pub fn is_pickup(&self) -> bool {
        matches!(self, Action::Pickup(_))
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Pickup(task) => write!(f, "pickup {}", task),
            Action::Move(city) => write!(f, "move toward city {}", city),
        }
    }
}
