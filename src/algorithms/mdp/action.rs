use crate::topology::CityId;

/// Index into the MDP action set `[0, 2 * num_states)`.
pub type ActionIndex = usize;

/// Layout of the action set over `n` states.
///
/// - `[0, n)`: accept the offered task, destined for city `a`
/// - `[n, 2n)`: move toward city `a - n`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionSpace {
    num_states: usize,
}

impl ActionSpace {
    pub fn new(num_states: usize) -> Self {
        Self { num_states }
    }

    pub fn num_states(&self) -> usize {
        self.num_states
    }

    pub fn num_actions(&self) -> usize {
        2 * self.num_states
    }

    pub fn is_pickup(&self, action: ActionIndex) -> bool {
        action < self.num_states
    }

    /// City the action leads to: the task destination or the move target.
    pub fn next_state(&self, action: ActionIndex) -> CityId {
        if self.is_pickup(action) {
            action
        } else {
            action - self.num_states
        }
    }

    pub fn pickup(&self, destination: CityId) -> ActionIndex {
        destination
    }

    pub fn move_to(&self, target: CityId) -> ActionIndex {
        self.num_states + target
    }

    /// All move actions, in increasing index order.
    pub fn moves(&self) -> std::ops::Range<ActionIndex> {
        self.num_states..self.num_actions()
    }
}
