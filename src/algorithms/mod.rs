//! Decision algorithms for the delivery agent.

pub mod mdp;

pub use mdp::{learn_policy, MdpPolicy, SolveOutcome, ValueIteration};
