//! reactive-delivery - MDP-driven reactive pickup and delivery agent
//!
//! A vehicle roams a road network where delivery tasks appear at random.
//! At setup the agent models the network as a Markov decision process,
//! solves it once with value iteration, and then answers every
//! "take this task or move on?" question from the frozen policy.

pub mod agent;
pub mod algorithms;
pub mod distribution;
pub mod scenario;
pub mod simulation;
pub mod topology;

pub use agent::{Action, Behavior, RandomBehavior, ReactiveAgent, Vehicle};
pub use algorithms::mdp::{learn_policy, MdpConfig, MdpPolicy};

/// Identifier type used for agents.
pub type Id = String;

/// Generates a new unique identifier (UUID v4).
pub fn generate_id() -> Id {
    uuid::Uuid::new_v4().to_string()
}
