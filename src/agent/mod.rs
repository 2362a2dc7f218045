//! Agents: turn a city and an offered task into a domain [`Action`].

mod action;
mod behavior;
mod error;
mod random;
mod reactive;
mod vehicle;

pub use action::Action;
pub use behavior::Behavior;
pub use error::AgentError;
pub use random::RandomBehavior;
pub use reactive::ReactiveAgent;
pub use vehicle::Vehicle;
