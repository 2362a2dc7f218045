//! City road network: the state space of the delivery MDP.
//!
//! Cities are nodes of an undirected [`petgraph`] graph whose edges carry road
//! lengths. All-pairs shortest-path distances are computed once when the
//! topology is built, so distance and routing queries are constant time.

mod city;
mod config;
mod error;
mod graph;

pub use city::{City, CityId};
pub use config::{RoadSpec, TopologySpec};
pub use error::TopologyError;
pub use graph::{Topology, TopologyBuilder};
