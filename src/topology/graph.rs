use std::collections::HashMap;

use petgraph::algo::dijkstra;
use petgraph::graph::{NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;
use qtty::{Kilometer, Quantity};

use super::city::{City, CityId};
use super::error::TopologyError;

/// Road network the delivery vehicle operates on.
///
/// # Invariants
///
/// - City ids are dense: `0..len()`, matching the node index of each city
/// - The graph is connected; every city of a multi-city topology has at least one road
/// - `distance(a, b)` is the shortest-path length, symmetric, zero on the diagonal
#[derive(Debug, Clone)]
pub struct Topology {
    graph: UnGraph<City, Quantity<Kilometer>>,
    by_name: HashMap<String, CityId>,
    /// Sorted neighbor lists, indexed by city id.
    neighbors: Vec<Vec<CityId>>,
    /// All-pairs shortest-path distances in km.
    distances: Vec<Vec<f64>>,
}

impl Topology {
    pub fn builder() -> TopologyBuilder {
        TopologyBuilder::default()
    }

    /// Number of cities.
    pub fn len(&self) -> usize {
        self.graph.node_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    pub fn cities(&self) -> impl Iterator<Item = &City> {
        self.graph.node_weights()
    }

    pub fn city(&self, id: CityId) -> Option<&City> {
        self.graph.node_weight(NodeIndex::new(id))
    }

    /// Looks up a city id by name.
    pub fn id_of(&self, name: &str) -> Option<CityId> {
        self.by_name.get(name).copied()
    }

    /// Display name of a city, or `"?"` for an unknown id.
    pub fn name_of(&self, id: CityId) -> &str {
        self.city(id).map(|c| c.name.as_str()).unwrap_or("?")
    }

    pub fn neighbors(&self, id: CityId) -> &[CityId] {
        self.neighbors.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn has_neighbor(&self, from: CityId, to: CityId) -> bool {
        self.neighbors(from).binary_search(&to).is_ok()
    }

    /// Shortest-path distance between two cities.
    pub fn distance(&self, from: CityId, to: CityId) -> Quantity<Kilometer> {
        Quantity::new(self.distances[from][to])
    }

    /// Length of the direct road between two neighbors, if any.
    pub fn road_length(&self, from: CityId, to: CityId) -> Option<Quantity<Kilometer>> {
        self.graph
            .find_edge(NodeIndex::new(from), NodeIndex::new(to))
            .and_then(|e| self.graph.edge_weight(e))
            .copied()
    }

    /// Neighbor of `from` lying on a shortest path toward `toward`.
    ///
    /// Returns `None` when `from == toward`. Ties go to the lowest city id.
    pub fn next_hop(&self, from: CityId, toward: CityId) -> Option<CityId> {
        if from == toward {
            return None;
        }
        let mut best: Option<(CityId, f64)> = None;
        for &nb in self.neighbors(from) {
            let via = match self.road_length(from, nb) {
                Some(len) => len.value() + self.distances[nb][toward],
                None => continue,
            };
            if best.map_or(true, |(_, d)| via < d) {
                best = Some((nb, via));
            }
        }
        best.map(|(nb, _)| nb)
    }
}

/// Incrementally assembles a [`Topology`], validating as it goes.
#[derive(Debug, Default)]
pub struct TopologyBuilder {
    graph: UnGraph<City, Quantity<Kilometer>>,
    by_name: HashMap<String, CityId>,
}

impl TopologyBuilder {
    /// Adds a city and returns its id.
    pub fn add_city(&mut self, name: impl Into<String>) -> Result<CityId, TopologyError> {
        let name = name.into();
        if self.by_name.contains_key(&name) {
            return Err(TopologyError::DuplicateCity(name));
        }
        let id = self.graph.node_count();
        self.graph.add_node(City::new(id, name.clone()));
        self.by_name.insert(name, id);
        Ok(id)
    }

    /// Adds (or replaces) an undirected road between two cities.
    pub fn add_road(&mut self, from: CityId, to: CityId, km: f64) -> Result<(), TopologyError> {
        let n = self.graph.node_count();
        for id in [from, to] {
            if id >= n {
                return Err(TopologyError::InvalidCityId(id));
            }
        }
        if from == to {
            return Err(TopologyError::SelfRoad(from));
        }
        if !km.is_finite() || km <= 0.0 {
            return Err(TopologyError::InvalidLength(km));
        }
        self.graph
            .update_edge(NodeIndex::new(from), NodeIndex::new(to), Quantity::new(km));
        Ok(())
    }

    /// Adds a road between two cities referenced by name.
    pub fn add_road_by_name(&mut self, from: &str, to: &str, km: f64) -> Result<(), TopologyError> {
        let a = self.lookup(from)?;
        let b = self.lookup(to)?;
        self.add_road(a, b, km)
    }

    fn lookup(&self, name: &str) -> Result<CityId, TopologyError> {
        self.by_name
            .get(name)
            .copied()
            .ok_or_else(|| TopologyError::UnknownCity(name.to_string()))
    }

    /// Validates connectivity and precomputes neighbor lists and distances.
    pub fn build(self) -> Result<Topology, TopologyError> {
        let n = self.graph.node_count();
        if n == 0 {
            return Err(TopologyError::NoCities);
        }

        let mut neighbors = Vec::with_capacity(n);
        for id in 0..n {
            let mut nbs: Vec<CityId> = self
                .graph
                .neighbors(NodeIndex::new(id))
                .map(|nb| nb.index())
                .collect();
            nbs.sort_unstable();
            nbs.dedup();
            if n > 1 && nbs.is_empty() {
                return Err(TopologyError::IsolatedCity(self.graph[NodeIndex::new(id)].name.clone()));
            }
            neighbors.push(nbs);
        }

        let mut distances = vec![vec![0.0; n]; n];
        for from in 0..n {
            let reached = dijkstra(&self.graph, NodeIndex::new(from), None, |e| {
                e.weight().value()
            });
            for to in 0..n {
                match reached.get(&NodeIndex::new(to)) {
                    Some(d) => distances[from][to] = *d,
                    None => {
                        return Err(TopologyError::Disconnected(
                            self.graph[NodeIndex::new(to)].name.clone(),
                            self.graph[NodeIndex::new(from)].name.clone(),
                        ))
                    }
                }
            }
        }

        Ok(Topology {
            graph: self.graph,
            by_name: self.by_name,
            neighbors,
            distances,
        })
    }
}
