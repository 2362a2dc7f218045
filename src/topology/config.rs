//! Declarative topology description, as read from configuration files.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::error::TopologyError;
use super::graph::Topology;

/// A road between two named cities.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RoadSpec {
    pub from: String,
    pub to: String,
    pub km: f64,
}

/// City names plus roads; converted into a [`Topology`] with [`TopologySpec::build`].
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TopologySpec {
    pub cities: Vec<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub roads: Vec<RoadSpec>,
}

impl TopologySpec {
    pub fn build(&self) -> Result<Topology, TopologyError> {
        let mut builder = Topology::builder();
        for name in &self.cities {
            builder.add_city(name.clone())?;
        }
        for road in &self.roads {
            builder.add_road_by_name(&road.from, &road.to, road.km)?;
        }
        builder.build()
    }

    /// Road network of western Switzerland and its main northern links.
    pub fn switzerland() -> Self {
        let cities = [
            "Basel",
            "Bern",
            "Fribourg",
            "Geneve",
            "La Chaux-de-Fonds",
            "Lausanne",
            "Luzern",
            "Neuchatel",
            "Sion",
            "Thun",
            "Yverdon",
            "Zurich",
        ];
        let roads = [
            ("Basel", "Bern", 97.0),
            ("Basel", "La Chaux-de-Fonds", 121.0),
            ("Basel", "Zurich", 87.0),
            ("Bern", "Fribourg", 34.0),
            ("Bern", "Luzern", 111.0),
            ("Bern", "Neuchatel", 54.0),
            ("Bern", "Thun", 30.0),
            ("Bern", "Zurich", 125.0),
            ("Fribourg", "Lausanne", 71.0),
            ("Fribourg", "Thun", 62.0),
            ("Geneve", "Lausanne", 62.0),
            ("Geneve", "Sion", 157.0),
            ("La Chaux-de-Fonds", "Neuchatel", 20.0),
            ("Lausanne", "Sion", 95.0),
            ("Lausanne", "Yverdon", 37.0),
            ("Luzern", "Thun", 84.0),
            ("Luzern", "Zurich", 52.0),
            ("Neuchatel", "Yverdon", 38.0),
            ("Sion", "Thun", 125.0),
        ];
        Self {
            cities: cities.iter().map(|c| c.to_string()).collect(),
            roads: roads
                .iter()
                .map(|(from, to, km)| RoadSpec {
                    from: from.to_string(),
                    to: to.to_string(),
                    km: *km,
                })
                .collect(),
        }
    }
}
