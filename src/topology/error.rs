use thiserror::Error;

use super::CityId;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum TopologyError {
    #[error("Topology must contain at least one city")]
    NoCities,

    #[error("City name already exists: {0}")]
    DuplicateCity(String),

    #[error("Unknown city: {0}")]
    UnknownCity(String),

    #[error("Invalid city id: {0}")]
    InvalidCityId(CityId),

    #[error("Road from city {0} to itself is not allowed")]
    SelfRoad(CityId),

    #[error("Road length must be positive and finite, got {0} km")]
    InvalidLength(f64),

    #[error("City {0} has no neighbors")]
    IsolatedCity(String),

    #[error("City {0} cannot be reached from {1}")]
    Disconnected(String, String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_city_display() {
        let e = TopologyError::DuplicateCity("Lausanne".to_string());
        assert_eq!(e.to_string(), "City name already exists: Lausanne");
    }

    #[test]
    fn disconnected_display() {
        let e = TopologyError::Disconnected("Bern".into(), "Zurich".into());
        assert_eq!(e.to_string(), "City Bern cannot be reached from Zurich");
    }

    #[test]
    fn error_equality() {
        assert_eq!(TopologyError::NoCities, TopologyError::NoCities);
        assert_ne!(TopologyError::NoCities, TopologyError::SelfRoad(0));
    }
}
