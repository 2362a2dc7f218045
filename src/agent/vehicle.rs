#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The delivery vehicle an agent controls.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "kebab-case"))]
pub struct Vehicle {
    pub name: String,
    /// Name of the starting city; the first city of the topology when unset.
    pub home: Option<String>,
    /// Cost charged per km travelled.
    pub cost_per_km: f64,
}

impl Default for Vehicle {
    fn default() -> Self {
        Self {
            name: "Vehicle 1".to_string(),
            home: None,
            cost_per_km: 5.0,
        }
    }
}
