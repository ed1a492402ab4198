//! Geographic coordinate and canonical city types.

use serde::{Deserialize, Serialize};

/// WGS84 latitude/longitude pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.lat, self.lon)
    }
}

/// A recognized historical place-name, standardized to its modern name and a
/// fixed coordinate. Produced only by gazetteer lookup — never constructed
/// with a default/fallback coordinate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalCity {
    pub name: String,
    pub coordinate: Coordinate,
}

impl CanonicalCity {
    pub fn new(name: impl Into<String>, coordinate: Coordinate) -> Self {
        Self { name: name.into(), coordinate }
    }
}
