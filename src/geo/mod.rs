//! Great-circle distance between coordinates.
//!
//! Distances use the haversine formula on a sphere of radius
//! [`EARTH_RADIUS_KM`]. Inputs are decimal degrees.
//!
//! ## Example
//!
//! ```rust
//! use bloodlink::geo::{distance_km, Coordinates};
//!
//! let requester = Coordinates::new(28.61, 77.20);
//! let donor = Coordinates::new(28.65, 77.19);
//! let km = distance_km(requester, donor);
//! assert!(km > 4.0 && km < 5.0);
//! ```

use serde::{Deserialize, Serialize};

/// Mean Earth radius in kilometres
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Latitude/longitude pair in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinates {
    #[must_use]
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

impl std::fmt::Display for Coordinates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.4}, {:.4}", self.lat, self.lon)
    }
}

/// Haversine distance in kilometres between two points.
///
/// Symmetric in its arguments. Identical points give 0 up to trigonometric
/// rounding.
#[must_use]
pub fn distance_km(a: Coordinates, b: Coordinates) -> f64 {
    distance_km_between(a.lat, a.lon, b.lat, b.lon)
}

/// Same as [`distance_km`] but on raw degree values.
#[must_use]
pub fn distance_km_between(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lon = (lon2 - lon1).to_radians();

    let half_chord = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    // Rounding can push the chord a hair outside [0, 1]
    let half_chord = half_chord.clamp(0.0, 1.0);
    let central_angle = 2.0 * half_chord.sqrt().atan2((1.0 - half_chord).sqrt());

    EARTH_RADIUS_KM * central_angle
}

/// Round to one decimal place for display.
#[must_use]
pub fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
