//! Coordinates and the distance check behind proximity alerts.
//!
//! Positions come from an external geolocation provider; this module only
//! measures great-circle distance between two of them.

use serde::{Deserialize, Serialize};

const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// A WGS84 position in decimal degrees.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Haversine distance in meters.
    ///
    /// ```rust
    /// use nightplan_core::geo::Coordinates;
    ///
    /// let a = Coordinates::new(40.7128, -74.0060);
    /// assert_eq!(a.distance_m(&a), 0.0);
    /// ```
    pub fn distance_m(&self, other: &Coordinates) -> f64 {
        let (lat1, lat2) = (self.lat.to_radians(), other.lat.to_radians());
        let d_lat = (other.lat - self.lat).to_radians();
        let d_lng = (other.lng - self.lng).to_radians();

        let a = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lng / 2.0).sin().powi(2);
        // Rounding can push `a` just past 1 for antipodal points.
        2.0 * EARTH_RADIUS_M * a.sqrt().min(1.0).asin()
    }
}

/// Distance from the user to the stop they are heading to.
#[derive(Debug, Clone, PartialEq)]
pub struct Proximity {
    pub stop_index: usize,
    pub stop_name: String,
    pub distance_m: f64,
    /// Within the configured alert radius
    pub nearby: bool,
}
