//! Geodesy helpers.

use serde::{Deserialize, Serialize};

/// Earth radius used for great-circle distances, in miles.
pub const EARTH_RADIUS_MILES: f64 = 3963.1;

/// Metres in one statute mile.
pub const METERS_PER_MILE: f64 = 1609.344;

/// A WGS84 latitude/longitude pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Great-circle distance to `other` in miles (haversine formula).
    pub fn miles_to(&self, other: &Coordinate) -> f64 {
        let dlat = (other.lat - self.lat).to_radians();
        let dlon = (other.lon - self.lon).to_radians();
        let a = (dlat / 2.0).sin().powi(2)
            + self.lat.to_radians().cos() * other.lat.to_radians().cos() * (dlon / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
        EARTH_RADIUS_MILES * c
    }
}

/// Convert metres per second to miles per hour.
pub fn mps_to_mph(speed: f64) -> f64 {
    speed / METERS_PER_MILE * 3600.0
}

/// Convert metres to miles.
pub fn meters_to_miles(meters: f64) -> f64 {
    meters / METERS_PER_MILE
}
