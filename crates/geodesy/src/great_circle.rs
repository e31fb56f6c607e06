//! Initial bearing and haversine distance.
//!
//! Formulas from <http://www.movable-type.co.uk/scripts/latlong.html>.

use serde::{Deserialize, Serialize};

/// Mean Earth radius used for distances (meters).
pub const EARTH_RADIUS_M: f64 = 6_367_000.0;

/// Initial bearing when traversing from `(lon1, lat1)` to `(lon2, lat2)`.
///
/// Returns the azimuth in degrees, clockwise from north, in `[0, 360)`.
/// Identical points give 0.
pub fn initial_bearing(lon1: f64, lat1: f64, lon2: f64, lat2: f64) -> f64 {
    let lat1 = lat1.to_radians();
    let lat2 = lat2.to_radians();
    let d_lon = (lon2 - lon1).to_radians();

    let y = d_lon.sin() * lat2.cos();
    let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * d_lon.cos();

    normalize_degrees(y.atan2(x).to_degrees())
}

/// Fold an angle into `[0, 360)`.
///
/// Always shifts by 360 before the floored modulo, which also turns `-0.0`
/// into `0.0`.
fn normalize_degrees(degrees: f64) -> f64 {
    let wrapped = (degrees + 360.0).rem_euclid(360.0);
    // rem_euclid may round up to the modulus itself
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

/// Great-circle distance in meters between `(lon1, lat1)` and `(lon2, lat2)`.
///
/// Uses the haversine formula on a sphere of radius [`EARTH_RADIUS_M`].
pub fn haversine(lon1: f64, lat1: f64, lon2: f64, lat2: f64) -> f64 {
    let lat1 = lat1.to_radians();
    let lat2 = lat2.to_radians();
    let d_lat = lat2 - lat1;
    let d_lon = (lon2 - lon1).to_radians();

    let a = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
    // Rounding can push `a` just past 1 near antipodes.
    let a = a.clamp(0.0, 1.0);
    let c = 2.0 * a.sqrt().asin();

    EARTH_RADIUS_M * c
}

/// A geographic position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lon: f64,
    pub lat: f64,
}

impl GeoPoint {
    pub const fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }

    /// Initial bearing towards `other`, see [`initial_bearing`].
    pub fn bearing_to(&self, other: &GeoPoint) -> f64 {
        initial_bearing(self.lon, self.lat, other.lon, other.lat)
    }

    /// Great-circle distance to `other` in meters, see [`haversine`].
    pub fn distance_to(&self, other: &GeoPoint) -> f64 {
        haversine(self.lon, self.lat, other.lon, other.lat)
    }
}

impl From<(f64, f64)> for GeoPoint {
    fn from((lon, lat): (f64, f64)) -> Self {
        Self { lon, lat }
    }
}
