//! Great-circle geodesy on a spherical Earth.
//!
//! Implements the two helpers the raster tools need: the initial bearing
//! between two points and the haversine distance. Inputs are decimal degrees
//! as `(lon, lat)` pairs. Neither longitude nor latitude is validated or
//! normalized; out-of-range latitudes give mathematically defined results.

pub mod great_circle;

pub use great_circle::{haversine, initial_bearing, GeoPoint, EARTH_RADIUS_M};
