//! Great-circle distance on the WGS84 mean-radius sphere.

use super::domain::GeoPoint;

const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine distance between two coordinates in kilometers.
///
/// Symmetric, zero for identical points. NaN inputs propagate as NaN;
/// the ranking service filters out candidates without coordinates before
/// calling this.
pub fn haversine_km(a: GeoPoint, b: GeoPoint) -> f64 {
    let lat_a = a.lat.to_radians();
    let lat_b = b.lat.to_radians();
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lon = (b.lon - a.lon).to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat_a.cos() * lat_b.cos() * (d_lon / 2.0).sin().powi(2);

    2.0 * EARTH_RADIUS_KM * h.sqrt().asin()
}
