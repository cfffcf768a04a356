use citylens_core::GeoPoint;
use std::f64::consts::PI;

const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine great-circle distance between two points, in kilometers.
pub fn haversine_km(a: GeoPoint, b: GeoPoint) -> f64 {
    let to_rad = |deg: f64| deg * PI / 180.0;

    let dlat = to_rad(b.lat - a.lat);
    let dlng = to_rad(b.lng - a.lng);

    let h = (dlat / 2.0).sin().powi(2)
        + to_rad(a.lat).cos() * to_rad(b.lat).cos() * (dlng / 2.0).sin().powi(2);

    2.0 * h.sqrt().asin() * EARTH_RADIUS_KM
}
