#[cfg(test)]
#[path = "../../tests/unit/utils/geo_test.rs"]
mod geo_test;

/// Earth radius used by the great circle distance approximation, in km.
const EARTH_RADIUS_KM: f64 = 6371.;

/// Computes a great circle distance between two geo coordinates using
/// the haversine formula. Coordinates are given in degrees, result is in km.
pub fn great_circle_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lon = (lon2 - lon1).to_radians();

    let a = (d_lat / 2.).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lon / 2.).sin().powi(2);
    let c = 2. * a.sqrt().asin();

    EARTH_RADIUS_KM * c
}
