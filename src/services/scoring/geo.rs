//! Great-circle distance between author and viewer coordinates.

use crate::models::Coordinate;

const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine distance in kilometers between two coordinates in degrees.
///
/// Out-of-range coordinates are the caller's responsibility; this function
/// has no error path.
pub fn haversine_distance(from: Coordinate, to: Coordinate) -> f64 {
    let lat1 = from.lat.to_radians();
    let lat2 = to.lat.to_radians();
    let delta_lat = (to.lat - from.lat).to_radians();
    let delta_lon = (to.lon - from.lon).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coord(lat: f64, lon: f64) -> Coordinate {
        Coordinate { lat, lon }
    }

    #[test]
    fn zero_distance_for_identical_points() {
        let p = coord(48.8566, 2.3522);
        assert!(haversine_distance(p, p).abs() < 1e-9);
    }

    #[test]
    fn paris_to_london() {
        // Reference distance ~343.5 km (city centre to city centre).
        let paris = coord(48.8566, 2.3522);
        let london = coord(51.5074, -0.1278);
        let d = haversine_distance(paris, london);
        assert!((d - 343.5).abs() < 1.0, "got {d}");
    }

    #[test]
    fn symmetric() {
        let a = coord(35.6762, 139.6503);
        let b = coord(-33.8688, 151.2093);
        let ab = haversine_distance(a, b);
        let ba = haversine_distance(b, a);
        assert!((ab - ba).abs() < 0.01);
    }

    #[test]
    fn antipodal_is_half_circumference() {
        let a = coord(0.0, 0.0);
        let b = coord(0.0, 180.0);
        let d = haversine_distance(a, b);
        let half_circumference = std::f64::consts::PI * 6371.0;
        assert!((d - half_circumference).abs() < 0.01);
    }
}
