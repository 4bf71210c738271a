//! Great-circle distance on a spherical Earth.

use ::geo::{Distance, HaversineMeasure, Point};

use crate::domain::Coordinate;

/// Mean Earth radius in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine distance in kilometres between two points in decimal degrees.
///
/// No range validation is done; callers pass finite values.
///
/// # Examples
///
/// ```
/// use route_table::geo::haversine_km;
///
/// let d = haversine_km(0.0, 0.0, 0.0, 1.0);
/// assert!((d - 111.19).abs() < 0.01);
/// ```
pub fn haversine_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    // geo's default radius is the GRS80 mean; pin the 6371 km sphere
    let sphere = HaversineMeasure::new(EARTH_RADIUS_KM * 1000.0);
    let meters = sphere.distance(Point::new(lon1, lat1), Point::new(lon2, lat2));
    meters / 1000.0
}

/// Haversine distance between two coordinates.
pub fn distance(from: &Coordinate, to: &Coordinate) -> f64 {
    haversine_km(from.lat(), from.lon(), to.lat(), to.lon())
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-9;

    #[test]
    fn one_degree_at_equator() {
        let d = haversine_km(0.0, 0.0, 0.0, 1.0);
        assert!((d - 111.194_926_6).abs() < 1e-6, "got {d}");
    }

    #[test]
    fn radius_is_6371_km_not_geo_default() {
        use ::geo::Haversine;

        let ours = haversine_km(10.0, 20.0, 30.0, 40.0);
        let default_km =
            Haversine.distance(Point::new(20.0, 10.0), Point::new(40.0, 30.0)) / 1000.0;
        // geo's default is the GRS80 mean radius, 6371.0088 km
        let scaled = default_km * EARTH_RADIUS_KM / 6371.0088;
        assert!(ours < default_km);
        assert!((ours - scaled).abs() < 1e-6, "got {ours}, expected {scaled}");
    }

    #[test]
    fn same_point_is_zero() {
        assert!(haversine_km(25.28, 51.53, 25.28, 51.53).abs() < TOLERANCE);
    }

    #[test]
    fn antipodes_are_half_circumference() {
        let d = haversine_km(0.0, 0.0, 0.0, 180.0);
        assert!((d - std::f64::consts::PI * EARTH_RADIUS_KM).abs() < 1e-6);
    }

    #[test]
    fn known_city_pair() {
        // Doha to Dubai, roughly 380 km
        let d = haversine_km(25.2854, 51.5310, 25.2048, 55.2708);
        assert!((370.0..390.0).contains(&d), "got {d}");
    }

    #[test]
    fn coordinate_wrapper_matches() {
        let a = Coordinate::new(10.0, 20.0).unwrap();
        let b = Coordinate::new(11.0, 21.0).unwrap();
        assert_eq!(distance(&a, &b), haversine_km(10.0, 20.0, 11.0, 21.0));
    }
}
