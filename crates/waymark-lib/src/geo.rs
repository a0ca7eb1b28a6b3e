//! Coordinate helpers shared by the search heuristic and path accounting.

use serde::Serialize;

/// Mean Earth radius in kilometres used by the haversine formula.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Geographic position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Position {
    pub lat: f64,
    pub lon: f64,
}

impl Position {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Straight-line distance in raw degree space.
    ///
    /// This is the A* heuristic of the hop-count cost model; it deliberately
    /// ignores the curvature of the Earth and the shrinking of longitude
    /// degrees towards the poles.
    pub fn planar_distance_to(&self, other: &Self) -> f64 {
        let dlat = self.lat - other.lat;
        let dlon = self.lon - other.lon;
        (dlat * dlat + dlon * dlon).sqrt()
    }

    /// Great-circle distance in metres.
    pub fn haversine_to(&self, other: &Self) -> f64 {
        haversine_m(*self, *other)
    }
}

/// Great-circle distance between two positions in metres.
pub fn haversine_m(a: Position, b: Position) -> f64 {
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let dlat = lat2 - lat1;
    let dlon = (b.lon - a.lon).to_radians();

    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_KM * c * 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn haversine_of_identical_points_is_zero() {
        let p = Position::new(42.5, 1.5);
        assert_eq!(haversine_m(p, p), 0.0);
    }

    #[test]
    fn one_degree_of_longitude_at_equator() {
        let d = haversine_m(Position::new(0.0, 0.0), Position::new(0.0, 1.0));
        // 2 * pi * 6371 km / 360
        assert!((d - 111_194.93).abs() < 0.1, "got {d}");
    }

    #[test]
    fn haversine_is_symmetric() {
        let a = Position::new(42.506, 1.521);
        let b = Position::new(42.544, 1.733);
        assert!((haversine_m(a, b) - haversine_m(b, a)).abs() < 1e-9);
    }

    #[test]
    fn planar_distance_uses_degrees() {
        let a = Position::new(0.0, 0.0);
        let b = Position::new(3.0, 4.0);
        assert_eq!(a.planar_distance_to(&b), 5.0);
    }
}
