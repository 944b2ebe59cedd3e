//! Great-circle distance for geofence checks

use serde::{Deserialize, Serialize};

/// Mean Earth radius in meters
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Geographic coordinate (latitude/longitude in degrees)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    /// Create a new coordinate
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// Whether latitude is in [-90, 90] and longitude in [-180, 180]
    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.latitude) && (-180.0..=180.0).contains(&self.longitude)
    }

    /// Calculate distance to another coordinate (in meters)
    /// Using Haversine formula
    pub fn distance_to(&self, other: &Coordinate) -> f64 {
        let lat1 = self.latitude.to_radians();
        let lat2 = other.latitude.to_radians();
        let delta_lat = (other.latitude - self.latitude).to_radians();
        let delta_lon = (other.longitude - self.longitude).to_radians();

        let a = (delta_lat / 2.0).sin().powi(2)
            + lat1.cos() * lat2.cos() * (delta_lon / 2.0).sin().powi(2);
        // Rounding can push `a` just past 1.0 for antipodal points
        let c = 2.0 * a.sqrt().atan2((1.0 - a).max(0.0).sqrt());

        EARTH_RADIUS_M * c
    }
}

/// Distance in whole meters between two points, rounded to nearest
pub fn distance_meters(lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> u32 {
    let meters = Coordinate::new(lat1, lng1).distance_to(&Coordinate::new(lat2, lng2));
    meters.round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_points_are_zero() {
        let points = [
            (52.2297, 21.0122),
            (-33.8688, 151.2093),
            (40.7128, -74.0060),
            (-22.9068, -43.1729),
            (0.0, 0.0),
            (90.0, 180.0),
            (-90.0, -180.0),
        ];
        for (lat, lng) in points {
            assert_eq!(distance_meters(lat, lng, lat, lng), 0, "({}, {})", lat, lng);
        }
    }

    #[test]
    fn test_symmetry() {
        let pairs = [
            ((52.2297, 21.0122), (52.2315, 21.0122)),
            ((-33.8688, 151.2093), (-37.8136, 144.9631)),
            ((40.7128, -74.0060), (51.5074, -0.1278)),
            ((-22.9068, -43.1729), (35.6762, 139.6503)),
        ];
        for ((a_lat, a_lng), (b_lat, b_lng)) in pairs {
            assert_eq!(
                distance_meters(a_lat, a_lng, b_lat, b_lng),
                distance_meters(b_lat, b_lng, a_lat, a_lng)
            );
        }
    }

    #[test]
    fn test_short_distances_near_warsaw() {
        // 0.00045 degrees of latitude is roughly 50 m
        let d = distance_meters(52.2297, 21.0122, 52.23015, 21.0122);
        assert!((49..=51).contains(&d), "got {}", d);

        // 0.0018 degrees of latitude is roughly 200 m
        let d = distance_meters(52.2297, 21.0122, 52.2315, 21.0122);
        assert!((199..=201).contains(&d), "got {}", d);
    }

    #[test]
    fn test_southern_and_western_hemispheres() {
        // Sydney to Melbourne, about 713 km
        let d = distance_meters(-33.8688, 151.2093, -37.8136, 144.9631);
        assert!((710_000..=716_000).contains(&d), "got {}", d);

        // New York to London, about 5570 km
        let d = distance_meters(40.7128, -74.0060, 51.5074, -0.1278);
        assert!((5_560_000..=5_580_000).contains(&d), "got {}", d);
    }

    #[test]
    fn test_antimeridian_crossing() {
        let d = distance_meters(0.0, 179.9995, 0.0, -179.9995);
        assert!((110..=112).contains(&d), "got {}", d);
    }

    #[test]
    fn test_coordinate_validity() {
        assert!(Coordinate::new(52.2, 21.0).is_valid());
        assert!(!Coordinate::new(91.0, 0.0).is_valid());
        assert!(!Coordinate::new(0.0, -181.0).is_valid());
        assert!(!Coordinate::new(f64::NAN, 0.0).is_valid());
    }
}
