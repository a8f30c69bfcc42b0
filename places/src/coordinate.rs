use std::f64::consts::PI;

use serde::Deserialize;

/// Mean radius of the earth used by the haversine formula, in meters.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// A geographic position in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn from_lat_lon(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Whether the latitude lies in [-90, 90] and the longitude in [-180, 180].
    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.latitude) && (-180.0..=180.0).contains(&self.longitude)
    }

    /// Great-circle distance to `other`, in meters.
    pub fn distance_to(&self, other: &Coordinate) -> f64 {
        haversine_distance(
            self.latitude,
            self.longitude,
            other.latitude,
            other.longitude,
        )
    }

    /// Initial bearing from this position towards `other`, in degrees clockwise
    /// from north, within [0, 360).
    pub fn bearing_to(&self, other: &Coordinate) -> f64 {
        let lat1 = self.latitude.to_radians();
        let lat2 = other.latitude.to_radians();
        let delta_lon = (other.longitude - self.longitude).to_radians();

        let y = delta_lon.sin() * lat2.cos();
        let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * delta_lon.cos();

        (y.atan2(x).to_degrees() + 360.0) % 360.0
    }

    /// Moves the position by the given amount of meters towards north and east.
    ///
    /// Uses a local flat approximation, only meant for offsets of a few hundred meters.
    pub fn offset_by(&self, north_m: f64, east_m: f64) -> Coordinate {
        let delta_lat = north_m / EARTH_RADIUS_M * 180.0 / PI;
        let delta_lon =
            east_m / (EARTH_RADIUS_M * self.latitude.to_radians().cos()) * 180.0 / PI;

        Coordinate::from_lat_lon(self.latitude + delta_lat, self.longitude + delta_lon)
    }
}

/// Haversine distance between two latitude/longitude pairs, in meters.
pub fn haversine_distance(origin_lat: f64, origin_lon: f64, dest_lat: f64, dest_lon: f64) -> f64 {
    let origin_lat_rad = origin_lat * PI / 180.0;
    let dest_lat_rad = dest_lat * PI / 180.0;

    let delta_lat = (dest_lat - origin_lat) * PI / 180.0;
    let delta_lon = (dest_lon - origin_lon) * PI / 180.0;

    let a = (delta_lat / 2.0).sin().powi(2)
        + origin_lat_rad.cos() * dest_lat_rad.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_M * c
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_to_itself_is_zero() {
        let park = Coordinate::from_lat_lon(-26.1952, 28.0436);
        assert_eq!(park.distance_to(&park), 0.0);
    }

    #[test]
    fn test_distance_is_symmetric() {
        let park = Coordinate::from_lat_lon(-26.1952, 28.0436);
        let museum = Coordinate::from_lat_lon(-26.2023, 28.0399);

        let there = park.distance_to(&museum);
        let back = museum.distance_to(&park);
        assert!((there - back).abs() < 1e-6);
        assert!((there - 871.5).abs() < 1.0, "unexpected distance {}", there);
    }

    #[test]
    fn test_one_degree_of_latitude() {
        let a = Coordinate::from_lat_lon(0.0, 0.0);
        let b = Coordinate::from_lat_lon(1.0, 0.0);
        let expected = EARTH_RADIUS_M * PI / 180.0;
        assert!((a.distance_to(&b) - expected).abs() < 1e-6);
    }

    #[test]
    fn test_bearing_cardinal_directions() {
        let origin = Coordinate::from_lat_lon(0.0, 0.0);
        let north = Coordinate::from_lat_lon(1.0, 0.0);
        let east = Coordinate::from_lat_lon(0.0, 1.0);
        let west = Coordinate::from_lat_lon(0.0, -1.0);

        assert!(origin.bearing_to(&north).abs() < 1e-9);
        assert!((origin.bearing_to(&east) - 90.0).abs() < 1e-9);
        assert!((origin.bearing_to(&west) - 270.0).abs() < 1e-9);
    }

    #[test]
    fn test_offset_by_moves_roughly_the_requested_distance() {
        let park = Coordinate::from_lat_lon(-26.1952, 28.0436);
        let moved = park.offset_by(30.0, 40.0);
        assert!((park.distance_to(&moved) - 50.0).abs() < 0.5);
    }

    #[test]
    fn test_validity_bounds() {
        assert!(Coordinate::from_lat_lon(90.0, -180.0).is_valid());
        assert!(!Coordinate::from_lat_lon(90.1, 0.0).is_valid());
        assert!(!Coordinate::from_lat_lon(0.0, 180.5).is_valid());
    }
}
