use crate::coordinate::Coordinate;

/// A named point of interest with a fixed position.
#[derive(Debug, Clone, PartialEq)]
pub struct Place {
    pub name: String,
    pub coordinate: Coordinate,
}

impl Place {
    pub fn new(name: &str, latitude: f64, longitude: f64) -> Self {
        Self {
            name: name.to_string(),
            coordinate: Coordinate::from_lat_lon(latitude, longitude),
        }
    }

    /// Distance from the place to `observer`, in meters.
    pub fn distance_from(&self, observer: &Coordinate) -> f64 {
        self.coordinate.distance_to(observer)
    }
}
