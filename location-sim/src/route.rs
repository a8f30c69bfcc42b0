use places::Coordinate;

use super::sim_error::SimError;

/// Average walking speed, in meters per second.
pub const WALKING_SPEED_MPS: f64 = 1.4;

/// A path walked at constant speed through a list of waypoints.
#[derive(Debug, Clone)]
pub struct Route {
    waypoints: Vec<Coordinate>,
    speed_mps: f64,
    /// Cumulative distance at each waypoint, in meters.
    checkpoints: Vec<f64>,
}

impl Route {
    pub fn new(waypoints: Vec<Coordinate>, speed_mps: f64) -> Result<Self, SimError> {
        if waypoints.is_empty() {
            return Err(SimError::EmptyRoute);
        }
        if !(speed_mps.is_finite() && speed_mps > 0.0) {
            return Err(SimError::InvalidSpeed(speed_mps.to_string()));
        }

        let mut checkpoints = Vec::with_capacity(waypoints.len());
        let mut total = 0.0;
        checkpoints.push(total);
        for pair in waypoints.windows(2) {
            total += pair[0].distance_to(&pair[1]);
            checkpoints.push(total);
        }

        Ok(Self {
            waypoints,
            speed_mps,
            checkpoints,
        })
    }

    pub fn start(&self) -> Coordinate {
        self.waypoints[0]
    }

    /// Length of the whole route, in meters.
    pub fn total_distance(&self) -> f64 {
        self.checkpoints.last().copied().unwrap_or(0.0)
    }

    /// Position and heading after walking for `elapsed_seconds`.
    ///
    /// Before the start the walker stands on the first waypoint; once the
    /// route is done it stays on the last one, facing the last leg's heading.
    pub fn position_at(&self, elapsed_seconds: f64) -> (Coordinate, f64) {
        let traveled = (self.speed_mps * elapsed_seconds.max(0.0)).min(self.total_distance());

        if self.waypoints.len() == 1 {
            return (self.waypoints[0], 0.0);
        }

        let leg = self
            .checkpoints
            .windows(2)
            .position(|bounds| traveled <= bounds[1])
            .unwrap_or(self.waypoints.len() - 2);

        let from = self.waypoints[leg];
        let to = self.waypoints[leg + 1];
        let leg_length = self.checkpoints[leg + 1] - self.checkpoints[leg];
        let progress_ratio = if leg_length > 0.0 {
            (traveled - self.checkpoints[leg]) / leg_length
        } else {
            1.0
        };

        let position = Coordinate::from_lat_lon(
            from.latitude + progress_ratio * (to.latitude - from.latitude),
            from.longitude + progress_ratio * (to.longitude - from.longitude),
        );

        (position, from.bearing_to(&to))
    }

    /// Whether the walker has reached the last waypoint.
    pub fn is_finished(&self, elapsed_seconds: f64) -> bool {
        self.speed_mps * elapsed_seconds >= self.total_distance()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn park() -> Coordinate {
        Coordinate::from_lat_lon(-26.1952, 28.0436)
    }

    fn cafe() -> Coordinate {
        Coordinate::from_lat_lon(-26.1984, 28.0478)
    }

    #[test]
    fn test_route_validation() {
        assert_eq!(
            Route::new(vec![], WALKING_SPEED_MPS).unwrap_err(),
            SimError::EmptyRoute
        );
        assert!(matches!(
            Route::new(vec![park()], 0.0),
            Err(SimError::InvalidSpeed(_))
        ));
    }

    #[test]
    fn test_single_waypoint_never_moves() {
        let route = Route::new(vec![park()], WALKING_SPEED_MPS).unwrap();
        assert_eq!(route.position_at(600.0), (park(), 0.0));
        assert!(route.is_finished(0.0));
    }

    #[test]
    fn test_walks_along_a_leg() {
        let route = Route::new(vec![park(), cafe()], 10.0).unwrap();
        let total = route.total_distance();
        assert!((total - 549.7).abs() < 1.0);

        assert_eq!(route.position_at(0.0).0, park());

        let (halfway, bearing) = route.position_at(total / 20.0);
        assert!((halfway.distance_to(&park()) - total / 2.0).abs() < 2.0);
        assert!(bearing > 90.0 && bearing < 180.0, "heading south-east: {}", bearing);

        let (end, _) = route.position_at(total);
        assert!(end.distance_to(&cafe()) < 1e-6);
        assert!(route.is_finished(total));
    }

    #[test]
    fn test_stays_at_the_end() {
        let route = Route::new(vec![park(), cafe()], 10.0).unwrap();
        let (position, _) = route.position_at(1e6);
        assert!(position.distance_to(&cafe()) < 1e-6);
    }

    #[test]
    fn test_multi_leg_route() {
        let library = Coordinate::from_lat_lon(-26.1905, 28.0410);
        let route = Route::new(vec![park(), cafe(), library], 1.0).unwrap();

        let first_leg = park().distance_to(&cafe());
        let (position, bearing) = route.position_at(first_leg + 10.0);

        assert!((position.distance_to(&cafe()) - 10.0).abs() < 0.5);
        assert!((bearing - cafe().bearing_to(&library)).abs() < 1e-9);
    }
}
