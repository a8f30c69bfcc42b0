use std::{
    sync::{mpsc, Arc},
    time::Duration as StdDuration,
};

use chrono::NaiveDateTime;
use places::Coordinate;
use rand::Rng;

use super::{route::Route, sim_error::SimError, timer::Timer};

/// A position reading produced by the simulation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fix {
    pub coordinate: Coordinate,
    /// Heading in degrees clockwise from north.
    pub bearing: f64,
    pub recorded_at: NaiveDateTime,
}

/// Walks a route on a background timer and sends one fix per tick.
///
/// Fixes are delivered through a channel so the receiving side can hand them
/// to its own event loop.
pub struct SimulatedWalk {
    route: Route,
    timer: Arc<Timer>,
    started_at: NaiveDateTime,
    jitter_m: f64,
}

impl SimulatedWalk {
    /// `time_rate` is the number of simulated seconds per tick, from 1 to 3600.
    pub fn new(
        route: Route,
        started_at: NaiveDateTime,
        time_rate: i64,
        tick_interval: StdDuration,
        jitter_m: f64,
    ) -> Result<Self, SimError> {
        let timer = Timer::new(started_at, 1, tick_interval);
        timer.set_tick_advance(time_rate)?;

        Ok(Self {
            route,
            timer,
            started_at,
            jitter_m: jitter_m.max(0.0),
        })
    }

    /// Fix for a given simulated instant, with up to `jitter_m` meters of noise.
    pub fn fix_at(&self, time: NaiveDateTime) -> Fix {
        fix_at(&self.route, self.started_at, self.jitter_m, time)
    }

    /// Starts walking. The walk ends after the last waypoint is reported,
    /// when `stop` is called, or when the receiver is dropped.
    pub fn start(&self) -> Result<mpsc::Receiver<Fix>, SimError> {
        let (sender, receiver) = mpsc::channel();

        // The first fix is available right away.
        let _ = sender.send(self.fix_at(self.timer.now()?));

        let route = self.route.clone();
        let started_at = self.started_at;
        let jitter_m = self.jitter_m;

        Arc::clone(&self.timer).start(move |current_time, _tick| {
            let fix = fix_at(&route, started_at, jitter_m, current_time);
            let elapsed = elapsed_seconds(started_at, current_time);
            sender.send(fix).is_ok() && !route.is_finished(elapsed)
        })?;

        Ok(receiver)
    }

    /// Holds the device in place until `resume` is called.
    pub fn pause(&self) {
        self.timer.pause();
    }

    pub fn resume(&self) {
        self.timer.resume();
    }

    pub fn is_paused(&self) -> bool {
        self.timer.is_paused()
    }

    pub fn stop(&self) {
        self.timer.stop();
    }
}

impl Drop for SimulatedWalk {
    fn drop(&mut self) {
        self.timer.stop();
    }
}

fn elapsed_seconds(started_at: NaiveDateTime, now: NaiveDateTime) -> f64 {
    now.signed_duration_since(started_at).num_milliseconds() as f64 / 1000.0
}

fn fix_at(route: &Route, started_at: NaiveDateTime, jitter_m: f64, time: NaiveDateTime) -> Fix {
    let (position, bearing) = route.position_at(elapsed_seconds(started_at, time));

    let coordinate = if jitter_m > 0.0 {
        let mut rng = rand::thread_rng();
        position.offset_by(
            rng.gen_range(-jitter_m..=jitter_m),
            rng.gen_range(-jitter_m..=jitter_m),
        )
    } else {
        position
    };

    Fix {
        coordinate,
        bearing,
        recorded_at: time,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::route::WALKING_SPEED_MPS;
    use chrono::NaiveDate;
    use std::thread;

    fn start_time() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, 1)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap()
    }

    fn route() -> Route {
        Route::new(
            vec![
                Coordinate::from_lat_lon(-26.1952, 28.0436),
                Coordinate::from_lat_lon(-26.1984, 28.0478),
            ],
            100.0,
        )
        .unwrap()
    }

    #[test]
    fn test_invalid_time_rate() {
        for time_rate in [0, -5, 3601] {
            let result = SimulatedWalk::new(
                route(),
                start_time(),
                time_rate,
                StdDuration::from_millis(1),
                0.0,
            );
            assert!(matches!(result, Err(SimError::InvalidDuration(_))));
        }

        let tick_interval = StdDuration::from_millis(1);
        let fastest = SimulatedWalk::new(route(), start_time(), 3600, tick_interval, 0.0);
        assert!(fastest.is_ok());
    }

    #[test]
    fn test_paused_walk_sends_no_fixes() {
        let long_route = Route::new(
            vec![
                Coordinate::from_lat_lon(-26.1952, 28.0436),
                Coordinate::from_lat_lon(-26.25, 28.15),
            ],
            WALKING_SPEED_MPS,
        )
        .unwrap();
        let walk =
            SimulatedWalk::new(long_route, start_time(), 1, StdDuration::from_millis(2), 0.0)
                .unwrap();
        let receiver = walk.start().expect("walk starts");
        assert!(receiver.recv_timeout(StdDuration::from_secs(1)).is_ok());

        walk.pause();
        assert!(walk.is_paused());
        // Let a tick already in flight land before draining.
        thread::sleep(StdDuration::from_millis(50));
        let _ = receiver.try_iter().count();

        thread::sleep(StdDuration::from_millis(200));
        assert_eq!(receiver.try_iter().count(), 0);

        walk.resume();
        assert!(!walk.is_paused());
        assert!(receiver.recv_timeout(StdDuration::from_secs(1)).is_ok());
        walk.stop();
    }

    #[test]
    fn test_fix_without_jitter_follows_route() {
        let walk =
            SimulatedWalk::new(route(), start_time(), 1, StdDuration::from_millis(1), 0.0).unwrap();

        let fix = walk.fix_at(start_time() + chrono::Duration::seconds(2));
        let (expected, bearing) = route().position_at(2.0);
        assert_eq!(fix.coordinate, expected);
        assert_eq!(fix.bearing, bearing);
    }

    #[test]
    fn test_jitter_stays_bounded() {
        let walk =
            SimulatedWalk::new(route(), start_time(), 1, StdDuration::from_millis(1), 5.0).unwrap();

        for _ in 0..50 {
            let fix = walk.fix_at(start_time());
            let start = route().start();
            // Up to 5 m north and 5 m east.
            assert!(fix.coordinate.distance_to(&start) <= 5.0 * 2f64.sqrt() + 0.1);
        }
    }

    #[test]
    fn test_walk_reaches_the_end() {
        let walk =
            SimulatedWalk::new(route(), start_time(), 1, StdDuration::from_millis(1), 0.0).unwrap();
        let receiver = walk.start().expect("walk starts");

        let fixes: Vec<Fix> = receiver.iter().collect();
        assert!(fixes.len() >= 2);
        assert_eq!(fixes[0].coordinate, route().start());

        let last = fixes.last().unwrap().coordinate;
        let end = Coordinate::from_lat_lon(-26.1984, 28.0478);
        assert!(last.distance_to(&end) < 1e-6);
    }
}
