use chrono::{Duration, NaiveDateTime};
use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc, Mutex, RwLock,
    },
    thread,
    time::{Duration as StdDuration, Instant},
};

use super::sim_error::SimError;

/// A clock for the simulated walk, with support for starting, pausing and
/// resuming.
///
/// Every real tick advances the simulated time by `tick_advance` and runs the
/// callback with the new time.
pub struct Timer {
    pub current_time: Mutex<NaiveDateTime>,
    pub tick_advance: RwLock<Duration>,
    pub tick_interval: StdDuration,
    pub running: AtomicBool,
    pub paused: AtomicBool,
}

impl Timer {
    /// Creates a new timer advancing `tick_advance_seconds` of simulated time
    /// every `tick_interval` of real time.
    pub fn new(
        start_time: NaiveDateTime,
        tick_advance_seconds: i64,
        tick_interval: StdDuration,
    ) -> Arc<Self> {
        Arc::new(Self {
            current_time: Mutex::new(start_time),
            tick_advance: RwLock::new(Duration::seconds(tick_advance_seconds)),
            tick_interval,
            running: AtomicBool::new(true),
            paused: AtomicBool::new(false),
        })
    }

    /// Changes the simulated time advanced per tick.
    pub fn set_tick_advance(&self, new_tick_advance_seconds: i64) -> Result<(), SimError> {
        if new_tick_advance_seconds <= 0 || new_tick_advance_seconds > 3600 {
            return Err(SimError::InvalidDuration(
                new_tick_advance_seconds.to_string(),
            ));
        }

        let mut tick_advance_lock = self.tick_advance.write().map_err(|_| {
            SimError::TimerLockError("Failed to acquire write lock for tick_advance.".to_string())
        })?;
        *tick_advance_lock = Duration::seconds(new_tick_advance_seconds);
        Ok(())
    }

    pub fn now(&self) -> Result<NaiveDateTime, SimError> {
        self.current_time
            .lock()
            .map(|time| *time)
            .map_err(|_| SimError::TimerLockError("Failed to read current_time.".to_string()))
    }

    /// Advances the clock by one tick and returns the new time.
    pub fn advance(&self) -> Result<NaiveDateTime, SimError> {
        let tick_advance = *self.tick_advance.read().map_err(|_| {
            SimError::TimerLockError("Failed to acquire read lock on tick_advance.".to_string())
        })?;
        let mut time_lock = self.current_time.lock().map_err(|_| {
            SimError::TimerLockError("Failed to acquire lock on current_time.".to_string())
        })?;

        *time_lock += tick_advance;
        Ok(*time_lock)
    }

    /// Stops the timer
    pub fn stop(&self) {
        self.running.store(false, Ordering::SeqCst);
    }

    /// Pauses the timer indefinitely
    pub fn pause(&self) {
        self.paused.store(true, Ordering::SeqCst);
    }

    /// Resumes the timer
    pub fn resume(&self) {
        self.paused.store(false, Ordering::SeqCst);
    }

    pub fn is_paused(&self) -> bool {
        self.paused.load(Ordering::SeqCst)
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Starts the timer thread, executing the callback on each tick until the
    /// timer is stopped or the callback returns `false`.
    pub fn start(
        self: Arc<Self>,
        tick_callback: impl Fn(NaiveDateTime, usize) -> bool + Send + 'static,
    ) -> Result<(), SimError> {
        thread::Builder::new()
            .name("location-timer".to_string())
            .spawn(move || {
                let mut tick_count = 0;
                while self.running.load(Ordering::SeqCst) {
                    while self.paused.load(Ordering::SeqCst) && self.running.load(Ordering::SeqCst)
                    {
                        thread::sleep(StdDuration::from_millis(100));
                    }

                    let started = Instant::now();

                    let current_time = match self.advance() {
                        Ok(time) => time,
                        Err(e) => {
                            eprintln!("{}. Skipping tick.", e);
                            thread::sleep(self.tick_interval);
                            continue;
                        }
                    };

                    tick_count += 1;
                    if !tick_callback(current_time, tick_count) {
                        self.stop();
                        break;
                    }

                    let sleep_duration = self.tick_interval.saturating_sub(started.elapsed());
                    thread::sleep(sleep_duration);
                }
            })
            .map_err(|_| {
                SimError::TimerStartError("Failed to start the timer thread.".to_string())
            })?;

        Ok(())
    }
}
