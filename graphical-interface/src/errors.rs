use std::fmt;

use location_sim::SimError;
use tracker::TrackerError;

/// Errors that keep the app from starting.
#[derive(Debug)]
pub enum AppError {
    Screen(TrackerError),
    Simulation(SimError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Screen(e) => write!(f, "Invalid screen settings: {}", e),
            AppError::Simulation(e) => write!(f, "Location simulation failed: {}", e),
        }
    }
}

impl std::error::Error for AppError {}

impl From<TrackerError> for AppError {
    fn from(error: TrackerError) -> Self {
        AppError::Screen(error)
    }
}

impl From<SimError> for AppError {
    fn from(error: SimError) -> Self {
        AppError::Simulation(error)
    }
}
