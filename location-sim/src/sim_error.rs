use std::fmt;

/// Represents errors that can occur while simulating a location source.
#[derive(Debug, PartialEq)]
pub enum SimError {
    EmptyRoute,
    InvalidSpeed(String),
    InvalidDuration(String),
    TimerLockError(String),
    TimerStartError(String),
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimError::EmptyRoute => write!(f, "A route needs at least one waypoint"),
            SimError::InvalidSpeed(speed) => write!(f, "Invalid walking speed: {}", speed),
            SimError::InvalidDuration(msg) => write!(f, "Invalid duration: {}", msg),
            SimError::TimerLockError(msg) => write!(f, "Timer lock error: {}", msg),
            SimError::TimerStartError(msg) => write!(f, "Timer start error: {}", msg),
        }
    }
}

impl std::error::Error for SimError {}
