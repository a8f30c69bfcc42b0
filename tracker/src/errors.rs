use std::fmt;

/// Errors raised while configuring the nearby places screen.
#[derive(Debug, PartialEq)]
pub enum TrackerError {
    /// The slider range is empty or does not start at a non-negative value.
    InvalidSliderRange { min: f64, max: f64 },
    /// The starting radius is not positive or falls outside the slider range.
    InvalidDefaultRadius(f64),
}

impl fmt::Display for TrackerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrackerError::InvalidSliderRange { min, max } => {
                write!(f, "Invalid slider range: {} to {} km", min, max)
            }
            TrackerError::InvalidDefaultRadius(radius) => {
                write!(f, "Invalid default radius: {} km", radius)
            }
        }
    }
}

impl std::error::Error for TrackerError {}
