use std::fmt::{self, Display};

/// Enum representing the possible errors that can occur while building a place catalog.
///
/// The possible errors are:
///
/// - `Io`: the catalog file could not be opened or read.
/// - `Csv`: a row of the catalog could not be parsed.
/// - `InvalidCoordinate`: a place has a latitude or longitude outside the valid range.
#[derive(Debug)]
pub enum PlacesError {
    Io(std::io::Error),
    Csv(String),
    InvalidCoordinate {
        name: String,
        latitude: f64,
        longitude: f64,
    },
}

impl Display for PlacesError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlacesError::Io(e) => write!(f, "[Io]: Could not read the catalog: {}", e),
            PlacesError::Csv(msg) => write!(f, "[Csv]: Malformed catalog row: {}", msg),
            PlacesError::InvalidCoordinate {
                name,
                latitude,
                longitude,
            } => write!(
                f,
                "[InvalidCoordinate]: '{}' has an invalid position ({}, {})",
                name, latitude, longitude
            ),
        }
    }
}

impl std::error::Error for PlacesError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PlacesError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for PlacesError {
    fn from(err: std::io::Error) -> Self {
        PlacesError::Io(err)
    }
}

impl From<csv::Error> for PlacesError {
    fn from(err: csv::Error) -> Self {
        PlacesError::Csv(err.to_string())
    }
}
