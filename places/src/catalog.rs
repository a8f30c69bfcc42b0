use std::{fs::File, io::Read, path::Path};

use serde::Deserialize;

use crate::{errors::PlacesError, place::Place};

/// One row of a place catalog file.
#[derive(Debug, Deserialize)]
struct PlaceRecord {
    name: String,
    latitude: f64,
    longitude: f64,
}

/// The built-in places, spread around central Johannesburg.
pub fn sample_places() -> Vec<Place> {
    vec![
        Place::new("Park", -26.1952, 28.0436),
        Place::new("Museum", -26.2023, 28.0399),
        Place::new("Cafe", -26.1984, 28.0478),
        Place::new("Library", -26.1905, 28.0410),
        Place::new("Theater", -26.2051, 28.0495),
        // Outside the default radius.
        Place::new("Restaurant (Far)", -26.25, 28.15),
    ]
}

/// Loads a catalog from a CSV file with a `name,latitude,longitude` header.
pub fn load_places(path: &Path) -> Result<Vec<Place>, PlacesError> {
    let file = File::open(path)?;
    places_from_reader(file)
}

/// Parses a catalog from any CSV source. An empty catalog is valid.
pub fn places_from_reader<R: Read>(reader: R) -> Result<Vec<Place>, PlacesError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut places = Vec::new();
    for record in csv_reader.deserialize() {
        let record: PlaceRecord = record?;
        let place = Place::new(&record.name, record.latitude, record.longitude);

        if !place.coordinate.is_valid() {
            return Err(PlacesError::InvalidCoordinate {
                name: record.name,
                latitude: record.latitude,
                longitude: record.longitude,
            });
        }
        places.push(place);
    }

    Ok(places)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_places() {
        let places = sample_places();
        assert_eq!(places.len(), 6);
        assert_eq!(places[0].name, "Park");
        assert_eq!(places[5].name, "Restaurant (Far)");
        assert!(places.iter().all(|p| p.coordinate.is_valid()));
    }

    #[test]
    fn test_parse_catalog() {
        let data = "name,latitude,longitude\nPark, -26.1952, 28.0436\nZoo,-26.16,28.01\n";
        let places = places_from_reader(data.as_bytes()).expect("valid catalog");

        assert_eq!(places.len(), 2);
        assert_eq!(places[0], Place::new("Park", -26.1952, 28.0436));
        assert_eq!(places[1].name, "Zoo");
    }

    #[test]
    fn test_empty_catalog() {
        let places = places_from_reader("name,latitude,longitude\n".as_bytes()).unwrap();
        assert!(places.is_empty());
    }

    #[test]
    fn test_invalid_latitude_is_rejected() {
        let data = "name,latitude,longitude\nNowhere,123.0,28.0\n";
        match places_from_reader(data.as_bytes()) {
            Err(PlacesError::InvalidCoordinate { name, .. }) => assert_eq!(name, "Nowhere"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_malformed_row_is_rejected() {
        let data = "name,latitude,longitude\nPark,north,28.0\n";
        assert!(matches!(
            places_from_reader(data.as_bytes()),
            Err(PlacesError::Csv(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        let result = load_places(Path::new("/nonexistent/places.csv"));
        assert!(matches!(result, Err(PlacesError::Io(_))));
    }
}
