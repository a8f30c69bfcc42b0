use crate::{coordinate::Coordinate, place::Place};

/// Returns the places whose great-circle distance to `observer` is at most
/// `radius_km` kilometers, in the same order as `places`.
///
/// An unknown observer yields no places. The radius is not validated.
pub fn compute_visible(
    places: &[Place],
    observer: Option<Coordinate>,
    radius_km: f64,
) -> Vec<&Place> {
    let Some(observer) = observer else {
        return Vec::new();
    };
    let max_distance = radius_km * 1000.0;

    places
        .iter()
        .filter(|place| place.distance_from(&observer) <= max_distance)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::sample_places;

    fn names<'a>(places: &[&'a Place]) -> Vec<&'a str> {
        places.iter().map(|p| p.name.as_str()).collect()
    }

    fn park() -> Coordinate {
        Coordinate::from_lat_lon(-26.1952, 28.0436)
    }

    #[test]
    fn test_unknown_observer_shows_nothing() {
        let places = sample_places();
        for radius in [0.0, 1.0, 5.0, 1000.0] {
            assert!(compute_visible(&places, None, radius).is_empty());
        }
    }

    #[test]
    fn test_no_places_shows_nothing() {
        assert!(compute_visible(&[], Some(park()), 5.0).is_empty());
    }

    #[test]
    fn test_observer_at_park_default_radius() {
        let places = sample_places();
        let visible = compute_visible(&places, Some(park()), 5.0);

        assert_eq!(
            names(&visible),
            vec!["Park", "Museum", "Cafe", "Library", "Theater"]
        );
    }

    #[test]
    fn test_observer_at_park_one_kilometer() {
        let places = sample_places();
        let visible = compute_visible(&places, Some(park()), 1.0);

        assert_eq!(names(&visible), vec!["Park", "Museum", "Cafe", "Library"]);
    }

    #[test]
    fn test_zero_radius_only_keeps_exact_matches() {
        let places = sample_places();
        assert_eq!(
            names(&compute_visible(&places, Some(park()), 0.0)),
            vec!["Park"]
        );

        let elsewhere = Coordinate::from_lat_lon(-26.0, 28.0);
        assert!(compute_visible(&places, Some(elsewhere), 0.0).is_empty());
    }

    #[test]
    fn test_far_place_needs_a_wide_radius() {
        let places = sample_places();
        let visible = compute_visible(&places, Some(park()), 13.0);
        assert_eq!(visible.len(), places.len());
    }

    #[test]
    fn test_growing_radius_never_removes_places() {
        let places = sample_places();
        let observer = Coordinate::from_lat_lon(-26.2, 28.05);

        let mut previous: Vec<&str> = Vec::new();
        for step in 0..=40 {
            let radius = step as f64 * 0.5;
            let current = names(&compute_visible(&places, Some(observer), radius));
            for name in &previous {
                assert!(current.contains(name), "{} dropped at {} km", name, radius);
            }
            previous = current;
        }
    }

    #[test]
    fn test_result_matches_distance_threshold() {
        let places = sample_places();
        let observer = Coordinate::from_lat_lon(-26.21, 28.03);

        for radius in [0.5, 1.5, 2.5, 12.0] {
            let visible = compute_visible(&places, Some(observer), radius);
            for place in &places {
                let inside = place.distance_from(&observer) <= radius * 1000.0;
                assert_eq!(visible.contains(&place), inside, "{}", place.name);
            }
        }
    }

    #[test]
    fn test_output_keeps_input_order() {
        let places = vec![
            Place::new("C", -26.1953, 28.0436),
            Place::new("A", -26.1951, 28.0436),
            Place::new("Out", -27.0, 28.0),
            Place::new("B", -26.1952, 28.0437),
        ];

        let visible = compute_visible(&places, Some(park()), 1.0);
        assert_eq!(names(&visible), vec!["C", "A", "B"]);
    }

    #[test]
    fn test_same_inputs_same_output() {
        let places = sample_places();
        let first = compute_visible(&places, Some(park()), 2.0);
        let second = compute_visible(&places, Some(park()), 2.0);
        assert_eq!(first, second);
    }
}
