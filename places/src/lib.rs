//! Places of interest and the radius filter that decides which of them are
//! close enough to the observer to be shown on the map.

pub mod catalog;
pub mod coordinate;
pub mod errors;
pub mod filter;
pub mod place;
pub mod radius;

pub use catalog::{load_places, places_from_reader, sample_places};
pub use coordinate::{haversine_distance, Coordinate};
pub use errors::PlacesError;
pub use filter::compute_visible;
pub use place::Place;
pub use radius::{SearchRadius, DEFAULT_RADIUS_KM};
