//! Screen controller for the nearby places map.
//!
//! The controller owns the observer position and the search radius, reacts to
//! location, gesture and slider events, and keeps the map markers in sync with
//! the places inside the radius.

pub mod collaborators;
pub mod errors;
pub mod feeds;
mod latch;
pub mod screen;
pub mod settings;
pub mod subscription;

pub use collaborators::{
    GestureProvider, LocationProvider, MapSurface, Marker, MoveGesture, Notice, NoticeDuration,
    Notifier, Permission, PermissionCallback, PermissionGate, PermissionResponse, RadiusControl,
};
pub use errors::TrackerError;
pub use feeds::{GestureFeed, LocationFeed, RadiusSlider};
pub use latch::FirstFixLatch;
pub use screen::{NearbyScreen, ScreenCollaborators, TrackingState};
pub use settings::{MarkerStyle, RecomputePolicy, ScreenSettings};
pub use subscription::{EventHub, Subscription};
