//! The outside world as seen by the screen controller.
//!
//! Inputs arrive through subscription interfaces (`LocationProvider`,
//! `GestureProvider`, `RadiusControl`); outputs go to the map, the notifier
//! and the radius readout.

use std::collections::HashMap;

use places::Coordinate;

use crate::subscription::Subscription;

/// Emits the observer's position and heading.
pub trait LocationProvider {
    fn subscribe_position(&self, listener: Box<dyn FnMut(&Coordinate)>) -> Subscription;

    /// Bearing updates, in degrees clockwise from north.
    fn subscribe_bearing(&self, listener: Box<dyn FnMut(&f64)>) -> Subscription;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveGesture {
    Begin,
    Move,
    End,
}

/// Emits the drag gestures performed on the map.
pub trait GestureProvider {
    fn subscribe_moves(&self, listener: Box<dyn FnMut(&MoveGesture)>) -> Subscription;
}

/// The radius slider.
pub trait RadiusControl {
    /// New slider values, in kilometers.
    fn subscribe_radius(&self, listener: Box<dyn FnMut(&f64)>) -> Subscription;

    /// Shows `value_km` on the slider and `label` next to it.
    fn display(&self, value_km: f64, label: &str);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Permission {
    FineLocation,
    CoarseLocation,
}

/// Answer to a permission request: granted or denied, per permission asked.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PermissionResponse {
    pub results: HashMap<Permission, bool>,
}

impl PermissionResponse {
    pub fn new(results: &[(Permission, bool)]) -> Self {
        Self {
            results: results.iter().copied().collect(),
        }
    }

    pub fn is_granted(&self, permission: Permission) -> bool {
        self.results.get(&permission).copied().unwrap_or(false)
    }

    /// Location is usable with either precise or approximate access.
    pub fn location_granted(&self) -> bool {
        self.is_granted(Permission::FineLocation) || self.is_granted(Permission::CoarseLocation)
    }
}

pub type PermissionCallback = Box<dyn FnOnce(PermissionResponse)>;

/// The runtime permission system.
pub trait PermissionGate {
    fn has_location_permission(&self) -> bool;

    /// Asks the user for `permissions`. `on_result` is called once, possibly
    /// before this method returns.
    fn request(&mut self, permissions: &[Permission], on_result: PermissionCallback);
}

/// A labeled pin on the map.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub coordinate: Coordinate,
    pub label: String,
    pub text_offset: [f32; 2],
    pub text_color: String,
    pub text_size: f32,
    pub icon: String,
}

/// The map view: annotation layer plus camera.
pub trait MapSurface {
    fn clear_markers(&mut self);

    fn add_marker(&mut self, marker: Marker);

    fn set_camera_center(&mut self, center: Coordinate);

    fn set_camera_bearing(&mut self, bearing: f64);

    /// Point the zoom and rotate gestures pivot around.
    fn set_focal_point(&mut self, focal_point: Coordinate);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeDuration {
    Short,
    Long,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    PermissionDenied,
    TrackingDismissed,
}

impl Notice {
    pub fn text(&self) -> &'static str {
        match self {
            Notice::PermissionDenied => "Location permission not granted.",
            Notice::TrackingDismissed => "Camera tracking dismissed",
        }
    }

    pub fn duration(&self) -> NoticeDuration {
        match self {
            Notice::PermissionDenied => NoticeDuration::Long,
            Notice::TrackingDismissed => NoticeDuration::Short,
        }
    }
}

/// Shows transient messages to the user.
pub trait Notifier {
    fn notify(&mut self, notice: Notice);
}
