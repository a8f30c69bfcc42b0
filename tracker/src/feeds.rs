use std::cell::RefCell;

use places::Coordinate;

use crate::{
    collaborators::{GestureProvider, LocationProvider, MoveGesture, RadiusControl},
    subscription::{EventHub, Subscription},
};

/// Location provider fed by whoever owns the position source.
#[derive(Clone, Default)]
pub struct LocationFeed {
    positions: EventHub<Coordinate>,
    bearings: EventHub<f64>,
}

impl LocationFeed {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_position(&self, position: Coordinate) {
        self.positions.publish(&position);
    }

    pub fn push_bearing(&self, bearing: f64) {
        self.bearings.publish(&bearing);
    }

    /// Number of listeners currently following the position.
    pub fn position_listeners(&self) -> usize {
        self.positions.listener_count()
    }

    pub fn bearing_listeners(&self) -> usize {
        self.bearings.listener_count()
    }
}

impl LocationProvider for LocationFeed {
    fn subscribe_position(&self, listener: Box<dyn FnMut(&Coordinate)>) -> Subscription {
        self.positions.subscribe(listener)
    }

    fn subscribe_bearing(&self, listener: Box<dyn FnMut(&f64)>) -> Subscription {
        self.bearings.subscribe(listener)
    }
}

/// Gesture provider fed by the map widget.
#[derive(Clone, Default)]
pub struct GestureFeed {
    moves: EventHub<MoveGesture>,
}

impl GestureFeed {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, gesture: MoveGesture) {
        self.moves.publish(&gesture);
    }

    pub fn listeners(&self) -> usize {
        self.moves.listener_count()
    }
}

impl GestureProvider for GestureFeed {
    fn subscribe_moves(&self, listener: Box<dyn FnMut(&MoveGesture)>) -> Subscription {
        self.moves.subscribe(listener)
    }
}

/// Radius slider state: the value the user drags and the readout shown for it.
pub struct RadiusSlider {
    changes: EventHub<f64>,
    readout: RefCell<(f64, String)>,
}

impl Default for RadiusSlider {
    fn default() -> Self {
        Self::new()
    }
}

impl RadiusSlider {
    pub fn new() -> Self {
        Self {
            changes: EventHub::new(),
            readout: RefCell::new((0.0, String::new())),
        }
    }

    /// The user moved the slider to `value_km`.
    pub fn slide(&self, value_km: f64) {
        self.changes.publish(&value_km);
    }

    pub fn value(&self) -> f64 {
        self.readout.borrow().0
    }

    pub fn label(&self) -> String {
        self.readout.borrow().1.clone()
    }

    pub fn listeners(&self) -> usize {
        self.changes.listener_count()
    }
}

impl RadiusControl for RadiusSlider {
    fn subscribe_radius(&self, listener: Box<dyn FnMut(&f64)>) -> Subscription {
        self.changes.subscribe(listener)
    }

    fn display(&self, value_km: f64, label: &str) {
        *self.readout.borrow_mut() = (value_km, label.to_string());
    }
}
