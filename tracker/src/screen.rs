use std::{
    cell::RefCell,
    rc::{Rc, Weak},
};

use logger::{Color, Logger};
use places::{compute_visible, Coordinate, Place, SearchRadius};

use crate::{
    collaborators::{
        GestureProvider, LocationProvider, MapSurface, MoveGesture, Notice, Notifier,
        Permission, PermissionGate, PermissionResponse, RadiusControl,
    },
    errors::TrackerError,
    latch::FirstFixLatch,
    settings::{RecomputePolicy, ScreenSettings},
    subscription::Subscription,
};

/// Where the screen stands with respect to location tracking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackingState {
    /// The map style has not loaded yet.
    Idle,
    AwaitingPermission,
    /// Following the observer: the camera recenters on every fix.
    Tracking,
    /// The user dragged the map; fixes are no longer followed.
    Dismissed,
    Denied,
    TornDown,
}

/// Everything the screen talks to.
pub struct ScreenCollaborators {
    pub location: Rc<dyn LocationProvider>,
    pub gestures: Rc<dyn GestureProvider>,
    pub radius_control: Rc<dyn RadiusControl>,
    pub map: Box<dyn MapSurface>,
    pub notifier: Box<dyn Notifier>,
    pub permissions: Box<dyn PermissionGate>,
}

struct ScreenState {
    this: Weak<RefCell<ScreenState>>,
    places: Vec<Place>,
    observer: Option<Coordinate>,
    radius: SearchRadius,
    first_fix: FirstFixLatch,
    settings: ScreenSettings,
    tracking: TrackingState,
    rendered: Vec<Place>,
    recomputations: usize,
    location: Rc<dyn LocationProvider>,
    gestures: Rc<dyn GestureProvider>,
    radius_control: Rc<dyn RadiusControl>,
    map: Box<dyn MapSurface>,
    notifier: Box<dyn Notifier>,
    logger: Logger,
    position_subscription: Option<Subscription>,
    bearing_subscription: Option<Subscription>,
    move_subscription: Option<Subscription>,
    radius_subscription: Option<Subscription>,
}

/// Controller of the nearby places screen.
///
/// Keeps the observer position and the search radius, listens to location,
/// gesture and slider events, and redraws the place markers whenever the
/// filtered set has to be computed again:
///
/// - on the first position fix,
/// - on every radius change,
/// - on every later fix too, only with [`RecomputePolicy::EveryFix`].
///
/// All handlers run on the thread that publishes the events.
pub struct NearbyScreen {
    state: Rc<RefCell<ScreenState>>,
    permissions: Box<dyn PermissionGate>,
}

impl NearbyScreen {
    pub fn new(
        places: Vec<Place>,
        settings: ScreenSettings,
        collaborators: ScreenCollaborators,
        logger: Logger,
    ) -> Result<Self, TrackerError> {
        settings.validate()?;

        let ScreenCollaborators {
            location,
            gestures,
            radius_control,
            map,
            notifier,
            permissions,
        } = collaborators;

        let state = Rc::new_cyclic(|this| {
            RefCell::new(ScreenState {
                this: this.clone(),
                places,
                observer: None,
                radius: SearchRadius::from_km(settings.default_radius_km),
                first_fix: FirstFixLatch::new(),
                settings,
                tracking: TrackingState::Idle,
                rendered: Vec::new(),
                recomputations: 0,
                location,
                gestures,
                radius_control,
                map,
                notifier,
                logger,
                position_subscription: None,
                bearing_subscription: None,
                move_subscription: None,
                radius_subscription: None,
            })
        });

        Ok(Self { state, permissions })
    }

    /// Entry point once the map style is ready: checks the location
    /// permission (asking for it when needed) and sets up the radius slider.
    ///
    /// Only the first call has any effect.
    pub fn on_style_loaded(&mut self) {
        let has_permission = {
            let mut state = self.state.borrow_mut();
            if state.tracking != TrackingState::Idle {
                return;
            }
            state.tracking = TrackingState::AwaitingPermission;
            self.permissions.has_location_permission()
        };

        if has_permission {
            self.state.borrow_mut().start_tracking();
        } else {
            let _ = self
                .state
                .borrow()
                .logger
                .info("Requesting location permission", Color::Blue, false);

            let this = Rc::downgrade(&self.state);
            self.permissions.request(
                &[Permission::FineLocation, Permission::CoarseLocation],
                Box::new(move |response: PermissionResponse| {
                    if let Some(state) = this.upgrade() {
                        state.borrow_mut().on_permission_result(&response);
                    }
                }),
            );
        }

        self.state.borrow_mut().setup_slider();
    }

    /// Detaches every listener. Nothing is recomputed afterwards.
    pub fn teardown(&mut self) {
        self.state.borrow_mut().teardown();
    }

    pub fn observer(&self) -> Option<Coordinate> {
        self.state.borrow().observer
    }

    pub fn radius(&self) -> SearchRadius {
        self.state.borrow().radius
    }

    pub fn tracking_state(&self) -> TrackingState {
        self.state.borrow().tracking
    }

    pub fn has_first_fix(&self) -> bool {
        self.state.borrow().first_fix.has_fired()
    }

    /// Places drawn by the last recomputation, in catalog order.
    pub fn rendered_places(&self) -> Vec<Place> {
        self.state.borrow().rendered.clone()
    }

    /// How many times the markers have been redrawn.
    pub fn recomputations(&self) -> usize {
        self.state.borrow().recomputations
    }}

impl ScreenState {
    fn on_permission_result(&mut self, response: &PermissionResponse) {
        if self.tracking != TrackingState::AwaitingPermission {
            return;
        }

        if response.location_granted() {
            self.start_tracking();
        } else {
            self.tracking = TrackingState::Denied;
            let _ = self.logger.warn("Location permission denied", false);
            self.notifier.notify(Notice::PermissionDenied);
        }
    }

    fn start_tracking(&mut self) {
        let this = self.this.clone();
        self.position_subscription = Some(self.location.subscribe_position(Box::new(
            move |position: &Coordinate| {
                if let Some(state) = this.upgrade() {
                    state.borrow_mut().on_position_changed(*position);
                }
            },
        )));

        let this = self.this.clone();
        self.bearing_subscription = Some(self.location.subscribe_bearing(Box::new(
            move |bearing: &f64| {
                if let Some(state) = this.upgrade() {
                    state.borrow_mut().on_bearing_changed(*bearing);
                }
            },
        )));

        let this = self.this.clone();
        self.move_subscription = Some(self.gestures.subscribe_moves(Box::new(
            move |gesture: &MoveGesture| {
                if let Some(state) = this.upgrade() {
                    state.borrow_mut().on_move(*gesture);
                }
            },
        )));

        self.tracking = TrackingState::Tracking;
        let _ = self.logger.info("Location tracking started", Color::Green, false);
    }

    fn setup_slider(&mut self) {
        self.radius_control.display(self.radius.km(), &self.radius.label());

        let this = self.this.clone();
        self.radius_subscription = Some(self.radius_control.subscribe_radius(Box::new(
            move |value: &f64| {
                if let Some(state) = this.upgrade() {
                    state.borrow_mut().on_radius_changed(*value);
                }
            },
        )));
    }

    fn on_position_changed(&mut self, position: Coordinate) {
        if self.tracking != TrackingState::Tracking {
            return;
        }

        self.observer = Some(position);
        self.map.set_camera_center(position);
        self.map.set_focal_point(position);

        let first_fix = self.first_fix.fire();
        if first_fix {
            let _ = self.logger.info(
                &format!(
                    "First fix at ({:.5}, {:.5})",
                    position.latitude, position.longitude
                ),
                Color::Green,
                false,
            );
        }

        if first_fix || self.settings.policy == RecomputePolicy::EveryFix {
            self.refresh_markers();
        }
    }

    fn on_bearing_changed(&mut self, bearing: f64) {
        if self.tracking != TrackingState::Tracking {
            return;
        }
        self.map.set_camera_bearing(bearing);
    }

    fn on_move(&mut self, gesture: MoveGesture) {
        if gesture == MoveGesture::Begin {
            self.dismiss_tracking();
        }
    }

    fn dismiss_tracking(&mut self) {
        self.notifier.notify(Notice::TrackingDismissed);

        if let Some(subscription) = self.position_subscription.as_mut() {
            subscription.unsubscribe();
        }
        if let Some(subscription) = self.bearing_subscription.as_mut() {
            subscription.unsubscribe();
        }

        if self.tracking == TrackingState::Tracking {
            self.tracking = TrackingState::Dismissed;
            let _ = self.logger.info("Camera tracking dismissed", Color::Yellow, false);
        }
    }

    fn on_radius_changed(&mut self, value_km: f64) {
        if self.tracking == TrackingState::TornDown {
            return;
        }

        self.radius = SearchRadius::from_km(value_km);
        self.radius_control.display(self.radius.km(), &self.radius.label());
        self.refresh_markers();
    }

    fn refresh_markers(&mut self) {
        let visible = compute_visible(&self.places, self.observer, self.radius.km());

        self.map.clear_markers();
        for place in &visible {
            self.map.add_marker(self.settings.marker_style.marker_for(place));
        }

        let _ = self.logger.info(
            &format!(
                "{} of {} places within {} km",
                visible.len(),
                self.places.len(),
                self.radius.km()
            ),
            Color::Cyan,
            false,
        );

        self.rendered = visible.into_iter().cloned().collect();
        self.recomputations += 1;
    }

    fn teardown(&mut self) {
        if self.tracking == TrackingState::TornDown {
            return;
        }

        for subscription in [
            self.bearing_subscription.as_mut(),
            self.position_subscription.as_mut(),
            self.move_subscription.as_mut(),
            self.radius_subscription.as_mut(),
        ]
        .into_iter()
        .flatten()
        {
            subscription.unsubscribe();
        }

        self.observer = None;
        self.rendered.clear();
        self.map.clear_markers();
        self.tracking = TrackingState::TornDown;
        let _ = self.logger.info("Screen torn down", Color::Magenta, false);
    }
}
