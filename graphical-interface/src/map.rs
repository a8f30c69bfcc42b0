use std::{cell::RefCell, rc::Rc, sync::mpsc::Receiver, time::Duration};

use egui::{Context, Response};
use egui_extras::install_image_loaders;
use location_sim::{Fix, SimulatedWalk};
use logger::Color;
use tracker::{
    GestureFeed, LocationFeed, MoveGesture, NearbyScreen, RadiusSlider, ScreenCollaborators,
    TrackingState,
};
use walkers::{HttpOptions, HttpTiles, Map, MapMemory, Tiles};

use crate::{
    errors::AppError,
    plugins,
    state::{to_position, SelectionState, SharedNotices, SharedScene},
    widgets::{show_notices, DialogGate, WidgetPlaces, WidgetRadius, WidgetStatus},
    windows, AppOptions,
};

const INITIAL_ZOOM: f64 = 14.;
const UPDATE_TICK_MS: u64 = 250;

/// The nearby places window.
///
/// `NearbyApp` plays the platform around the screen controller: it feeds the
/// simulated location fixes and the map gestures in, shows the permission
/// prompt, and draws whatever the controller put on the scene.
pub struct NearbyApp {
    tiles: Box<dyn Tiles>,
    map_memory: MapMemory,
    scene: SharedScene,
    notices: SharedNotices,
    permission_dialog: DialogGate,
    selection_state: Rc<RefCell<SelectionState>>,
    location: Rc<LocationFeed>,
    gestures: Rc<GestureFeed>,
    radius_widget: WidgetRadius,
    screen: NearbyScreen,
    walk: SimulatedWalk,
    fixes: Receiver<Fix>,
    last_fix: Option<Fix>,
    style_loaded: bool,
    logger: logger::Logger,
}

impl NearbyApp {
    pub fn new(egui_ctx: Context, options: AppOptions) -> Result<Self, AppError> {
        install_image_loaders(&egui_ctx);
        let mut initial_map_memory = MapMemory::default();
        let _ = initial_map_memory.set_zoom(INITIAL_ZOOM);

        let AppOptions {
            places,
            settings,
            grant_location,
            route,
            time_rate,
            tick_interval,
            jitter_m,
            logger,
        } = options;

        let scene = SharedScene::new(settings.initial_camera);
        let notices = SharedNotices::default();
        let permission_dialog = DialogGate::new(grant_location);
        let location = Rc::new(LocationFeed::new());
        let gestures = Rc::new(GestureFeed::new());
        let slider = Rc::new(RadiusSlider::new());
        let radius_widget = WidgetRadius::new(
            Rc::clone(&slider),
            settings.slider_min_km,
            settings.slider_max_km,
        );

        let screen = NearbyScreen::new(
            places,
            settings,
            ScreenCollaborators {
                location: location.clone(),
                gestures: gestures.clone(),
                radius_control: slider,
                map: Box::new(scene.clone()),
                notifier: Box::new(notices.clone()),
                permissions: Box::new(permission_dialog.clone()),
            },
            logger.clone(),
        )?;

        let started_at = chrono::Local::now().naive_local();
        let walk = SimulatedWalk::new(route, started_at, time_rate, tick_interval, jitter_m)?;
        let fixes = walk.start()?;

        let _ = logger.info("Location simulation started", Color::Cyan, true);

        Ok(Self {
            tiles: Box::new(HttpTiles::with_options(
                walkers::sources::OpenStreetMap,
                HttpOptions::default(),
                egui_ctx.to_owned(),
            )),
            map_memory: initial_map_memory,
            scene,
            notices,
            permission_dialog,
            selection_state: Rc::new(RefCell::new(SelectionState::new())),
            location,
            gestures,
            radius_widget,
            screen,
            walk,
            fixes,
            last_fix: None,
            style_loaded: false,
            logger,
        })
    }

    /// Hands every fix received since the last frame to the location feed.
    fn drain_fixes(&mut self) {
        let fixes: Vec<Fix> = self.fixes.try_iter().collect();
        for fix in fixes {
            self.location.push_position(fix.coordinate);
            self.location.push_bearing(fix.bearing);
            self.last_fix = Some(fix);
        }
    }

    fn forward_gestures(&self, response: &Response) {
        let gesture = gesture_for(
            response.drag_started(),
            response.dragged(),
            response.drag_stopped(),
        );
        if let Some(gesture) = gesture {
            self.gestures.push(gesture);
        }
    }

    /// The puck shows once the location component is enabled.
    fn puck_fix(&self) -> Option<&Fix> {
        match self.screen.tracking_state() {
            TrackingState::Tracking | TrackingState::Dismissed => self.last_fix.as_ref(),
            _ => None,
        }
    }

    fn toggle_walk(&mut self) {
        if self.walk.is_paused() {
            self.walk.resume();
            let _ = self.logger.info("Location simulation resumed", Color::Cyan, false);
        } else {
            self.walk.pause();
            let _ = self.logger.info("Location simulation paused", Color::Cyan, false);
        }
    }
}

/// Map drag state to the gesture it stands for. A drag that starts is
/// reported as `Begin` even though egui also flags it as dragged.
fn gesture_for(drag_started: bool, dragged: bool, drag_stopped: bool) -> Option<MoveGesture> {
    if drag_started {
        Some(MoveGesture::Begin)
    } else if drag_stopped {
        Some(MoveGesture::End)
    } else if dragged {
        Some(MoveGesture::Move)
    } else {
        None
    }
}

/// While tracking, the puck turns with the bearing the screen gave the
/// camera. Once tracking stops the camera no longer gets bearings, so the
/// puck follows the raw heading of the fix.
fn puck_heading(tracking: TrackingState, camera_bearing: f64, fix_heading: f64) -> f64 {
    match tracking {
        TrackingState::Tracking => camera_bearing,
        _ => fix_heading,
    }
}

impl eframe::App for NearbyApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Tiles are requested on construction, so the first frame is the
        // earliest point where the map can be considered loaded.
        if !self.style_loaded {
            self.style_loaded = true;
            self.screen.on_style_loaded();
        }

        if let Some((callback, response)) = self.permission_dialog.show(ctx) {
            callback(response);
        }

        self.drain_fixes();

        ctx.request_repaint_after(Duration::from_millis(UPDATE_TICK_MS));

        let rimless = egui::Frame {
            fill: ctx.style().visuals.panel_fill,
            ..Default::default()
        };

        egui::CentralPanel::default()
            .frame(rimless)
            .show(ctx, |ui| {
                let tracking = self.screen.tracking_state();
                let puck = self
                    .puck_fix()
                    .map(|fix| (to_position(fix.coordinate), fix.bearing));

                let response = {
                    let scene = self.scene.0.borrow();

                    let tiles = self.tiles.as_mut();

                    let places_plugin =
                        plugins::Places::new(&scene.markers, self.selection_state.clone());

                    let puck_plugin = plugins::LocationPuck::new(
                        puck.map(|(position, _)| position),
                        puck.map_or(0.0, |(_, heading)| {
                            puck_heading(tracking, scene.camera_bearing, heading)
                        }),
                        scene.focal_point,
                    );

                    let map = Map::new(Some(tiles), &mut self.map_memory, scene.camera_center)
                        .with_plugin(places_plugin)
                        .with_plugin(puck_plugin);

                    ui.add(map)
                };

                self.forward_gestures(&response);

                let rendered = self.screen.rendered_places();
                ui.add(WidgetPlaces::new(
                    &rendered,
                    self.screen.observer(),
                    &mut self.selection_state.borrow_mut(),
                ));

                self.radius_widget.show(ctx);

                let toggle_walk = WidgetStatus {
                    tracking: self.screen.tracking_state(),
                    last_fix: self.last_fix.as_ref(),
                    camera_bearing: self.scene.0.borrow().camera_bearing,
                    walk_paused: self.walk.is_paused(),
                }
                .show(ctx);
                if toggle_walk {
                    self.toggle_walk();
                }

                show_notices(ctx, &self.notices);

                {
                    use windows::*;
                    zoom(ui, &mut self.map_memory);
                }
            });
    }
}

impl Drop for NearbyApp {
    fn drop(&mut self) {
        self.screen.teardown();
        self.walk.stop();
        let _ = self.logger.info("Nearby places closed", Color::Cyan, true);
    }
}
